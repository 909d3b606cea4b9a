use crate::cli::Args;
use crate::config::Config;
use crate::data_fetcher::models::Fixture;
use crate::data_fetcher::{FixtureService, fetch_fixtures};
use crate::error::AppError;
use crate::schedule_view::{filter_fixtures, next_upcoming, render_fixtures};
use tracing::{error, info};

/// Shown when the fixture list cannot be fetched, whatever the cause.
pub const SERVICE_UNAVAILABLE_MESSAGE: &str =
    "Cannot reach the schedule service right now. Please try again later.";

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    Config::display().await
}

/// Applies configuration changes from the command line to `config`.
///
/// Returns a message for each change made.
pub fn apply_config_update(config: &mut Config, args: &Args) -> Vec<String> {
    let mut messages = Vec::new();

    if let Some(calendar_id) = &args.new_calendar_id {
        config.calendar_id = calendar_id.trim().to_string();
        messages.push(format!("Calendar id set to {}", config.calendar_id));
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
        messages.push(format!("Log file set to {new_log_path}"));
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        messages.push("Custom log file path cleared. Using default location.".to_string());
    }

    messages
}

/// Handles configuration update commands (--set-calendar-id, --set-log-file, --clear-log-file).
///
/// Starts from the stored file (or defaults), validates the result and saves it.
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let config_path = Config::get_config_path();
    let mut config = if std::path::Path::new(&config_path).exists() {
        Config::load_from_path(&config_path).await?
    } else {
        Config::default()
    };

    for message in apply_config_update(&mut config, args) {
        println!("{message}");
    }

    config.validate()?;
    config.save().await?;
    println!("Config updated successfully!");

    Ok(())
}

/// Picks what to print from a sorted fixture list.
pub fn select_fixtures<'a>(fixtures: &'a [Fixture], args: &Args) -> Vec<&'a Fixture> {
    let filtered = filter_fixtures(fixtures, args.filter, args.month);
    if args.next {
        next_upcoming(filtered).into_iter().collect()
    } else {
        filtered
    }
}

/// Formats the selection as text or JSON.
pub fn format_output(fixtures: &[&Fixture], json: bool) -> Result<String, AppError> {
    if json {
        Ok(serde_json::to_string_pretty(fixtures)?)
    } else {
        Ok(render_fixtures(fixtures))
    }
}

/// Fetches the fixture list and prints the selection.
///
/// Any fetch failure is logged with its cause and surfaced to the user as one
/// generic message.
pub async fn handle_fixtures_command(args: &Args, config: &Config) -> Result<(), AppError> {
    let result = match &args.calendar_id {
        Some(calendar_id) => {
            let mut one_off = config.clone();
            one_off.calendar_id = calendar_id.trim().to_string();
            one_off.validate()?;
            FixtureService::from_config(&one_off)?.get_fixtures().await
        }
        None => fetch_fixtures(config).await,
    };

    let fixtures = match result {
        Ok(fixtures) => fixtures,
        Err(e) => {
            error!("Failed to fetch fixtures: {e}");
            if let Some(cause) = e.last_relay_error() {
                error!("Last relay error: {cause}");
            }
            return Err(e);
        }
    };

    let selected = select_fixtures(&fixtures, args);
    info!(
        "Showing {} of {} fixtures",
        selected.len(),
        fixtures.len()
    );
    println!("{}", format_output(&selected, args.json)?);

    Ok(())
}
