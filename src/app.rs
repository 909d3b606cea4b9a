use crate::cli::{Args, is_config_command};
use crate::commands::{
    SERVICE_UNAVAILABLE_MESSAGE, handle_config_update_command, handle_fixtures_command,
    handle_list_config_command,
};
use crate::config::Config;
use crate::error::AppError;
use crate::logging::setup_logging;

/// Runs one invocation of the command line tool.
///
/// - Sets up file logging (plus stdout with `--debug`)
/// - Handles configuration commands and exits
/// - Otherwise fetches and prints the fixture list
pub async fn run(args: Args) -> Result<(), AppError> {
    let config = Config::load().await;

    let config_log_path = config
        .as_ref()
        .ok()
        .and_then(|config| config.log_file_path.clone());
    let (log_file_path, _guard) = setup_logging(
        &args,
        config_log_path.as_deref(),
        &Config::get_log_dir_path(),
    )
    .await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    if args.list_config {
        return handle_list_config_command().await;
    }

    if is_config_command(&args) {
        return handle_config_update_command(&args).await;
    }

    let config = config?;
    handle_fixtures_command(&args, &config).await
}

/// What the user sees for a failed run. Fetch failures get one generic
/// message; configuration and local errors are shown as they are.
pub fn user_message(error: &AppError) -> String {
    match error {
        AppError::AllRelaysFailed { .. } | AppError::NoRelaysConfigured => {
            SERVICE_UNAVAILABLE_MESSAGE.to_string()
        }
        e if e.is_relay_failure() => SERVICE_UNAVAILABLE_MESSAGE.to_string(),
        e => format!("Error: {e}"),
    }
}
