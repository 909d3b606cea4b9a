use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

use crate::schedule_view::{FilterType, Month};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// True when the invocation only changes or shows configuration.
pub fn is_config_command(args: &Args) -> bool {
    args.new_calendar_id.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
        || args.list_config
}

/// London Titans fixture list
///
/// Reads the club's public Google Calendar through a chain of public relays,
/// classifies each event (home/away, opponent, competition, score) and prints
/// the fixtures sorted by kick-off.
#[derive(Parser, Debug, Default)]
#[command(about, version, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Read this calendar instead of the configured one (not saved).
    #[arg(long = "calendar-id", value_name = "ID", help_heading = "Fixtures")]
    pub calendar_id: Option<String>,

    /// Only show fixtures in this month (YYYY-MM, local time).
    #[arg(long = "month", short = 'm', value_name = "YYYY-MM", help_heading = "Fixtures")]
    pub month: Option<Month>,

    /// Only show home or away fixtures.
    #[arg(
        long = "filter",
        short = 'f',
        value_enum,
        default_value_t = FilterType::All,
        help_heading = "Fixtures"
    )]
    pub filter: FilterType,

    /// Only show the next upcoming fixture.
    #[arg(long = "next", short = 'n', help_heading = "Fixtures")]
    pub next: bool,

    /// Print fixtures as JSON instead of text.
    #[arg(long = "json", help_heading = "Fixtures")]
    pub json: bool,

    /// Update the calendar id in config.
    #[arg(long = "set-calendar-id", value_name = "ID", help_heading = "Configuration")]
    pub new_calendar_id: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", value_name = "PATH", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Also write logs to stdout.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", value_name = "PATH", help_heading = "Debug")]
    pub log_file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["titans_fixtures"]).unwrap();
        assert_eq!(args.filter, FilterType::All);
        assert!(args.month.is_none());
        assert!(!args.next && !args.json && !args.debug);
        assert!(!is_config_command(&args));
    }

    #[test]
    fn test_fixture_options() {
        let args = Args::try_parse_from([
            "titans_fixtures",
            "--month",
            "2024-03",
            "--filter",
            "away",
            "--next",
            "--calendar-id",
            "club@group.calendar.google.com",
        ])
        .unwrap();
        assert_eq!(args.month, Month::new(2024, 3).ok());
        assert_eq!(args.filter, FilterType::Away);
        assert!(args.next);
        assert_eq!(args.calendar_id.as_deref(), Some("club@group.calendar.google.com"));
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert!(Args::try_parse_from(["titans_fixtures", "--month", "2024-3x"]).is_err());
        assert!(Args::try_parse_from(["titans_fixtures", "--filter", "neutral"]).is_err());
    }

    #[test]
    fn test_config_commands() {
        let args = Args::try_parse_from(["titans_fixtures", "--set-calendar-id", "x@y.z"]).unwrap();
        assert!(is_config_command(&args));
        let args = Args::try_parse_from(["titans_fixtures", "--clear-log-file"]).unwrap();
        assert!(is_config_command(&args));
        let args = Args::try_parse_from(["titans_fixtures", "-l"]).unwrap();
        assert!(is_config_command(&args));
    }
}
