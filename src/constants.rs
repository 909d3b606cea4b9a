//! Application-wide constants and configuration values
//!
//! This module centralizes magic numbers, club names and sentinel labels
//! used across the fetching and classification code.

/// Google Calendar identifier of the club's public fixture calendar.
/// Can be overridden through the config file or `TITANS_CALENDAR_ID`.
pub const DEFAULT_CALENDAR_ID: &str = "londontitansfc@gmail.com";

/// Hard per-attempt timeout for relay requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 25;

/// Upper bound accepted for a configured timeout
pub const MAX_HTTP_TIMEOUT_SECONDS: u64 = 120;

/// Maximum number of idle connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 4;

/// User agent sent to the relays
pub const USER_AGENT: &str = concat!("titans_fixtures/", env!("CARGO_PKG_VERSION"));

/// Environment variable names that override config file values
pub mod env_vars {
    pub const CALENDAR_ID: &str = "TITANS_CALENDAR_ID";
    pub const LOG_FILE: &str = "TITANS_LOG_FILE";
    pub const HTTP_TIMEOUT: &str = "TITANS_HTTP_TIMEOUT";
}

/// Payload sanity checks applied to relay responses
pub mod payload {
    /// Responses shorter than this (in characters) are relay error stubs
    pub const MIN_LENGTH: usize = 50;

    /// Marker that every calendar payload must contain
    pub const CALENDAR_MARKER: &str = "BEGIN:VCALENDAR";

    /// Prefix of a data URI payload
    pub const DATA_URI_PREFIX: &str = "data:";

    /// Marker preceding base64 content inside a data URI
    pub const BASE64_MARKER: &str = ";base64,";

    /// Number of characters shown when logging a rejected payload
    pub const PREVIEW_CHARS: usize = 100;
}

/// Club naming used by the event classifier
pub mod club {
    /// Default name of the club side
    pub const TEAM_NAME: &str = "Titans";

    /// Full club name that collapses to [`TEAM_NAME`]
    pub const FULL_NAME: &str = "London Titans";

    /// Case-insensitive root identifying a club side in free text
    pub const NAME_ROOT: &str = "titan";

    /// Location used when an event carries none
    pub const UNKNOWN_LOCATION: &str = "TBC";
}

/// Labels assigned by the classifier
pub mod labels {
    /// Sentinel competition label before defaults are applied
    pub const FIXTURE: &str = "Fixture";
    pub const TRAINING: &str = "Training";
    pub const CLUB_EVENT: &str = "Club Event";
    pub const INTERNAL_EVENT: &str = "Internal Match / Event";
    pub const LEAGUE_MATCH: &str = "League Match";
    pub const CUP_MATCH: &str = "Cup Match";
    pub const FRIENDLY: &str = "Friendly";
}

/// Titles longer than this on the home side of a separator are not treated as a team name
pub const MAX_SIDE_NAME_LENGTH: usize = 30;
