use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch data from relay: {0}")]
    ApiFetch(#[from] reqwest::Error),

    #[error("Failed to parse relay response: {0}")]
    ApiParse(#[from] serde_json::Error),

    // Specific HTTP status code errors
    #[error("Relay request not found (404): {url}")]
    ApiNotFound { url: String },

    #[error("Relay client error ({status}): {message} (URL: {url})")]
    ApiClientError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("Relay rate limit exceeded (429): {message} (URL: {url})")]
    ApiRateLimit { message: String, url: String },

    #[error("Relay server error ({status}): {message} (URL: {url})")]
    ApiServerError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("Relay service unavailable ({status}): {message} (URL: {url})")]
    ApiServiceUnavailable {
        status: u16,
        message: String,
        url: String,
    },

    // Network-specific errors
    #[error("Request timed out after {seconds}s while fetching: {url}")]
    NetworkTimeout { url: String, seconds: u64 },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    // Envelope errors: the relay answered 2xx but the payload is unusable
    #[error("Relay returned malformed JSON: {message} (URL: {url})")]
    ApiMalformedJson { message: String, url: String },

    #[error("JSON response missing 'contents' field (URL: {url})")]
    MissingContents { url: String },

    #[error("Empty or invalid response from relay ({length} chars, URL: {url})")]
    PayloadTooShort { url: String, length: usize },

    #[error("Relay returned HTML error page instead of calendar data (URL: {url})")]
    HtmlErrorPage { url: String },

    #[error("Received data is not a valid calendar file (URL: {url})")]
    NotACalendar { url: String },

    // Pipeline errors
    #[error("Cannot reach schedule service: all {attempts} relays failed, last error: {last}")]
    AllRelaysFailed {
        attempts: usize,
        #[source]
        last: Box<AppError>,
    },

    #[error("Cannot reach schedule service: no relays configured")]
    NoRelaysConfigured,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Date/time parsing error: {0}")]
    DateTimeParse(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a date/time parsing error with context
    pub fn datetime_parse_error(msg: impl Into<String>) -> Self {
        Self::DateTimeParse(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create a relay not found error
    pub fn api_not_found(url: impl Into<String>) -> Self {
        Self::ApiNotFound { url: url.into() }
    }

    /// Create a relay client error (4xx status codes except 404 and 429)
    pub fn api_client_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiClientError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a relay rate limit error
    pub fn api_rate_limit(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiRateLimit {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a relay server error (5xx status codes)
    pub fn api_server_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServerError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a relay service unavailable error (502/503)
    pub fn api_service_unavailable(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServiceUnavailable {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>, seconds: u64) -> Self {
        Self::NetworkTimeout {
            url: url.into(),
            seconds,
        }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a malformed JSON error
    pub fn api_malformed_json(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiMalformedJson {
            message: message.into(),
            url: url.into(),
        }
    }

    pub fn missing_contents(url: impl Into<String>) -> Self {
        Self::MissingContents { url: url.into() }
    }

    pub fn payload_too_short(url: impl Into<String>, length: usize) -> Self {
        Self::PayloadTooShort {
            url: url.into(),
            length,
        }
    }

    pub fn html_error_page(url: impl Into<String>) -> Self {
        Self::HtmlErrorPage { url: url.into() }
    }

    pub fn not_a_calendar(url: impl Into<String>) -> Self {
        Self::NotACalendar { url: url.into() }
    }

    /// Wrap the last relay failure into the single error surfaced to callers
    pub fn all_relays_failed(attempts: usize, last: AppError) -> Self {
        Self::AllRelaysFailed {
            attempts,
            last: Box::new(last),
        }
    }

    /// Check if error is a per-attempt timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, AppError::NetworkTimeout { .. })
    }

    /// Check if error came from talking to a relay (network, status, or envelope).
    /// These move the pipeline on to the next relay.
    pub fn is_relay_failure(&self) -> bool {
        matches!(
            self,
            AppError::ApiFetch(_)
                | AppError::ApiParse(_)
                | AppError::ApiNotFound { .. }
                | AppError::ApiClientError { .. }
                | AppError::ApiRateLimit { .. }
                | AppError::ApiServerError { .. }
                | AppError::ApiServiceUnavailable { .. }
                | AppError::NetworkTimeout { .. }
                | AppError::NetworkConnection { .. }
                | AppError::ApiMalformedJson { .. }
                | AppError::MissingContents { .. }
                | AppError::PayloadTooShort { .. }
                | AppError::HtmlErrorPage { .. }
                | AppError::NotACalendar { .. }
        )
    }

    /// The last underlying relay failure, when this is the exhausted-pipeline error
    pub fn last_relay_error(&self) -> Option<&AppError> {
        match self {
            AppError::AllRelaysFailed { last, .. } => Some(last),
            _ => None,
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AppError::ApiNotFound { .. } => Some(404),
            AppError::ApiRateLimit { .. } => Some(429),
            AppError::ApiClientError { status, .. }
            | AppError::ApiServerError { status, .. }
            | AppError::ApiServiceUnavailable { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_helper() {
        let error = AppError::config_error("Invalid configuration");
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(
            error.to_string(),
            "Configuration error: Invalid configuration"
        );
    }

    #[test]
    fn test_log_setup_error_helper() {
        let error = AppError::log_setup_error("Failed to initialize logger");
        assert!(matches!(error, AppError::LogSetup(_)));
        assert_eq!(
            error.to_string(),
            "Log setup error: Failed to initialize logger"
        );
    }

    #[test]
    fn test_api_service_unavailable_helper() {
        let error = AppError::api_service_unavailable(
            503,
            "Service Unavailable",
            "https://relay.example.com",
        );
        assert!(matches!(error, AppError::ApiServiceUnavailable { .. }));
        assert_eq!(error.status_code(), Some(503));
        assert_eq!(
            error.to_string(),
            "Relay service unavailable (503): Service Unavailable (URL: https://relay.example.com)"
        );
    }

    #[test]
    fn test_network_timeout_helper() {
        let error = AppError::network_timeout("https://relay.example.com", 25);
        assert!(error.is_timeout());
        assert_eq!(
            error.to_string(),
            "Request timed out after 25s while fetching: https://relay.example.com"
        );
    }

    #[test]
    fn test_envelope_errors_are_relay_failures() {
        let errors = vec![
            AppError::missing_contents("u"),
            AppError::payload_too_short("u", 3),
            AppError::html_error_page("u"),
            AppError::not_a_calendar("u"),
            AppError::api_malformed_json("bad", "u"),
        ];
        for error in errors {
            assert!(error.is_relay_failure(), "{error:?} should be a relay failure");
            assert!(!error.is_timeout());
        }
    }

    #[test]
    fn test_ambient_errors_are_not_relay_failures() {
        assert!(!AppError::config_error("x").is_relay_failure());
        assert!(!AppError::log_setup_error("x").is_relay_failure());
        assert!(!AppError::NoRelaysConfigured.is_relay_failure());
    }

    #[test]
    fn test_all_relays_failed_preserves_last_cause() {
        let last = AppError::api_service_unavailable(503, "Service Unavailable", "u");
        let error = AppError::all_relays_failed(4, last);

        let inner = error.last_relay_error().expect("last error kept");
        assert_eq!(inner.status_code(), Some(503));

        let source = std::error::Error::source(&error).expect("source chained");
        assert!(source.to_string().contains("503"));
        assert!(error.to_string().starts_with("Cannot reach schedule service"));
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(AppError::api_not_found("u").status_code(), Some(404));
        assert_eq!(AppError::api_rate_limit("m", "u").status_code(), Some(429));
        assert_eq!(
            AppError::api_client_error(403, "m", "u").status_code(),
            Some(403)
        );
        assert_eq!(AppError::html_error_page("u").status_code(), None);
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_error: AppError = json_error.into();
        assert!(matches!(app_error, AppError::ApiParse(_)));
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let app_error: AppError = io_error.into();
        assert!(matches!(app_error, AppError::Io(_)));
    }

    #[test]
    fn test_error_from_toml_deserialize() {
        let toml_error = toml::from_str::<serde_json::Value>("invalid = [toml").unwrap_err();
        let app_error: AppError = toml_error.into();
        assert!(matches!(app_error, AppError::TomlDeserialize(_)));
    }
}
