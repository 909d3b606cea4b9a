use crate::constants::MAX_HTTP_TIMEOUT_SECONDS;
use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings
///
/// # Arguments
/// * `calendar_id` - Google Calendar id to validate
/// * `log_file_path` - Optional log file path to validate
/// * `http_timeout_seconds` - Per-relay timeout to validate
///
/// # Validation Rules
/// - Calendar id cannot be empty or contain whitespace
/// - Timeout must be between 1 and 120 seconds
/// - If log file path is provided, it cannot be empty
/// - Log file path parent directory must exist or be creatable
pub fn validate_config(
    calendar_id: &str,
    log_file_path: &Option<String>,
    http_timeout_seconds: u64,
) -> Result<(), AppError> {
    if calendar_id.trim().is_empty() {
        return Err(AppError::config_error("Calendar id cannot be empty"));
    }

    if calendar_id.chars().any(char::is_whitespace) {
        return Err(AppError::config_error(format!(
            "Calendar id '{calendar_id}' must not contain whitespace"
        )));
    }

    if !(1..=MAX_HTTP_TIMEOUT_SECONDS).contains(&http_timeout_seconds) {
        return Err(AppError::config_error(format!(
            "HTTP timeout must be between 1 and {MAX_HTTP_TIMEOUT_SECONDS} seconds, got {http_timeout_seconds}"
        )));
    }

    if let Some(log_path) = log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        // Check if parent directory exists or can be created
        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const ID: &str = "club@group.calendar.google.com";

    #[test]
    fn test_valid_config() {
        assert!(validate_config(ID, &None, 25).is_ok());
        assert!(validate_config(ID, &None, 1).is_ok());
        assert!(validate_config(ID, &None, 120).is_ok());
    }

    #[test]
    fn test_calendar_id_rules() {
        assert!(validate_config("", &None, 25).is_err());
        assert!(validate_config("   ", &None, 25).is_err());
        assert!(validate_config("club calendar@example.com", &None, 25).is_err());
    }

    #[test]
    fn test_timeout_bounds() {
        assert!(validate_config(ID, &None, 0).is_err());
        assert!(validate_config(ID, &None, 121).is_err());
    }

    #[test]
    fn test_log_path_rules() {
        assert!(validate_config(ID, &Some(String::new()), 25).is_err());

        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("a").join("b").join("titans.log");
        let nested = nested.to_string_lossy().to_string();
        assert!(validate_config(ID, &Some(nested), 25).is_ok());
        assert!(temp_dir.path().join("a").join("b").exists());

        assert!(validate_config(ID, &Some("titans.log".to_string()), 25).is_ok());
    }
}
