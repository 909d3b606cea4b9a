use std::path::{Path, PathBuf};

const APP_DIR: &str = "titans_fixtures";

fn app_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_DIR)
}

/// Returns the platform-specific path for the config file.
///
/// # Notes
/// - Uses platform-specific config directory (e.g., ~/.config on Linux)
/// - Falls back to current directory if config directory is unavailable
pub fn get_config_path() -> String {
    app_config_dir()
        .join("config.toml")
        .to_string_lossy()
        .to_string()
}

/// Returns the platform-specific path for the log directory.
pub fn get_log_dir_path() -> String {
    app_config_dir().join("logs").to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_share_app_directory() {
        let config = get_config_path();
        let logs = get_log_dir_path();
        assert!(config.ends_with("config.toml"));
        assert!(config.contains(APP_DIR));
        assert!(logs.contains(APP_DIR));
        assert_eq!(
            Path::new(&config).parent(),
            Path::new(&logs).parent()
        );
    }
}
