//! Platform paths for countrydeck data and configuration.
//!
//! | Purpose | Linux example |
//! |---------|---------------|
//! | data (JSON backend, trace file) | `~/.local/share/countrydeck` |
//! | config | `~/.config/countrydeck/config.toml` |

use std::path::PathBuf;

const APP_DIR: &str = "countrydeck";

/// Returns the data directory for countrydeck storage.
///
/// Falls back to the system temp directory when the platform reports no data
/// directory (e.g. `HOME` unset).
///
/// # Examples
///
/// ```
/// use countrydeck::infrastructure::get_data_dir;
///
/// assert!(get_data_dir().ends_with("countrydeck"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
}

/// Returns the configuration directory, if the platform has one.
#[must_use]
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

/// Location of `config.toml` when no explicit path is given.
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.toml"))
}

/// OTLP JSON trace export file.
#[must_use]
pub fn trace_file() -> PathBuf {
    get_data_dir().join("countrydeck-otlp.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_under_app_dirs() {
        assert!(trace_file().starts_with(get_data_dir()));
        assert!(trace_file().ends_with("countrydeck-otlp.json"));
        if let Some(config) = default_config_file() {
            assert!(config.ends_with("countrydeck/config.toml"));
        }
    }
}
