//! Configuration loading and management.
//!
//! [`Settings`] already derives `Deserialize` with struct-level
//! `#[serde(default)]`, so a config file only needs to mention the fields it
//! overrides. Loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. `SQL_ADVISOR_DISABLED_RULES` environment variable (comma-separated,
//!    merged into whatever the files configured)
//! 2. `.sql-query-advisor.toml` in the current directory
//! 3. `~/.config/sql-query-advisor/config.toml`
//! 4. [`Settings::default`]
//!
//! # Configuration File Format
//!
//! ```toml
//! max_in_count = 15
//! max_offset = 500
//! allow_engines = ["InnoDB"]
//! disabled_rules = ["CLA.012"]
//!
//! [severity_overrides]
//! "COL.001" = "L8"
//! ```

use std::{env, fs, path::Path};

use crate::{
    error::{AppResult, config_error},
    settings::Settings
};

/// Loads [`Settings`] from the filesystem/environment, per the precedence
/// documented at the module level.
pub struct Config;

impl Config {
    pub fn load() -> AppResult<Settings> {
        let mut settings = Settings::default();

        if let Some(home) = env::var_os("HOME") {
            let home_config = Path::new(&home).join(".config").join("sql-query-advisor").join("config.toml");
            if home_config.exists() {
                settings = load_file(&home_config)?;
            }
        }

        let local_config = Path::new(".sql-query-advisor.toml");
        if local_config.exists() {
            settings = load_file(local_config)?;
        }

        if let Ok(list) = env::var("SQL_ADVISOR_DISABLED_RULES") {
            settings.disabled_rules.extend(list.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from));
        }

        Ok(settings)
    }
}

fn load_file(path: &Path) -> AppResult<Settings> {
    let content =
        fs::read_to_string(path).map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
    toml::from_str(&content).map_err(|e| config_error(format!("Invalid config file: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_file_parses_partial_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "max_in_count = 15\ndisabled_rules = [\"CLA.012\"]\n").unwrap();
        let settings = load_file(&path).unwrap();
        assert_eq!(settings.max_in_count, 15);
        assert!(settings.is_disabled("CLA.012"));
        assert_eq!(settings.max_offset, Settings::default().max_offset);
    }

    #[test]
    fn load_file_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "not valid toml = = =").unwrap();
        assert!(load_file(&path).is_err());
    }
}
