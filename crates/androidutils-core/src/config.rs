//! Settings read from a `config.toml`
//!
//! ```toml
//! debug_mode = "at-least-warnings"
//! divider = "/"
//! array_delimiter = ":"
//! ```
//!
//! Every key is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::debug::{DebugLog, DebugMode};
use crate::error::Result;
use crate::refcode::DEFAULT_DIVIDER;
use crate::serializer::DEFAULT_DELIMITER;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Verbosity handed to every [`DebugLog`] built from this config
    pub debug_mode: DebugMode,
    /// Divider between page number and page count in reference strings
    pub divider: char,
    /// Separator used by the string array serializer
    pub array_delimiter: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug_mode: DebugMode::default(),
            divider: DEFAULT_DIVIDER,
            array_delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    pub fn debug_log(&self) -> DebugLog {
        DebugLog::new(self.debug_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.divider, '/');
        assert_eq!(config.array_delimiter, ':');
        assert_eq!(config.debug_mode, DebugMode::AllOn);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml_str("debug_mode = \"only-errors\"\ndivider = \"|\"").unwrap();
        assert_eq!(config.debug_mode, DebugMode::OnlyErrors);
        assert_eq!(config.divider, '|');
        assert_eq!(config.array_delimiter, ':');
        assert_eq!(config.debug_log().mode(), DebugMode::OnlyErrors);
    }

    #[test]
    fn test_invalid_config() {
        let err = Config::from_toml_str("debug_mode = \"loud\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        // A divider must be a single character
        assert!(Config::from_toml_str("divider = \"//\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "debug_mode = \"all-off\"").unwrap();
        writeln!(file, "array_delimiter = \",\"").unwrap();
        drop(file);

        let config = Config::load(&path).unwrap();
        assert_eq!(config.debug_mode, DebugMode::AllOff);
        assert_eq!(config.array_delimiter, ',');
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = Config { debug_mode: DebugMode::AtLeastDebugInfo, divider: '-', array_delimiter: ';' };
        let text = toml::to_string(&config).unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }
}
