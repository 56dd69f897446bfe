//! Diagnostic logging with an explicit verbosity mode.
//!
//! A [`DebugLog`] is a small `Copy` value carrying the [`DebugMode`] it was
//! built with. It is handed to whatever needs to report problems, so there is
//! no global switch to flip at runtime. Records go through the `log` facade
//! with the caller's tag as the target; installing a logger is left to the
//! embedding application.

use std::fmt;

use log::{Level, LevelFilter};
use serde::{Deserialize, Serialize};

/// How chatty a [`DebugLog`] is allowed to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DebugMode {
    /// Every record is emitted, down to trace level
    #[default]
    AllOn,
    /// Debug messages and above
    AtLeastDebugInfo,
    /// Informational messages and above
    AtLeastInformational,
    /// Warnings and errors
    AtLeastWarnings,
    /// Errors only
    OnlyErrors,
    /// Nothing is emitted
    AllOff,
}

impl DebugMode {
    /// The numeric code used by the legacy Android helpers for this mode.
    pub fn code(&self) -> u8 {
        match self {
            DebugMode::AllOn => 0x00,
            DebugMode::AtLeastInformational => 0x10,
            DebugMode::AtLeastWarnings => 0x20,
            DebugMode::AtLeastDebugInfo => 0x30,
            DebugMode::OnlyErrors => 0x40,
            DebugMode::AllOff => 0x50,
        }
    }

    /// The most verbose `log` level this mode lets through.
    pub fn level_filter(&self) -> LevelFilter {
        match self {
            DebugMode::AllOn => LevelFilter::Trace,
            DebugMode::AtLeastDebugInfo => LevelFilter::Debug,
            DebugMode::AtLeastInformational => LevelFilter::Info,
            DebugMode::AtLeastWarnings => LevelFilter::Warn,
            DebugMode::OnlyErrors => LevelFilter::Error,
            DebugMode::AllOff => LevelFilter::Off,
        }
    }
}

impl TryFrom<u8> for DebugMode {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0x00 => Ok(DebugMode::AllOn),
            0x10 => Ok(DebugMode::AtLeastInformational),
            0x20 => Ok(DebugMode::AtLeastWarnings),
            0x30 => Ok(DebugMode::AtLeastDebugInfo),
            0x40 => Ok(DebugMode::OnlyErrors),
            0x50 => Ok(DebugMode::AllOff),
            other => Err(format!("Unknown debug mode code: {:#04x}", other)),
        }
    }
}

/// Logging collaborator passed explicitly to checks, codecs and serializers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DebugLog {
    mode: DebugMode,
}

impl DebugLog {
    pub fn new(mode: DebugMode) -> Self {
        Self { mode }
    }

    /// A log that never emits anything.
    pub fn silent() -> Self {
        Self::new(DebugMode::AllOff)
    }

    pub fn mode(&self) -> DebugMode {
        self.mode
    }

    /// Whether a record at `level` would be passed on to the `log` facade.
    pub fn enabled(&self, level: Level) -> bool {
        level <= self.mode.level_filter()
    }

    /// A required value was missing.
    pub fn null_value(&self, tag: &str, variable: &str, method: &str) {
        self.emit(
            tag,
            Level::Warn,
            format_args!("The {} is null. The {} won't proceed forward.", variable, method),
        );
    }

    /// A collection was empty.
    pub fn zero_size(&self, tag: &str, variable: &str, method: &str) {
        self.emit(
            tag,
            Level::Warn,
            format_args!("The {} has ZERO size. The {} won't proceed forward.", variable, method),
        );
    }

    /// A string was empty.
    pub fn zero_length(&self, tag: &str, variable: &str, method: &str) {
        self.emit(
            tag,
            Level::Warn,
            format_args!("The {} has ZERO length. The {} won't proceed forward.", variable, method),
        );
    }

    pub fn warn(&self, tag: &str, warning: &str, method: &str) {
        self.emit(
            tag,
            Level::Warn,
            format_args!("{} The {} won't proceed forward.", warning, method),
        );
    }

    /// An operation failed; `cause` is appended to the message.
    pub fn error(&self, tag: &str, while_doing: &str, method: &str, cause: &dyn fmt::Display) {
        self.emit(
            tag,
            Level::Error,
            format_args!(
                "An error occurred while trying to {}. Occurred in the {} method: {}",
                while_doing, method, cause
            ),
        );
    }

    pub fn debug_msg(&self, tag: &str, message: &str, method: &str) {
        self.emit(
            tag,
            Level::Debug,
            format_args!("{} Occurred in the {} method.", message, method),
        );
    }

    pub fn info(&self, tag: &str, info: &str) {
        self.emit(tag, Level::Info, format_args!("{}", info));
    }

    fn emit(&self, tag: &str, level: Level, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            log::log!(target: tag, level, "{}", args);
        }
    }
}

impl From<DebugMode> for DebugLog {
    fn from(mode: DebugMode) -> Self {
        DebugLog::new(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_on_enables_everything() {
        let log = DebugLog::new(DebugMode::AllOn);
        assert!(log.enabled(Level::Trace));
        assert!(log.enabled(Level::Debug));
        assert!(log.enabled(Level::Error));
    }

    #[test]
    fn test_only_errors_filters_warnings() {
        let log = DebugLog::new(DebugMode::OnlyErrors);
        assert!(log.enabled(Level::Error));
        assert!(!log.enabled(Level::Warn));
        assert!(!log.enabled(Level::Info));
    }

    #[test]
    fn test_silent_log_emits_nothing() {
        let log = DebugLog::silent();
        assert_eq!(log.mode(), DebugMode::AllOff);
        assert!(!log.enabled(Level::Error));
        // Must not panic even without an installed logger
        log.error("Test", "divide", "test_silent_log_emits_nothing", &"boom");
    }

    #[test]
    fn test_modes_are_ordered_by_verbosity() {
        let modes = [
            DebugMode::AllOn,
            DebugMode::AtLeastDebugInfo,
            DebugMode::AtLeastInformational,
            DebugMode::AtLeastWarnings,
            DebugMode::OnlyErrors,
            DebugMode::AllOff,
        ];
        for pair in modes.windows(2) {
            assert!(pair[0].level_filter() > pair[1].level_filter());
        }
    }

    #[test]
    fn test_legacy_codes() {
        for mode in [
            DebugMode::AllOn,
            DebugMode::AtLeastInformational,
            DebugMode::AtLeastWarnings,
            DebugMode::AtLeastDebugInfo,
            DebugMode::OnlyErrors,
            DebugMode::AllOff,
        ] {
            assert_eq!(DebugMode::try_from(mode.code()), Ok(mode));
        }
        assert!(DebugMode::try_from(0x15).is_err());
    }

    #[test]
    fn test_mode_serde_names() {
        let json = serde_json::to_string(&DebugMode::AtLeastWarnings).unwrap();
        assert_eq!(json, "\"at-least-warnings\"");
        let mode: DebugMode = serde_json::from_str("\"only-errors\"").unwrap();
        assert_eq!(mode, DebugMode::OnlyErrors);
    }
}
