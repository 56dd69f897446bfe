//! Flat string-array serialization
//!
//! Arrays are stored as their entries joined by a single delimiter character
//! (`':'` unless configured otherwise), e.g. `["a", "b"]` → `"a:b"`. There is
//! no escaping, so entries containing the delimiter do not survive a round
//! trip.

use crate::check::Check;
use crate::config::Config;
use crate::debug::DebugLog;

const TAG: &str = "StringArraySerializer";

pub const DEFAULT_DELIMITER: char = ':';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SerializerError {
    #[error("Serialized content is empty")]
    EmptyInput,

    #[error("Serialized content holds no elements")]
    NoElements,

    #[error("Element {position} is not an integer: '{value}'")]
    InvalidElement { position: usize, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringArraySerializer {
    log: DebugLog,
    delimiter: char,
}

impl StringArraySerializer {
    pub fn new(log: DebugLog) -> Self {
        Self { log, delimiter: DEFAULT_DELIMITER }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.debug_log()).with_delimiter(config.array_delimiter)
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Join the non-empty entries of `content`. Empty entries are skipped.
    pub fn serialize<S: AsRef<str>>(&self, content: &[S]) -> String {
        let check = Check::new(self.log, TAG);
        let mut result = String::new();
        for entry in content {
            let entry = entry.as_ref();
            if !check.valid_string("entry", "serialize", Some(entry)) {
                continue;
            }
            if !result.is_empty() {
                result.push(self.delimiter);
            }
            result.push_str(entry);
        }
        result
    }

    /// Split serialized content back into its entries.
    ///
    /// Trailing empty entries are dropped, so `"a:b::"` yields `["a", "b"]`.
    pub fn deserialize_string_array(&self, content: &str) -> Result<Vec<String>, SerializerError> {
        let check = Check::new(self.log, TAG);
        if check.invalid_string("content", "deserialize_string_array", Some(content)) {
            return Err(SerializerError::EmptyInput);
        }

        let mut entries: Vec<String> = content.split(self.delimiter).map(str::to_string).collect();
        while entries.last().is_some_and(|e| e.is_empty()) {
            entries.pop();
        }
        Ok(entries)
    }

    /// Parse serialized content as integers.
    ///
    /// Values below 1 are kept but logged, since callers typically store
    /// resource or view ids here.
    pub fn deserialize_int_array(&self, content: &str) -> Result<Vec<i32>, SerializerError> {
        const METHOD: &str = "deserialize_int_array";

        let entries = self.deserialize_string_array(content)?;
        if entries.is_empty() {
            self.log.zero_length(TAG, "entries", METHOD);
            return Err(SerializerError::NoElements);
        }

        let length = entries.len();
        entries
            .into_iter()
            .enumerate()
            .map(|(position, entry)| -> Result<i32, SerializerError> {
                let value = entry.parse::<i32>().map_err(|e| {
                    self.log.error(TAG, "parse the serialized array to integers", METHOD, &e);
                    SerializerError::InvalidElement { position, value: entry.clone() }
                })?;
                if value <= 0 {
                    self.log.warn(
                        TAG,
                        &format!("The value {} has INVALID value. In element {} from {}.", value, position, length),
                        METHOD,
                    );
                }
                Ok(value)
            })
            .collect()
    }
}

impl Default for StringArraySerializer {
    fn default() -> Self {
        Self::new(DebugLog::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serializer() -> StringArraySerializer {
        StringArraySerializer::new(DebugLog::silent())
    }

    #[test]
    fn test_serialize_skips_empty_entries() {
        let s = serializer();
        assert_eq!(s.serialize(&["a", "", "b", "c"]), "a:b:c");
        assert_eq!(s.serialize(&["", "only"]), "only");
        assert_eq!(s.serialize::<&str>(&[]), "");
    }

    #[test]
    fn test_serialize_owned_strings() {
        let content = vec!["12".to_string(), "7".to_string()];
        assert_eq!(serializer().serialize(&content), "12:7");
    }

    #[test]
    fn test_deserialize_string_array() {
        let s = serializer();
        assert_eq!(s.deserialize_string_array("a:b:c").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(s.deserialize_string_array(":a").unwrap(), vec!["", "a"]);
        assert_eq!(s.deserialize_string_array("a::b::").unwrap(), vec!["a", "", "b"]);
        assert!(s.deserialize_string_array(":::").unwrap().is_empty());
        assert_eq!(s.deserialize_string_array(""), Err(SerializerError::EmptyInput));
    }

    #[test]
    fn test_deserialize_int_array() {
        let s = serializer();
        assert_eq!(s.deserialize_int_array("3:14:15").unwrap(), vec![3, 14, 15]);
        // Non-positive values are kept
        assert_eq!(s.deserialize_int_array("0:-2").unwrap(), vec![0, -2]);
    }

    #[test]
    fn test_deserialize_int_array_failures() {
        let s = serializer();
        assert_eq!(s.deserialize_int_array(""), Err(SerializerError::EmptyInput));
        assert_eq!(s.deserialize_int_array("::"), Err(SerializerError::NoElements));
        assert_eq!(
            s.deserialize_int_array("1:x:3"),
            Err(SerializerError::InvalidElement { position: 1, value: "x".to_string() })
        );
        assert_eq!(
            s.deserialize_int_array("1::3"),
            Err(SerializerError::InvalidElement { position: 1, value: String::new() })
        );
    }

    #[test]
    fn test_custom_delimiter() {
        let config = Config { array_delimiter: ',', ..Config::default() };
        let s = StringArraySerializer::from_config(&config);
        assert_eq!(s.delimiter(), ',');
        let joined = s.serialize(&["1", "2"]);
        assert_eq!(joined, "1,2");
        assert_eq!(s.deserialize_int_array(&joined).unwrap(), vec![1, 2]);
    }
}
