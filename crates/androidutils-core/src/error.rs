//! Error types for the crate

use crate::refcode::RefCodeError;
use crate::serializer::SerializerError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    RefCode(#[from] RefCodeError),

    #[error(transparent)]
    Serializer(#[from] SerializerError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl serde::Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serializes_as_message() {
        let err: Error = RefCodeError::EmptyReference.into();
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"Reference string is empty\"");
    }
}
