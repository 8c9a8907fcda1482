//! Error types for request building and encoding

use thiserror::Error;

/// Boxed error returned by caller-supplied transports
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Invalid {vocabulary} value: {value:?}")]
    InvalidEnumValue {
        vocabulary: &'static str,
        value: String,
    },

    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_enum_value_message() {
        let err = Error::InvalidEnumValue {
            vocabulary: "operator",
            value: "xor".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("operator"));
        assert!(msg.contains("\"xor\""));
    }

    #[test]
    fn test_encode_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = serde_err.into();
        assert!(matches!(err, Error::Encode(_)));
        assert!(err.to_string().starts_with("Encoding error"));
    }

    #[test]
    fn test_transport_error_keeps_source() {
        let inner: BoxError = "connection refused".into();
        let err = Error::Transport(inner);
        assert!(err.to_string().contains("connection refused"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
