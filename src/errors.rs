use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Error type that captures ledger persistence and configuration failures.
///
/// Validation problems on insert are not errors; they are reported through
/// [`crate::ledger::ValidationRejection`].
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage quota exceeded writing `{key}`: {required} bytes needed, limit is {limit}")]
    QuotaExceeded {
        key: String,
        required: usize,
        limit: usize,
    },
    #[error("Corrupt `{key}` collection: {reason}")]
    CorruptCollection { key: String, reason: String },
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_collection_message_names_the_key() {
        let err = LedgerError::CorruptCollection {
            key: "income".into(),
            reason: "expected value at line 1 column 1".into(),
        };
        let message = err.to_string();
        assert!(message.contains("`income`"), "unexpected: {message}");
    }

    #[test]
    fn serde_errors_convert() {
        let parse = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err: LedgerError = parse.into();
        assert!(matches!(err, LedgerError::Serde(_)));
    }
}
