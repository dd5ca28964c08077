use thiserror::Error;

/// Errors returned when a logger rejects its configuration
#[derive(Error, Debug)]
pub enum InitError {
    #[error("{logger} logger configuration error: {source}")]
    Configuration {
        logger: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Errors from building [`Fields`](crate::Fields) out of alternating key/value input
#[derive(Error, Debug)]
pub enum FieldsError {
    #[error("Expected key/value pairs, got {0} values")]
    OddLength(usize),

    #[error("Field key at position {index} is not a string: {key}")]
    NonStringKey {
        index: usize,
        key: serde_json::Value,
    },
}
