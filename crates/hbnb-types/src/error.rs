use thiserror::Error;

/// Errors produced by entity and record operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown entity type: {0}")]
    UnknownKind(String),

    #[error("record is missing field `{0}`")]
    MissingField(&'static str),

    #[error("invalid timestamp for `{field}`: {value}")]
    InvalidTimestamp { field: String, value: String },

    #[error("attribute `{0}` is read-only")]
    ReadOnlyAttribute(String),

    #[error("malformed key: {0}")]
    MalformedKey(String),
}
