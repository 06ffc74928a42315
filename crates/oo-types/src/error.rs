use thiserror::Error;

/// Errors produced by object model operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OoError {
    /// An argument had the wrong shape, e.g. a non-object prototype.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A method lookup found nothing along the prototype chain.
    #[error("property not found: {key}")]
    MissingProperty { key: String },

    /// A method lookup found a value that cannot be invoked.
    #[error("property {key} is not callable (found {type_name})")]
    NotCallable {
        key: String,
        type_name: &'static str,
    },

    /// The value has no JSON representation (functions, cycles).
    #[error("value cannot be serialized: {0}")]
    Unserializable(String),

    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Raised by native functions.
    #[error("{0}")]
    Thrown(String),
}

/// Result alias for object model operations.
pub type OoResult<T> = Result<T, OoError>;
