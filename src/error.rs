use ::bson::spec::ElementType;

/// Error type returned when writing or reading BSON fails.
///
/// Every error is terminal for the record being (de)serialized, there is no
/// partial result to recover.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Stream truncated: document declares {declared} bytes but only {remaining} are left.")]
    TruncatedStream { declared: usize, remaining: usize },

    #[error("Key '{0}' not found in the current document.")]
    KeyNotFound(String),

    #[error("Array index {index} out of bounds (array length is {len}).")]
    ArrayBounds { index: usize, len: usize },

    #[error("Type mismatch: expected {expected}, found {found:?}.")]
    TypeMismatch {
        expected: &'static str,
        found: ElementType,
    },

    #[error("Size requested outside of an array.")]
    NotInArray,

    #[error("No field left in the current document.")]
    EndOfDocument,

    #[error("No record left in the stream.")]
    EndOfStream,

    #[error("Malformed BSON: {0}.")]
    Malformed(&'static str),

    #[error("Invalid key '{}': keys can't contain NUL bytes.", .0.escape_debug())]
    InvalidKey(String),

    #[error("Sequences can't be written as top level records.")]
    TopLevelArray,

    #[error("Value out of range: {0}.")]
    OutOfRange(&'static str),

    #[error("Unknown enum variant '{0}'.")]
    UnknownVariant(String),

    #[error("Archive misuse: {0}.")]
    Protocol(&'static str),

    #[error("Malformed BSON: {0}")]
    Decode(#[from] ::bson::raw::Error),

    #[error("Can't encode BSON: {0}")]
    Encode(#[from] ::bson::ser::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type returned by all archive operations.
pub type Result<T> = std::result::Result<T, Error>;
