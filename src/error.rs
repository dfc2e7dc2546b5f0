// ABOUTME: Error types for Bencode decoding.
// ABOUTME: Each decoder keeps its own distinct failure kinds for stable error matching.

use std::fmt;

/// The result type for Bencode operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during Bencode decoding.
///
/// Every variant is a local, non-retryable parse failure surfaced directly
/// to the caller. A failure voids the value being decoded; the decoder's
/// position after an error is diagnostic only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Unexpected end of input data.
    Truncated,

    /// Unconsumed bytes after decoding a complete document.
    TrailingBytes,

    /// Leading byte that is not a recognized value tag.
    UnrecognizedTag(u8),

    /// Integer with no characters between tag and terminator (`ie`).
    EmptyInteger,

    /// Integer span that does not parse as a base-10 signed 64-bit value.
    NotAnInteger,

    /// Integer with no closing terminator before the buffer ends.
    MalformedInteger,

    /// Byte-string length prefix that is empty or not decimal digits.
    InvalidLengthPrefix,

    /// Byte-string length prefix claiming more data than the whole buffer holds.
    EmptyString,

    /// Byte-string payload that would run past the end of the buffer.
    ///
    /// Kept distinct from [`Error::EmptyString`]: here the prefix itself fits
    /// but the payload does not.
    InvalidStringLength,

    /// List tag with no body at all.
    EmptyList,

    /// Buffer ends mid-list without a closing terminator.
    MalformedList,

    /// Buffer ends mid-dictionary without a closing terminator,
    /// including a body-less `d`.
    MalformedDictionary,

    /// Duplicate key in a dictionary (only with [`DuplicateKeyMode::Error`]).
    ///
    /// [`DuplicateKeyMode::Error`]: crate::decoder::DuplicateKeyMode::Error
    DuplicateKey,

    /// Container nesting too deep.
    MaxDepthExceeded,

    /// Byte string used where UTF-8 text is required (serde only).
    InvalidUtf8,

    /// Custom error message (for serde integration).
    Custom(String),
}

impl Error {
    /// Returns the stable error type name for error matching.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Error::Truncated => "truncated",
            Error::TrailingBytes => "trailing_bytes",
            Error::UnrecognizedTag(_) => "unrecognized_tag",
            Error::EmptyInteger => "empty_integer",
            Error::NotAnInteger => "not_an_integer",
            Error::MalformedInteger => "malformed_integer",
            Error::InvalidLengthPrefix => "invalid_length_prefix",
            Error::EmptyString => "empty_string",
            Error::InvalidStringLength => "invalid_string_length",
            Error::EmptyList => "empty_list",
            Error::MalformedList => "malformed_list",
            Error::MalformedDictionary => "malformed_dictionary",
            Error::DuplicateKey => "duplicate_key",
            Error::MaxDepthExceeded => "max_depth_exceeded",
            Error::InvalidUtf8 => "invalid_utf8",
            Error::Custom(_) => "custom",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Truncated => write!(f, "unexpected end of input"),
            Error::TrailingBytes => write!(f, "trailing bytes after document"),
            Error::UnrecognizedTag(byte) => write!(f, "unrecognized tag byte: 0x{byte:02x}"),
            Error::EmptyInteger => write!(f, "empty integer"),
            Error::NotAnInteger => write!(f, "not an integer"),
            Error::MalformedInteger => write!(f, "integer missing terminator"),
            Error::InvalidLengthPrefix => write!(f, "invalid byte-string length prefix"),
            Error::EmptyString => write!(f, "byte-string length exceeds buffer"),
            Error::InvalidStringLength => write!(f, "byte-string payload exceeds buffer"),
            Error::EmptyList => write!(f, "list with no body"),
            Error::MalformedList => write!(f, "list missing terminator"),
            Error::MalformedDictionary => write!(f, "dictionary missing terminator"),
            Error::DuplicateKey => write!(f, "duplicate key in dictionary"),
            Error::MaxDepthExceeded => write!(f, "maximum nesting depth exceeded"),
            Error::InvalidUtf8 => write!(f, "invalid UTF-8 sequence"),
            Error::Custom(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(_: std::str::Utf8Error) -> Self {
        Error::InvalidUtf8
    }
}
