//! Contains the Error and Result type used by the decoder.

/// Errors that can occur while decoding NBT data.
#[derive(Debug, Clone)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// The broad category of a decode error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// End of input at a tag boundary. This is the natural end of an NBT
    /// stream rather than corruption; the decoder does not have enough
    /// context to tell the difference, so callers tracking structure can.
    Eof,

    /// End of input part way through a value. The contained offset is the
    /// position one past the last byte the read attempted to reach.
    UnexpectedEof(u64),

    /// A tag byte outside the 0..=12 range.
    InvalidTag(u8),

    /// A negative length prefix on a byte, int or long array.
    MalformedLength(i32),

    /// Any other errors. Users should match on this with a wildcard `_`;
    /// errors in this category may be moved to new variants.
    Other,
}

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, ErrorKind::Eof)
    }

    pub(crate) fn bespoke(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::Other,
        }
    }

    pub(crate) fn invalid_tag(tag: u8) -> Self {
        Self {
            msg: format!("invalid nbt tag value: {}", tag),
            kind: ErrorKind::InvalidTag(tag),
        }
    }

    pub(crate) fn malformed_length(len: i32) -> Self {
        Self {
            msg: format!("invalid nbt: negative length: {}", len),
            kind: ErrorKind::MalformedLength(len),
        }
    }

    pub(crate) fn unexpected_eof(offset: u64) -> Self {
        Self {
            msg: format!("eof: ran out of input at offset {}", offset),
            kind: ErrorKind::UnexpectedEof(offset),
        }
    }

    pub(crate) fn eof() -> Self {
        Self {
            msg: "eof".into(),
            kind: ErrorKind::Eof,
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)
    }
}
