use std::{fmt, io};

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure kind the codec can raise. No panics escape `decode`, `encode`, or the
/// `mca` entry points under normal operation; a panic there is a bug.
#[derive(Debug)]
pub enum Error {
    /// A bug in this crate, not a malformed input (arena misuse, unreachable match arm).
    Internal(String),
    UnexpectedEndOfInput,
    /// Trailing bytes followed a complete top-level tag. Non-fatal: the tree is still returned.
    LeftoverData,
    BadTag(u8),
    BadKey,
    BadList,
    BadMca(String),
    BadUtf8,
    Decompress(String),
    Cancelled,
    WrongKind,
    ListTypeMismatch,
    OutOfRange,
    ListChildRename,
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Internal(msg) => write!(f, "internal error: {msg}"),
            Error::UnexpectedEndOfInput => write!(f, "unexpected end of input"),
            Error::LeftoverData => write!(f, "trailing bytes after top-level tag"),
            Error::BadTag(id) => write!(f, "unrecognized tag id {id}"),
            Error::BadKey => write!(f, "malformed compound key"),
            Error::BadList => write!(f, "malformed list header"),
            Error::BadMca(msg) => write!(f, "malformed region file: {msg}"),
            Error::BadUtf8 => write!(f, "malformed modified-UTF-8 string"),
            Error::Decompress(msg) => write!(f, "decompression failed: {msg}"),
            Error::Cancelled => write!(f, "operation cancelled"),
            Error::WrongKind => write!(f, "operation not valid for this node's kind"),
            Error::ListTypeMismatch => write!(f, "list element kind does not match list"),
            Error::OutOfRange => write!(f, "child index out of range"),
            Error::ListChildRename => write!(f, "list children cannot be named"),
            Error::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Error::Io(value)
    }
}
