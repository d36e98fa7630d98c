//! Errors raised while decoding shell item data.
//!
//! "Not supported" is deliberately absent from this enum: a candidate
//! decoder that does not recognize the shape of its input reports that
//! through its result value, and the item dispatcher falls through to the
//! next candidate. Only genuinely malformed input produces an [`Error`].

use core::fmt;
use core::result;

#[derive(Debug)]
pub enum Error {
    /// The input is malformed in some way
    Malformed(String),
    /// A fixed magic number or signature is absent where required
    BadMagic(u64),
    /// A declared size field refers past the end of the buffer
    Truncated { declared: usize, available: usize },
    /// A string or block exceeds the decoder's size cap
    Oversize(usize),
    /// The caller passed a codepage identifier outside the supported set
    UnsupportedCodepage(u16),
    /// An error emanating from reading and interpreting bytes
    Scroll(scroll::Error),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Scroll(err) => Some(err),
            _ => None,
        }
    }
}

impl From<scroll::Error> for Error {
    fn from(err: scroll::Error) -> Error {
        Error::Scroll(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Malformed(msg) => write!(fmt, "Malformed entity: {}", msg),
            Error::BadMagic(magic) => write!(fmt, "Invalid magic number: 0x{:x}", magic),
            Error::Truncated {
                declared,
                available,
            } => write!(
                fmt,
                "Declared size {} exceeds the {} bytes available",
                declared, available
            ),
            Error::Oversize(size) => write!(fmt, "Size {} exceeds the maximum allocation", size),
            Error::UnsupportedCodepage(id) => write!(fmt, "Unsupported codepage: {}", id),
            Error::Scroll(err) => write!(fmt, "{}", err),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
