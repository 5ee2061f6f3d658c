
//! Error type definitions.

use std::borrow::Cow;
use std::io::Error as IoError;
use std::io::ErrorKind;
use std::fmt;


/// A result that may contain an error.
pub type Result<T> = std::result::Result<T, Error>;

/// A result that, if ok, contains nothing, and otherwise contains an error.
pub type UnitResult = Result<()>;


/// An error that may happen while compressing or decompressing an image.
/// Distinguishes between consumer arguments this library does not support,
/// byte streams that do not follow the container layout, and io errors.
#[derive(Debug)]
pub enum Error {

    /// Reading or writing the underlying byte stream failed,
    /// including streams that end before an end-of-block sentinel was found.
    Io(IoError),

    /// The byte contents are not what the container layout promises,
    /// for example a symbol stream that never terminates.
    /// Contains a description of what was invalid.
    Invalid(Cow<'static, str>),

    /// The consumer requested something this library does not support.
    /// Contains a description of the requested feature.
    NotSupported(Cow<'static, str>),
}


impl Error {

    /// Create an error of the variant `Invalid`.
    pub(crate) fn invalid(message: impl Into<Cow<'static, str>>) -> Self {
        Error::Invalid(message.into())
    }

    /// Create an error of the variant `NotSupported`.
    pub(crate) fn unsupported(message: impl Into<Cow<'static, str>>) -> Self {
        Error::NotSupported(message.into())
    }
}

/// Enable using the `?` operator on `std::io::Result`.
impl From<IoError> for Error {
    fn from(error: IoError) -> Self {
        Error::Io(error)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(error) => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(error) => write!(formatter, "io error: {}", error),
            Error::Invalid(message) => write!(formatter, "invalid contents: {}", message),
            Error::NotSupported(message) => write!(formatter, "not supported: {}", message),
        }
    }
}

impl Error {

    /// Returns whether this error was caused by the byte stream
    /// ending before the expected contents were complete.
    pub fn is_unexpected_eof(&self) -> bool {
        match self {
            Error::Io(error) => error.kind() == ErrorKind::UnexpectedEof,
            _ => false,
        }
    }
}
