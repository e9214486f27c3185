use std::fmt::{self, Display};
use serde::{de, ser};
use abfolge::{DecodeError, EncodeError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct DeserializationError {
    inner: Error,
    at: usize,
}

impl DeserializationError {
    pub fn into_inner(self) -> Error {
        self.inner
    }

    pub fn position(&self) -> usize {
        self.at
    }
}

impl std::error::Error for DeserializationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.inner)
    }
}

impl Display for DeserializationError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{} at input position {}", self.inner, self.at)
    }
}

#[derive(Debug)]
pub enum Error {
    // Decode
    Decode(DecodeError),
    Trailing,
    Tag(u8),
    AnyUnsupported,
    // Encode
    Length,
    Encode(EncodeError),
    // Both
    Message(String),
}

impl Error {
    pub fn at(self, at: usize) -> DeserializationError {
        DeserializationError { inner: self, at }
    }
}

impl ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Message(msg) => fmt.write_str(msg),
            Error::Encode(e) => write!(fmt, "Encoding error: {}", e),
            Error::Decode(e) => write!(fmt, "Decoding error: {}", e),
            Error::Length => fmt.write_str("Sequences and maps need a known length"),
            Error::Trailing => fmt.write_str("Trailing bytes in input"),
            Error::Tag(t) => write!(fmt, "Invalid option tag {}, expected 0 or 1", t),
            Error::AnyUnsupported => fmt.write_str("The format is not self-describing, the target type has to be known"),
        }
    }
}

impl From<EncodeError> for Error {
    fn from(e: EncodeError) -> Error {
        Error::Encode(e)
    }
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Error {
        Error::Decode(e)
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(e: std::str::Utf8Error) -> Error {
        Error::Decode(DecodeError::Utf8(e))
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Decode(e) => Some(e),
            Error::Encode(e) => Some(e),
            _ => None,
        }
    }
}
