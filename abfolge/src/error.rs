use crate::view::OutOfBounds;
use std::fmt::{Display, Formatter, self};

#[derive(Debug, PartialEq)]
pub struct DecoderError {
    inner: DecodeError,
    at: usize,
}

impl DecoderError {
    pub fn into_inner(self) -> DecodeError {
        self.inner
    }

    pub fn inner(&self) -> &DecodeError {
        &self.inner
    }

    /// Input position at which decoding stopped.
    pub fn position(&self) -> usize {
        self.at
    }
}

impl std::error::Error for DecoderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
       Some(&self.inner)
    }
}

impl Display for DecoderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} at input position {}", self.inner, self.at)
    }
}

#[derive(Debug, PartialEq)]
pub enum DecodeError {
    Eof { required: usize, remaining: usize },
    Utf8(std::str::Utf8Error),
    /// The bytes do not form a valid value of the named scalar type.
    BitPattern(&'static str),
    Allocation,
}

impl DecodeError {
    pub fn at(self, at: usize) -> DecoderError {
        DecoderError { inner: self, at }
    }
}

impl From<OutOfBounds> for DecodeError {
    fn from(e: OutOfBounds) -> DecodeError {
        DecodeError::Eof { required: e.requested, remaining: e.remaining }
    }
}

impl From<std::str::Utf8Error> for DecodeError {
    fn from(e: std::str::Utf8Error) -> DecodeError {
        DecodeError::Utf8(e)
    }
}

impl From<std::collections::TryReserveError> for DecodeError {
    fn from(_e: std::collections::TryReserveError) -> DecodeError {
        DecodeError::Allocation
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Utf8(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            DecodeError::Eof { required, remaining } => write!(f, "Unexpected end of buffer while decoding: needed {} bytes, {} left", required, remaining),
            DecodeError::Utf8(e) => write!(f, "String slice was not valid Utf-8: {}", e),
            DecodeError::BitPattern(ty) => write!(f, "Invalid bit pattern for {}", ty),
            DecodeError::Allocation => f.write_str("An allocation failed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    Overflow { required: usize, remaining: usize },
}

impl From<OutOfBounds> for EncodeError {
    fn from(e: OutOfBounds) -> EncodeError {
        EncodeError::Overflow { required: e.requested, remaining: e.remaining }
    }
}

impl std::error::Error for EncodeError {}

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            EncodeError::Overflow { required, remaining } => write!(f, "Value needs {} bytes but only {} remain in buffer", required, remaining),
        }
    }
}

/// Raised by the checking stream policies. `Overflow` and `Truncated` are detected before any
/// byte of the buffer or field of the destination is touched.
#[derive(Debug, PartialEq)]
pub enum StreamError {
    Overflow { required: usize, remaining: usize },
    Truncated { at: usize, remaining: usize },
    Decode(DecoderError),
}

impl From<EncodeError> for StreamError {
    fn from(e: EncodeError) -> StreamError {
        match e {
            EncodeError::Overflow { required, remaining } => StreamError::Overflow { required, remaining },
        }
    }
}

impl From<DecoderError> for StreamError {
    fn from(e: DecoderError) -> StreamError {
        StreamError::Decode(e)
    }
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StreamError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for StreamError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            StreamError::Overflow { required, remaining } => write!(f, "Tried to overflow binary stream: value needs {} bytes, {} remain", required, remaining),
            StreamError::Truncated { at, remaining } => write!(f, "Input truncated or malformed at position {} ({} bytes remain)", at, remaining),
            StreamError::Decode(e) => write!(f, "Decoding error: {}", e),
        }
    }
}
