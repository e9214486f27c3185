//! Positional binary encoding of Rust values into caller-owned, bounded buffers.
//!
//! Every codec type has a [`WireCategory`] which fixes how it is laid out on the wire. The format
//! carries no tags, names or versions: the reader has to decode exactly the sequence of types the
//! writer encoded. Scalars and the element count in front of arrays and containers use the
//! native byte order and width of the host, so the format is meant for exchange between
//! components built for the same platform.
//!
//! Values are written and read either directly through [`Encode`] and [`Decode`] on a
//! [`ByteView`], through the convenience functions [`to_vec`], [`to_slice`] and [`from_bytes`],
//! or through a [`BoundedStream`] whose [`OverflowPolicy`] decides how running out of space or
//! input is reported.
//!
//! # A note on `Rc` and raw pointers
//!
//! Raw pointers and shared-ownership pointers classify as `Forbidden`: their content is either not
//! owned or may be aliased, neither of which a positional format can reproduce. Handles that only
//! make sense inside the running process, such as `Instant` or `Mutex`, classify as `Unknown`.
//! Neither implements the codec traits, so trying to encode them does not compile.
//!
//! # Examples
//!
//! ```
//! use abfolge::*;
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Reading {
//!     sensor: u32,
//!     values: Vec<i16>,
//! }
//!
//! record! {
//!     Reading { sensor: u32, values: Vec<i16> }
//! }
//!
//! let reading = Reading { sensor: 1, values: vec![-3, 4] };
//! let mut buf = [0u8; 64];
//! let mut writer = BoundedStream::with_policy(&mut buf[..], Throwing);
//! writer.put(&reading).unwrap();
//! assert_eq!(4 + COUNT_SIZE + 4, writer.position());
//!
//! let mut decoded = Reading::default();
//! let mut reader = Reader::new(writer.written());
//! reader.get(&mut decoded);
//! assert!(!reader.failed());
//! assert_eq!(reading, decoded);
//! ```

mod capability;
mod codec;
mod error;
mod impls;
mod policy;
mod record;
mod scalar;
mod shape;
mod stream;
mod view;

pub use capability::{ArrayLike, Container, Resizable};
pub use codec::{peek_count, Decode, Encode, COUNT_SIZE};
pub use error::{DecodeError, DecoderError, EncodeError, StreamError};
pub use policy::{FailFlag, OverflowPolicy, Throwing, Unchecked};
pub use shape::{classify, Shape, WireCategory};
pub use stream::{BoundedStream, Reader, Writer};
pub use view::{ByteView, OutOfBounds};

use shape::Admit;

#[doc(hidden)]
pub mod __private {
    pub use bytemuck;
    pub use crate::shape::static_sum;
}

/// Encodes `value` into a freshly allocated vector of exactly [`Encode::size_of`] bytes.
pub fn to_vec<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    let () = Admit::<T>::CHECK;
    let mut out = ByteView::new(vec![0u8; value.size_of()]);
    value.write(&mut out)?;
    Ok(out.into_inner())
}

/// Encodes `value` at the start of `buf` and returns the number of bytes written. Nothing is
/// written if the value does not fit.
pub fn to_slice<T: Encode + ?Sized>(value: &T, buf: &mut [u8]) -> Result<usize, EncodeError> {
    let () = Admit::<T>::CHECK;
    let required = value.size_of();
    if required > buf.len() {
        return Err(EncodeError::Overflow { required, remaining: buf.len() });
    }
    let mut out = ByteView::new(buf);
    value.write(&mut out)?;
    Ok(out.position())
}

/// Decodes a value from the start of `bytes` and returns it together with the number of consumed
/// bytes. Trailing bytes are left alone.
pub fn from_bytes<T: Decode>(bytes: &[u8]) -> Result<(T, usize), DecoderError> {
    let () = Admit::<T>::CHECK;
    let mut value = T::fresh();
    let mut input = ByteView::new(bytes);
    value.read(&mut input).map_err(|e| e.at(input.position()))?;
    Ok((value, input.position()))
}
