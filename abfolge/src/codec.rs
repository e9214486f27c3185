//! The three recursive codec operations and the strategies shared by the std implementations.
//!
//! All encoding functions take `&self` and a [`ByteView`] and advance the view by exactly
//! [`Encode::size_of`] bytes. All decoding functions fill an existing destination in place and
//! advance the view by the number of consumed bytes. [`Decode::try_size_of`] walks an encoding
//! the same way `read` would, without touching any destination.
//!
//! # Wire layout
//!
//! The format is positional: nothing but the order and the types of the values determine how
//! bytes are interpreted.
//!
//! * Scalars are copied verbatim in native byte order.
//! * Count prefixed categories start with a native `usize` holding the number of elements.
//! * Fixed arrays, tuples and records are the concatenation of their members.

use crate::capability::Container;
use crate::error::{DecodeError, EncodeError};
use crate::shape::Shape;
use crate::view::ByteView;

/// Width of the element count in front of arrays and containers.
pub const COUNT_SIZE: usize = std::mem::size_of::<usize>();

pub trait Encode: Shape {

    /// Exact number of bytes `write` will produce for the current content.
    fn size_of(&self) -> usize;

    fn write<B: AsRef<[u8]> + AsMut<[u8]>>(&self, out: &mut ByteView<B>) -> Result<(), EncodeError>;

    /// Size of a run of elements. Scalars override this and the following hook with a bulk copy.
    #[doc(hidden)]
    fn size_of_slice(items: &[Self]) -> usize where Self: Sized {
        match Self::STATIC_SIZE {
            Some(size) => items.len() * size,
            None => items.iter().map(Encode::size_of).sum(),
        }
    }

    #[doc(hidden)]
    fn write_slice<B: AsRef<[u8]> + AsMut<[u8]>>(items: &[Self], out: &mut ByteView<B>) -> Result<(), EncodeError> where Self: Sized {
        for item in items {
            item.write(out)?;
        }
        Ok(())
    }

}

/// Decoding fills an existing value in place.
///
/// Neither `read` nor the dry run ever allocates more than the input can back, with one
/// exception: elements that occupy zero bytes. A count prefix in front of such elements is
/// validated in constant time, but `read` still constructs that many elements.
pub trait Decode: Shape + Sized {

    /// Every byte string of `STATIC_SIZE` bytes decodes successfully.
    const TRIVIAL: bool = false;

    /// The value a decode starts from when a new element has to be constructed, for example
    /// inside a dynamic array or a container.
    fn fresh() -> Self;

    fn read<B: AsRef<[u8]>>(&mut self, input: &mut ByteView<B>) -> Result<(), DecodeError>;

    /// Dry run of `read` against `input`: the number of bytes a complete, valid encoding at the
    /// start of `input` occupies, or `None` if there is none.
    fn try_size_of(input: &[u8]) -> Option<usize>;

    #[doc(hidden)]
    fn read_slice<B: AsRef<[u8]>>(items: &mut [Self], input: &mut ByteView<B>) -> Result<(), DecodeError> {
        for item in items {
            item.read(input)?;
        }
        Ok(())
    }

    /// Dry run over `count` consecutive elements.
    #[doc(hidden)]
    fn try_size_of_many(count: usize, input: &[u8]) -> Option<usize> {
        match Self::STATIC_SIZE {
            // Zero-sized elements all see the same input.
            Some(0) => {
                if count > 0 {
                    Self::try_size_of(input)?;
                }
                Some(0)
            },
            Some(size) if Self::TRIVIAL => {
                let total = count.checked_mul(size)?;
                if input.len() >= total { Some(total) } else { None }
            },
            _ => {
                let mut used = 0;
                for _ in 0..count {
                    used += Self::try_size_of(&input[used..])?;
                }
                Some(used)
            },
        }
    }

}

/// Reads the count prefix at the start of `input` without consuming it, or `None` if `input` is
/// shorter than [`COUNT_SIZE`].
pub fn peek_count(input: &[u8]) -> Option<usize> {
    input.get(..COUNT_SIZE).map(bytemuck::pod_read_unaligned::<usize>)
}

pub(crate) fn read_count<B: AsRef<[u8]>>(input: &mut ByteView<B>) -> Result<usize, DecodeError> {
    let mut count = 0usize;
    count.read(input)?;
    Ok(count)
}

/// Rejects counts that cannot possibly be backed by the remaining input, before anything gets
/// allocated for them. Elements without a static size occupy at least one byte.
pub(crate) fn check_count<T: Shape, B: AsRef<[u8]>>(count: usize, input: &ByteView<B>) -> Result<(), DecodeError> {
    let min = T::STATIC_SIZE.unwrap_or(1);
    match count.checked_mul(min) {
        Some(required) if required <= input.remaining() => Ok(()),
        Some(required) => Err(DecodeError::Eof { required, remaining: input.remaining() }),
        None => Err(DecodeError::Eof { required: usize::MAX, remaining: input.remaining() }),
    }
}

/// Dry run of a count prefixed range of `T`.
pub(crate) fn try_range_size_of<T: Decode>(input: &[u8]) -> Option<usize> {
    let count = peek_count(input)?;
    T::try_size_of_many(count, &input[COUNT_SIZE..]).map(|used| COUNT_SIZE + used)
}

pub(crate) fn container_size_of<C: Container>(container: &C) -> usize {
    COUNT_SIZE + match <C::Entry as Shape>::STATIC_SIZE {
        Some(size) => container.count() * size,
        None => container.items().map(|item| item.size_of()).sum(),
    }
}

pub(crate) fn write_container<C: Container, B: AsRef<[u8]> + AsMut<[u8]>>(container: &C, out: &mut ByteView<B>) -> Result<(), EncodeError> {
    container.count().write(out)?;
    for item in container.items() {
        item.write(out)?;
    }
    Ok(())
}

/// Rebuilds the container by inserting one freshly decoded entry at a time.
pub(crate) fn read_container<C: Container, B: AsRef<[u8]>>(container: &mut C, input: &mut ByteView<B>) -> Result<(), DecodeError> {
    let count = read_count(input)?;
    check_count::<C::Entry, B>(count, input)?;
    container.clear();
    for _ in 0..count {
        let mut entry = C::Entry::fresh();
        entry.read(input)?;
        container.insert(entry);
    }
    Ok(())
}
