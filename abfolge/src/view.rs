//! A `ByteView` is a cursor over a caller-owned, fixed-capacity byte buffer. Reading and writing
//! both advance the cursor; the buffer itself is never grown, shrunk or reallocated. The same type
//! serves input (`&[u8]`) and output (`&mut [u8]`, `Vec<u8>`) buffers, writing is only available
//! when the buffer is mutable.

use std::fmt::{self, Display, Formatter};

/// An access would have moved the cursor past the end of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds {
    pub requested: usize,
    pub remaining: usize,
}

impl Display for OutOfBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Requested {} bytes but only {} remain", self.requested, self.remaining)
    }
}

impl std::error::Error for OutOfBounds {}

#[derive(Debug, Clone)]
pub struct ByteView<B> {
    buf: B,
    pos: usize,
}

impl<B: AsRef<[u8]>> ByteView<B> {

    pub fn new(buf: B) -> Self {
        Self { buf, pos: 0 }
    }

    /// Number of bytes consumed or produced so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.as_ref().len()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.pos
    }

    /// The unread tail of the buffer, starting at the cursor.
    #[inline]
    pub fn remaining_bytes(&self) -> &[u8] {
        &self.buf.as_ref()[self.pos..]
    }

    /// Moves the cursor forward. Fails without moving if fewer than `n` bytes remain.
    pub fn advance(&mut self, n: usize) -> Result<(), OutOfBounds> {
        self.check(n)?;
        self.pos += n;
        Ok(())
    }

    /// Returns the next `n` bytes and moves the cursor past them.
    pub fn take(&mut self, n: usize) -> Result<&[u8], OutOfBounds> {
        self.check(n)?;
        self.pos += n;
        Ok(&self.buf.as_ref()[self.pos - n..self.pos])
    }

    pub fn into_inner(self) -> B {
        self.buf
    }

    #[inline]
    fn check(&self, n: usize) -> Result<(), OutOfBounds> {
        if n > self.remaining() {
            Err(OutOfBounds { requested: n, remaining: self.remaining() })
        } else {
            Ok(())
        }
    }

}

impl<'a> ByteView<&'a [u8]> {

    /// Like [`take`](Self::take), but the returned slice borrows from the underlying buffer
    /// instead of the view.
    pub fn take_borrowed(&mut self, n: usize) -> Result<&'a [u8], OutOfBounds> {
        self.check(n)?;
        let buf: &'a [u8] = self.buf;
        self.pos += n;
        Ok(&buf[self.pos - n..self.pos])
    }

}

impl<B: AsRef<[u8]> + AsMut<[u8]>> ByteView<B> {

    /// Copies `bytes` to the cursor position and moves the cursor past them. Nothing is written
    /// if the bytes do not fit.
    pub fn put(&mut self, bytes: &[u8]) -> Result<(), OutOfBounds> {
        self.check(bytes.len())?;
        let end = self.pos + bytes.len();
        self.buf.as_mut()[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }

    /// The prefix of the buffer that has been written (or read) so far.
    pub fn written(&self) -> &[u8] {
        &self.buf.as_ref()[..self.pos]
    }

}

#[cfg(test)]
mod tests {
    use super::{ByteView, OutOfBounds};

    #[test]
    fn cursor_moves_on_take() {
        let buf = [1u8, 2, 3, 4, 5];
        let mut view = ByteView::new(&buf[..]);
        assert_eq!(&[1, 2], view.take(2).unwrap());
        assert_eq!(2, view.position());
        assert_eq!(3, view.remaining());
        assert_eq!(&[3, 4, 5], view.remaining_bytes());
        view.advance(3).unwrap();
        assert_eq!(0, view.remaining());
    }

    #[test]
    fn never_passes_end() {
        let buf = [0u8; 4];
        let mut view = ByteView::new(&buf[..]);
        view.advance(3).unwrap();
        assert_eq!(Err(OutOfBounds { requested: 2, remaining: 1 }), view.advance(2));
        assert_eq!(3, view.position());
        assert!(view.take(2).is_err());
        assert_eq!(3, view.position());
    }

    #[test]
    fn put_is_all_or_nothing() {
        let mut buf = [0u8; 4];
        let mut view = ByteView::new(&mut buf[..]);
        view.put(&[7, 7, 7]).unwrap();
        assert_eq!(Err(OutOfBounds { requested: 2, remaining: 1 }), view.put(&[9, 9]));
        assert_eq!(&[7, 7, 7], view.written());
        assert_eq!([7, 7, 7, 0], buf);
    }

    #[test]
    fn borrowed_slices_outlive_the_view() {
        let buf = [1u8, 2, 3];
        let head = {
            let mut view = ByteView::new(&buf[..]);
            view.take_borrowed(2).unwrap()
        };
        assert_eq!(&[1, 2], head);
    }

    #[test]
    fn owned_buffer() {
        let mut view = ByteView::new(vec![0u8; 2]);
        view.put(&[1]).unwrap();
        assert_eq!(1, view.remaining());
        assert_eq!(vec![1, 0], view.into_inner());
    }

}
