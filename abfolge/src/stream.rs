use crate::codec::{Decode, Encode};
use crate::policy::{FailFlag, OverflowPolicy};
use crate::shape::Admit;
use crate::view::ByteView;

/// A cursor over a caller-owned buffer that reads and writes whole values, reacting to overflow
/// and truncation according to its policy `P`.
///
/// ```
/// use abfolge::{BoundedStream, Reader, Writer};
///
/// let mut buf = [0u8; 16];
/// let mut writer = Writer::new(&mut buf[..]);
/// writer.put(&7u32);
/// writer.put("hi");
/// assert!(!writer.failed());
/// let len = writer.position();
///
/// let mut reader = Reader::new(&buf[..len]);
/// let (mut n, mut s) = (0u32, String::new());
/// reader.get(&mut n);
/// reader.get(&mut s);
/// assert!(!reader.failed());
/// assert_eq!((7, "hi"), (n, s.as_str()));
/// ```
#[derive(Debug)]
pub struct BoundedStream<B, P = FailFlag> {
    view: ByteView<B>,
    policy: P,
}

/// Input stream over a borrowed buffer.
pub type Reader<'a, P = FailFlag> = BoundedStream<&'a [u8], P>;

/// Bidirectional stream over a mutably borrowed buffer.
pub type Writer<'a, P = FailFlag> = BoundedStream<&'a mut [u8], P>;

impl<B: AsRef<[u8]>> BoundedStream<B, FailFlag> {

    /// Creates a stream with the sticky fail flag policy.
    pub fn new(buf: B) -> Self {
        Self::with_policy(buf, FailFlag::default())
    }

    /// Whether any operation on this stream has failed since creation or the last
    /// [`clear_fault`](Self::clear_fault).
    pub fn failed(&self) -> bool {
        self.policy.failed()
    }

    pub fn clear_fault(&mut self) {
        self.policy.clear()
    }

}

impl<B: AsRef<[u8]>, P: OverflowPolicy> BoundedStream<B, P> {

    pub fn with_policy(buf: B, policy: P) -> Self {
        Self { view: ByteView::new(buf), policy }
    }

    /// Decodes the next value into `value`.
    pub fn get<T: Decode>(&mut self, value: &mut T) -> P::Status {
        let () = Admit::<T>::CHECK;
        self.policy.get(value, &mut self.view)
    }

    pub fn position(&self) -> usize {
        self.view.position()
    }

    pub fn remaining(&self) -> usize {
        self.view.remaining()
    }

    pub fn view(&self) -> &ByteView<B> {
        &self.view
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn into_inner(self) -> B {
        self.view.into_inner()
    }

}

impl<B: AsRef<[u8]> + AsMut<[u8]>, P: OverflowPolicy> BoundedStream<B, P> {

    /// Encodes `value` at the cursor.
    pub fn put<T: Encode + ?Sized>(&mut self, value: &T) -> P::Status {
        let () = Admit::<T>::CHECK;
        self.policy.put(value, &mut self.view)
    }

    /// The bytes produced so far.
    pub fn written(&self) -> &[u8] {
        self.view.written()
    }

}

#[cfg(test)]
mod tests {
    use super::{BoundedStream, Reader, Writer};
    use crate::error::StreamError;
    use crate::policy::{Throwing, Unchecked};
    use std::collections::BTreeMap;

    #[test]
    fn chained_writes_and_reads() {
        let mut buf = [0u8; 64];
        let mut writer = Writer::new(&mut buf[..]);
        writer.put(&1u8);
        writer.put(&vec![2u16, 3]);
        writer.put(&BTreeMap::from([(4u8, String::from("vier"))]));
        assert!(!writer.failed());
        let len = writer.position();
        assert_eq!(len, writer.written().len());

        let mut reader = Reader::new(&buf[..len]);
        let mut a = 0u8;
        let mut b: Vec<u16> = Vec::new();
        let mut c: BTreeMap<u8, String> = BTreeMap::new();
        reader.get(&mut a);
        reader.get(&mut b);
        reader.get(&mut c);
        assert!(!reader.failed());
        assert_eq!(0, reader.remaining());
        assert_eq!((1, vec![2, 3]), (a, b));
        assert_eq!(Some(&String::from("vier")), c.get(&4));
    }

    #[test]
    fn fail_flag_blocks_everything_after_a_failure() {
        let mut buf = [0u8; 5];
        let mut writer = Writer::new(&mut buf[..]);
        writer.put(&0x1111_1111u32);
        writer.put(&0x2222u16);
        assert!(writer.failed());
        writer.put(&0x33u8);
        assert_eq!(4, writer.position());
        assert_eq!(0, buf[4]);
    }

    #[test]
    fn fail_flag_on_read_keeps_destination() {
        let bytes = [1u8, 7];
        let mut reader = Reader::new(&bytes[..]);
        let mut first = 0u8;
        let mut second = 0xffffu16;
        let mut third = 9u8;
        reader.get(&mut first);
        reader.get(&mut second);
        reader.get(&mut third);
        assert_eq!(1, first);
        assert!(reader.failed());
        assert_eq!(0xffff, second);
        assert_eq!(9, third);
        assert_eq!(1, reader.position());
        reader.clear_fault();
        reader.get(&mut third);
        assert!(!reader.failed());
        assert_eq!(7, third);
        assert_eq!(2, reader.position());
    }

    #[test]
    fn throwing_stream() {
        let mut buf = [0u8; 4];
        let mut writer = BoundedStream::with_policy(&mut buf[..], Throwing);
        assert_eq!(Ok(()), writer.put(&[1u8, 2]));
        assert_eq!(Err(StreamError::Overflow { required: 3, remaining: 2 }), writer.put(&(3u8, 4u16)));
        assert_eq!(Ok(()), writer.put(&5u16));
        assert_eq!(&[1, 2, 5u16.to_ne_bytes()[0], 5u16.to_ne_bytes()[1]], writer.written());
    }

    #[test]
    fn unchecked_stream() {
        let bytes = 3u32.to_ne_bytes();
        let mut reader = BoundedStream::with_policy(&bytes[..], Unchecked);
        let mut value = 0u32;
        assert!(reader.get(&mut value).is_ok());
        assert_eq!(3, value);
        assert!(reader.get(&mut value).is_err());
        assert_eq!(4, reader.into_inner().len());
    }

}
