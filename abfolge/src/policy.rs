//! Overflow policies decide what a [`BoundedStream`](crate::BoundedStream) does when a value does
//! not fit into the remaining buffer or the remaining input does not hold a complete value.
//!
//! | Policy      | Status                       | Checked before mutation | Sticky |
//! |-------------|------------------------------|-------------------------|--------|
//! | `Unchecked` | `Result<(), StreamError>`    | no                      | no     |
//! | `Throwing`  | `Result<(), StreamError>`    | yes                     | no     |
//! | `FailFlag`  | `()`, see `failed()`         | yes                     | yes    |

use crate::codec::{Decode, Encode};
use crate::error::StreamError;
use crate::view::ByteView;
use tracing::debug;

pub trait OverflowPolicy {

    /// What `put` and `get` hand back to the caller.
    type Status;

    fn put<T, B>(&mut self, value: &T, out: &mut ByteView<B>) -> Self::Status
    where
        T: Encode + ?Sized,
        B: AsRef<[u8]> + AsMut<[u8]>;

    fn get<T, B>(&mut self, value: &mut T, input: &mut ByteView<B>) -> Self::Status
    where
        T: Decode,
        B: AsRef<[u8]>;
}

/// Runs the codec without looking ahead. The first out-of-bounds access stops the operation and
/// is reported; whatever was written or filled in before that point stays as it is.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unchecked;

impl OverflowPolicy for Unchecked {
    type Status = Result<(), StreamError>;

    fn put<T, B>(&mut self, value: &T, out: &mut ByteView<B>) -> Self::Status
    where
        T: Encode + ?Sized,
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        value.write(out)?;
        Ok(())
    }

    fn get<T, B>(&mut self, value: &mut T, input: &mut ByteView<B>) -> Self::Status
    where
        T: Decode,
        B: AsRef<[u8]>,
    {
        value.read(input).map_err(|e| e.at(input.position()))?;
        Ok(())
    }
}

/// Measures before writing and dry-runs before reading. Neither the buffer nor the destination
/// is touched when the check fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Throwing;

impl OverflowPolicy for Throwing {
    type Status = Result<(), StreamError>;

    fn put<T, B>(&mut self, value: &T, out: &mut ByteView<B>) -> Self::Status
    where
        T: Encode + ?Sized,
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        let required = value.size_of();
        let remaining = out.remaining();
        if required > remaining {
            debug!(required, remaining, type_name = std::any::type_name::<T>(), "value does not fit into stream");
            return Err(StreamError::Overflow { required, remaining });
        }
        value.write(out)?;
        Ok(())
    }

    fn get<T, B>(&mut self, value: &mut T, input: &mut ByteView<B>) -> Self::Status
    where
        T: Decode,
        B: AsRef<[u8]>,
    {
        if T::try_size_of(input.remaining_bytes()).is_none() {
            let at = input.position();
            let remaining = input.remaining();
            debug!(at, remaining, type_name = std::any::type_name::<T>(), "input does not hold a complete value");
            return Err(StreamError::Truncated { at, remaining });
        }
        value.read(input).map_err(|e| e.at(input.position()))?;
        Ok(())
    }
}

/// Latches the first failure. Once set, every further `put` and `get` is a no-op until
/// [`FailFlag::clear`] is called explicitly.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailFlag {
    failed: bool,
}

impl FailFlag {

    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn clear(&mut self) {
        self.failed = false;
    }

    fn latch(&mut self, status: Result<(), StreamError>) {
        if let Err(e) = status {
            debug!(error = %e, "stream fail flag set");
            self.failed = true;
        }
    }
}

impl OverflowPolicy for FailFlag {
    type Status = ();

    fn put<T, B>(&mut self, value: &T, out: &mut ByteView<B>) -> Self::Status
    where
        T: Encode + ?Sized,
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        if !self.failed {
            self.latch(Throwing.put(value, out));
        }
    }

    fn get<T, B>(&mut self, value: &mut T, input: &mut ByteView<B>) -> Self::Status
    where
        T: Decode,
        B: AsRef<[u8]>,
    {
        if !self.failed {
            self.latch(Throwing.get(value, input));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FailFlag, OverflowPolicy, Throwing, Unchecked};
    use crate::error::StreamError;
    use crate::view::ByteView;

    #[test]
    fn throwing_checks_first() {
        let mut buf = [0xaau8; 3];
        let mut out = ByteView::new(&mut buf[..]);
        assert_eq!(Err(StreamError::Overflow { required: 4, remaining: 3 }), Throwing.put(&7u32, &mut out));
        assert_eq!(0, out.position());
        assert_eq!([0xaa; 3], buf);
    }

    #[test]
    fn throwing_reports_truncation() {
        let mut value = 5u16;
        let mut input = ByteView::new(&[1u8][..]);
        assert_eq!(Err(StreamError::Truncated { at: 0, remaining: 1 }), Throwing.get(&mut value, &mut input));
        assert_eq!(5, value);
    }

    #[test]
    fn unchecked_stops_at_the_end() {
        let mut buf = [0u8; 6];
        let mut out = ByteView::new(&mut buf[..]);
        assert!(Unchecked.put(&(1u32, 2u32), &mut out).is_err());
        assert_eq!(4, out.position());
        let mut value = 0u64;
        match Unchecked.get(&mut value, &mut ByteView::new(&[0u8; 3][..])) {
            Err(StreamError::Decode(e)) => assert_eq!(0, e.position()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn fail_flag_latches() {
        let mut policy = FailFlag::default();
        let mut buf = [0u8; 5];
        let mut out = ByteView::new(&mut buf[..]);
        policy.put(&1u32, &mut out);
        assert!(!policy.failed());
        policy.put(&2u32, &mut out);
        assert!(policy.failed());
        policy.put(&3u8, &mut out);
        assert_eq!(4, out.position());
        policy.clear();
        policy.put(&3u8, &mut out);
        assert!(!policy.failed());
        assert_eq!(5, out.position());
    }

}
