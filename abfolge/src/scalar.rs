//! Scalars are encoded as a verbatim copy of their in-memory representation in native byte order.
//! Runs of scalars (the payload of a `ScalarArray`) are copied in one go.
//!
//! Only types without padding and without invalid bit patterns can be declared through
//! [`scalar!`]; this is what `bytemuck::Pod` guarantees. `bool` and `char` have invalid bit
//! patterns and are validated while decoding.

/// Declares types as `Scalar`. Every listed type must implement `bytemuck::Pod`.
///
/// ```
/// use abfolge::{classify, WireCategory};
///
/// #[derive(Clone, Copy, Default, PartialEq, Debug, bytemuck::Pod, bytemuck::Zeroable)]
/// #[repr(C)]
/// struct Rgb {
///     r: u8,
///     g: u8,
///     b: u8,
/// }
///
/// abfolge::scalar!(Rgb);
///
/// assert_eq!(WireCategory::Scalar, classify::<Rgb>());
/// assert_eq!(vec![1, 2, 3], abfolge::to_vec(&Rgb { r: 1, g: 2, b: 3 }).unwrap());
/// ```
#[macro_export]
macro_rules! scalar {
    ($($ty:ty),* $(,)?) => { $(
        impl $crate::Shape for $ty {
            const CATEGORY: $crate::WireCategory = $crate::WireCategory::Scalar;
            const STATIC_SIZE: ::core::option::Option<usize> = ::core::option::Option::Some(::core::mem::size_of::<$ty>());
        }

        impl $crate::Encode for $ty {
            #[inline]
            fn size_of(&self) -> usize {
                ::core::mem::size_of::<$ty>()
            }

            #[inline]
            fn write<B: AsRef<[u8]> + AsMut<[u8]>>(&self, out: &mut $crate::ByteView<B>) -> ::core::result::Result<(), $crate::EncodeError> {
                out.put($crate::__private::bytemuck::bytes_of(self))?;
                Ok(())
            }

            fn size_of_slice(items: &[Self]) -> usize {
                items.len() * ::core::mem::size_of::<$ty>()
            }

            fn write_slice<B: AsRef<[u8]> + AsMut<[u8]>>(items: &[Self], out: &mut $crate::ByteView<B>) -> ::core::result::Result<(), $crate::EncodeError> {
                out.put($crate::__private::bytemuck::cast_slice::<$ty, u8>(items))?;
                Ok(())
            }
        }

        impl $crate::Decode for $ty {
            const TRIVIAL: bool = true;

            fn fresh() -> Self {
                <$ty as $crate::__private::bytemuck::Zeroable>::zeroed()
            }

            #[inline]
            fn read<B: AsRef<[u8]>>(&mut self, input: &mut $crate::ByteView<B>) -> ::core::result::Result<(), $crate::DecodeError> {
                let bytes = input.take(::core::mem::size_of::<$ty>())?;
                *self = $crate::__private::bytemuck::pod_read_unaligned(bytes);
                Ok(())
            }

            #[inline]
            fn try_size_of(input: &[u8]) -> ::core::option::Option<usize> {
                let size = ::core::mem::size_of::<$ty>();
                if input.len() >= size { Some(size) } else { None }
            }

            fn read_slice<B: AsRef<[u8]>>(items: &mut [Self], input: &mut $crate::ByteView<B>) -> ::core::result::Result<(), $crate::DecodeError> {
                let bytes = input.take(items.len() * ::core::mem::size_of::<$ty>())?;
                $crate::__private::bytemuck::cast_slice_mut::<$ty, u8>(items).copy_from_slice(bytes);
                Ok(())
            }
        }
    )* };
}

/// Scalars whose bit patterns need to be checked on the way in.
macro_rules! checked_scalar {
    ($($ty:ty),*) => { $(
        impl crate::Shape for $ty {
            const CATEGORY: crate::WireCategory = crate::WireCategory::Scalar;
            const STATIC_SIZE: Option<usize> = Some(std::mem::size_of::<$ty>());
        }

        impl crate::Encode for $ty {
            #[inline]
            fn size_of(&self) -> usize {
                std::mem::size_of::<$ty>()
            }

            #[inline]
            fn write<B: AsRef<[u8]> + AsMut<[u8]>>(&self, out: &mut crate::ByteView<B>) -> Result<(), crate::EncodeError> {
                out.put(bytemuck::bytes_of(self))?;
                Ok(())
            }

            fn size_of_slice(items: &[Self]) -> usize {
                items.len() * std::mem::size_of::<$ty>()
            }

            fn write_slice<B: AsRef<[u8]> + AsMut<[u8]>>(items: &[Self], out: &mut crate::ByteView<B>) -> Result<(), crate::EncodeError> {
                out.put(bytemuck::cast_slice::<$ty, u8>(items))?;
                Ok(())
            }
        }

        impl crate::Decode for $ty {
            fn fresh() -> Self {
                <$ty>::default()
            }

            fn read<B: AsRef<[u8]>>(&mut self, input: &mut crate::ByteView<B>) -> Result<(), crate::DecodeError> {
                let bytes = input.take(std::mem::size_of::<$ty>())?;
                *self = bytemuck::checked::try_pod_read_unaligned(bytes)
                    .map_err(|_| crate::DecodeError::BitPattern(stringify!($ty)))?;
                Ok(())
            }

            fn try_size_of(input: &[u8]) -> Option<usize> {
                let size = std::mem::size_of::<$ty>();
                let bytes = input.get(..size)?;
                bytemuck::checked::try_pod_read_unaligned::<$ty>(bytes).ok()?;
                Some(size)
            }

            fn read_slice<B: AsRef<[u8]>>(items: &mut [Self], input: &mut crate::ByteView<B>) -> Result<(), crate::DecodeError> {
                let size = std::mem::size_of::<$ty>();
                let bytes = input.take(items.len() * size)?;
                for (item, chunk) in items.iter_mut().zip(bytes.chunks_exact(size)) {
                    *item = bytemuck::checked::try_pod_read_unaligned(chunk)
                        .map_err(|_| crate::DecodeError::BitPattern(stringify!($ty)))?;
                }
                Ok(())
            }
        }
    )* };
}

scalar!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);
checked_scalar!(bool, char);

#[cfg(test)]
mod tests {
    use crate::{ByteView, Decode, DecodeError, Encode};

    #[derive(Clone, Copy, Default, PartialEq, Debug, bytemuck::Pod, bytemuck::Zeroable)]
    #[repr(C)]
    struct Sample {
        id: u32,
        level: f32,
    }

    crate::scalar!(Sample);

    fn assert_roundtrip<T: Encode + Decode + Default + PartialEq + std::fmt::Debug>(value: T) {
        let mut buf = vec![0u8; value.size_of()];
        let mut out = ByteView::new(&mut buf[..]);
        value.write(&mut out).unwrap();
        assert_eq!(0, out.remaining());
        let mut decoded = T::default();
        let mut input = ByteView::new(&buf[..]);
        decoded.read(&mut input).unwrap();
        assert_eq!(value, decoded);
        assert_eq!(Some(buf.len()), T::try_size_of(&buf));
    }

    #[test]
    fn native_layout() {
        let mut buf = [0u8; 4];
        0x0102_0304u32.write(&mut ByteView::new(&mut buf[..])).unwrap();
        assert_eq!(0x0102_0304u32.to_ne_bytes(), buf);
    }

    #[test]
    fn primitives() {
        assert_roundtrip(u8::MAX);
        assert_roundtrip(i64::MIN);
        assert_roundtrip(u128::MAX - 7);
        assert_roundtrip(std::f64::consts::PI);
        assert_roundtrip(-0.5f32);
        assert_roundtrip(true);
        assert_roundtrip('ß');
        assert_roundtrip(Sample { id: 7, level: 0.25 });
    }

    #[test]
    fn invalid_bit_patterns() {
        let mut flag = false;
        let mut input = ByteView::new(&[2u8][..]);
        assert_eq!(Err(DecodeError::BitPattern("bool")), flag.read(&mut input));
        assert_eq!(None, bool::try_size_of(&[2]));
        let surrogate = 0xd800u32.to_ne_bytes();
        assert_eq!(None, char::try_size_of(&surrogate));
        let mut c = 'a';
        assert!(c.read(&mut ByteView::new(&surrogate[..])).is_err());
        assert_eq!('a', c);
    }

    #[test]
    fn truncated() {
        let mut v = 0u32;
        let mut input = ByteView::new(&[1u8, 2, 3][..]);
        assert_eq!(Err(DecodeError::Eof { required: 4, remaining: 3 }), v.read(&mut input));
        assert_eq!(0, input.position());
        assert_eq!(None, u32::try_size_of(&[1, 2, 3]));
    }

    #[test]
    fn bulk_slices() {
        let values = [1u16, 2, 3];
        assert_eq!(6, u16::size_of_slice(&values));
        let mut buf = [0u8; 6];
        u16::write_slice(&values, &mut ByteView::new(&mut buf[..])).unwrap();
        let mut decoded = [0u16; 3];
        u16::read_slice(&mut decoded, &mut ByteView::new(&buf[..])).unwrap();
        assert_eq!(values, decoded);
        let mut flags = [false; 2];
        let mut input = ByteView::new(&[1u8, 7][..]);
        assert_eq!(Err(DecodeError::BitPattern("bool")), bool::read_slice(&mut flags, &mut input));
    }

}
