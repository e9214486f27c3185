//! Wire declarations for std types: arrays, strings, tuples and collections.

use crate::capability::{ArrayLike, Container, Resizable};
use crate::codec::{check_count, container_size_of, peek_count, read_container, read_count, try_range_size_of, write_container, Decode, Encode, COUNT_SIZE};
use crate::error::{DecodeError, EncodeError};
use crate::shape::{static_mul, static_sum, Shape, WireCategory};
use crate::view::ByteView;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
use std::hash::{BuildHasher, Hash};

/// Contiguous runs of scalars take the bulk path, everything else is encoded element by element.
const fn array_category<T: Shape>() -> WireCategory {
    if matches!(T::CATEGORY, WireCategory::Scalar) {
        WireCategory::ScalarArray
    } else {
        WireCategory::DynamicArray
    }
}

/// Fills a resizable array from a count prefixed encoding. The count is checked against the
/// remaining input before the array is touched.
fn read_resizable<A, B>(array: &mut A, input: &mut ByteView<B>) -> Result<(), DecodeError>
where
    A: Resizable,
    A::Elem: Decode,
    B: AsRef<[u8]>,
{
    let count = read_count(input)?;
    check_count::<A::Elem, B>(count, input)?;
    array.resize_to(count)?;
    <A::Elem as Decode>::read_slice(array.elements_mut(), input)
}

impl<T: Encode + ?Sized> Encode for &T {
    #[inline]
    fn size_of(&self) -> usize {
        (**self).size_of()
    }

    #[inline]
    fn write<B: AsRef<[u8]> + AsMut<[u8]>>(&self, out: &mut ByteView<B>) -> Result<(), EncodeError> {
        (**self).write(out)
    }
}

impl<T: Shape> Shape for [T] {
    const CATEGORY: WireCategory = array_category::<T>();
}

impl<T: Encode> Encode for [T] {
    fn size_of(&self) -> usize {
        COUNT_SIZE + T::size_of_slice(self)
    }

    fn write<B: AsRef<[u8]> + AsMut<[u8]>>(&self, out: &mut ByteView<B>) -> Result<(), EncodeError> {
        self.len().write(out)?;
        T::write_slice(self, out)
    }
}

impl<T: Shape> Shape for Vec<T> {
    const CATEGORY: WireCategory = array_category::<T>();
}

impl<T: Encode> Encode for Vec<T> {
    fn size_of(&self) -> usize {
        self.as_slice().size_of()
    }

    fn write<B: AsRef<[u8]> + AsMut<[u8]>>(&self, out: &mut ByteView<B>) -> Result<(), EncodeError> {
        self.as_slice().write(out)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn fresh() -> Self {
        Vec::new()
    }

    fn read<B: AsRef<[u8]>>(&mut self, input: &mut ByteView<B>) -> Result<(), DecodeError> {
        read_resizable(self, input)
    }

    fn try_size_of(input: &[u8]) -> Option<usize> {
        try_range_size_of::<T>(input)
    }
}

impl Shape for str {
    const CATEGORY: WireCategory = WireCategory::ScalarArray;
}

impl Encode for str {
    fn size_of(&self) -> usize {
        COUNT_SIZE + self.len()
    }

    fn write<B: AsRef<[u8]> + AsMut<[u8]>>(&self, out: &mut ByteView<B>) -> Result<(), EncodeError> {
        self.len().write(out)?;
        out.put(self.as_bytes())?;
        Ok(())
    }
}

impl Shape for String {
    const CATEGORY: WireCategory = WireCategory::ScalarArray;
}

impl Encode for String {
    fn size_of(&self) -> usize {
        self.as_str().size_of()
    }

    fn write<B: AsRef<[u8]> + AsMut<[u8]>>(&self, out: &mut ByteView<B>) -> Result<(), EncodeError> {
        self.as_str().write(out)
    }
}

impl Decode for String {
    fn fresh() -> Self {
        String::new()
    }

    fn read<B: AsRef<[u8]>>(&mut self, input: &mut ByteView<B>) -> Result<(), DecodeError> {
        let count = read_count(input)?;
        check_count::<u8, B>(count, input)?;
        let text = std::str::from_utf8(input.take(count)?)?;
        self.clear();
        self.try_reserve_exact(text.len())?;
        self.push_str(text);
        Ok(())
    }

    fn try_size_of(input: &[u8]) -> Option<usize> {
        let count = peek_count(input)?;
        let bytes = input[COUNT_SIZE..].get(..count)?;
        std::str::from_utf8(bytes).ok()?;
        Some(COUNT_SIZE + count)
    }
}

impl<T: Shape, const N: usize> Shape for [T; N] {
    const CATEGORY: WireCategory = WireCategory::FixedArray;
    const STATIC_SIZE: Option<usize> = static_mul(T::STATIC_SIZE, N);
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn size_of(&self) -> usize {
        T::size_of_slice(self.elements())
    }

    fn write<B: AsRef<[u8]> + AsMut<[u8]>>(&self, out: &mut ByteView<B>) -> Result<(), EncodeError> {
        for item in self.elements() {
            item.write(out)?;
        }
        Ok(())
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    const TRIVIAL: bool = T::TRIVIAL;

    fn fresh() -> Self {
        std::array::from_fn(|_| T::fresh())
    }

    fn read<B: AsRef<[u8]>>(&mut self, input: &mut ByteView<B>) -> Result<(), DecodeError> {
        for item in self.elements_mut() {
            item.read(input)?;
        }
        Ok(())
    }

    fn try_size_of(input: &[u8]) -> Option<usize> {
        T::try_size_of_many(N, input)
    }
}

macro_rules! tuple_impls {
    ($( ( $($name:ident . $idx:tt),* ) )*) => { $(
        impl<$($name: Shape),*> Shape for ($($name,)*) {
            const CATEGORY: WireCategory = WireCategory::Tuple;
            const STATIC_SIZE: Option<usize> = static_sum(&[$($name::STATIC_SIZE),*]);
        }

        impl<$($name: Encode),*> Encode for ($($name,)*) {
            fn size_of(&self) -> usize {
                0 $(+ self.$idx.size_of())*
            }

            #[allow(unused_variables)]
            fn write<W: AsRef<[u8]> + AsMut<[u8]>>(&self, out: &mut ByteView<W>) -> Result<(), EncodeError> {
                $( self.$idx.write(out)?; )*
                Ok(())
            }
        }

        impl<$($name: Decode),*> Decode for ($($name,)*) {
            const TRIVIAL: bool = true $(&& $name::TRIVIAL)*;

            fn fresh() -> Self {
                ($($name::fresh(),)*)
            }

            #[allow(unused_variables)]
            fn read<R: AsRef<[u8]>>(&mut self, input: &mut ByteView<R>) -> Result<(), DecodeError> {
                $( self.$idx.read(input)?; )*
                Ok(())
            }

            #[allow(unused_mut, unused_variables)]
            fn try_size_of(input: &[u8]) -> Option<usize> {
                let mut used = 0;
                $( used += $name::try_size_of(&input[used..])?; )*
                Some(used)
            }
        }
    )* };
}

tuple_impls! {
    ()
    (A.0)
    (A.0, B.1)
    (A.0, B.1, C.2)
    (A.0, B.1, C.2, D.3)
    (A.0, B.1, C.2, D.3, E.4)
    (A.0, B.1, C.2, D.3, E.4, F.5)
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6)
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7)
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8)
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9)
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9, K.10)
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7, I.8, J.9, K.10, L.11)
}

macro_rules! container_wire {
    ($( [$($gen:tt)*] $ty:ty ),* $(,)?) => { $(
        impl<$($gen)*> Shape for $ty {
            const CATEGORY: WireCategory = WireCategory::Container;
        }

        impl<$($gen)*> Encode for $ty {
            fn size_of(&self) -> usize {
                container_size_of(self)
            }

            fn write<W: AsRef<[u8]> + AsMut<[u8]>>(&self, out: &mut ByteView<W>) -> Result<(), EncodeError> {
                write_container(self, out)
            }
        }

        impl<$($gen)*> Decode for $ty {
            fn fresh() -> Self {
                Self::default()
            }

            fn read<R: AsRef<[u8]>>(&mut self, input: &mut ByteView<R>) -> Result<(), DecodeError> {
                read_container(self, input)
            }

            fn try_size_of(input: &[u8]) -> Option<usize> {
                try_range_size_of::< <Self as Container>::Entry >(input)
            }
        }
    )* };
}

container_wire! {
    [T: Encode + Decode] VecDeque<T>,
    [T: Encode + Decode] LinkedList<T>,
    [T: Encode + Decode + Ord] BinaryHeap<T>,
    [T: Encode + Decode + Eq + Hash, S: BuildHasher + Default] HashSet<T, S>,
    [T: Encode + Decode + Ord] BTreeSet<T>,
    [K: Encode + Decode + Eq + Hash, V: Encode + Decode, S: BuildHasher + Default] HashMap<K, V, S>,
    [K: Encode + Decode + Ord, V: Encode + Decode] BTreeMap<K, V>,
}

#[cfg(test)]
mod tests {
    use crate::codec::COUNT_SIZE;
    use crate::{ByteView, Decode, DecodeError, Encode};
    use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
    use std::fmt::Debug;

    fn encode<T: Encode + ?Sized>(value: &T) -> Vec<u8> {
        let mut out = ByteView::new(vec![0u8; value.size_of()]);
        value.write(&mut out).unwrap();
        assert_eq!(0, out.remaining());
        out.into_inner()
    }

    fn decode<T: Decode>(bytes: &[u8]) -> Result<T, DecodeError> {
        let mut value = T::fresh();
        let mut input = ByteView::new(bytes);
        value.read(&mut input)?;
        assert_eq!(bytes.len(), input.position());
        Ok(value)
    }

    fn assert_roundtrip<T: Encode + Decode + PartialEq + Debug>(value: T) {
        let bytes = encode(&value);
        assert_eq!(Some(bytes.len()), T::try_size_of(&bytes));
        if !bytes.is_empty() {
            assert_eq!(None, T::try_size_of(&bytes[..bytes.len() - 1]));
        }
        assert_eq!(value, decode::<T>(&bytes).unwrap());
    }

    fn count(n: usize) -> Vec<u8> {
        n.to_ne_bytes().to_vec()
    }

    #[test]
    fn scalar_arrays() {
        let bytes = encode(&vec![1u16, 2, 3]);
        let mut expected = count(3);
        for v in [1u16, 2, 3] {
            expected.extend_from_slice(&v.to_ne_bytes());
        }
        assert_eq!(expected, bytes);
        assert_eq!(bytes, encode(&[1u16, 2, 3][..]));
        assert_roundtrip(vec![1u16, 2, 3]);
        assert_roundtrip(Vec::<u64>::new());
        assert_roundtrip(vec![true, false]);
    }

    #[test]
    fn strings() {
        let mut expected = count(5);
        expected.extend_from_slice(b"hallo");
        assert_eq!(expected, encode("hallo"));
        assert_eq!(expected, encode(&String::from("hallo")));
        assert_roundtrip(String::from("grüße"));
        assert_roundtrip(String::new());
    }

    #[test]
    fn invalid_utf8() {
        let mut bytes = count(2);
        bytes.extend_from_slice(&[0xc3, 0x28]);
        assert_eq!(None, String::try_size_of(&bytes));
        let mut s = String::from("keep");
        assert!(matches!(s.read(&mut ByteView::new(&bytes[..])), Err(DecodeError::Utf8(_))));
        assert_eq!("keep", s);
    }

    #[test]
    fn dynamic_arrays() {
        assert_roundtrip(vec![String::from("a"), String::new(), String::from("bc")]);
        assert_roundtrip(vec![vec![1u8], vec![], vec![2, 3]]);
        assert_roundtrip(vec![(1u8, 'x'), (2u8, 'y')]);
    }

    #[test]
    fn fixed_arrays_have_no_prefix() {
        assert_eq!(12, encode(&[1u32, 2, 3]).len());
        assert_eq!(encode(&[1u32, 2, 3])[..], encode(&vec![1u32, 2, 3])[COUNT_SIZE..]);
        assert_roundtrip([1u32, 2, 3]);
        assert_roundtrip([String::from("x"), String::from("yz")]);
        assert_eq!(None, <[bool; 2]>::try_size_of(&[1, 3]));
    }

    #[test]
    fn arrays_without_default() {
        assert_roundtrip([0x5au8; 33]);
        assert_roundtrip(vec![[1u8; 48], [2u8; 48]]);
        assert_roundtrip(vec![[(); 40]; 3]);
        assert_roundtrip(BTreeMap::from([(1u8, [7u16; 40])]));
        assert_roundtrip(VecDeque::from([[1i64; 35]]));
        assert_eq!([0u32; 64], <[u32; 64]>::fresh());
    }

    #[test]
    fn zero_sized_elements() {
        let mut bytes = count(usize::MAX);
        assert_eq!(Some(COUNT_SIZE), Vec::<()>::try_size_of(&bytes));
        assert_eq!(Some(COUNT_SIZE), Vec::<[bool; 0]>::try_size_of(&bytes));
        bytes = count(3);
        assert_eq!(vec![(); 3], decode::<Vec<()>>(&bytes).unwrap());
    }

    #[test]
    fn tuples() {
        assert_eq!(0, encode(&()).len());
        assert_eq!(vec![7, 1], encode(&(7u8, true)));
        assert_roundtrip((1u8, String::from("zwei"), vec![3u32], [4i8; 2]));
        assert_roundtrip((1u8, 2u16, 3u32, 4u64, 5i8, 6i16, 7i32, 8i64, 9.0f32, 10.0f64, 'c', true));
    }

    #[test]
    fn containers() {
        assert_roundtrip(VecDeque::from(vec![1u8, 2, 3]));
        assert_roundtrip(LinkedList::from([String::from("a"), String::from("b")]));
        assert_roundtrip(BTreeSet::from([5u32, 1, 3]));
        assert_roundtrip(HashSet::<i64>::from([-1, 0, 1]));
        assert_roundtrip(BTreeMap::from([(1u8, String::from("eins")), (2, String::from("zwei"))]));
        assert_roundtrip(HashMap::<String, Vec<u8>>::from([(String::from("k"), vec![1, 2])]));
        let heap = BinaryHeap::from(vec![3u8, 1, 2]);
        let decoded: BinaryHeap<u8> = decode(&encode(&heap)).unwrap();
        assert_eq!(heap.into_sorted_vec(), decoded.into_sorted_vec());
    }

    #[test]
    fn container_sizes() {
        let map = BTreeMap::from([(1u32, 2u64)]);
        assert_eq!(COUNT_SIZE + 12, map.size_of());
        let set = BTreeSet::from([String::from("ab")]);
        assert_eq!(COUNT_SIZE + COUNT_SIZE + 2, set.size_of());
    }

    #[test]
    fn read_replaces_previous_content() {
        let mut v = vec![9u8; 10];
        v.read(&mut ByteView::new(&encode(&vec![1u8])[..])).unwrap();
        assert_eq!(vec![1], v);
        let mut map = BTreeMap::from([(0u8, 0u8)]);
        map.read(&mut ByteView::new(&encode(&BTreeMap::from([(1u8, 1u8)]))[..])).unwrap();
        assert_eq!(BTreeMap::from([(1, 1)]), map);
    }

    #[test]
    fn bogus_counts_fail_before_allocation() {
        let bytes = count(usize::MAX / 2);
        let mut v: Vec<u64> = Vec::new();
        assert!(matches!(v.read(&mut ByteView::new(&bytes[..])), Err(DecodeError::Eof { .. })));
        let mut m: HashMap<u32, u32> = HashMap::new();
        assert!(matches!(m.read(&mut ByteView::new(&bytes[..])), Err(DecodeError::Eof { .. })));
        assert_eq!(None, Vec::<u64>::try_size_of(&bytes));
        assert_eq!(None, String::try_size_of(&bytes));
    }

    #[test]
    fn truncated_at_every_depth() {
        let value = vec![(String::from("ab"), vec![1u16, 2]), (String::new(), vec![])];
        let bytes = encode(&value);
        for len in 0..bytes.len() {
            assert_eq!(None, Vec::<(String, Vec<u16>)>::try_size_of(&bytes[..len]), "prefix of {} bytes", len);
        }
    }

}
