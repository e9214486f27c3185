//! Records are plain structs whose fields are encoded one after another in the order the author
//! lists them, without any names or tags on the wire.

/// Declares the ordered field list of one or more structs.
///
/// Fields are written in the listed order, which does not have to match the declaration order
/// but must be the same on both ends. Tuple struct fields are listed by index. All field types
/// have to be codec types themselves, and every field of the struct has to be listed: a fresh
/// value for [`from_bytes`], arrays and containers is built from the fresh values of its fields.
///
/// ```
/// #[derive(Default, Debug, PartialEq)]
/// struct Sensor {
///     id: u16,
///     name: String,
///     samples: Vec<f32>,
/// }
///
/// #[derive(Default, Debug, PartialEq)]
/// struct Pair(u8, u8);
///
/// abfolge::record! {
///     Sensor { id: u16, name: String, samples: Vec<f32> }
///     Pair { 0: u8, 1: u8 }
/// }
///
/// let sensor = Sensor { id: 3, name: "west".into(), samples: vec![0.5] };
/// let bytes = abfolge::to_vec(&sensor).unwrap();
/// let (decoded, used) = abfolge::from_bytes::<Sensor>(&bytes).unwrap();
/// assert_eq!(sensor, decoded);
/// assert_eq!(bytes.len(), used);
/// assert_eq!(vec![1, 2], abfolge::to_vec(&Pair(1, 2)).unwrap());
/// ```
///
/// [`from_bytes`]: crate::from_bytes
#[macro_export]
macro_rules! record {
    ($( $name:ident { $($field:tt : $ty:ty),* $(,)? } )*) => { $(
        impl $crate::Shape for $name {
            const CATEGORY: $crate::WireCategory = $crate::WireCategory::Record;
            const STATIC_SIZE: ::core::option::Option<usize> =
                $crate::__private::static_sum(&[$(<$ty as $crate::Shape>::STATIC_SIZE),*]);
        }

        impl $crate::Encode for $name {
            fn size_of(&self) -> usize {
                0 $(+ <$ty as $crate::Encode>::size_of(&self.$field))*
            }

            #[allow(unused_variables)]
            fn write<B: AsRef<[u8]> + AsMut<[u8]>>(&self, out: &mut $crate::ByteView<B>) -> ::core::result::Result<(), $crate::EncodeError> {
                $( <$ty as $crate::Encode>::write(&self.$field, out)?; )*
                Ok(())
            }
        }

        impl $crate::Decode for $name {
            const TRIVIAL: bool = true $(&& <$ty as $crate::Decode>::TRIVIAL)*;

            fn fresh() -> Self {
                $name { $($field: <$ty as $crate::Decode>::fresh()),* }
            }

            #[allow(unused_variables)]
            fn read<B: AsRef<[u8]>>(&mut self, input: &mut $crate::ByteView<B>) -> ::core::result::Result<(), $crate::DecodeError> {
                $( <$ty as $crate::Decode>::read(&mut self.$field, input)?; )*
                Ok(())
            }

            #[allow(unused_mut, unused_variables)]
            fn try_size_of(input: &[u8]) -> ::core::option::Option<usize> {
                let mut used = 0usize;
                $( used += <$ty as $crate::Decode>::try_size_of(input.get(used..)?)?; )*
                Some(used)
            }
        }
    )* };
}
