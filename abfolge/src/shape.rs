//! Every type that takes part in encoding declares its wire shape through [`Shape`]. The
//! classification is a static lookup: the category is an associated constant fixed by the type's
//! own declaration, so asking for it twice can never yield different answers and costs nothing at
//! runtime.
//!
//! | Category       | Declared by                                        | Count prefix |
//! |----------------|----------------------------------------------------|--------------|
//! | `Forbidden`    | raw and shared-ownership pointers                  | -            |
//! | `Scalar`       | primitives and types listed in [`scalar!`](crate::scalar) | no    |
//! | `ScalarArray`  | `Vec<T>`, `[T]`, `String`, `str` with scalar `T`   | yes          |
//! | `FixedArray`   | `[T; N]`                                           | no           |
//! | `DynamicArray` | `Vec<T>`, `[T]` with non-scalar `T`                | yes          |
//! | `Container`    | std sequences, sets and maps                       | yes          |
//! | `Tuple`        | tuples up to arity twelve                          | no           |
//! | `Record`       | types listed in [`record!`](crate::record)         | no           |
//! | `Unknown`      | opaque process-local handles                       | -            |
//!
//! Types classified as `Forbidden` or `Unknown` are rejected when a codec entry point is
//! instantiated for them, which makes their use a compile error.

use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireCategory {
    Forbidden,
    Scalar,
    ScalarArray,
    FixedArray,
    DynamicArray,
    Container,
    Tuple,
    Record,
    Unknown,
}

impl WireCategory {

    /// Returns the mnemonic of the category. This is useful for error messages.
    pub const fn name(&self) -> &'static str {
        match *self {
            WireCategory::Forbidden    => "Forbidden",
            WireCategory::Scalar       => "Scalar",
            WireCategory::ScalarArray  => "ScalarArray",
            WireCategory::FixedArray   => "FixedArray",
            WireCategory::DynamicArray => "DynamicArray",
            WireCategory::Container    => "Container",
            WireCategory::Tuple        => "Tuple",
            WireCategory::Record       => "Record",
            WireCategory::Unknown      => "Unknown",
        }
    }

    /// Whether values of this category can be encoded at all.
    pub const fn is_codec(&self) -> bool {
        !matches!(*self, WireCategory::Forbidden | WireCategory::Unknown)
    }

    /// Whether the encoding starts with a `usize` element count.
    pub const fn is_count_prefixed(&self) -> bool {
        matches!(*self, WireCategory::ScalarArray | WireCategory::DynamicArray | WireCategory::Container)
    }

}

impl std::fmt::Display for WireCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

pub trait Shape {
    const CATEGORY: WireCategory;

    /// The exact encoded size if it does not depend on the value's content.
    const STATIC_SIZE: Option<usize> = None;
}

/// The wire category of `T`.
pub const fn classify<T: Shape + ?Sized>() -> WireCategory {
    T::CATEGORY
}

/// Sums static sizes, `None` as soon as one member has a content dependent size.
#[doc(hidden)]
pub const fn static_sum(sizes: &[Option<usize>]) -> Option<usize> {
    let mut total = 0;
    let mut i = 0;
    while i < sizes.len() {
        match sizes[i] {
            Some(size) => total += size,
            None => return None,
        }
        i += 1;
    }
    Some(total)
}

#[doc(hidden)]
pub const fn static_mul(size: Option<usize>, count: usize) -> Option<usize> {
    match size {
        Some(size) => Some(size * count),
        None => None,
    }
}

/// Post-monomorphization gate used by every codec entry point.
pub(crate) struct Admit<T: ?Sized>(PhantomData<T>);

impl<T: Shape + ?Sized> Admit<T> {
    pub(crate) const CHECK: () = assert!(T::CATEGORY.is_codec(), "type is rejected by the wire classifier");
}

impl<T: ?Sized> Shape for *const T {
    const CATEGORY: WireCategory = WireCategory::Forbidden;
}

impl<T: ?Sized> Shape for *mut T {
    const CATEGORY: WireCategory = WireCategory::Forbidden;
}

impl<T: ?Sized> Shape for Rc<T> {
    const CATEGORY: WireCategory = WireCategory::Forbidden;
}

impl<T: ?Sized> Shape for Arc<T> {
    const CATEGORY: WireCategory = WireCategory::Forbidden;
}

impl Shape for Instant {
    const CATEGORY: WireCategory = WireCategory::Unknown;
}

impl<T: ?Sized> Shape for Mutex<T> {
    const CATEGORY: WireCategory = WireCategory::Unknown;
}

impl<T: Shape + ?Sized> Shape for &T {
    const CATEGORY: WireCategory = T::CATEGORY;
    const STATIC_SIZE: Option<usize> = T::STATIC_SIZE;
}

#[cfg(test)]
mod tests {
    use super::{classify, static_sum, WireCategory};
    use std::collections::{BTreeMap, HashMap, HashSet, LinkedList, VecDeque};
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    #[derive(Default)]
    struct Point {
        x: i32,
        y: i32,
    }

    crate::record! {
        Point { x: i32, y: i32 }
    }

    #[test]
    fn decision_order() {
        assert_eq!(WireCategory::Forbidden, classify::<*const u8>());
        assert_eq!(WireCategory::Forbidden, classify::<*mut Vec<u8>>());
        assert_eq!(WireCategory::Forbidden, classify::<Rc<u32>>());
        assert_eq!(WireCategory::Forbidden, classify::<Arc<str>>());
        assert_eq!(WireCategory::Scalar, classify::<u8>());
        assert_eq!(WireCategory::Scalar, classify::<f64>());
        assert_eq!(WireCategory::Scalar, classify::<bool>());
        assert_eq!(WireCategory::Scalar, classify::<char>());
        assert_eq!(WireCategory::ScalarArray, classify::<Vec<u32>>());
        assert_eq!(WireCategory::ScalarArray, classify::<String>());
        assert_eq!(WireCategory::ScalarArray, classify::<str>());
        assert_eq!(WireCategory::ScalarArray, classify::<[u16]>());
        assert_eq!(WireCategory::DynamicArray, classify::<Vec<String>>());
        assert_eq!(WireCategory::DynamicArray, classify::<Vec<(u8, u8)>>());
        assert_eq!(WireCategory::FixedArray, classify::<[String; 2]>());
        assert_eq!(WireCategory::Container, classify::<VecDeque<u8>>());
        assert_eq!(WireCategory::Container, classify::<LinkedList<String>>());
        assert_eq!(WireCategory::Container, classify::<HashSet<u64>>());
        assert_eq!(WireCategory::Container, classify::<HashMap<u32, String>>());
        assert_eq!(WireCategory::Container, classify::<BTreeMap<String, Vec<u8>>>());
        assert_eq!(WireCategory::Tuple, classify::<()>());
        assert_eq!(WireCategory::Tuple, classify::<(u8, String, Vec<u16>)>());
        assert_eq!(WireCategory::Record, classify::<Point>());
        assert_eq!(WireCategory::Unknown, classify::<Instant>());
        assert_eq!(WireCategory::Unknown, classify::<Mutex<u8>>());
    }

    #[test]
    fn fixed_arrays_of_scalars_are_not_rejected() {
        assert_eq!(WireCategory::FixedArray, classify::<[u8; 16]>());
        assert_eq!(WireCategory::FixedArray, classify::<[f32; 3]>());
    }

    #[test]
    fn references_forward() {
        assert_eq!(classify::<Vec<String>>(), classify::<&Vec<String>>());
        assert_eq!(classify::<u8>(), classify::<&&u8>());
    }

    #[test]
    fn idempotent() {
        assert_eq!(classify::<HashMap<u8, Vec<u8>>>(), classify::<HashMap<u8, Vec<u8>>>());
    }

    #[test]
    fn codec_and_prefix() {
        assert!(!WireCategory::Forbidden.is_codec());
        assert!(!WireCategory::Unknown.is_codec());
        assert!(WireCategory::Record.is_codec());
        assert!(WireCategory::Container.is_count_prefixed());
        assert!(!WireCategory::FixedArray.is_count_prefixed());
        assert!(!WireCategory::Tuple.is_count_prefixed());
    }

    #[test]
    fn static_sizes() {
        use super::Shape;
        assert_eq!(Some(8), Point::STATIC_SIZE);
        assert_eq!(Some(12), <[u32; 3]>::STATIC_SIZE);
        assert_eq!(Some(0), <()>::STATIC_SIZE);
        assert_eq!(Some(3), <(u8, u16)>::STATIC_SIZE);
        assert_eq!(None, <(u8, String)>::STATIC_SIZE);
        assert_eq!(None, Vec::<u8>::STATIC_SIZE);
        assert_eq!(None, static_sum(&[Some(1), None, Some(2)]));
    }

}
