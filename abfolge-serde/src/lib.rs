//! Serialize and deserialize your Rust data structures into the `abfolge` wire format through
//! serde.
//!
//! The bytes agree with the core codec for every shape both can express: scalars in native byte
//! order, strings, byte strings, sequences and maps behind a native `usize` count, tuples and
//! structs as the plain concatenation of their fields. A struct deriving `Serialize` is therefore
//! byte for byte identical to the same struct declared with `abfolge::record!`.
//!
//! Serde knows a few shapes the core codec does not have:
//!
//! * `Option<T>` is a `u8` tag, `0` for `None` and `1` for `Some`, followed by the value.
//! * Unit, unit structs and unit variants carry no bytes of their own.
//! * Enum variants start with their index as a native `u32`, followed by the payload.
//!
//! As the format is not self-describing, `deserialize_any` and everything that relies on it
//! (untagged enums, `#[serde(flatten)]`, `IgnoredAny`) is rejected. Sequences and maps have to
//! report their length up front.
//!
//! # Examples
//!
//! ```
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! enum Species {
//!     PrionailurusViverrinus,
//!     LynxLynx,
//!     FelisCatus,
//! }
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Cat<'a> {
//!     name: &'a str,
//!     species: Species,
//! }
//!
//! let cats = vec![
//!     Cat { name: "Jessica", species: Species::PrionailurusViverrinus },
//!     Cat { name: "Wantan", species: Species::LynxLynx },
//! ];
//!
//! let bytes = abfolge_serde::to_vec(&cats).unwrap();
//! let word = std::mem::size_of::<usize>();
//! // count, then per cat: name length, name, variant index
//! assert_eq!(word + (word + 7 + 4) + (word + 6 + 4), bytes.len());
//! assert_eq!(bytes.len(), abfolge_serde::serialized_size(&cats).unwrap());
//!
//! let decoded: Vec<Cat> = abfolge_serde::from_bytes(&bytes).unwrap();
//! assert_eq!(cats, decoded);
//! ```

mod de;
mod error;
mod ser;
mod size;

pub use de::{from_bytes, from_bytes_prefix, Deserializer};
pub use error::{DeserializationError, Error, Result};
pub use ser::{to_slice, to_vec, Serializer};
pub use size::{serialized_size, SizeCounter};
