use abfolge::*;
use proptest::prelude::*;
use proptest::sample::Index;
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone, PartialEq)]
struct Sample {
    id: u32,
    name: String,
    readings: Vec<i16>,
    flags: [bool; 3],
    tags: BTreeMap<u8, String>,
    pairs: Vec<(char, u64)>,
}

record! {
    Sample { id: u32, name: String, readings: Vec<i16>, flags: [bool; 3], tags: BTreeMap<u8, String>, pairs: Vec<(char, u64)> }
}

fn sample() -> impl Strategy<Value = Sample> {
    (
        any::<u32>(),
        ".{0,12}",
        prop::collection::vec(any::<i16>(), 0..8),
        any::<[bool; 3]>(),
        prop::collection::btree_map(any::<u8>(), "[a-z]{0,4}", 0..4),
        prop::collection::vec((any::<char>(), any::<u64>()), 0..4),
    ).prop_map(|(id, name, readings, flags, tags, pairs)| Sample { id, name, readings, flags, tags, pairs })
}

proptest! {

    #[test]
    fn cursor_advances_by_size_of(value in sample(), slack in 0usize..16) {
        let size = value.size_of();
        let mut buf = vec![0u8; size + slack];
        let mut writer = Writer::new(&mut buf[..]);
        writer.put(&value);
        prop_assert!(!writer.failed());
        prop_assert_eq!(size, writer.position());

        let mut decoded = Sample::default();
        let mut reader = Reader::new(&buf[..]);
        reader.get(&mut decoded);
        prop_assert!(!reader.failed());
        prop_assert_eq!(size, reader.position());
        prop_assert_eq!(value, decoded);
    }

    #[test]
    fn one_byte_short_leaves_buffer_untouched(value in sample()) {
        let size = value.size_of();
        let mut buf = vec![0xa5u8; size - 1];
        let mut throwing = BoundedStream::with_policy(&mut buf[..], Throwing);
        let overflow = matches!(throwing.put(&value), Err(StreamError::Overflow { .. }));
        prop_assert!(overflow);
        prop_assert!(buf.iter().all(|b| *b == 0xa5));

        let mut flagged = Writer::new(&mut buf[..]);
        flagged.put(&value);
        prop_assert!(flagged.failed());
        flagged.put(&0u8);
        prop_assert_eq!(0, flagged.position());
        prop_assert!(buf.iter().all(|b| *b == 0xa5));
    }

    #[test]
    fn dry_run_matches_encoding(value in sample(), cut in any::<Index>()) {
        let bytes = to_vec(&value).unwrap();
        prop_assert_eq!(Some(bytes.len()), Sample::try_size_of(&bytes));
        let short = cut.index(bytes.len());
        prop_assert_eq!(None, Sample::try_size_of(&bytes[..short]));
    }

    #[test]
    fn truncated_reads_keep_destination(value in sample(), cut in any::<Index>()) {
        let bytes = to_vec(&value).unwrap();
        let short = cut.index(bytes.len());
        let mut reader = Reader::new(&bytes[..short]);
        let mut decoded = Sample::default();
        reader.get(&mut decoded);
        prop_assert!(reader.failed());
        prop_assert_eq!(0, reader.position());
        prop_assert_eq!(Sample::default(), decoded);
    }

    #[test]
    fn strings_roundtrip(values in prop::collection::vec(".*", 0..6)) {
        let bytes = to_vec(&values).unwrap();
        prop_assert_eq!(bytes.len(), values.size_of());
        let (decoded, used) = from_bytes::<Vec<String>>(&bytes).unwrap();
        prop_assert_eq!(bytes.len(), used);
        prop_assert_eq!(values, decoded);
    }

    #[test]
    fn classification_is_stable(_seed in any::<u8>()) {
        prop_assert_eq!(classify::<Sample>(), classify::<Sample>());
        prop_assert_eq!(WireCategory::Record, classify::<Sample>());
        prop_assert_eq!(WireCategory::DynamicArray, classify::<Vec<Sample>>());
    }

}
