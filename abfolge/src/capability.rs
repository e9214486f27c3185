//! Capability interfaces the codec consumes. A type opts into a wire strategy by implementing the
//! matching interface; nothing is inferred from the type's structure.

use crate::codec::{Decode, Encode};
use crate::error::DecodeError;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
use std::hash::{BuildHasher, Hash};

/// Ordered, contiguous, random access storage.
pub trait ArrayLike {
    type Elem;

    fn elements(&self) -> &[Self::Elem];

    fn elements_mut(&mut self) -> &mut [Self::Elem];
}

pub trait Resizable: ArrayLike {

    /// Makes the array hold exactly `len` elements. Fails instead of aborting if the memory can
    /// not be obtained.
    fn resize_to(&mut self, len: usize) -> Result<(), DecodeError>;
}

/// Arbitrary-count collections that are rebuilt by inserting one entry at a time.
pub trait Container {

    /// What iteration yields, encoded the same way as `Entry`.
    type Item<'a>: Encode where Self: 'a;

    /// What gets decoded and inserted.
    type Entry: Decode;

    fn count(&self) -> usize;

    fn items(&self) -> impl Iterator<Item = Self::Item<'_>>;

    fn clear(&mut self);

    fn insert(&mut self, entry: Self::Entry);
}

impl<T> ArrayLike for Vec<T> {
    type Elem = T;

    fn elements(&self) -> &[T] {
        self
    }

    fn elements_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Decode> Resizable for Vec<T> {

    fn resize_to(&mut self, len: usize) -> Result<(), DecodeError> {
        self.clear();
        self.try_reserve_exact(len)?;
        self.resize_with(len, T::fresh);
        Ok(())
    }
}

impl<T, const N: usize> ArrayLike for [T; N] {
    type Elem = T;

    fn elements(&self) -> &[T] {
        self
    }

    fn elements_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Encode + Decode> Container for VecDeque<T> {
    type Item<'a> = &'a T where Self: 'a;
    type Entry = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn items(&self) -> impl Iterator<Item = Self::Item<'_>> {
        self.iter()
    }

    fn clear(&mut self) {
        VecDeque::clear(self)
    }

    fn insert(&mut self, entry: T) {
        self.push_back(entry)
    }
}

impl<T: Encode + Decode> Container for LinkedList<T> {
    type Item<'a> = &'a T where Self: 'a;
    type Entry = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn items(&self) -> impl Iterator<Item = Self::Item<'_>> {
        self.iter()
    }

    fn clear(&mut self) {
        LinkedList::clear(self)
    }

    fn insert(&mut self, entry: T) {
        self.push_back(entry)
    }
}

impl<T: Encode + Decode + Ord> Container for BinaryHeap<T> {
    type Item<'a> = &'a T where Self: 'a;
    type Entry = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn items(&self) -> impl Iterator<Item = Self::Item<'_>> {
        self.iter()
    }

    fn clear(&mut self) {
        BinaryHeap::clear(self)
    }

    fn insert(&mut self, entry: T) {
        self.push(entry)
    }
}

impl<T: Encode + Decode + Eq + Hash, S: BuildHasher + Default> Container for HashSet<T, S> {
    type Item<'a> = &'a T where Self: 'a;
    type Entry = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn items(&self) -> impl Iterator<Item = Self::Item<'_>> {
        self.iter()
    }

    fn clear(&mut self) {
        HashSet::clear(self)
    }

    fn insert(&mut self, entry: T) {
        HashSet::insert(self, entry);
    }
}

impl<T: Encode + Decode + Ord> Container for BTreeSet<T> {
    type Item<'a> = &'a T where Self: 'a;
    type Entry = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn items(&self) -> impl Iterator<Item = Self::Item<'_>> {
        self.iter()
    }

    fn clear(&mut self) {
        BTreeSet::clear(self)
    }

    fn insert(&mut self, entry: T) {
        BTreeSet::insert(self, entry);
    }
}

impl<K, V, S> Container for HashMap<K, V, S>
where
    K: Encode + Decode + Eq + Hash,
    V: Encode + Decode,
    S: BuildHasher + Default,
{
    type Item<'a> = (&'a K, &'a V) where Self: 'a;
    type Entry = (K, V);

    fn count(&self) -> usize {
        self.len()
    }

    fn items(&self) -> impl Iterator<Item = Self::Item<'_>> {
        self.iter()
    }

    fn clear(&mut self) {
        HashMap::clear(self)
    }

    fn insert(&mut self, (key, value): (K, V)) {
        HashMap::insert(self, key, value);
    }
}

impl<K, V> Container for BTreeMap<K, V>
where
    K: Encode + Decode + Ord,
    V: Encode + Decode,
{
    type Item<'a> = (&'a K, &'a V) where Self: 'a;
    type Entry = (K, V);

    fn count(&self) -> usize {
        self.len()
    }

    fn items(&self) -> impl Iterator<Item = Self::Item<'_>> {
        self.iter()
    }

    fn clear(&mut self) {
        BTreeMap::clear(self)
    }

    fn insert(&mut self, (key, value): (K, V)) {
        BTreeMap::insert(self, key, value);
    }
}
