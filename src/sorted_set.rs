use std::hash::{Hash, Hasher};

use xxhash_rust::xxh3::Xxh3;

use crate::error::{Error, Result};

/// A sorted, duplicate-free collection under the natural ordering of `T`.
///
/// Implementors provide the primitives (`contains`, `insert`, `remove`,
/// ordered iteration, predicate removal). The bulk operations are
/// provided on top of them and never reach into the implementor's
/// structure.
pub trait SortedSet<T: Ord> {
    type Iter<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, value: &T) -> bool;

    /// Insert `value`; false if an equal element was already present.
    fn insert(&mut self, value: T) -> bool;

    /// Remove the element equal to `value`; false if there was none.
    fn remove(&mut self, value: &T) -> bool;

    /// Smallest element, or [`Error::Empty`].
    fn first(&self) -> Result<&T>;

    /// Largest element, or [`Error::Empty`].
    fn last(&self) -> Result<&T>;

    /// Elements in ascending order.
    fn iter(&self) -> Self::Iter<'_>;

    /// Remove every element for which `keep` returns false, in a single
    /// forward pass. Returns whether anything was removed.
    fn retain<F>(&mut self, keep: F) -> bool
    where
        F: FnMut(&T) -> bool;

    /// Insert every value. Returns true if any was newly added.
    fn add_all<I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        values
            .into_iter()
            .fold(false, |modified, value| self.insert(value) | modified)
    }

    /// Remove every value that is present. Returns true if any was removed.
    fn remove_all<'v, I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = &'v T>,
        T: 'v,
    {
        values
            .into_iter()
            .fold(false, |modified, value| self.remove(value) | modified)
    }

    fn contains_all<'v, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'v T>,
        T: 'v,
    {
        values.into_iter().all(|value| self.contains(value))
    }

    /// Keep only the elements that are also members of `other`.
    fn retain_only<S>(&mut self, other: &S) -> bool
    where
        S: SortedSet<T>,
    {
        self.retain(|value| other.contains(value))
    }

    /// Ordered snapshot of every element. Its length equals `len()`.
    fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        out.extend(self.iter().cloned());
        debug_assert_eq!(out.len(), self.len());
        out
    }

    /// Same cardinality and every element of `self` is a member of `other`.
    fn set_eq<S>(&self, other: &S) -> bool
    where
        S: SortedSet<T>,
    {
        self.len() == other.len() && self.iter().all(|value| other.contains(value))
    }

    /// Wrapping sum of per-element hashes. Independent of iteration order
    /// and of the set's internal layout.
    fn set_hash(&self) -> u64
    where
        T: Hash,
    {
        self.iter().fold(0u64, |sum, value| {
            let mut hasher = Xxh3::new();
            value.hash(&mut hasher);
            sum.wrapping_add(hasher.finish())
        })
    }

    /// Range views are not supported.
    fn sub_set(&self, _from: &T, _to: &T) -> Result<Self>
    where
        Self: Sized,
    {
        Err(Error::Unsupported("sub_set"))
    }

    /// Range views are not supported.
    fn head_set(&self, _to: &T) -> Result<Self>
    where
        Self: Sized,
    {
        Err(Error::Unsupported("head_set"))
    }

    /// Range views are not supported.
    fn tail_set(&self, _from: &T) -> Result<Self>
    where
        Self: Sized,
    {
        Err(Error::Unsupported("tail_set"))
    }
}
