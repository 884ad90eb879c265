use std::iter::FusedIterator;

use crate::error::{Error, Result};
use crate::skiplist::SkipListSet;
use crate::skiplist::node::{Arena, NodeId};

/// Borrowing iterator over a [`SkipListSet`] in ascending order.
///
/// Simply follows level-0 `next` links. Level 0 is a sorted linked list
/// containing every element.
pub struct Iter<'a, T> {
    nodes: &'a Arena<T>,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(nodes: &'a Arena<T>, first: Option<NodeId>, len: usize) -> Self {
        Iter {
            nodes,
            next: first,
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let id = self.next?;
        self.next = self.nodes.get(id).next;
        self.remaining = self.remaining.saturating_sub(1);
        self.nodes.value(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

/// Owning iterator, ascending.
pub struct IntoIter<T> {
    values: std::vec::IntoIter<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(values: Vec<T>) -> Self {
        IntoIter {
            values: values.into_iter(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.values.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

/// Forward cursor that can remove the element it last returned.
///
/// Starts before the first element. [`advance`](Cursor::advance) steps to
/// the next element and fails with [`Error::Exhausted`] once there is none.
/// [`remove`](Cursor::remove) unlinks the last returned element at every
/// level it spans and collapses emptied top levels, exactly as
/// [`SkipListSet::remove`] does; the following `advance` yields that
/// element's successor.
///
/// The cursor holds the set's mutable borrow, so the set cannot be
/// cleared or rebalanced while it is alive.
pub struct Cursor<'a, T> {
    set: &'a mut SkipListSet<T>,
    /// Level-0 node whose successor `advance` returns next.
    anchor: NodeId,
    /// Last returned node, cleared once removed.
    current: Option<NodeId>,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(set: &'a mut SkipListSet<T>, start: NodeId) -> Self {
        Cursor {
            set,
            anchor: start,
            current: None,
        }
    }

    /// Returns true if `advance` would yield an element.
    pub fn has_next(&self) -> bool {
        self.set.nodes.get(self.anchor).next.is_some()
    }

    /// Step to the next element and return it.
    pub fn advance(&mut self) -> Result<&T> {
        let next = self.set.nodes.get(self.anchor).next.ok_or(Error::Exhausted)?;
        self.anchor = next;
        self.current = Some(next);
        self.set.nodes.value(next).ok_or(Error::Exhausted)
    }

    /// Remove the element returned by the last `advance`.
    pub fn remove(&mut self) -> Result<T> {
        let current = self.current.take().ok_or(Error::IllegalState(
            "remove() requires a preceding advance()",
        ))?;
        // Level 0 always has a predecessor: at worst the head.
        let prev = match self.set.nodes.get(current).prev {
            Some(prev) => prev,
            None => panic!("skiplist: cursor positioned on a level head"),
        };
        self.anchor = prev;
        Ok(self.set.unlink(current))
    }
}
