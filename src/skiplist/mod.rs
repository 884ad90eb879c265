mod height;
mod iter;
mod node;

use std::fmt;
use std::hash::{Hash, Hasher};

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::options::Options;
use crate::sorted_set::SortedSet;
use height::{HeightGenerator, ceiling_for};
pub use iter::{Cursor, IntoIter, Iter};
use node::{Arena, NodeId};

/// A sorted, duplicate-free set backed by a probabilistic skip list.
///
/// Every level is a doubly linked list headed by a sentinel. Level 0
/// holds every element; each higher level holds a random subset of the
/// level below, and each copy of an element is linked vertically to its
/// copies one level up and one level down.
///
/// ```text
/// Level 2:  HEAD ──────────────────────────► 50 ──────────► NIL
/// Level 1:  HEAD ──────────► 20 ───────────► 50 ──► 60 ───► NIL
/// Level 0:  HEAD ──► 10 ──► 20 ──► 25 ──► 35 ──► 50 ──► 60 ──► NIL
/// ```
///
/// Heights are drawn with P(height >= k) = 2^-(k-1), capped at a ceiling
/// of `⌊log2 n⌋` that is recalculated whenever the element count reaches
/// a power of two. Expected cost of search, insert and remove is
/// O(log n); iteration is O(n) over level 0.
///
/// Not safe for concurrent use. Iterators borrow the set, so they cannot
/// outlive a `clear` or `rebalance`.
#[derive(Clone)]
pub struct SkipListSet<T> {
    nodes: Arena<T>,
    /// `heads[i]` is the sentinel of level `i`. Never empty.
    heads: Vec<NodeId>,
    len: usize,
    max_height: usize,
    limit: usize,
    heights: HeightGenerator,
}

impl<T: Ord> SkipListSet<T> {
    /// Create an empty set with default [`Options`].
    pub fn new() -> Self {
        Self::build(&Options::default())
    }

    /// Create an empty set with the given options.
    pub fn with_options(options: Options) -> Result<Self> {
        options.validate()?;
        Ok(Self::build(&options))
    }

    fn build(options: &Options) -> Self {
        let mut nodes = Arena::new();
        let head = nodes.alloc_head();
        SkipListSet {
            nodes,
            heads: vec![head],
            len: 0,
            max_height: 1,
            limit: options.max_height_limit,
            heights: HeightGenerator::new(options.seed),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of populated levels. An empty set has one (the bottom level).
    pub fn height(&self) -> usize {
        self.heads.len()
    }

    /// Current ceiling on drawn element heights.
    pub fn max_height(&self) -> usize {
        self.max_height
    }

    /// Returns true if an element equal to `value` is in the set.
    pub fn contains(&self, value: &T) -> bool {
        let node = self.search(value);
        self.is_match(node, value)
    }

    /// Number of levels `value` spans, if present.
    pub fn height_of(&self, value: &T) -> Option<usize> {
        let node = self.search(value);
        if self.is_match(node, value) {
            Some(self.nodes.get(node).height)
        } else {
            None
        }
    }

    /// Insert `value`. Returns false (and leaves the set unchanged) if an
    /// equal element is already present.
    ///
    /// Algorithm:
    ///   1. Search for the level-0 predecessor; reject duplicates
    ///   2. Recalculate the height ceiling if the new count is a power of two
    ///   3. Draw a random height H in [1, ceiling]
    ///   4. Splice into level 0, then grow H-1 levels upward, opening a new
    ///      top level when no existing node leads up
    pub fn insert(&mut self, value: T) -> bool {
        let pred = self.search(&value);
        if self.is_match(pred, &value) {
            return false;
        }

        self.len += 1;
        if self.len.is_power_of_two() {
            self.recalculate_ceiling();
        }
        let height = self.heights.draw(self.max_height);
        self.link(pred, value, height);
        true
    }

    /// Remove the element equal to `value`. Returns whether it was present.
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Remove and return the element equal to `value`, if present.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let node = self.search(value);
        if !self.is_match(node, value) {
            return None;
        }
        Some(self.unlink(node))
    }

    /// Smallest element.
    pub fn first(&self) -> Result<&T> {
        let first = self.nodes.get(self.heads[0]).next.ok_or(Error::Empty)?;
        self.nodes.value(first).ok_or(Error::Empty)
    }

    /// Largest element. Descends from the top level rather than walking
    /// the whole bottom level.
    pub fn last(&self) -> Result<&T> {
        let mut node = self.top_head();
        loop {
            while let Some(next) = self.nodes.get(node).next {
                node = next;
            }
            match self.nodes.get(node).down {
                Some(down) => node = down,
                None => break,
            }
        }
        self.nodes.value(node).ok_or(Error::Empty)
    }

    /// Remove every element and reset to a single empty level.
    pub fn clear(&mut self) {
        debug!("clearing skiplist set of {} elements", self.len);
        self.reset();
        self.max_height = 1;
    }

    /// Re-draw the level placement of every element.
    ///
    /// Membership and order are unchanged. The height ceiling is kept as
    /// it was, so every element draws against the same ceiling instead of
    /// the ones in force while the set was growing.
    pub fn rebalance(&mut self) {
        let ceiling = self.max_height;
        let before = self.heads.len();
        let values = self.take_values();
        self.reset();

        for value in values {
            let pred = self.search(&value);
            self.len += 1;
            let height = self.heights.draw(ceiling);
            self.link(pred, value, height);
        }
        self.max_height = ceiling;

        debug!(
            "rebalanced {} elements: {} -> {} levels (ceiling {})",
            self.len,
            before,
            self.heads.len(),
            ceiling
        );
    }

    /// Keep only the elements for which `keep` returns true. Returns
    /// whether anything was removed.
    pub fn retain<F>(&mut self, mut keep: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        let mut modified = false;
        let mut cursor = self.cursor();
        while let Ok(value) = cursor.advance() {
            if !keep(value) && cursor.remove().is_ok() {
                modified = true;
            }
        }
        modified
    }

    /// Elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.nodes, self.nodes.get(self.heads[0]).next, self.len)
    }

    /// A cursor positioned before the first element, able to remove the
    /// element it last returned.
    pub fn cursor(&mut self) -> Cursor<'_, T> {
        let start = self.heads[0];
        Cursor::new(self, start)
    }

    /// Snapshot of every level, bottom first.
    pub fn levels(&self) -> Vec<Vec<&T>> {
        self.heads
            .iter()
            .map(|&head| {
                let mut level = Vec::new();
                let mut node = self.nodes.get(head).next;
                while let Some(id) = node {
                    if let Some(value) = self.nodes.value(id) {
                        level.push(value);
                    }
                    node = self.nodes.get(id).next;
                }
                level
            })
            .collect()
    }

    /// Rightmost level-0 node whose value is <= `target`, or the level-0
    /// head if there is none.
    ///
    /// Starts at the top head, moves right while the next value is
    /// <= target, drops a level when it can't, and stops on level 0.
    fn search(&self, target: &T) -> NodeId {
        let mut node = self.top_head();
        loop {
            while let Some(next) = self.nodes.get(node).next {
                match self.nodes.value(next) {
                    Some(value) if value <= target => node = next,
                    _ => break,
                }
            }
            match self.nodes.get(node).down {
                Some(down) => node = down,
                None => return node,
            }
        }
    }

    fn is_match(&self, node: NodeId, value: &T) -> bool {
        matches!(self.nodes.value(node), Some(found) if found == value)
    }

    fn recalculate_ceiling(&mut self) {
        let ceiling = ceiling_for(self.len, self.limit).max(self.heads.len());
        if ceiling != self.max_height {
            trace!(
                "height ceiling {} -> {} at {} elements",
                self.max_height, ceiling, self.len
            );
            self.max_height = ceiling;
        }
    }
}

impl<T> SkipListSet<T> {
    fn top_head(&self) -> NodeId {
        self.heads[self.heads.len() - 1]
    }

    /// Build a new element of `height` levels after `pred` on level 0.
    fn link(&mut self, pred: NodeId, value: T, height: usize) {
        let bottom = self.nodes.alloc_element(value);
        self.splice_after(pred, bottom);

        let mut lower = bottom;
        let mut anchor = pred;
        let mut levels = 1;
        while levels < height {
            anchor = self.step_up(anchor);

            let upper = self.nodes.alloc_upper(bottom);
            self.nodes.get_mut(upper).down = Some(lower);
            self.nodes.get_mut(lower).up = Some(upper);
            self.splice_after(anchor, upper);

            lower = upper;
            levels += 1;
        }
        self.nodes.get_mut(bottom).height = levels;
    }

    /// From a node on level L, find the rightmost node at or before it
    /// that reaches level L+1 and return its copy there. Elements that stop
    /// at level L are skipped leftward. Reaching the head of the top level
    /// opens a new level.
    fn step_up(&mut self, from: NodeId) -> NodeId {
        let mut node = from;
        loop {
            let current = self.nodes.get(node);
            if let Some(up) = current.up {
                return up;
            }
            let prev = current.prev;
            match prev {
                Some(prev) => node = prev,
                None => return self.push_level(),
            }
        }
    }

    fn push_level(&mut self) -> NodeId {
        let below = self.top_head();
        let head = self.nodes.alloc_head();
        self.nodes.get_mut(head).down = Some(below);
        self.nodes.get_mut(below).up = Some(head);
        self.heads.push(head);
        trace!("opened level {}", self.heads.len() - 1);
        head
    }

    fn splice_after(&mut self, pred: NodeId, id: NodeId) {
        let next = self.nodes.get(pred).next;
        let node = self.nodes.get_mut(id);
        node.prev = Some(pred);
        node.next = next;
        if let Some(next) = next {
            self.nodes.get_mut(next).prev = Some(id);
        }
        self.nodes.get_mut(pred).next = Some(id);
    }

    /// Unlink an element at every level it spans, starting from its bottom
    /// copy, then collapse emptied top levels.
    fn unlink(&mut self, bottom: NodeId) -> T {
        let mut removed = None;
        let mut current = Some(bottom);
        while let Some(id) = current {
            let node = self.nodes.release(id);
            if let Some(prev) = node.prev {
                self.nodes.get_mut(prev).next = node.next;
            }
            if let Some(next) = node.next {
                self.nodes.get_mut(next).prev = node.prev;
            }
            if node.value.is_some() {
                removed = node.value;
            }
            current = node.up;
        }

        self.len -= 1;
        self.collapse_levels();
        match removed {
            Some(value) => value,
            None => panic!("skiplist: unlinked node was not an element's bottom copy"),
        }
    }

    fn collapse_levels(&mut self) {
        while self.heads.len() > 1 {
            let top = self.top_head();
            if self.nodes.get(top).next.is_some() {
                break;
            }
            self.heads.pop();
            self.nodes.release(top);
            let below = self.top_head();
            self.nodes.get_mut(below).up = None;
            trace!("collapsed empty level {}", self.heads.len());
        }
    }

    /// Move every value out of level 0, in order. Leaves the structure
    /// valueless; callers reset it afterwards.
    fn take_values(&mut self) -> Vec<T> {
        let mut values = Vec::with_capacity(self.len);
        let mut cursor = self.nodes.get(self.heads[0]).next;
        while let Some(id) = cursor {
            let node = self.nodes.get_mut(id);
            cursor = node.next;
            if let Some(value) = node.value.take() {
                values.push(value);
            }
        }
        values
    }

    fn reset(&mut self) {
        self.nodes.clear();
        self.heads.clear();
        let head = self.nodes.alloc_head();
        self.heads.push(head);
        self.len = 0;
    }
}

impl<T: Ord> SortedSet<T> for SkipListSet<T> {
    type Iter<'a>
        = Iter<'a, T>
    where
        T: 'a;

    fn len(&self) -> usize {
        SkipListSet::len(self)
    }

    fn contains(&self, value: &T) -> bool {
        SkipListSet::contains(self, value)
    }

    fn insert(&mut self, value: T) -> bool {
        SkipListSet::insert(self, value)
    }

    fn remove(&mut self, value: &T) -> bool {
        SkipListSet::remove(self, value)
    }

    fn first(&self) -> Result<&T> {
        SkipListSet::first(self)
    }

    fn last(&self) -> Result<&T> {
        SkipListSet::last(self)
    }

    fn iter(&self) -> Iter<'_, T> {
        SkipListSet::iter(self)
    }

    fn retain<F>(&mut self, keep: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        SkipListSet::retain(self, keep)
    }
}

impl<T: Ord> Default for SkipListSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for SkipListSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Equal iff same cardinality and every element of one is in the other.
/// Level placement is not compared.
impl<T: Ord> PartialEq for SkipListSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.set_eq(other)
    }
}

impl<T: Ord> Eq for SkipListSet<T> {}

impl<T: Ord + Hash> Hash for SkipListSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.set_hash());
    }
}

impl<T: Ord> FromIterator<T> for SkipListSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = SkipListSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for SkipListSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> From<Vec<T>> for SkipListSet<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<'a, T: Ord> IntoIterator for &'a SkipListSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> IntoIterator for SkipListSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        IntoIter::new(self.take_values())
    }
}
