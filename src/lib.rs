//! An order-statistics treap: a randomized binary search tree (Seidel &
//! Aragon's treap) augmented with per-node subtree sizes, so that "k-th
//! smallest element" queries run in expected `O(log n)` alongside ordinary
//! insertion and removal.
//!
//! The tree keeps two orders at once: values obey the search-tree order, and
//! randomly drawn priorities obey a min-heap order. The heap order is what
//! keeps the expected height logarithmic; it carries no meaning for callers
//! and is never exposed. Subtree sizes are maintained through every
//! structural change, so a rank query walks a single root-to-node path
//! instead of traversing.
//!
//! Duplicate values are permitted and ranked individually: inserting `5`
//! three times yields a treap of length 3 whose ranks 0, 1 and 2 all answer
//! `5`.
//!
//! ```
//! use ranktreap::RankTreap;
//!
//! let mut treap = RankTreap::new();
//! for v in [5, 3, 8, 1] {
//!     treap.insert(v);
//! }
//!
//! assert_eq!(treap.select(0), Ok(&1));
//! assert_eq!(treap.select(2), Ok(&5));
//! assert!(treap.select(4).is_err());
//!
//! treap.remove(&3);
//! assert_eq!(treap.select(1), Ok(&5));
//! ```

mod tree;

use std::cmp::Ordering;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::tree::{Link, Node};

/// A total order over `T`, fixed at treap construction.
///
/// The stock implementation is [`NaturalOrder`]; use [`FnComparator`] to
/// order by an arbitrary comparison closure.
pub trait Comparator<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Orders values by their `Ord` implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalOrder;

impl<T: Ord> Comparator<T> for NaturalOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Adapter turning a comparison closure into a [`Comparator`].
///
/// ```
/// use ranktreap::{FnComparator, RankTreap};
///
/// // Rank descending instead of ascending.
/// let mut treap = RankTreap::with_comparator(FnComparator(|a: &i32, b: &i32| b.cmp(a)));
/// treap.extend([1, 2, 3]);
/// assert_eq!(treap.select(0), Ok(&3));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnComparator<F>(pub F);

impl<T, F> Comparator<T> for FnComparator<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.0)(a, b)
    }
}

/// Contract violation reported by [`RankTreap::select`]: the requested rank
/// does not address any element. Never returned for ranks in `[0, len)`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("rank {rank} is out of range for a treap of length {len}")]
pub struct RankOutOfRange {
    /// The requested rank.
    pub rank: usize,
    /// The number of elements present when the query was made.
    pub len: usize,
}

/// An ordered multiset with `O(log n)` expected-time insertion, removal and
/// rank queries, implemented as a size-augmented treap.
///
/// The comparator `C` is supplied at construction and fixed for the treap's
/// lifetime. Priorities come from an owned [`StdRng`]; seed it explicitly
/// (via [`RankTreap::with_seed`]) when the tree shape must be reproducible,
/// e.g. in tests. Correctness never depends on the seed.
///
/// All operations run to completion before returning and there is no
/// internal synchronization, so concurrent mutation requires an external
/// lock around the whole structure.
pub struct RankTreap<T, C = NaturalOrder> {
    root: Link<T>,
    cmp: C,
    rng: StdRng,
}

impl<T: Ord> RankTreap<T> {
    /// Creates an empty treap ordered by `T`'s `Ord`, with an entropy-seeded
    /// RNG for priorities.
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Creates an empty treap with a deterministic priority RNG, for
    /// reproducible tree shapes.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_comparator_and_seed(NaturalOrder, seed)
    }
}

impl<T, C: Comparator<T>> RankTreap<T, C> {
    /// Creates an empty treap ordered by `cmp`.
    pub fn with_comparator(cmp: C) -> Self {
        RankTreap {
            root: None,
            cmp,
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates an empty treap ordered by `cmp` with a deterministic
    /// priority RNG.
    pub fn with_comparator_and_seed(cmp: C, seed: u64) -> Self {
        RankTreap {
            root: None,
            cmp,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Number of elements currently stored, duplicates counted separately.
    pub fn len(&self) -> usize {
        tree::size(&self.root)
    }

    /// Whether the treap holds no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Inserts `value` with a freshly drawn random priority. Always
    /// succeeds; a duplicate becomes a distinct element ranked immediately
    /// before the existing equal values.
    pub fn insert(&mut self, value: T) {
        let node = Box::new(Node::new(value, self.rng.gen()));
        let (less, geq) = tree::split(self.root.take(), &node.value, &self.cmp);
        self.root = tree::merge(tree::merge(less, Some(node)), geq);
    }

    /// Removes one element comparing equal to `value`, returning whether
    /// anything was removed. Removing an absent value is a no-op.
    pub fn remove(&mut self, value: &T) -> bool {
        let (root, removed) = tree::remove(self.root.take(), value, &self.cmp);
        self.root = root;
        removed
    }

    /// Returns the element at 0-indexed `rank` in sorted order (the k-th
    /// smallest currently present) without materializing that order.
    ///
    /// Ranks outside `[0, len)` are a contract violation and yield
    /// [`RankOutOfRange`]; the result is never clamped or defaulted.
    /// Repeating a query with no mutation in between returns the same
    /// element.
    pub fn select(&self, rank: usize) -> Result<&T, RankOutOfRange> {
        let len = self.len();
        tree::select(&self.root, rank).ok_or(RankOutOfRange { rank, len })
    }

    /// Whether any stored element compares equal to `value`.
    pub fn contains(&self, value: &T) -> bool {
        tree::contains(&self.root, value, &self.cmp)
    }

    /// Rank of the first stored element comparing equal to `value`, or
    /// `None` if absent. With duplicates present this is the smallest rank
    /// answering an equal element, so `select` at that rank yields an equal
    /// element.
    pub fn rank_of(&self, value: &T) -> Option<usize> {
        tree::rank_of(&self.root, value, &self.cmp)
    }

    /// An iterator over the elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            current: self.root.as_deref(),
            stack: Vec::new(),
        }
    }
}

impl<T: Ord> Default for RankTreap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for RankTreap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut treap = RankTreap::new();
        treap.extend(iter);
        treap
    }
}

impl<T, C: Comparator<T>> Extend<T> for RankTreap<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for RankTreap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(Iter {
                current: self.root.as_deref(),
                stack: Vec::new(),
            })
            .finish()
    }
}

impl<'a, T, C: Comparator<T>> IntoIterator for &'a RankTreap<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order borrowing iterator over a [`RankTreap`], yielding elements in
/// ascending order. Keeps an explicit stack of pending ancestors.
pub struct Iter<'a, T> {
    current: Option<&'a Node<T>>,
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.stack.push(node);
            self.current = node.left.as_deref();
        }
        self.stack.pop().map(|node| {
            self.current = node.right.as_deref();
            &node.value
        })
    }
}
