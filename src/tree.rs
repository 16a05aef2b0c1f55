//! Node representation and the structural treap algorithms.
//!
//! Everything here operates on owned links (`Option<Box<Node<T>>>`) and is
//! driven by the public wrapper in the crate root. The two primitives are
//! `merge` and `split`; insertion is split-then-merge, removal splices a
//! single node out and merges its children. Each node carries its subtree
//! size, which is what makes rank queries a single root-to-node walk.

use std::cmp::Ordering;

use crate::Comparator;

pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// A node in the treap. `priority` is drawn at insertion time and never
/// exposed; `size` counts the nodes of the subtree rooted here, including
/// the node itself.
pub(crate) struct Node<T> {
    pub(crate) value: T,
    priority: u64,
    size: usize,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T, priority: u64) -> Self {
        Node {
            value,
            priority,
            size: 1,
            left: None,
            right: None,
        }
    }

    // Must be called after any change to a child link, before the node is
    // handed back up the call chain.
    fn update_size(&mut self) {
        self.size = 1 + size(&self.left) + size(&self.right);
    }
}

/// Subtree size of a link; an absent child counts as 0.
pub(crate) fn size<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |n| n.size)
}

/// Fuse two treaps where every value in `left` precedes every value in
/// `right`. The root with the smaller priority wins (min-heap); its inner
/// child is merged with the other side.
///
/// Callers are responsible for the ordering precondition; violating it
/// silently produces an unsorted tree.
pub(crate) fn merge<T>(left: Link<T>, right: Link<T>) -> Link<T> {
    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (Some(mut l), Some(mut r)) => {
            if l.priority <= r.priority {
                l.right = merge(l.right.take(), Some(r));
                l.update_size();
                Some(l)
            } else {
                r.left = merge(Some(l), r.left.take());
                r.update_size();
                Some(r)
            }
        }
    }
}

/// Partition a treap into values strictly less than `pivot` and values
/// greater-or-equal, preserving the heap and size invariants in both halves.
pub(crate) fn split<T, C>(link: Link<T>, pivot: &T, cmp: &C) -> (Link<T>, Link<T>)
where
    C: Comparator<T>,
{
    match link {
        None => (None, None),
        Some(mut node) => {
            if cmp.compare(&node.value, pivot) == Ordering::Less {
                let (mid, right) = split(node.right.take(), pivot, cmp);
                node.right = mid;
                node.update_size();
                (Some(node), right)
            } else {
                let (left, mid) = split(node.left.take(), pivot, cmp);
                node.left = mid;
                node.update_size();
                (left, Some(node))
            }
        }
    }
}

/// Remove one node comparing equal to `value`, splicing it out by merging
/// its children. Returns the new subtree and whether a node was removed.
/// Sizes are fixed on the unwind only along the path that actually changed.
pub(crate) fn remove<T, C>(link: Link<T>, value: &T, cmp: &C) -> (Link<T>, bool)
where
    C: Comparator<T>,
{
    match link {
        None => (None, false),
        Some(mut node) => match cmp.compare(value, &node.value) {
            Ordering::Less => {
                let (left, removed) = remove(node.left.take(), value, cmp);
                node.left = left;
                if removed {
                    node.update_size();
                }
                (Some(node), removed)
            }
            Ordering::Greater => {
                let (right, removed) = remove(node.right.take(), value, cmp);
                node.right = right;
                if removed {
                    node.update_size();
                }
                (Some(node), removed)
            }
            Ordering::Equal => (merge(node.left.take(), node.right.take()), true),
        },
    }
}

/// Walk to the element at 0-indexed `rank` in sorted order, guided by
/// subtree sizes. A single root-to-node path, no auxiliary storage.
///
/// Returns `None` only when `rank >= size(link)`; the public wrapper bounds
/// the rank first.
pub(crate) fn select<T>(link: &Link<T>, mut rank: usize) -> Option<&T> {
    let mut node = link.as_deref()?;
    loop {
        let smaller = size(&node.left);
        match rank.cmp(&smaller) {
            Ordering::Less => node = node.left.as_deref()?,
            Ordering::Equal => return Some(&node.value),
            Ordering::Greater => {
                rank -= smaller + 1;
                node = node.right.as_deref()?;
            }
        }
    }
}

/// Whether any stored value compares equal to `value`.
pub(crate) fn contains<T, C>(link: &Link<T>, value: &T, cmp: &C) -> bool
where
    C: Comparator<T>,
{
    let mut current = link.as_deref();
    while let Some(node) = current {
        match cmp.compare(value, &node.value) {
            Ordering::Less => current = node.left.as_deref(),
            Ordering::Greater => current = node.right.as_deref(),
            Ordering::Equal => return true,
        }
    }
    false
}

/// Rank of the first element comparing equal to `value`, or `None` if
/// absent. On an equal hit the walk keeps descending left, since an earlier
/// duplicate may still sit in the left subtree.
pub(crate) fn rank_of<T, C>(link: &Link<T>, value: &T, cmp: &C) -> Option<usize>
where
    C: Comparator<T>,
{
    let mut current = link.as_deref();
    let mut preceding = 0;
    let mut found = None;
    while let Some(node) = current {
        match cmp.compare(value, &node.value) {
            Ordering::Less => current = node.left.as_deref(),
            Ordering::Greater => {
                preceding += size(&node.left) + 1;
                current = node.right.as_deref();
            }
            Ordering::Equal => {
                found = Some(preceding + size(&node.left));
                current = node.left.as_deref();
            }
        }
    }
    found
}
