//! An AVL tree over owned elements. Every node exclusively owns its children
//! through a `Box`, and each structural change is followed by rebalancing on
//! the way back up to the root.
//!
//! # Examples
//!
//! ```
//! use avl::{AvlError, AvlTree};
//!
//! let mut tree = AvlTree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//! assert_eq!(tree.height(), -1);
//!
//! tree.insert(1);
//! tree.insert(2);
//! tree.insert(3);
//!
//! // Ascending inserts were rotated into a balanced shape.
//! assert_eq!(tree.height(), 1);
//! assert_eq!(tree.root().map(|root| *root.value()), Some(2));
//!
//! // Removing a value hands back the stored element.
//! assert_eq!(tree.remove(&2), Ok(2));
//! assert_eq!(tree.remove(&2), Err(AvlError::NotFound));
//! ```

use std::cmp::Ordering;
use std::mem;

use log::trace;

use crate::error::{AvlError, Result};
use crate::util::Removal;

/// An owned, possibly empty subtree.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// Height of a subtree. An empty subtree has a height of -1.
fn height<T>(link: &Link<T>) -> isize {
    link.as_ref().map_or(-1, |node| node.height)
}

/// A self-balancing Binary Search Tree (specifically, an AVL tree) storing
/// distinct elements.
#[derive(Clone, Debug)]
pub struct AvlTree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AvlTree<T> {
    /// Generates a new, empty `AvlTree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of elements stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the root node, or -1 for an empty tree. A tree with a single
    /// element has a height of 0.
    ///
    /// Heights are kept up to date by every mutation, so this does not walk
    /// the tree.
    pub fn height(&self) -> isize {
        height(&self.root)
    }

    /// The root node, if any, for inspecting the shape of the tree.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Removes every element from the tree.
    pub fn clear(&mut self) {
        trace!("clearing tree of {} elements", self.len);
        self.root = None;
        self.len = 0;
    }
}

impl<T: Ord> AvlTree<T> {
    /// Inserts `value` into the tree. Returns `false`, leaving the tree
    /// exactly as it was, if an equal element is already stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let (root, inserted) = Node::insert_into(self.root.take(), value);
        self.root = Some(root);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Removes the element comparing equal to `value` and returns it as it
    /// was stored in the tree.
    ///
    /// # Errors
    ///
    /// Returns [`AvlError::NotFound`] if no such element is stored. The tree
    /// is left untouched in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::{AvlError, AvlTree};
    ///
    /// let mut tree: AvlTree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&2), Ok(2));
    /// assert_eq!(tree.remove(&2), Err(AvlError::NotFound));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn remove(&mut self, value: &T) -> Result<T> {
        match Node::remove_from(self.root.take(), value) {
            Removal::NotFound(root) => {
                self.root = root;
                Err(AvlError::NotFound)
            }
            Removal::Removed { subtree, value } => {
                self.root = subtree;
                self.len -= 1;
                Ok(value)
            }
        }
    }

    /// Returns the stored element equal to `value`.
    ///
    /// The search is steered by [`Ord`] but a node only matches when it is
    /// also `==` to `value`, so an element that compares equal without being
    /// equal is reported as missing.
    ///
    /// # Errors
    ///
    /// Returns [`AvlError::NotFound`] if no stored element matches.
    pub fn get(&self, value: &T) -> Result<&T> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if *value == node.value {
                return Ok(&node.value);
            }
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => None,
            };
        }
        Err(AvlError::NotFound)
    }

    /// Returns `true` if an element equal to `value` is stored, using the
    /// same matching rule as [`get`](Self::get).
    pub fn contains(&self, value: &T) -> bool {
        self.get(value).is_ok()
    }

    /// Finds the largest stored element strictly less than `value`. Returns
    /// `Ok(None)` when `value` is the smallest element.
    ///
    /// # Errors
    ///
    /// Returns [`AvlError::NotFound`] if `value` itself is not stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::AvlTree;
    ///
    /// //     76
    /// //   /    \
    /// // 34      90
    /// //   \    /
    /// //   40  81
    /// let tree: AvlTree<_> = [76, 34, 90, 40, 81].into_iter().collect();
    ///
    /// assert_eq!(tree.predecessor(&76), Ok(Some(&40)));
    /// assert_eq!(tree.predecessor(&81), Ok(Some(&76)));
    /// assert_eq!(tree.predecessor(&34), Ok(None));
    /// ```
    pub fn predecessor(&self, value: &T) -> Result<Option<&T>> {
        // The last node whose right subtree the search walked into.
        let mut candidate = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match value.cmp(&node.value) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => {
                    candidate = Some(&node.value);
                    current = node.right.as_deref();
                }
                Ordering::Equal => {
                    return Ok(match node.left.as_deref() {
                        Some(left) => Some(&left.max().value),
                        None => candidate,
                    });
                }
            }
        }
        Err(AvlError::NotFound)
    }

    /// Returns the `k` smallest elements in ascending order.
    ///
    /// Only the part of the tree holding those elements is visited, so this
    /// costs `O(k + lg N)` rather than a full traversal.
    ///
    /// # Errors
    ///
    /// Returns [`AvlError::InvalidArgument`] if `k` is larger than
    /// [`len`](Self::len).
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::AvlTree;
    ///
    /// let tree: AvlTree<_> = [50, 25, 75, 13, 37, 70, 80, 12, 15, 40, 85, 10]
    ///     .into_iter()
    ///     .collect();
    ///
    /// assert_eq!(tree.k_smallest(5), Ok(vec![&10, &12, &13, &15, &25]));
    /// assert_eq!(tree.k_smallest(0), Ok(vec![]));
    /// assert!(tree.k_smallest(13).is_err());
    /// ```
    pub fn k_smallest(&self, k: usize) -> Result<Vec<&T>> {
        if k > self.len {
            return Err(AvlError::InvalidArgument(format!(
                "cannot take the {} smallest elements of a tree holding {}",
                k, self.len
            )));
        }

        let mut smallest = Vec::with_capacity(k);
        if let Some(root) = self.root.as_deref() {
            root.collect_smallest(k, &mut smallest);
        }
        Ok(smallest)
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

/// Builds a tree by inserting the elements one at a time, in iteration order.
impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> From<Vec<T>> for AvlTree<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

/// A `Node` stores a single element, the heights needed to keep the tree
/// balanced, and up to two children.
#[derive(Clone, Debug)]
pub struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,

    /// Longest path from this node down to a leaf. A leaf has a height of 0.
    height: isize,
    /// Height of the left subtree minus height of the right subtree.
    balance_factor: isize,
}

impl<T> Node<T> {
    fn new_boxed(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
            height: 0,
            balance_factor: 0,
        })
    }

    /// The element stored in this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The left child, holding smaller elements.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The right child, holding larger elements.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Longest path from this node down to a leaf. A leaf has a height of 0.
    pub fn height(&self) -> isize {
        self.height
    }

    /// Height of the left subtree minus height of the right subtree. Always
    /// one of -1, 0 or 1 between operations.
    pub fn balance_factor(&self) -> isize {
        self.balance_factor
    }

    /// The rightmost node of this subtree.
    fn max(&self) -> &Self {
        let mut node = self;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        node
    }

    /// Pushes the smallest elements of this subtree onto `smallest` until it
    /// holds `k` of them.
    fn collect_smallest<'a>(&'a self, k: usize, smallest: &mut Vec<&'a T>) {
        if smallest.len() >= k {
            return;
        }
        if let Some(left) = self.left.as_deref() {
            left.collect_smallest(k, smallest);
        }
        if smallest.len() < k {
            smallest.push(&self.value);
        }
        if let Some(right) = self.right.as_deref() {
            right.collect_smallest(k, smallest);
        }
    }

    /// Recomputes `height` and `balance_factor` from the children.
    fn update(&mut self) {
        let left_height = height(&self.left);
        let right_height = height(&self.right);
        self.height = 1 + left_height.max(right_height);
        self.balance_factor = left_height - right_height;
    }

    /// Restores the AVL invariant at this node after one of its subtrees
    /// grew or shrank by one level, returning the new root of the subtree.
    fn rebalance(mut self: Box<Self>) -> Box<Self> {
        self.update();

        let node = match self.balance_factor {
            2 => {
                if self.left.as_ref().map_or(0, |left| left.balance_factor) == -1 {
                    self.left = self.left.take().map(Self::rotate_left);
                }
                self.rotate_right()
            }
            -2 => {
                if self.right.as_ref().map_or(0, |right| right.balance_factor) == 1 {
                    self.right = self.right.take().map(Self::rotate_right);
                }
                self.rotate_left()
            }
            -1..=1 => self,
            balance_factor => unreachable!(
                "balance factor {} after a single insert or removal",
                balance_factor
            ),
        };

        // In tests, after balancing, assert that we've restored/maintained the AVL invariant.
        if cfg!(test) {
            assert!(node.balance_factor.abs() <= 1);
        }
        node
    }

    /// Lifts the right child up to become the root of this subtree. The old
    /// root adopts the right child's left subtree as its new right subtree.
    fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        trace!("rotating left");
        let mut new_root = match self.right.take() {
            Some(right) => right,
            None => unreachable!("rotated left without a right child"),
        };
        self.right = new_root.left.take();
        self.update();
        new_root.left = Some(self);
        new_root.update();
        new_root
    }

    /// Lifts the left child up to become the root of this subtree. The old
    /// root adopts the left child's right subtree as its new left subtree.
    fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        trace!("rotating right");
        let mut new_root = match self.left.take() {
            Some(left) => left,
            None => unreachable!("rotated right without a left child"),
        };
        self.left = new_root.right.take();
        self.update();
        new_root.right = Some(self);
        new_root.update();
        new_root
    }

    /// Removes the leftmost node of this subtree. Returns what is left of the
    /// subtree along with the removed value.
    fn remove_min(mut self: Box<Self>) -> (Link<T>, T) {
        match self.left.take() {
            None => {
                let Self { value, right, .. } = *self;
                (right, value)
            }
            Some(left) => {
                let (left, min) = left.remove_min();
                self.left = left;
                (Some(self.rebalance()), min)
            }
        }
    }
}

impl<T: Ord> Node<T> {
    fn insert_into(link: Link<T>, value: T) -> (Box<Self>, bool) {
        match link {
            None => (Self::new_boxed(value), true),
            Some(node) => node.insert(value),
        }
    }

    /// Inserts `value` below this node, returning the new root of the
    /// subtree and whether anything was added. Nothing on the path is
    /// rebalanced when the value was already present.
    fn insert(mut self: Box<Self>, value: T) -> (Box<Self>, bool) {
        let inserted = match value.cmp(&self.value) {
            Ordering::Less => {
                let (left, inserted) = Self::insert_into(self.left.take(), value);
                self.left = Some(left);
                inserted
            }
            Ordering::Greater => {
                let (right, inserted) = Self::insert_into(self.right.take(), value);
                self.right = Some(right);
                inserted
            }
            Ordering::Equal => false,
        };

        if inserted {
            (self.rebalance(), true)
        } else {
            (self, false)
        }
    }

    fn remove_from(link: Link<T>, value: &T) -> Removal<T> {
        match link {
            None => Removal::NotFound(None),
            Some(node) => node.remove(value),
        }
    }

    fn remove(mut self: Box<Self>, value: &T) -> Removal<T> {
        match value.cmp(&self.value) {
            Ordering::Less => match Self::remove_from(self.left.take(), value) {
                Removal::NotFound(left) => {
                    self.left = left;
                    Removal::NotFound(Some(self))
                }
                Removal::Removed { subtree, value } => {
                    self.left = subtree;
                    Removal::Removed {
                        subtree: Some(self.rebalance()),
                        value,
                    }
                }
            },
            Ordering::Greater => match Self::remove_from(self.right.take(), value) {
                Removal::NotFound(right) => {
                    self.right = right;
                    Removal::NotFound(Some(self))
                }
                Removal::Removed { subtree, value } => {
                    self.right = subtree;
                    Removal::Removed {
                        subtree: Some(self.rebalance()),
                        value,
                    }
                }
            },
            Ordering::Equal => match (self.left.take(), self.right.take()) {
                (None, None) => Removal::Removed {
                    subtree: None,
                    value: self.value,
                },
                (Some(child), None) | (None, Some(child)) => Removal::Removed {
                    subtree: Some(child),
                    value: self.value,
                },
                // With two children this node stays where it is and takes over
                // the value of its in-order successor, which is removed instead.
                (Some(left), Some(right)) => {
                    let (right, successor) = right.remove_min();
                    self.left = Some(left);
                    self.right = right;
                    let value = mem::replace(&mut self.value, successor);
                    Removal::Removed {
                        subtree: Some(self.rebalance()),
                        value,
                    }
                }
            },
        }
    }
}
