//! This crate exposes an AVL tree: a self-balancing Binary Search Tree
//! storing a set of totally ordered elements.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores one value and
//! may have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for a value takes `O(height)` where `height` is the longest path
//! from the root `Node` to a leaf `Node`.
//!
//! ## AVL
//!
//! An AVL tree additionally keeps, for every `Node`, the heights of its two
//! subtrees within one of each other. Whenever an insertion or removal breaks
//! that rule the tree is repaired on the way back up with rotations, so the
//! height never exceeds roughly `1.44 * lg N`.
//!
//! # Examples
//!
//! ```
//! use avl::{AvlError, AvlTree};
//!
//! let mut tree: AvlTree<i32> = vec![50, 25, 75, 13, 37].into();
//!
//! assert!(tree.contains(&37));
//! assert_eq!(tree.predecessor(&50), Ok(Some(&37)));
//! assert_eq!(tree.k_smallest(3), Ok(vec![&13, &25, &37]));
//!
//! assert_eq!(tree.remove(&25), Ok(25));
//! assert_eq!(tree.get(&25), Err(AvlError::NotFound));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
pub mod error;

mod util;

#[cfg(test)]
mod test;

pub use crate::avl::{AvlTree, Node};
pub use crate::error::{AvlError, Result};
