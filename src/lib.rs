//! A minimal keyed record store whose only index is an AVL tree.
//!
//! ## AVL Tree
//!
//! An AVL tree is a Binary Search Tree that keeps itself balanced. Like any BST
//! it is built from `Node`s that each store a key and a value and may have a
//! left and a right child. The BST invariants are:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree have a smaller key.
//! 2. For every `Node`, all the `Node`s in its right subtree have a larger key.
//!
//! On top of that every `Node` caches the height of the subtree rooted at it
//! and the heights of its two subtrees never differ by more than one. When an
//! insert or a delete breaks that rule the tree rotates a few `Node`s around
//! on the way back up to the root. This keeps the height of the tree at
//! `O(lg N)` so searches, inserts and deletes stay logarithmic.
//!
//! ## Records on disk
//!
//! [`storage`] saves a tree to a JSON file and loads it back by inserting
//! every saved record again. [`generate`] fills a fresh tree with sample
//! records.

#![deny(missing_docs)]

pub mod avl;
pub mod error;
pub mod generate;
pub mod storage;

pub use avl::Tree;
pub use error::{GenerateError, StorageError};

#[cfg(test)]
mod test {
    pub(crate) mod quick;
}
