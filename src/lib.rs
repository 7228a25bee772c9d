//! This crate exposes two flavors of Binary Search Tree (BST): a plain,
//! unbalanced tree and a self-balancing AVL tree, mostly for educational
//! purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree stores a set of keys and supports inserting,
//! finding, and deleting them, plus ordering queries: the minimum and
//! maximum key and the successor/predecessor of any stored key. The most
//! important invariants of a BST are:
//!
//! 1. For every node, all the nodes in its left subtree have a key less
//!    than its own key.
//! 2. For every node, all the nodes in its right subtree have a key greater
//!    than its own key.
//!
//! Every operation runs in `O(height)` where `height` is the longest path
//! from the root to a leaf. On a plain tree ([`plain::Tree`]) the height
//! depends entirely on the insertion order: inserting keys in ascending
//! order degrades the tree into a linked list.
//!
//! ## AVL Tree
//!
//! The AVL flavor ([`avl::Tree`]) additionally maintains, at every node,
//! the invariant that the heights of the two child subtrees differ by at
//! most one. It restores the invariant after each insert or delete by
//! walking from the edited position up to the root, rotating wherever the
//! height difference reaches two. This bounds the height, and with it the
//! cost of every operation, to `O(lg N)` for `N` stored keys.
//!
//! Both flavors store their nodes in an index-addressed arena owned by the
//! tree, so parent links are plain indices rather than aliasing pointers.

#![deny(missing_docs)]

mod arena;
mod error;

pub mod avl;
pub mod plain;

pub use error::Error;

#[cfg(test)]
mod test;
