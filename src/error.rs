//! The error type shared by both tree flavors.

use thiserror::Error;

/// The ways a tree operation can fail.
///
/// Every failure is reported before anything is modified, so an operation
/// that returns an error leaves the tree exactly as it found it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The key is already stored in the tree. Duplicate keys are never
    /// permitted.
    #[error("key is already present in the tree")]
    DuplicateKey,
    /// No node with the requested key exists in the tree.
    #[error("key not found in the tree")]
    KeyNotFound,
    /// The requested key is the largest in the tree, so it has no
    /// successor.
    #[error("no key greater than the requested key")]
    NoSuccessor,
    /// The requested key is the smallest in the tree, so it has no
    /// predecessor.
    #[error("no key smaller than the requested key")]
    NoPredecessor,
}
