//! A self-balancing BST (specifically, an AVL tree). It keeps the same key
//! set and query surface as [`crate::plain`] but maintains one extra
//! invariant: at every node the heights of the two child subtrees differ
//! by at most one. Insert and delete reuse the plain flavor's structural
//! algorithms and then repair the invariant bottom-up, so every operation
//! is `O(lg N)` no matter the insertion order.
//!
//! # Examples
//!
//! ```
//! use bstree::avl::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Ascending inserts would degrade a plain tree into a list; this
//! // flavor rotates itself back into shape as it goes.
//! for key in 1..=100 {
//!     tree.insert(key).unwrap();
//! }
//!
//! assert_eq!(tree.len(), 100);
//! assert_eq!(tree.min(), Some(&1));
//! assert_eq!(tree.max(), Some(&100));
//! assert_eq!(tree.delete(&50), Ok(50));
//! assert_eq!(tree.successor(&49), Ok(&51));
//! ```

use std::fmt;

use crate::arena::NodeId;
use crate::plain;
use crate::Error;

/// A self-balancing Binary Search Tree storing a set of ordered keys.
///
/// The balancing is invisible in the API; the type differs from
/// [`plain::Tree`] only in the shape guarantees of the tree behind it.
#[derive(Clone)]
pub struct Tree<K> {
    tree: plain::Tree<K>,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tree.fmt(f)
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            tree: plain::Tree::new(),
        }
    }

    /// The number of keys stored in the tree.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the tree stores no keys at all.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Inserts the given key into the tree, rebalancing as needed.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::{avl::Tree, Error};
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert_eq!(tree.insert(1), Ok(()));
    /// // Inserting the same key again fails and changes nothing.
    /// assert_eq!(tree.insert(1), Err(Error::DuplicateKey));
    /// ```
    pub fn insert(&mut self, key: K) -> Result<(), Error>
    where
        K: Ord,
    {
        let leaf = self.tree.insert_leaf(key)?;
        self.rebalance_from(self.tree.parent(leaf));
        Ok(())
    }

    /// Potentially finds the given key in this tree, returning a reference
    /// to the stored copy. Fails with [`Error::KeyNotFound`].
    pub fn find(&self, key: &K) -> Result<&K, Error>
    where
        K: Ord,
    {
        self.tree.find(key)
    }

    /// Whether the tree stores the given key.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.tree.contains(key)
    }

    /// The smallest key in the tree, or `None` if the tree is empty.
    pub fn min(&self) -> Option<&K> {
        self.tree.min()
    }

    /// The largest key in the tree, or `None` if the tree is empty.
    pub fn max(&self) -> Option<&K> {
        self.tree.max()
    }

    /// The next key after `key` in sorted order.
    ///
    /// Fails with [`Error::KeyNotFound`] if `key` is not in the tree and
    /// with [`Error::NoSuccessor`] if it is the largest key.
    pub fn successor(&self, key: &K) -> Result<&K, Error>
    where
        K: Ord,
    {
        self.tree.successor(key)
    }

    /// The next key before `key` in sorted order.
    ///
    /// Fails with [`Error::KeyNotFound`] if `key` is not in the tree and
    /// with [`Error::NoPredecessor`] if it is the smallest key.
    pub fn predecessor(&self, key: &K) -> Result<&K, Error>
    where
        K: Ord,
    {
        self.tree.predecessor(key)
    }

    /// Deletes the given key from the tree and returns it, rebalancing as
    /// needed.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::{avl::Tree, Error};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1).unwrap();
    ///
    /// assert_eq!(tree.delete(&1), Ok(1));
    /// assert_eq!(tree.delete(&1), Err(Error::KeyNotFound));
    /// ```
    pub fn delete(&mut self, key: &K) -> Result<K, Error>
    where
        K: Ord,
    {
        let id = self.tree.find_node(key)?;
        let (key, anchor) = self.tree.remove_node(id);
        self.rebalance_from(anchor);
        Ok(key)
    }

    /// Walks from `start` to the root, repairing heights and rotating at
    /// every step that needs it.
    ///
    /// The walk must not stop early: a rotation at one level changes the
    /// height reported to the level above, and after a deletion every
    /// ancestor up to the root can need its own rotation. When a rotation
    /// does occur, the next parent link points at the pivot that just took
    /// this position, so the walk passes through it (a height no-op) and
    /// continues to the true ancestors.
    fn rebalance_from(&mut self, start: Option<NodeId>) {
        let mut cur = start;
        while let Some(id) = cur {
            self.rebalance(id);
            cur = self.tree.parent(id);
        }
    }

    fn height_of(&self, id: Option<NodeId>) -> i8 {
        id.map_or(-1, |id| self.tree.arena[id].height)
    }

    /// Recomputes the node's height from its children's current heights.
    fn update_height(&mut self, id: NodeId) {
        let left = self.height_of(self.tree.left(id));
        let right = self.height_of(self.tree.right(id));
        self.tree.arena[id].height = left.max(right) + 1;
    }

    /// Height of the right subtree minus height of the left. The AVL
    /// invariant keeps this in `{-1, 0, 1}` between operations.
    fn balance(&self, id: NodeId) -> i8 {
        self.height_of(self.tree.right(id)) - self.height_of(self.tree.left(id))
    }

    /// Recomputes the node's height and restores the balance invariant at
    /// this position with at most one single or double rotation.
    fn rebalance(&mut self, id: NodeId) {
        self.update_height(id);
        let balance = self.balance(id);
        if balance == 2 {
            let right = self
                .tree
                .right(id)
                .expect("right-heavy node has a right child");
            // A left-heavy right child is the zig-zag shape; straighten it
            // first or the single rotation just flips the imbalance.
            if self.balance(right) == -1 {
                self.rotate_right(right);
            }
            self.rotate_left(id);
        } else if balance == -2 {
            let left = self
                .tree
                .left(id)
                .expect("left-heavy node has a left child");
            if self.balance(left) == 1 {
                self.rotate_left(left);
            }
            self.rotate_right(id);
        }

        if cfg!(debug_assertions) {
            // Whichever node now heads this position is in balance.
            let local = match balance {
                2 | -2 => self.tree.parent(id).expect("rotation gave the node a parent"),
                _ => id,
            };
            assert!(self.balance(local).abs() <= 1);
        }
    }

    /// Rotates the node's right child up into its place:
    ///
    /// ```text
    ///   id                pivot
    ///  /  \               /   \
    /// a   pivot   ->    id     c
    ///     /   \        /  \
    ///    b     c      a    b
    /// ```
    ///
    /// A no-op when there is no right child; `rebalance` never calls it
    /// that way.
    fn rotate_left(&mut self, id: NodeId) {
        let pivot = match self.tree.right(id) {
            Some(pivot) => pivot,
            None => return,
        };
        let parent = self.tree.parent(id);

        // The pivot's inner subtree switches sides.
        let inner = self.tree.left(pivot);
        self.tree.arena[id].right = inner;
        if let Some(inner) = inner {
            self.tree.arena[inner].parent = Some(id);
        }

        // The node becomes the pivot's left child and the pivot takes the
        // node's old place, which updates the tree root when the node was
        // the root.
        self.tree.arena[pivot].left = Some(id);
        self.tree.relink(parent, id, Some(pivot));
        self.tree.arena[id].parent = Some(pivot);

        // Child before new parent, since the parent reads the child.
        self.update_height(id);
        self.update_height(pivot);
    }

    /// Rotates the node's left child up into its place. Mirror of
    /// [`Tree::rotate_left`].
    fn rotate_right(&mut self, id: NodeId) {
        let pivot = match self.tree.left(id) {
            Some(pivot) => pivot,
            None => return,
        };
        let parent = self.tree.parent(id);

        let inner = self.tree.right(pivot);
        self.tree.arena[id].left = inner;
        if let Some(inner) = inner {
            self.tree.arena[inner].parent = Some(id);
        }

        self.tree.arena[pivot].right = Some(id);
        self.tree.relink(parent, id, Some(pivot));
        self.tree.arena[id].parent = Some(pivot);

        self.update_height(id);
        self.update_height(pivot);
    }
}

/// Walks the whole tree asserting the BST ordering, link consistency,
/// height bookkeeping, and the balance bound.
#[cfg(test)]
pub(crate) fn check_invariants<K>(tree: &Tree<K>)
where
    K: Ord + fmt::Debug,
{
    fn check_heights<K>(tree: &Tree<K>, id: NodeId) -> i8
    where
        K: Ord + fmt::Debug,
    {
        let left = tree.tree.left(id).map_or(-1, |left| check_heights(tree, left));
        let right = tree
            .tree
            .right(id)
            .map_or(-1, |right| check_heights(tree, right));

        let height = left.max(right) + 1;
        assert_eq!(
            tree.tree.arena[id].height,
            height,
            "stale height at {:?}",
            tree.tree.key(id)
        );
        assert!(
            (right - left).abs() <= 1,
            "balance invariant broken at {:?}",
            tree.tree.key(id)
        );
        height
    }

    plain::check_structure(&tree.tree);
    if let Some(root) = tree.tree.root {
        check_heights(tree, root);
    }
}
