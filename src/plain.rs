//! A plain BST that never rebalances itself. The shape of the tree is
//! determined entirely by the order the keys arrive in, so operations cost
//! `O(height)` with no bound on the height beyond the number of keys.
//!
//! This flavor also provides the structural algorithms (descent, extreme
//! and neighbor walks, the three deletion cases) that [`crate::avl`]
//! builds its rebalancing on top of.
//!
//! # Examples
//!
//! ```
//! use bstree::plain::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&2));
//!
//! tree.insert(2).unwrap();
//! tree.insert(1).unwrap();
//! tree.insert(3).unwrap();
//!
//! assert_eq!(tree.min(), Some(&1));
//! assert_eq!(tree.successor(&2), Ok(&3));
//!
//! // Deleting a key returns it.
//! assert_eq!(tree.delete(&2), Ok(2));
//! assert!(!tree.contains(&2));
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::arena::{Arena, NodeId};
use crate::Error;

/// An unbalanced Binary Search Tree storing a set of ordered keys.
///
/// Duplicate keys are rejected: a second insert of an equal key fails with
/// [`Error::DuplicateKey`] and leaves the tree untouched.
#[derive(Clone)]
pub struct Tree<K> {
    pub(crate) arena: Arena<K>,
    pub(crate) root: Option<NodeId>,
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
        f.debug_struct("Tree")
            .field("root", &self.root.map(|id| DebugNode { tree: self, id }))
            .finish()
    }
}

/// Renders the subtree below `id` as nested `Node { .. }` structs, the way
/// a pointer-based tree's derived `Debug` would.
struct DebugNode<'a, K> {
    tree: &'a Tree<K>,
    id: NodeId,
}

impl<'a, K> fmt::Debug for DebugNode<'a, K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let child = |id| DebugNode {
            tree: self.tree,
            id,
        };
        f.debug_struct("Node")
            .field("key", self.tree.key(self.id))
            .field("left", &self.tree.left(self.id).map(child))
            .field("right", &self.tree.right(self.id).map(child))
            .finish()
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// The number of keys stored in the tree.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Whether the tree stores no keys at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Inserts the given key into the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::{plain::Tree, Error};
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert_eq!(tree.insert(1), Ok(()));
    /// // Inserting the same key again fails and changes nothing.
    /// assert_eq!(tree.insert(1), Err(Error::DuplicateKey));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> Result<(), Error>
    where
        K: Ord,
    {
        self.insert_leaf(key).map(|_| ())
    }

    /// Potentially finds the given key in this tree, returning a reference
    /// to the stored copy.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::{plain::Tree, Error};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1).unwrap();
    ///
    /// assert_eq!(tree.find(&1), Ok(&1));
    /// assert_eq!(tree.find(&42), Err(Error::KeyNotFound));
    /// ```
    pub fn find(&self, key: &K) -> Result<&K, Error>
    where
        K: Ord,
    {
        self.find_node(key).map(|id| self.key(id))
    }

    /// Whether the tree stores the given key.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.find_node(key).is_ok()
    }

    /// The smallest key in the tree, or `None` if the tree is empty.
    pub fn min(&self) -> Option<&K> {
        self.root.map(|root| self.key(self.min_in(root)))
    }

    /// The largest key in the tree, or `None` if the tree is empty.
    pub fn max(&self) -> Option<&K> {
        self.root.map(|root| self.key(self.max_in(root)))
    }

    /// The next key after `key` in sorted order.
    ///
    /// Fails with [`Error::KeyNotFound`] if `key` is not in the tree and
    /// with [`Error::NoSuccessor`] if it is the largest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::{plain::Tree, Error};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(10).unwrap();
    /// tree.insert(20).unwrap();
    ///
    /// assert_eq!(tree.successor(&10), Ok(&20));
    /// assert_eq!(tree.successor(&20), Err(Error::NoSuccessor));
    /// ```
    pub fn successor(&self, key: &K) -> Result<&K, Error>
    where
        K: Ord,
    {
        let id = self.find_node(key)?;
        match self.successor_of(id) {
            Some(succ) => Ok(self.key(succ)),
            None => Err(Error::NoSuccessor),
        }
    }

    /// The next key before `key` in sorted order.
    ///
    /// Fails with [`Error::KeyNotFound`] if `key` is not in the tree and
    /// with [`Error::NoPredecessor`] if it is the smallest key.
    pub fn predecessor(&self, key: &K) -> Result<&K, Error>
    where
        K: Ord,
    {
        let id = self.find_node(key)?;
        match self.predecessor_of(id) {
            Some(pred) => Ok(self.key(pred)),
            None => Err(Error::NoPredecessor),
        }
    }

    /// Deletes the given key from the tree and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::{plain::Tree, Error};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1).unwrap();
    ///
    /// assert_eq!(tree.delete(&1), Ok(1));
    /// assert_eq!(tree.delete(&1), Err(Error::KeyNotFound));
    /// assert!(tree.is_empty());
    /// ```
    pub fn delete(&mut self, key: &K) -> Result<K, Error>
    where
        K: Ord,
    {
        let id = self.find_node(key)?;
        let (key, _) = self.remove_node(id);
        Ok(key)
    }

    // Link accessors. Every structural algorithm below reads the tree
    // through these.

    pub(crate) fn key(&self, id: NodeId) -> &K {
        &self.arena[id].key
    }

    pub(crate) fn left(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].left
    }

    pub(crate) fn right(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].right
    }

    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].parent
    }

    /// Descends from the root and attaches `key` as a new leaf at the first
    /// empty link on its comparison path, returning the leaf's id.
    pub(crate) fn insert_leaf(&mut self, key: K) -> Result<NodeId, Error>
    where
        K: Ord,
    {
        let mut cur = match self.root {
            Some(root) => root,
            None => {
                let id = self.arena.alloc(key);
                self.root = Some(id);
                return Ok(id);
            }
        };
        loop {
            cur = match key.cmp(self.key(cur)) {
                Ordering::Less => match self.left(cur) {
                    Some(left) => left,
                    None => {
                        let id = self.arena.alloc(key);
                        self.arena[id].parent = Some(cur);
                        self.arena[cur].left = Some(id);
                        return Ok(id);
                    }
                },
                Ordering::Equal => return Err(Error::DuplicateKey),
                Ordering::Greater => match self.right(cur) {
                    Some(right) => right,
                    None => {
                        let id = self.arena.alloc(key);
                        self.arena[id].parent = Some(cur);
                        self.arena[cur].right = Some(id);
                        return Ok(id);
                    }
                },
            };
        }
    }

    /// Descends from the root comparing keys until an exact match.
    pub(crate) fn find_node(&self, key: &K) -> Result<NodeId, Error>
    where
        K: Ord,
    {
        let mut cur = self.root;
        while let Some(id) = cur {
            cur = match key.cmp(self.key(id)) {
                Ordering::Less => self.left(id),
                Ordering::Equal => return Ok(id),
                Ordering::Greater => self.right(id),
            };
        }
        Err(Error::KeyNotFound)
    }

    /// The leftmost node of the subtree rooted at `id`.
    pub(crate) fn min_in(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.left(id) {
            id = left;
        }
        id
    }

    /// The rightmost node of the subtree rooted at `id`.
    pub(crate) fn max_in(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.right(id) {
            id = right;
        }
        id
    }

    /// The node holding the next larger key, if any.
    ///
    /// With a right subtree the successor is its minimum. Otherwise it is
    /// the first ancestor reached from within its left subtree; if the walk
    /// runs off the root, `id` holds the largest key.
    pub(crate) fn successor_of(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.right(id) {
            return Some(self.min_in(right));
        }
        let mut child = id;
        while let Some(parent) = self.parent(child) {
            if self.left(parent) == Some(child) {
                return Some(parent);
            }
            child = parent;
        }
        None
    }

    /// The node holding the next smaller key, if any. Mirror of
    /// [`Tree::successor_of`].
    pub(crate) fn predecessor_of(&self, id: NodeId) -> Option<NodeId> {
        if let Some(left) = self.left(id) {
            return Some(self.max_in(left));
        }
        let mut child = id;
        while let Some(parent) = self.parent(child) {
            if self.right(parent) == Some(child) {
                return Some(parent);
            }
            child = parent;
        }
        None
    }

    /// Removes the node at `id` from the tree, returning its key and the
    /// parent of whichever node was physically detached. That parent is the
    /// lowest node whose subtree changed, which is where the AVL flavor
    /// starts its repair walk; it is `None` when the detached node was the
    /// root.
    pub(crate) fn remove_node(&mut self, id: NodeId) -> (K, Option<NodeId>) {
        match (self.left(id), self.right(id)) {
            // No children: detach the node from its parent.
            (None, None) => {
                let parent = self.parent(id);
                self.relink(parent, id, None);
                (self.arena.free(id).key, parent)
            }
            // One child: splice the child into the node's place.
            (Some(child), None) | (None, Some(child)) => {
                let parent = self.parent(id);
                self.relink(parent, id, Some(child));
                (self.arena.free(id).key, parent)
            }
            // Two children: promote the in-order successor's key into this
            // node, then detach the successor. The successor is the
            // leftmost node of the right subtree, so it has no left child
            // and detaching it is one of the cases above.
            (Some(_), Some(right)) => {
                let succ = self.min_in(right);
                let succ_parent = self
                    .parent(succ)
                    .expect("successor of a node with two children has a parent");
                let succ_child = self.right(succ);
                self.relink(Some(succ_parent), succ, succ_child);
                let succ_key = self.arena.free(succ).key;
                let key = std::mem::replace(&mut self.arena[id].key, succ_key);
                (key, Some(succ_parent))
            }
        }
    }

    /// Points whatever linked to `was` (its parent's child link, or the
    /// tree root) at `child` instead, updating `child`'s parent link to
    /// match.
    pub(crate) fn relink(
        &mut self,
        parent: Option<NodeId>,
        was: NodeId,
        child: Option<NodeId>,
    ) {
        match parent {
            None => self.root = child,
            Some(parent) => {
                if self.left(parent) == Some(was) {
                    self.arena[parent].left = child;
                } else {
                    self.arena[parent].right = child;
                }
            }
        }
        if let Some(child) = child {
            self.arena[child].parent = parent;
        }
    }
}

/// Walks the whole tree asserting the BST ordering and parent/child link
/// consistency.
#[cfg(test)]
pub(crate) fn check_structure<K>(tree: &Tree<K>)
where
    K: Ord + fmt::Debug,
{
    fn check_node<K>(
        tree: &Tree<K>,
        id: NodeId,
        parent: Option<NodeId>,
        min: Option<&K>,
        max: Option<&K>,
    ) where
        K: Ord + fmt::Debug,
    {
        assert_eq!(
            tree.parent(id),
            parent,
            "parent link of {:?} is inconsistent",
            tree.key(id)
        );
        let key = tree.key(id);
        if let Some(min) = min {
            assert!(key > min, "{:?} placed right of {:?}", key, min);
        }
        if let Some(max) = max {
            assert!(key < max, "{:?} placed left of {:?}", key, max);
        }
        if let Some(left) = tree.left(id) {
            check_node(tree, left, Some(id), min, Some(key));
        }
        if let Some(right) = tree.right(id) {
            check_node(tree, right, Some(id), Some(key), max);
        }
    }

    if let Some(root) = tree.root {
        check_node(tree, root, None, None, None);
    }
}
