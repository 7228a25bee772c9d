use bstree::plain::Tree;
use bstree::Error;

use std::collections::{BTreeSet, HashSet};

use quickcheck_macros::quickcheck;

use crate::Op;

/// Applies a set of operations to a tree and an ordered-set oracle.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys as the oracle.
fn do_ops(ops: &[Op<i8>], tree: &mut Tree<i8>, set: &mut BTreeSet<i8>) {
    for op in ops {
        match *op {
            Op::Insert(key) => {
                let expected = if set.insert(key) {
                    Ok(())
                } else {
                    Err(Error::DuplicateKey)
                };
                assert_eq!(tree.insert(key), expected);
            }
            Op::Remove(key) => {
                let expected = if set.remove(&key) {
                    Ok(key)
                } else {
                    Err(Error::KeyNotFound)
                };
                assert_eq!(tree.delete(&key), expected);
            }
            Op::Find(key) => {
                assert_eq!(tree.find(&key).ok(), set.get(&key));
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    tree.len() == set.len() && set.iter().all(|key| tree.contains(key))
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        let _ = tree.insert(*x);
    }

    xs.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        let _ = tree.insert(*x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x) == Err(Error::KeyNotFound))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        let _ = tree.insert(*x);
    }
    for delete in &deletes {
        let _ = tree.delete(delete);
    }

    let deleted: HashSet<_> = deletes.into_iter().collect();
    let still_present: HashSet<_> = xs
        .into_iter()
        .filter(|x| !deleted.contains(x))
        .collect();

    deleted.iter().all(|x| !tree.contains(x))
        && still_present.iter().all(|x| tree.contains(x))
}
