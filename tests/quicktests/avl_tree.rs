use avl::{AvlError, AvlTree, Node};
use quickcheck_macros::quickcheck;

use std::collections::BTreeSet;

use crate::Op;

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts
/// and removes we have the same elements in both.
fn do_ops<T>(ops: &[Op<T>], tree: &mut AvlTree<T>, set: &mut BTreeSet<T>)
where
    T: Ord + Clone + std::fmt::Debug,
{
    for op in ops {
        match op {
            Op::Insert(v) => {
                assert_eq!(tree.insert(v.clone()), set.insert(v.clone()));
            }
            Op::Remove(v) => {
                assert_eq!(tree.remove(v).ok(), set.take(v));
            }
        }
    }
}

/// Returns the height of the subtree if every node in it is balanced and
/// stores its real height.
fn balanced_height<T>(node: Option<&Node<T>>) -> Option<isize> {
    match node {
        None => Some(-1),
        Some(n) => {
            let left = balanced_height(n.left())?;
            let right = balanced_height(n.right())?;
            let consistent = n.height() == 1 + left.max(right)
                && n.balance_factor() == left - right
                && (left - right).abs() <= 1;
            if consistent {
                Some(n.height())
            } else {
                None
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = AvlTree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    tree.len() == set.len()
        && tree.k_smallest(tree.len()) == Ok(set.iter().collect())
        && balanced_height(tree.root()) == Some(tree.height())
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: AvlTree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: AvlTree<_> = xs.iter().copied().collect();
    let added: BTreeSet<_> = xs.into_iter().collect();

    nots.iter()
        .filter(|x| !added.contains(*x))
        .all(|x| tree.get(x) == Err(AvlError::NotFound))
}

#[quickcheck]
fn with_removals(xs: Vec<i8>, removes: Vec<i8>) -> bool {
    let mut tree: AvlTree<_> = xs.iter().copied().collect();
    for remove in &removes {
        let _ = tree.remove(remove);
    }

    let still_present: Vec<_> = xs.iter().filter(|x| !removes.contains(*x)).collect();

    removes.iter().all(|x| !tree.contains(x))
        && still_present.into_iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn stays_balanced_after_each_insert(xs: Vec<i16>) -> bool {
    let mut tree = AvlTree::new();
    xs.into_iter().all(|x| {
        tree.insert(x);
        balanced_height(tree.root()) == Some(tree.height())
    })
}

#[quickcheck]
fn height_is_logarithmic(xs: Vec<i16>) -> bool {
    let tree: AvlTree<_> = xs.into_iter().collect();
    let bound = 1.4405 * ((tree.len() + 2) as f64).log2() - 1.0;

    tree.height() as f64 <= bound
}

#[quickcheck]
fn insert_then_remove_restores_order(xs: Vec<i8>, x: i8) -> bool {
    let mut tree: AvlTree<_> = xs.into_iter().filter(|v| *v != x).collect();
    let before: Vec<i8> = tree.k_smallest(tree.len()).unwrap().into_iter().copied().collect();

    tree.insert(x);
    let removed = tree.remove(&x);
    let after: Vec<i8> = tree.k_smallest(tree.len()).unwrap().into_iter().copied().collect();

    removed == Ok(x) && before == after
}

#[quickcheck]
fn predecessor_matches_set(xs: Vec<i8>) -> bool {
    let tree: AvlTree<_> = xs.iter().copied().collect();
    let set: BTreeSet<_> = xs.iter().copied().collect();

    set.iter()
        .all(|x| tree.predecessor(x) == Ok(set.range(..*x).next_back()))
}

#[quickcheck]
fn k_smallest_is_sorted_prefix(xs: Vec<i8>, k: u8) -> bool {
    let tree: AvlTree<_> = xs.iter().copied().collect();
    let set: BTreeSet<_> = xs.into_iter().collect();
    let k = usize::from(k);

    match tree.k_smallest(k) {
        Ok(smallest) => k <= set.len() && smallest.into_iter().eq(set.iter().take(k)),
        Err(AvlError::InvalidArgument(_)) => k > set.len(),
        Err(AvlError::NotFound) => false,
    }
}
