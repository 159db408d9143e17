use std::fmt::Debug;

use crate::{AvlTree, Node};


/// Walks the whole tree asserting BST ordering, that every stored height and
/// balance factor matches its children, and that the AVL bound holds.
pub(crate) fn assert_avl<T: Ord + Debug>(tree: &AvlTree<T>) {
    let (count, height) = check(tree.root(), None, None);
    assert_eq!(count, tree.len());
    assert_eq!(height, tree.height());
}

/// Returns the number of nodes and the height of the subtree.
fn check<T: Ord + Debug>(
    node: Option<&Node<T>>,
    lower: Option<&T>,
    upper: Option<&T>,
) -> (usize, isize) {
    let node = match node {
        Some(node) => node,
        None => return (0, -1),
    };

    if let Some(lower) = lower {
        assert!(node.value() > lower, "{:?} is not above {:?}", node.value(), lower);
    }
    if let Some(upper) = upper {
        assert!(node.value() < upper, "{:?} is not below {:?}", node.value(), upper);
    }

    let (left_count, left_height) = check(node.left(), lower, Some(node.value()));
    let (right_count, right_height) = check(node.right(), Some(node.value()), upper);

    assert_eq!(node.height(), 1 + left_height.max(right_height));
    assert_eq!(node.balance_factor(), left_height - right_height);
    assert!(node.balance_factor().abs() <= 1);

    (left_count + right_count + 1, node.height())
}

/// Every element of the tree in ascending order.
pub(crate) fn in_order<T: Ord + Clone>(tree: &AvlTree<T>) -> Vec<T> {
    match tree.k_smallest(tree.len()) {
        Ok(all) => all.into_iter().cloned().collect(),
        Err(e) => panic!("taking every element failed: {}", e),
    }
}
