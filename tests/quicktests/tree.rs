use avldb::avl::Node;
use avldb::Tree;

use std::collections::{BTreeMap, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a map.
/// This way we can ensure that after a random smattering of inserts
/// and removes we have the same records in both.
fn do_ops(ops: &[Op], tree: &mut Tree, map: &mut BTreeMap<i32, String>) {
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                let k = i32::from(*k);
                let inserted = tree.insert(k, v.clone());
                assert_eq!(inserted, !map.contains_key(&k));
                map.entry(k).or_insert_with(|| v.clone());
            }
            Op::Remove(k) => {
                let k = i32::from(*k);
                assert_eq!(tree.remove(k), map.remove(&k).is_some());
            }
        }
    }
}

/// Returns the height of the subtree if every node in it has a correct cached height and a
/// balance factor in `-1..=1`.
fn balanced_height(node: Option<&Node>) -> Option<usize> {
    let Some(node) = node else {
        return Some(0);
    };
    let left = balanced_height(node.left())?;
    let right = balanced_height(node.right())?;
    let balance = left as isize - right as isize;

    let consistent = node.height() == left.max(right) + 1 && balance == node.balance_factor();
    (consistent && balance.abs() <= 1).then_some(node.height())
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op>) -> bool {
        let mut tree = Tree::new();
        let mut map = BTreeMap::new();

        do_ops(&ops, &mut tree, &mut map);
        tree.len() == map.len()
            && map.iter().all(|(k, v)| tree.get(*k) == Some(v.as_str()))
            && balanced_height(tree.root()) == Some(tree.height())
    }

    fn in_order_is_strictly_increasing(ops: Vec<Op>) -> bool {
        let mut tree = Tree::new();
        do_ops(&ops, &mut tree, &mut BTreeMap::new());

        let keys: Vec<_> = tree.iter().map(|(k, _)| k).collect();
        keys.windows(2).all(|w| w[0] < w[1])
    }

    fn contains(xs: Vec<i32>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            tree.insert(*x, x.to_string());
        }

        xs.iter().all(|x| {
            let search = tree.search(*x);
            search.found()
                && search.value() == Some(x.to_string().as_str())
                && search.comparisons() >= 1
        })
    }

    fn contains_not(xs: Vec<i32>, nots: Vec<i32>) -> bool {
        let tree: Tree = xs.iter().map(|x| (*x, String::new())).collect();
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| !tree.search(*x).found())
    }

    fn removing_missing_keys_keeps_shape(xs: Vec<i8>, missing: i8) -> bool {
        let mut tree: Tree = xs
            .iter()
            .filter(|x| **x != missing)
            .map(|x| (i32::from(*x), x.to_string()))
            .collect();
        let before = tree.clone();

        !tree.remove(i32::from(missing)) && tree == before
    }

    fn export_is_preorder(xs: Vec<i16>) -> bool {
        let tree: Tree = xs.iter().map(|x| (i32::from(*x), String::new())).collect();
        let exported: Vec<_> = tree.export().iter().map(|e| e.key).collect();
        let walked: Vec<_> = tree.preorder().map(Node::key).collect();

        exported.len() == tree.len()
            && exported == walked
            && tree.root().map(Node::key) == exported.first().copied()
    }
}
