use avldb::{storage, Tree};

use crate::Op;

quickcheck::quickcheck! {
    fn save_then_load_keeps_records(ops: Vec<Op>) -> bool {
        let mut tree = Tree::new();
        for op in &ops {
            match op {
                Op::Insert(k, v) => {
                    tree.insert(i32::from(*k), v.clone());
                }
                Op::Remove(k) => {
                    tree.remove(i32::from(*k));
                }
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        storage::save(&tree, &path).unwrap();
        let loaded = storage::load(&path);

        loaded.len() == tree.len() && loaded.iter().eq(tree.iter())
    }
}
