use quickcheck::{Arbitrary, Gen};

mod storage;
mod tree;

/// Things to do to a tree in a quicktest. Keys are `i8` so that random operations keep running
/// into each other.
#[derive(Clone, Debug)]
pub enum Op {
    /// Insert the key and value into the tree
    Insert(i8, String),
    /// Remove the key from the tree
    Remove(i8),
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Op::Insert(i8::arbitrary(g), String::arbitrary(g))
        } else {
            Op::Remove(i8::arbitrary(g))
        }
    }
}
