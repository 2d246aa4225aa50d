use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// a tree in a quicktest. Keys are `i8` so that random
/// operations keep running into each other.
#[derive(Clone, Debug)]
pub(crate) enum Op {
    /// Insert the key and value into the tree
    Insert(i8, String),
    /// Overwrite the value at the key
    Edit(i8, String),
    /// Remove the key from the tree
    Remove(i8),
    /// Look up the key
    Search(i8),
}

impl Arbitrary for Op {
    /// Tells quickcheck how to randomly choose an operation
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1, 2, 3]).unwrap() {
            0 => Op::Insert(i8::arbitrary(g), String::arbitrary(g)),
            1 => Op::Edit(i8::arbitrary(g), String::arbitrary(g)),
            2 => Op::Remove(i8::arbitrary(g)),
            3 => Op::Search(i8::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}
