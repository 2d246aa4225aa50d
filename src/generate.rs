//! Filling a fresh tree with sample records.

use rand::Rng;

use crate::avl::Tree;
use crate::error::GenerateError;

/// The most records [`generate`] will produce in one go.
pub const MAX_GENERATED_RECORDS: usize = 50_000;

/// How many characters each generated value has.
pub const VALUE_LENGTH: usize = 10;

/// Builds a new tree with the keys `1..=count`, each holding a random string of printable,
/// non-space ASCII.
///
/// # Examples
///
/// ```
/// use avldb::generate::generate;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let tree = generate(100, &mut rng).unwrap();
///
/// assert_eq!(tree.len(), 100);
/// assert!(tree.get(100).is_some());
/// assert!(tree.get(101).is_none());
/// ```
pub fn generate<R: Rng>(count: usize, rng: &mut R) -> Result<Tree, GenerateError> {
    if count == 0 {
        return Err(GenerateError::Empty);
    }
    if count > MAX_GENERATED_RECORDS {
        return Err(GenerateError::TooMany {
            requested: count,
            max: MAX_GENERATED_RECORDS,
        });
    }

    // `count` is capped well below `i32::MAX`.
    let mut tree = Tree::new();
    for key in 1..=count as i32 {
        tree.insert(key, random_value(rng));
    }
    Ok(tree)
}

fn random_value<R: Rng>(rng: &mut R) -> String {
    (0..VALUE_LENGTH)
        .map(|_| char::from(rng.random_range(b'!'..=b'~')))
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn sequential_keys_and_printable_values() {
        let mut rng = StdRng::seed_from_u64(42);
        let tree = generate(500, &mut rng).unwrap();

        assert_eq!(tree.len(), 500);
        let keys: Vec<_> = tree.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, (1..=500).collect::<Vec<_>>());

        for (_, value) in &tree {
            assert_eq!(value.len(), VALUE_LENGTH);
            assert!(value.bytes().all(|b| b.is_ascii_graphic()));
        }
    }

    #[test]
    fn same_seed_same_values() {
        let a = generate(20, &mut StdRng::seed_from_u64(1)).unwrap();
        let b = generate(20, &mut StdRng::seed_from_u64(1)).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn count_limits() {
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(generate(0, &mut rng), Err(GenerateError::Empty));
        assert_eq!(
            generate(MAX_GENERATED_RECORDS + 1, &mut rng),
            Err(GenerateError::TooMany {
                requested: MAX_GENERATED_RECORDS + 1,
                max: MAX_GENERATED_RECORDS,
            })
        );
        assert_eq!(generate(1, &mut rng).map(|t| t.len()), Ok(1));
    }
}
