use rand::Rng;

use crate::{Error, Result, Set};

/// How many survivors a stochastic step removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PruneCount {
    /// uniform in `[0, survivors - 1)`.
    #[default]
    Auto,
    /// exactly this many, at most the survivor count.
    Exact(usize),
}

/// removes random points from `set` and returns how many went.
///
/// A set of one point or less is left alone, whatever the requested count.
pub fn prune<R>(set: &mut Set, count: PruneCount, rng: &mut R) -> Result<usize>
where
    R: Rng,
{
    match count {
        PruneCount::Auto => Ok(prune_auto(set, rng)),
        PruneCount::Exact(count) => prune_exact(set, count, rng),
    }
}

pub fn prune_auto<R>(set: &mut Set, rng: &mut R) -> usize
where
    R: Rng,
{
    if set.len() <= 1 {
        return 0;
    }
    let count = rng.gen_range(0..set.len() - 1);
    remove_random(set, count, rng);
    count
}

pub fn prune_exact<R>(set: &mut Set, count: usize, rng: &mut R) -> Result<usize>
where
    R: Rng,
{
    let available = set.len();
    if available <= 1 {
        return Ok(0);
    }
    if count > available {
        return Err(Error::PruneCountOutOfRange {
            requested: count,
            available,
        });
    }
    remove_random(set, count, rng);
    Ok(count)
}

fn remove_random<R>(set: &mut Set, count: usize, rng: &mut R)
where
    R: Rng,
{
    for _ in 0..count {
        let position = rng.gen_range(0..set.len());
        set.swap_remove(position);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::{board, point};

    use super::*;

    #[test]
    fn test_single_point_is_kept() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut set: Set = [point!(2, 2)].into_iter().collect();
        assert_eq!(prune(&mut set, PruneCount::Exact(1), &mut rng), Ok(0));
        assert_eq!(prune(&mut set, PruneCount::Exact(40), &mut rng), Ok(0));
        assert_eq!(set.len(), 1);

        let mut empty = Set::new();
        assert_eq!(prune(&mut empty, PruneCount::Auto, &mut rng), Ok(0));
    }

    #[test]
    fn test_exact_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let original = board(3, 3);
        let mut set = original.clone();
        assert_eq!(prune(&mut set, PruneCount::Exact(5), &mut rng), Ok(5));
        assert_eq!(set.len(), original.len() - 5);
        assert!(set.is_subset(&original));
    }

    #[test]
    fn test_exact_count_may_empty_the_set() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut set: Set = [point!(0, 0), point!(0, 1)].into_iter().collect();
        assert_eq!(prune(&mut set, PruneCount::Exact(2), &mut rng), Ok(2));
        assert!(set.is_empty());
    }

    #[test]
    fn test_exact_count_out_of_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut set = board(1, 1);
        assert_eq!(
            prune(&mut set, PruneCount::Exact(5), &mut rng),
            Err(Error::PruneCountOutOfRange {
                requested: 5,
                available: 4
            })
        );
        assert_eq!(set, board(1, 1));
    }

    #[test]
    fn test_auto_leaves_at_least_two() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..200 {
            let mut set = board(2, 2);
            let removed = prune(&mut set, PruneCount::Auto, &mut rng).unwrap();
            assert!(removed < 8);
            assert_eq!(set.len(), 9 - removed);
            assert!(set.len() >= 2);
        }
    }
}
