use rand::Rng;
use rand::seq::IndexedRandom;

/// Draws up to `count` entries from `pool` uniformly at random, without
/// repeating an index.
pub fn sample_recommendations<R>(pool: &[String], count: usize, rng: &mut R) -> Vec<String>
where
    R: Rng + ?Sized,
{
    pool.choose_multiple(rng, count.min(pool.len()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn pool(size: usize) -> Vec<String> {
        (0..size).map(|i| format!("pkg-{i}")).collect()
    }

    #[test]
    fn draws_at_most_count_distinct_entries() {
        let pool = pool(500);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let picked = sample_recommendations(&pool, 20, &mut rng);
            assert_eq!(picked.len(), 20);
            let unique: HashSet<&String> = picked.iter().collect();
            assert_eq!(unique.len(), 20);
            assert!(picked.iter().all(|name| pool.contains(name)));
        }
    }

    #[test]
    fn small_pool_is_returned_whole() {
        let pool = pool(5);
        let mut rng = StdRng::seed_from_u64(1);
        let mut picked = sample_recommendations(&pool, 20, &mut rng);
        picked.sort();
        let mut expected = pool.clone();
        expected.sort();
        assert_eq!(picked, expected);
    }

    #[test]
    fn empty_pool_gives_empty_list() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(sample_recommendations(&[], 20, &mut rng).is_empty());
    }

    #[test]
    fn successive_draws_vary() {
        let pool = pool(1000);
        let mut rng = StdRng::seed_from_u64(42);
        let first = sample_recommendations(&pool, 20, &mut rng);
        let second = sample_recommendations(&pool, 20, &mut rng);
        assert_ne!(first, second);
    }
}
