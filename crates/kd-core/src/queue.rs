//! Drill queue building

use crate::error::{DrillError, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Default number of items in a kana drill
pub const DEFAULT_QUEUE_LENGTH: usize = 40;

/// Build a random drill queue of `len` items drawn from `pool`.
///
/// Draws are uniform. When the pool holds at least two distinct items, a
/// draw equal to the previous queue entry is thrown away and redrawn, so no
/// item appears twice in a row. A single-item pool yields `len` copies.
pub fn build_queue<T, R>(pool: &[T], len: usize, rng: &mut R) -> Result<Vec<T>>
where
    T: Clone + PartialEq,
    R: Rng + ?Sized,
{
    if pool.is_empty() {
        return Err(DrillError::EmptyPool);
    }

    let can_avoid_repeat = pool.iter().any(|item| *item != pool[0]);
    let mut queue: Vec<T> = Vec::with_capacity(len);

    while queue.len() != len {
        let item = &pool[rng.gen_range(0..pool.len())];
        if can_avoid_repeat && queue.last() == Some(item) {
            continue;
        }
        queue.push(item.clone());
    }

    Ok(queue)
}

/// Random source for queue building, reproducible when seeded
pub fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kana::KanaMask;
    use crate::types::{KanaItem, Script};

    #[test]
    fn test_empty_pool() {
        let mut rng = make_rng(Some(1));
        let result = build_queue::<KanaItem, _>(&[], DEFAULT_QUEUE_LENGTH, &mut rng);
        assert!(matches!(result, Err(DrillError::EmptyPool)));
    }

    #[test]
    fn test_single_item_pool() {
        let mut rng = make_rng(Some(7));
        let pool = KanaMask::from_romaji(&["ka"], &[] as &[&str]).unwrap().items();
        let queue = build_queue(&pool, DEFAULT_QUEUE_LENGTH, &mut rng).unwrap();

        assert_eq!(queue.len(), DEFAULT_QUEUE_LENGTH);
        assert!(queue.iter().all(|item| *item == pool[0]));
    }

    #[test]
    fn test_no_immediate_repeat() {
        for pool_size in 2..=6 {
            let pool: Vec<KanaItem> = (0..pool_size)
                .map(|i| KanaItem::new(Script::Hiragana, i).unwrap())
                .collect();

            for seed in 0..50 {
                let mut rng = make_rng(Some(seed));
                let queue = build_queue(&pool, DEFAULT_QUEUE_LENGTH, &mut rng).unwrap();
                assert_eq!(queue.len(), DEFAULT_QUEUE_LENGTH);
                assert!(
                    queue.windows(2).all(|w| w[0] != w[1]),
                    "repeat with pool {} seed {}",
                    pool_size,
                    seed
                );
            }
        }
    }

    #[test]
    fn test_queue_uses_only_pool_items() {
        let mut rng = make_rng(None);
        let pool = KanaMask::all().items();
        let queue = build_queue(&pool, 200, &mut rng).unwrap();
        assert!(queue.iter().all(|item| pool.contains(item)));
    }

    #[test]
    fn test_seeded_queues_repeat() {
        let pool = KanaMask::all().items();
        let a = build_queue(&pool, 40, &mut make_rng(Some(42))).unwrap();
        let b = build_queue(&pool, 40, &mut make_rng(Some(42))).unwrap();
        assert_eq!(a, b);
    }
}
