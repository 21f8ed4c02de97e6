//! End-of-playback routing to another post of the same account.

use rand::Rng;
use rand::seq::IndexedRandom;

/// Relative URL of a post's watch page.
pub fn post_url(post_id: i64) -> String {
    format!("/?p={post_id}")
}

/// Picks the next post uniformly among `others`, never `current`.
pub fn next_post<R: Rng + ?Sized>(others: &[i64], current: i64, rng: &mut R) -> Option<i64> {
    let candidates: Vec<i64> = others.iter().copied().filter(|id| *id != current).collect();
    candidates.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_picks_only_other_posts() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = HashSet::new();

        for _ in 0..200 {
            let next = next_post(&[2, 3, 5], 1, &mut rng).unwrap();
            assert!([2, 3, 5].contains(&next));
            seen.insert(next);
        }

        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_empty_list_has_no_next() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(next_post(&[], 1, &mut rng), None);
    }

    #[test]
    fn test_current_is_excluded_even_if_listed() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(next_post(&[1], 1, &mut rng), None);

        for _ in 0..50 {
            assert_eq!(next_post(&[1, 4], 1, &mut rng), Some(4));
        }
    }

    #[test]
    fn test_post_url() {
        assert_eq!(post_url(42), "/?p=42");
    }
}
