//! Crossover for city-id routes.
//!
//! # Crossover Operators
//!
//! - [`tail_swap_crossover`]: single cut, tails exchanged as-is — O(n)
//!
//! The tail swap does **not** repair its children. A city appearing in one
//! parent's head and the other parent's tail ends up twice in a child, and
//! some other city goes missing. Infection is the only operator that
//! restores a duplicate-free route.

use crate::oracle::CityId;
use rand::Rng;

/// Single-cut segment exchange.
///
/// Picks one cut index in `[0, len)` and returns
/// `(p1[..cut] ++ p2[cut..], p2[..cut] ++ p1[cut..])`, where `len` is the
/// shorter parent's length. Both children are fresh buffers.
///
/// # Complexity
/// O(n) time, O(n) space
pub fn tail_swap_crossover<R: Rng>(
    parent1: &[CityId],
    parent2: &[CityId],
    rng: &mut R,
) -> (Vec<CityId>, Vec<CityId>) {
    let len = parent1.len().min(parent2.len());
    if len == 0 {
        return (parent1.to_vec(), parent2.to_vec());
    }
    let cut = rng.random_range(0..len);
    (
        swap_tail(parent1, parent2, cut),
        swap_tail(parent2, parent1, cut),
    )
}

fn swap_tail(head: &[CityId], tail: &[CityId], cut: usize) -> Vec<CityId> {
    let mut child = Vec::with_capacity(tail.len());
    child.extend_from_slice(&head[..cut]);
    child.extend_from_slice(&tail[cut..]);
    child
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_children_exchange_tails() {
        let mut rng = create_rng(42);
        let p1 = vec![1, 2, 3, 4, 5, 6];
        let p2 = vec![6, 5, 4, 3, 2, 1];

        for _ in 0..100 {
            let (c1, c2) = tail_swap_crossover(&p1, &p2, &mut rng);
            assert_eq!(c1.len(), 6);
            assert_eq!(c2.len(), 6);
            let cut = (0..6).find(|&i| c1[i] != p1[i]).unwrap_or(6);
            assert_eq!(&c1[..cut], &p1[..cut]);
            assert_eq!(&c1[cut..], &p2[cut..]);
            assert_eq!(&c2[..cut], &p2[..cut]);
            assert_eq!(&c2[cut..], &p1[cut..]);
        }
    }

    #[test]
    fn test_can_duplicate_cities() {
        let mut rng = create_rng(42);
        let p1 = vec![1, 2, 3, 4];
        let p2 = vec![3, 4, 1, 2];

        let any_duplicate = (0..100).any(|_| {
            let (c1, _) = tail_swap_crossover(&p1, &p2, &mut rng);
            let mut sorted = c1.clone();
            sorted.sort_unstable();
            sorted.dedup();
            sorted.len() < c1.len()
        });
        assert!(any_duplicate, "tail swap never produced a duplicate");
    }

    #[test]
    fn test_parents_untouched() {
        let mut rng = create_rng(9);
        let p1 = vec![1, 2, 3, 4, 5];
        let p2 = vec![5, 4, 3, 2, 1];
        let _ = tail_swap_crossover(&p1, &p2, &mut rng);
        assert_eq!(p1, vec![1, 2, 3, 4, 5]);
        assert_eq!(p2, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_unequal_lengths() {
        let mut rng = create_rng(1);
        let p1 = vec![1, 2, 3, 4, 5];
        let p2 = vec![5, 4, 3];
        for _ in 0..50 {
            let (c1, c2) = tail_swap_crossover(&p1, &p2, &mut rng);
            assert_eq!(c1.len() + c2.len(), 8);
        }
    }

    #[test]
    fn test_empty_parent() {
        let mut rng = create_rng(1);
        let (c1, c2) = tail_swap_crossover(&[], &[1, 2], &mut rng);
        assert!(c1.is_empty());
        assert_eq!(c2, vec![1, 2]);
    }
}
