// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use fixedbitset::FixedBitSet;
use moto_dispatch_core::prelude::Load;
use num_traits::Zero;

/// The subset of candidate groups chosen for one vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    indices: Vec<usize>,
    weight: Load,
}

impl Selection {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new(mut indices: Vec<usize>, weight: Load) -> Self {
        indices.sort_unstable();
        Self { indices, weight }
    }

    /// Positions of the chosen groups in the input slice, ascending.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    #[inline]
    pub fn weight(&self) -> Load {
        self.weight
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Chooses which address groups a vehicle takes.
pub trait Selector {
    #[inline]
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Picks a subset of `weights` whose sum does not exceed `capacity`.
    fn select(&self, weights: &[Load], capacity: Load) -> Selection;
}

/// Exact 0/1 knapsack where an item's value equals its weight.
///
/// Maximizes the loaded weight; among subsets reaching that weight, the one
/// with the fewest groups wins, and among those the first one discovered in
/// input order is kept. Groups of weight zero are never taken.
#[derive(Debug, Clone, Copy, Default)]
pub struct KnapsackSelector;

impl KnapsackSelector {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Selector for KnapsackSelector {
    fn select(&self, weights: &[Load], capacity: Load) -> Selection {
        let n = weights.len();
        if n == 0 || capacity.is_zero() {
            return Selection::empty();
        }

        // No subset weighs more than the fitting groups together, so the
        // table never needs to be wider than that.
        let reach = weights
            .iter()
            .map(|w| w.as_usize())
            .filter(|&w| w <= capacity.as_usize())
            .sum::<usize>();
        let cap = capacity.as_usize().min(reach);
        if cap == 0 {
            return Selection::empty();
        }

        let width = cap + 1;
        // fewest[w]: fewest groups summing to exactly w, None when unreachable.
        let mut fewest: Vec<Option<u32>> = vec![None; width];
        fewest[0] = Some(0);
        // took[i * width + w]: fewest[w] was last improved by taking group i.
        let mut took = FixedBitSet::with_capacity(n * width);

        for (i, w_i) in weights.iter().enumerate() {
            let wi = w_i.as_usize();
            if wi == 0 || wi > cap {
                continue;
            }
            for w in (wi..=cap).rev() {
                let Some(prev) = fewest[w - wi] else {
                    continue;
                };
                let cand = prev + 1;
                if fewest[w].is_none_or(|cur| cand < cur) {
                    fewest[w] = Some(cand);
                    took.set(i * width + w, true);
                }
            }
        }

        let Some(best) = (1..=cap).rev().find(|&w| fewest[w].is_some()) else {
            return Selection::empty();
        };

        let mut chosen = Vec::new();
        let mut w = best;
        for i in (0..n).rev() {
            if w == 0 {
                break;
            }
            if took.contains(i * width + w) {
                chosen.push(i);
                w -= weights[i].as_usize();
            }
        }
        debug_assert_eq!(w, 0);

        let weight = Load::new(best as u32);
        tracing::trace!(
            groups = n,
            capacity = cap,
            weight = best,
            taken = chosen.len(),
            "knapsack selection"
        );
        Selection::new(chosen, weight)
    }
}

/// Sum of the weights at `indices`.
#[inline]
pub fn selection_weight(weights: &[Load], indices: &[usize]) -> Load {
    indices.iter().fold(Load::zero(), |acc, &i| acc + weights[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[inline]
    fn ld(v: u32) -> Load {
        Load::new(v)
    }

    fn loads(v: &[u32]) -> Vec<Load> {
        v.iter().copied().map(Load::new).collect()
    }

    /// (best weight, fewest groups at that weight) by enumeration.
    fn brute_force(weights: &[Load], cap: Load) -> (Load, usize) {
        let n = weights.len();
        let mut best = (Load::zero(), 0usize);
        for mask in 0u32..(1u32 << n) {
            let idx: Vec<usize> = (0..n).filter(|i| mask & (1 << i) != 0).collect();
            let w = selection_weight(weights, &idx);
            if w > cap {
                continue;
            }
            if w > best.0 || (w == best.0 && w > Load::zero() && idx.len() < best.1) {
                best = (w, idx.len());
            }
        }
        best
    }

    #[test]
    fn test_prefers_exact_fill_over_largest_item() {
        let s = KnapsackSelector.select(&loads(&[3, 4, 5]), ld(7));
        assert_eq!(s.weight(), ld(7));
        assert_eq!(s.indices(), &[0, 1]);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_nothing_fits() {
        let s = KnapsackSelector.select(&loads(&[6]), ld(5));
        assert!(s.is_empty());
        assert_eq!(s.weight(), Load::zero());
    }

    #[test]
    fn test_empty_input_and_zero_capacity() {
        assert!(KnapsackSelector.select(&[], ld(10)).is_empty());
        assert!(KnapsackSelector.select(&loads(&[1, 2]), ld(0)).is_empty());
    }

    #[test]
    fn test_fewer_groups_win_ties() {
        let s = KnapsackSelector.select(&loads(&[2, 2, 4]), ld(4));
        assert_eq!(s.weight(), ld(4));
        assert_eq!(s.indices(), &[2]);

        let s = KnapsackSelector.select(&loads(&[1, 1, 1, 3]), ld(3));
        assert_eq!(s.indices(), &[3]);
    }

    #[test]
    fn test_first_discovered_subset_wins_equal_ties() {
        let s = KnapsackSelector.select(&loads(&[3, 3]), ld(3));
        assert_eq!(s.indices(), &[0]);

        let s = KnapsackSelector.select(&loads(&[2, 3, 1, 4]), ld(5));
        assert_eq!(s.weight(), ld(5));
        assert_eq!(s.indices(), &[0, 1]);
    }

    #[test]
    fn test_zero_weight_groups_are_ignored() {
        let s = KnapsackSelector.select(&loads(&[0, 2, 0]), ld(5));
        assert_eq!(s.indices(), &[1]);
        assert_eq!(s.weight(), ld(2));
    }

    #[test]
    fn test_oversized_groups_are_skipped() {
        let s = KnapsackSelector.select(&loads(&[12, 4, 9, 3]), ld(8));
        assert_eq!(s.weight(), ld(7));
        assert_eq!(s.indices(), &[1, 3]);
    }

    #[test]
    fn test_huge_capacity_is_bounded_by_total_weight() {
        let s = KnapsackSelector.select(&loads(&[1, 2]), ld(u32::MAX));
        assert_eq!(s.weight(), ld(3));
        assert_eq!(s.indices(), &[0, 1]);

        let s = KnapsackSelector.select(&loads(&[0, 5, 0]), ld(100_000_000));
        assert_eq!(s.indices(), &[1]);
        assert!(KnapsackSelector.select(&loads(&[0, 0]), ld(u32::MAX)).is_empty());
    }

    #[test]
    fn test_name_is_type_name() {
        assert!(KnapsackSelector.name().ends_with("KnapsackSelector"));
    }

    #[test]
    fn test_matches_brute_force_on_random_instances() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5eed_cafe);
        for _ in 0..400 {
            let n = rng.random_range(0..=10usize);
            let weights: Vec<Load> = (0..n).map(|_| ld(rng.random_range(1..=8u32))).collect();
            let cap = ld(rng.random_range(0..=25u32));

            let s = KnapsackSelector.select(&weights, cap);
            let (best_w, best_k) = brute_force(&weights, cap);

            assert_eq!(s.weight(), best_w, "weights={weights:?} cap={cap}");
            assert_eq!(selection_weight(&weights, s.indices()), s.weight());
            assert!(s.weight() <= cap);
            if best_w > Load::zero() {
                assert_eq!(s.len(), best_k, "weights={weights:?} cap={cap}");
            } else {
                assert!(s.is_empty());
            }
            let mut dedup = s.indices().to_vec();
            dedup.dedup();
            assert_eq!(dedup.len(), s.len());
        }
    }
}
