/// Comparison scheduling: which pairs get asked, and in what order.
///
/// Public functions accept `item_ids` and return `Pair`s of IDs.
/// Internal functions use `usize` indices for efficient array indexing.
use rand::Rng;

use crate::constants::MAX_TIER_DISTANCE;
use crate::types::{IndexedPair, Pair};

/// Whether two tiers are close enough to be compared.
pub fn tiers_compatible(tier_a: usize, tier_b: usize) -> bool {
    tier_a.abs_diff(tier_b) <= MAX_TIER_DISTANCE
}

/// Upper bound on comparisons: the full n·(n−1)/2 cross product.
pub fn max_comparisons(num_items: usize) -> usize {
    num_items * num_items.saturating_sub(1) / 2
}

/// Generate every unordered pair whose tiers differ by at most one.
///
/// `tiers[i]` is the tier for `item_ids[i]`. Pairs keep input order
/// (`item_ids[i]` before `item_ids[j]` for `i < j`).
pub fn generate_comparisons(item_ids: &[String], tiers: &[usize]) -> Vec<Pair> {
    generate_comparisons_indexed(tiers)
        .into_iter()
        .map(|(a, b)| (item_ids[a].clone(), item_ids[b].clone()))
        .collect()
}

pub(crate) fn generate_comparisons_indexed(tiers: &[usize]) -> Vec<IndexedPair> {
    let num_items = tiers.len();
    let mut pairs = Vec::new();
    for i in 0..num_items {
        for j in (i + 1)..num_items {
            if tiers_compatible(tiers[i], tiers[j]) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Pick the position of the next pair to show, uniformly at random.
/// `None` means the queue is exhausted.
pub fn select_next_pair(pending_len: usize, rng: &mut impl Rng) -> Option<usize> {
    if pending_len == 0 {
        return None;
    }
    Some(rng.random_range(0..pending_len))
}

/// Whether `pair` is the unordered combination `{a, b}`.
pub(crate) fn pair_matches(pair: IndexedPair, a: usize, b: usize) -> bool {
    (pair.0 == a && pair.1 == b) || (pair.0 == b && pair.1 == a)
}
