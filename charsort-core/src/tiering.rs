/// Tier assignment.
///
/// Items are sorted by score (see `scoring::rank_order`) and cut into
/// contiguous buckets of `ceil(n / tier_count)` items. Bucket index = tier.
/// Because the bucket size is rounded up, fewer than `tier_count` tiers may
/// actually be populated (e.g. 6 items / 5 tiers → buckets of 2 → tiers 0..=2).
use tracing::trace;

use crate::error::{EngineError, Result};
use crate::scoring::rank_order;
use crate::types::Item;

/// Number of items per tier: `ceil(num_items / tier_count)`.
pub fn tier_size(num_items: usize, tier_count: usize) -> Result<usize> {
    if tier_count == 0 {
        return Err(EngineError::InvalidTierCount);
    }
    Ok(num_items.div_ceil(tier_count))
}

/// Recompute every item's `tier` from the current scores.
pub fn compute_tiers(items: &mut [Item], tier_count: usize) -> Result<()> {
    let size = tier_size(items.len(), tier_count)?;
    retier(items, size);
    Ok(())
}

/// Recompute tiers with an already validated bucket size.
pub(crate) fn retier(items: &mut [Item], size: usize) {
    let scores: Vec<u32> = items.iter().map(|i| i.score).collect();
    for (item, tier) in items.iter_mut().zip(assign_tiers(&scores, size)) {
        item.tier = tier;
    }
}

/// `tiers[i]` is the tier of the item whose score is `scores[i]`.
#[cfg(test)]
pub(crate) fn compute_tiers_indexed(scores: &[u32], tier_count: usize) -> Result<Vec<usize>> {
    let size = tier_size(scores.len(), tier_count)?;
    Ok(assign_tiers(scores, size))
}

/// Bucket the score order into tiers of `size` items. `size` must be ≥ 1
/// whenever `scores` is non-empty.
pub(crate) fn assign_tiers(scores: &[u32], size: usize) -> Vec<usize> {
    let mut tiers = vec![0; scores.len()];
    for (position, idx) in rank_order(scores).into_iter().enumerate() {
        tiers[idx] = position / size;
    }
    trace!(?tiers, "tiers recomputed");
    tiers
}
