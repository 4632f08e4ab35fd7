/// Default number of tiers the item set is partitioned into.
///
/// Items are bucketed by current score; only items whose tiers differ by at
/// most `MAX_TIER_DISTANCE` are ever scheduled against each other. With 5
/// tiers a list of 30 characters needs roughly a third of the full
/// n·(n−1)/2 comparisons.
pub const TIER_COUNT: usize = 5;

/// Largest tier gap for which a pair is still generated.
/// 0 = same tier, 1 = adjacent tiers.
pub const MAX_TIER_DISTANCE: usize = 1;

/// File extensions recognised as character images (compared case-insensitively).
pub const SUPPORTED_EXTENSIONS: [&str; 2] = [".jpg", ".png"];
