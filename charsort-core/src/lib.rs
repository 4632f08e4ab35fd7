/// charsort-core: tiered pairwise-preference ranking engine.
///
/// Show two items → user picks one → winner gets a point → repeat until
/// every scheduled pair is decided. No IO, no threads, no rendering — bring
/// your own front end.
///
/// Items are bucketed into score tiers and only items in the same or
/// adjacent tiers are ever compared, which keeps the number of questions well
/// below the full n·(n−1)/2 for longer lists.
///
/// # Quick start
///
/// ```rust
/// use charsort_core::{EngineConfig, Progress, RankingEngine};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let ids = ["gon-freecss.jpg", "killua-zoldyck.jpg", "kurapika.jpg"];
/// let mut engine = RankingEngine::initialize(&ids, EngineConfig::default(), StdRng::seed_from_u64(1))?;
/// let handle = engine.handle();
///
/// loop {
///     let Some((a, b)) = engine.current_pair(handle)? else { break };
///     let (winner, loser) = (a.id.clone(), b.id.clone());
///     if engine.submit_preference(handle, &winner, &loser)? == Progress::Complete {
///         break;
///     }
/// }
///
/// for (rank, item) in engine.final_rankings(handle)?.iter().enumerate() {
///     println!("{}. {} ({})", rank + 1, item.display_name, item.score);
/// }
/// # Ok::<(), charsort_core::EngineError>(())
/// ```

pub mod constants;
pub mod display;
pub mod engine;
pub mod error;
pub mod pairing;
pub mod scoring;
pub mod tiering;
pub mod types;

// Re-export primary public API at crate root.
pub use display::{collect_item_ids, format_display_name, is_supported_image};
pub use engine::{EngineConfig, RankingEngine, Session};
pub use error::{EngineError, Result};
pub use pairing::{generate_comparisons, max_comparisons, select_next_pair, tiers_compatible};
pub use scoring::{compute_rankings, total_score};
pub use tiering::{compute_tiers, tier_size};
pub use types::{Item, Pair, Progress, SessionHandle};
