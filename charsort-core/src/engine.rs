/// Ranking engine orchestrator.
///
/// Pure computation — no IO, no threads. The caller shows the current pair,
/// the user picks a winner, and the caller feeds that choice back in.
///
/// Items are identified by caller-provided string IDs (usually image file
/// names). Internally the session works on 0..N indices and re-resolves
/// them through its own item list, so a score change is visible everywhere.
use rand::Rng;
use tracing::debug;

use crate::constants::TIER_COUNT;
use crate::error::{EngineError, Result};
use crate::pairing::{generate_comparisons_indexed, pair_matches, select_next_pair};
use crate::scoring::{compute_rankings, total_score};
use crate::tiering::{retier, tier_size};
use crate::types::{IdMap, IndexedPair, Item, Pair, Progress, SessionHandle};

/// Configuration for the ranking engine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// How many score buckets to cut the item set into. Must be ≥ 1.
    pub tier_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig { tier_count: TIER_COUNT }
    }
}

/// State of one ranking run.
#[derive(Debug, Clone)]
pub struct Session {
    id_map: IdMap,
    /// Items in insertion order.
    items: Vec<Item>,
    /// Items per tier, fixed for the session since the item count never changes.
    tier_size: usize,
    /// Comparisons not yet decided.
    pending: Vec<IndexedPair>,
    current: Option<IndexedPair>,
    total_comparisons: usize,
    submitted: usize,
}

impl Session {
    /// Build a fresh session: zero scores, initial tiers, full pending queue.
    fn new(id_map: IdMap, tier_size: usize, rng: &mut impl Rng) -> Self {
        let mut items: Vec<Item> = id_map.ids().iter().map(Item::new).collect();
        retier(&mut items, tier_size);

        let tiers: Vec<usize> = items.iter().map(|i| i.tier).collect();
        let pending = generate_comparisons_indexed(&tiers);
        let current = select_next_pair(pending.len(), rng).map(|i| pending[i]);

        Session {
            id_map,
            items,
            tier_size,
            total_comparisons: pending.len(),
            pending,
            current,
            submitted: 0,
        }
    }

    /// Apply one decided comparison. Indices must be the current pair.
    fn record(&mut self, winner: usize, loser: usize, rng: &mut impl Rng) {
        self.items[winner].score += 1;
        retier(&mut self.items, self.tier_size);

        // Only the decided combination leaves the queue; pairs that no longer
        // fit the new tier boundaries stay, and no new pairs are added.
        self.pending.retain(|&p| !pair_matches(p, winner, loser));
        self.submitted += 1;
        self.current = select_next_pair(self.pending.len(), rng).map(|i| self.pending[i]);
    }

    fn to_pair(&self, (a, b): IndexedPair) -> Pair {
        (self.items[a].id.clone(), self.items[b].id.clone())
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.id_map.to_idx(id).map(|idx| &self.items[idx])
    }

    pub fn current_pair(&self) -> Option<(&Item, &Item)> {
        self.current.map(|(a, b)| (&self.items[a], &self.items[b]))
    }

    /// Comparisons still waiting for a decision, as ID pairs.
    pub fn pending_pairs(&self) -> Vec<Pair> {
        self.pending.iter().map(|&p| self.to_pair(p)).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.current.is_none()
    }

    pub fn total_comparisons(&self) -> usize {
        self.total_comparisons
    }

    pub fn pending_comparisons(&self) -> usize {
        self.pending.len()
    }

    pub fn submitted_comparisons(&self) -> usize {
        self.submitted
    }
}

pub struct RankingEngine<R> {
    config: EngineConfig,
    rng: R,
    session: Session,
    /// Bumped on every reset; handles from older generations are stale.
    generation: u64,
}

impl<R: Rng> RankingEngine<R> {
    /// Start a session over `item_ids`, in the given order.
    ///
    /// A single item is accepted; the session is then complete immediately.
    pub fn initialize<S: AsRef<str>>(item_ids: &[S], config: EngineConfig, mut rng: R) -> Result<Self> {
        if item_ids.is_empty() {
            return Err(EngineError::EmptyItemSet);
        }
        let size = tier_size(item_ids.len(), config.tier_count)?;
        let id_map = IdMap::from_ids(item_ids)?;

        let session = Session::new(id_map, size, &mut rng);
        debug!(
            items = session.items.len(),
            tier_count = config.tier_count,
            tier_size = size,
            comparisons = session.total_comparisons,
            "session initialized"
        );

        Ok(RankingEngine { config, rng, session, generation: 0 })
    }

    /// Handle for the current session generation.
    pub fn handle(&self) -> SessionHandle {
        SessionHandle { generation: self.generation }
    }

    fn check(&self, handle: SessionHandle) -> Result<()> {
        if handle.generation != self.generation {
            return Err(EngineError::StaleSession);
        }
        Ok(())
    }

    /// The pair awaiting a decision, or `None` once every comparison is done.
    pub fn current_pair(&self, handle: SessionHandle) -> Result<Option<(&Item, &Item)>> {
        self.check(handle)?;
        Ok(self.session.current_pair())
    }

    /// Record that `winner_id` was preferred over `loser_id`.
    ///
    /// The two IDs must be the current pair, in either order. On any error
    /// the session is left exactly as it was.
    pub fn submit_preference(&mut self, handle: SessionHandle, winner_id: &str, loser_id: &str) -> Result<Progress> {
        self.check(handle)?;
        let Some(current) = self.session.current else {
            return Err(EngineError::StaleSession);
        };

        let invalid = || EngineError::InvalidPair {
            winner: winner_id.to_string(),
            loser: loser_id.to_string(),
        };
        let winner = self.session.id_map.to_idx(winner_id).ok_or_else(invalid)?;
        let loser = self.session.id_map.to_idx(loser_id).ok_or_else(invalid)?;
        if winner == loser || !pair_matches(current, winner, loser) {
            return Err(invalid());
        }

        self.session.record(winner, loser, &mut self.rng);
        debug!(
            winner = winner_id,
            loser = loser_id,
            score = self.session.items[winner].score,
            pending = self.session.pending.len(),
            "preference recorded"
        );

        match self.session.current {
            Some(next) => Ok(Progress::Next(self.session.to_pair(next))),
            None => {
                debug!(submitted = self.session.submitted, "all comparisons done");
                Ok(Progress::Complete)
            }
        }
    }

    /// Items by score descending, ties in insertion order.
    ///
    /// Valid at any point; before completion it is a live leaderboard.
    pub fn final_rankings(&self, handle: SessionHandle) -> Result<Vec<&Item>> {
        self.check(handle)?;
        Ok(compute_rankings(&self.session.items))
    }

    /// Discard all progress and start over with the same items and config.
    ///
    /// The new session is built before it replaces the old one. Every
    /// previously issued handle becomes stale.
    pub fn reset(&mut self) -> SessionHandle {
        let session = Session::new(self.session.id_map.clone(), self.session.tier_size, &mut self.rng);
        self.session = session;
        self.generation += 1;
        debug!(
            generation = self.generation,
            comparisons = self.session.total_comparisons,
            "session reset"
        );
        self.handle()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }

    /// Sum of all scores; always equals `submitted_comparisons()`.
    pub fn total_score(&self) -> u64 {
        total_score(&self.session.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};
    use std::collections::HashSet;

    /// Always draws zero, so the first pending pair is always selected.
    struct FirstPairRng;

    impl RngCore for FirstPairRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    const CHARACTERS: [&str; 8] = [
        "neferpitou.jpg",
        "illumi-zoldyck.png",
        "hanzo.png",
        "machi.jpg",
        "gon-freecss.jpg",
        "ging-freecss.jpg",
        "hisoka.jpg",
        "chrollo-lucilfer.jpg",
    ];

    fn pair(a: &str, b: &str) -> Pair {
        (a.to_string(), b.to_string())
    }

    fn ids_of(items: &[&Item]) -> Vec<String> {
        items.iter().map(|i| i.id.clone()).collect()
    }

    /// Play a session to completion, always preferring the first shown item.
    fn play_out<R: Rng>(engine: &mut RankingEngine<R>) -> Vec<Pair> {
        let handle = engine.handle();
        let mut shown = Vec::new();
        loop {
            let Some((a, b)) = engine.current_pair(handle).unwrap() else { break };
            let (a, b) = (a.id.clone(), b.id.clone());
            shown.push((a.clone(), b.clone()));
            engine.submit_preference(handle, &a, &b).unwrap();
        }
        shown
    }

    #[test]
    fn test_four_item_scenario() {
        let mut engine = RankingEngine::initialize(&["A", "B", "C", "D"], EngineConfig::default(), FirstPairRng).unwrap();
        let handle = engine.handle();

        let tiers: Vec<usize> = engine.session().items().iter().map(|i| i.tier).collect();
        assert_eq!(tiers, vec![0, 1, 2, 3]);
        assert_eq!(engine.session().pending_pairs(), vec![pair("A", "B"), pair("B", "C"), pair("C", "D")]);

        let progress = engine.submit_preference(handle, "A", "B").unwrap();
        assert_eq!(progress, Progress::Next(pair("B", "C")));

        let session = engine.session();
        assert_eq!(session.item("A").unwrap().score, 1);
        let tiers: Vec<usize> = session.items().iter().map(|i| i.tier).collect();
        assert_eq!(tiers, vec![0, 1, 2, 3]);
        assert_eq!(session.pending_pairs(), vec![pair("B", "C"), pair("C", "D")]);
    }

    #[test]
    fn test_retiering_does_not_regenerate_queue() {
        let mut engine = RankingEngine::initialize(&["A", "B", "C", "D"], EngineConfig::default(), FirstPairRng).unwrap();
        let handle = engine.handle();
        engine.submit_preference(handle, "A", "B").unwrap();
        engine.submit_preference(handle, "C", "B").unwrap();

        // Scores A=1, B=0, C=1, D=0 → order A, C, B, D.
        let session = engine.session();
        let tiers: Vec<usize> = session.items().iter().map(|i| i.tier).collect();
        assert_eq!(tiers, vec![0, 2, 1, 3]);

        // (C, D) now spans two tiers but stays; (A, C) is adjacent but never added.
        assert_eq!(session.pending_pairs(), vec![pair("C", "D")]);
        assert_eq!(session.total_comparisons(), 3);
    }

    #[test]
    fn test_tiers_match_compute_tiers_after_every_submission() {
        let config = EngineConfig { tier_count: 3 };
        let mut engine = RankingEngine::initialize(&CHARACTERS, config.clone(), StdRng::seed_from_u64(21)).unwrap();
        let handle = engine.handle();

        loop {
            let mut expected = engine.session().items().to_vec();
            crate::tiering::compute_tiers(&mut expected, config.tier_count).unwrap();
            assert_eq!(engine.session().items(), expected.as_slice());

            let Some((a, b)) = engine.current_pair(handle).unwrap() else { break };
            let (a, b) = (a.id.clone(), b.id.clone());
            engine.submit_preference(handle, &b, &a).unwrap();
        }
    }

    #[test]
    fn test_two_items_complete_after_one_submission() {
        let mut engine = RankingEngine::initialize(&["kite", "ging"], EngineConfig::default(), StdRng::seed_from_u64(1)).unwrap();
        let handle = engine.handle();
        assert_eq!(engine.session().total_comparisons(), 1);

        let (a, b) = engine.current_pair(handle).unwrap().unwrap();
        let (a, b) = (a.id.clone(), b.id.clone());
        assert_eq!(engine.submit_preference(handle, &b, &a).unwrap(), Progress::Complete);
        assert!(engine.is_complete());
        assert!(engine.current_pair(handle).unwrap().is_none());
        assert_eq!(ids_of(&engine.final_rankings(handle).unwrap()), vec![b, a]);
    }

    #[test]
    fn test_single_item_is_complete_immediately() {
        let engine = RankingEngine::initialize(&["meruem.jpg"], EngineConfig::default(), FirstPairRng).unwrap();
        assert!(engine.is_complete());
        assert_eq!(engine.session().total_comparisons(), 0);
        assert_eq!(engine.final_rankings(engine.handle()).unwrap().len(), 1);
    }

    #[test]
    fn test_initialize_errors() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            RankingEngine::initialize(&empty, EngineConfig::default(), FirstPairRng),
            Err(EngineError::EmptyItemSet)
        ));
        assert!(matches!(
            RankingEngine::initialize(&["a", "b"], EngineConfig { tier_count: 0 }, FirstPairRng),
            Err(EngineError::InvalidTierCount)
        ));
        assert!(matches!(
            RankingEngine::initialize(&["a", "b", "a"], EngineConfig::default(), FirstPairRng),
            Err(EngineError::DuplicateItem(id)) if id == "a"
        ));
    }

    #[test]
    fn test_invalid_pair_leaves_state_untouched() {
        let mut engine = RankingEngine::initialize(&["A", "B", "C", "D"], EngineConfig::default(), FirstPairRng).unwrap();
        let handle = engine.handle();

        for (winner, loser) in [("B", "C"), ("A", "A"), ("A", "Z"), ("Z", "B"), ("C", "D")] {
            let err = engine.submit_preference(handle, winner, loser).unwrap_err();
            assert!(matches!(err, EngineError::InvalidPair { .. }), "{winner} vs {loser}: {err:?}");
        }

        assert_eq!(engine.total_score(), 0);
        assert_eq!(engine.session().pending_comparisons(), 3);
        let (a, b) = engine.current_pair(handle).unwrap().unwrap();
        assert_eq!((a.id.as_str(), b.id.as_str()), ("A", "B"));
    }

    #[test]
    fn test_winner_may_be_either_member() {
        let mut engine = RankingEngine::initialize(&["A", "B"], EngineConfig::default(), FirstPairRng).unwrap();
        let handle = engine.handle();
        engine.submit_preference(handle, "B", "A").unwrap();
        assert_eq!(engine.session().item("B").unwrap().score, 1);
        assert_eq!(engine.session().item("A").unwrap().score, 0);
    }

    #[test]
    fn test_submit_after_completion_is_rejected() {
        let mut engine = RankingEngine::initialize(&["A", "B"], EngineConfig::default(), FirstPairRng).unwrap();
        let handle = engine.handle();
        engine.submit_preference(handle, "A", "B").unwrap();

        // A late duplicate click must not touch the finished session.
        assert_eq!(engine.submit_preference(handle, "A", "B"), Err(EngineError::StaleSession));
        assert_eq!(engine.total_score(), 1);
    }

    #[test]
    fn test_reset_invalidates_old_handle() {
        let mut engine = RankingEngine::initialize(&CHARACTERS, EngineConfig::default(), StdRng::seed_from_u64(3)).unwrap();
        let old = engine.handle();
        let new = engine.reset();

        assert_ne!(old, new);
        assert!(matches!(engine.current_pair(old), Err(EngineError::StaleSession)));
        assert!(matches!(engine.final_rankings(old), Err(EngineError::StaleSession)));
        assert!(matches!(engine.submit_preference(old, "hanzo.png", "machi.jpg"), Err(EngineError::StaleSession)));
        assert!(engine.current_pair(new).unwrap().is_some());
    }

    #[test]
    fn test_reset_restores_insertion_order() {
        let mut engine = RankingEngine::initialize(&CHARACTERS, EngineConfig::default(), StdRng::seed_from_u64(9)).unwrap();
        play_out(&mut engine);
        assert!(engine.total_score() > 0);

        let handle = engine.reset();
        let rankings = engine.final_rankings(handle).unwrap();
        assert_eq!(ids_of(&rankings), CHARACTERS.iter().map(|s| s.to_string()).collect::<Vec<_>>());
        assert!(rankings.iter().all(|i| i.score == 0));
        assert_eq!(engine.session().submitted_comparisons(), 0);
        assert_eq!(engine.session().pending_comparisons(), engine.session().total_comparisons());
    }

    #[test]
    fn test_score_sum_matches_submissions() {
        for seed in 0..50 {
            let mut engine = RankingEngine::initialize(&CHARACTERS, EngineConfig::default(), StdRng::seed_from_u64(seed)).unwrap();
            let total = engine.session().total_comparisons();
            let shown = play_out(&mut engine);

            assert!(engine.is_complete());
            assert_eq!(shown.len(), total);
            assert_eq!(engine.total_score(), total as u64);
            assert_eq!(engine.session().submitted_comparisons(), total);
        }
    }

    #[test]
    fn test_pairs_are_valid_and_never_repeat() {
        let known: HashSet<&str> = CHARACTERS.iter().copied().collect();
        for seed in 0..50 {
            let mut engine = RankingEngine::initialize(&CHARACTERS, EngineConfig::default(), StdRng::seed_from_u64(seed)).unwrap();
            let mut resolved: HashSet<(String, String)> = HashSet::new();
            for (a, b) in play_out(&mut engine) {
                assert_ne!(a, b);
                assert!(known.contains(a.as_str()) && known.contains(b.as_str()));
                let key = if a < b { (a, b) } else { (b, a) };
                assert!(resolved.insert(key), "pair shown twice with seed {seed}");
            }
        }
    }

    #[test]
    fn test_final_rankings_idempotent() {
        let mut engine = RankingEngine::initialize(&CHARACTERS, EngineConfig::default(), StdRng::seed_from_u64(5)).unwrap();
        let handle = engine.handle();
        let (a, b) = engine.current_pair(handle).unwrap().unwrap();
        let (a, b) = (a.id.clone(), b.id.clone());
        engine.submit_preference(handle, &a, &b).unwrap();

        let first = ids_of(&engine.final_rankings(handle).unwrap());
        let second = ids_of(&engine.final_rankings(handle).unwrap());
        assert_eq!(first, second);
        assert_eq!(first[0], a);
    }

    #[test]
    fn test_same_seed_same_schedule() {
        let run = |seed| {
            let mut engine = RankingEngine::initialize(&CHARACTERS, EngineConfig::default(), StdRng::seed_from_u64(seed)).unwrap();
            play_out(&mut engine)
        };
        assert_eq!(run(11), run(11));
    }

    #[test]
    fn test_tier_count_bounds_schedule() {
        let ids: Vec<String> = (0..20).map(|i| format!("item-{i}.png")).collect();
        let full = RankingEngine::initialize(&ids, EngineConfig { tier_count: 1 }, FirstPairRng).unwrap();
        let tiered = RankingEngine::initialize(&ids, EngineConfig::default(), FirstPairRng).unwrap();

        assert_eq!(full.session().total_comparisons(), 20 * 19 / 2);
        // 5 tiers of 4: 5·C(4,2) within tiers + 4·16 across adjacent tiers.
        assert_eq!(tiered.session().total_comparisons(), 30 + 64);
    }
}
