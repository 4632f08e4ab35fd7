use std::collections::HashMap;

use crate::display::format_display_name;
use crate::error::{EngineError, Result};

/// One character being ranked.
///
/// Only the engine mutates `score` and `tier`; callers see items through
/// shared references.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Caller-provided identifier, usually the image file name.
    pub id: String,
    /// Human-readable name derived from `id`.
    pub display_name: String,
    /// Number of comparisons this item has won.
    pub score: u32,
    /// Coarse rank bucket, 0 = best.
    pub tier: usize,
}

impl Item {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let display_name = format_display_name(&id);
        Item { id, display_name, score: 0, tier: 0 }
    }
}

/// A pairing: two item IDs to be compared. Order is presentation order only.
pub type Pair = (String, String);

/// Outcome of a submitted preference.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Progress {
    /// The pair now awaiting a decision.
    Next(Pair),
    /// No pending comparisons remain.
    Complete,
}

/// Token identifying one session generation of a `RankingEngine`.
///
/// `reset()` bumps the generation, invalidating every handle issued before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionHandle {
    pub(crate) generation: u64,
}

/// Internal indexed pair (usize indices into the session's item list, `.0 < .1`).
pub(crate) type IndexedPair = (usize, usize);

/// Maps between caller-provided string IDs and internal 0..N indices.
#[derive(Debug, Clone)]
pub(crate) struct IdMap {
    ids: Vec<String>,
    id_to_idx: HashMap<String, usize>,
}

impl IdMap {
    pub fn from_ids<S: AsRef<str>>(ids: &[S]) -> Result<Self> {
        let mut id_to_idx = HashMap::with_capacity(ids.len());
        for (idx, id) in ids.iter().enumerate() {
            let id = id.as_ref();
            if id_to_idx.insert(id.to_string(), idx).is_some() {
                return Err(EngineError::DuplicateItem(id.to_string()));
            }
        }
        Ok(IdMap {
            ids: ids.iter().map(|s| s.as_ref().to_string()).collect(),
            id_to_idx,
        })
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn to_idx(&self, id: &str) -> Option<usize> {
        self.id_to_idx.get(id).copied()
    }
}
