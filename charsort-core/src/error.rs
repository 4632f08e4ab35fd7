use thiserror::Error;

/// Errors returned by the ranking engine.
///
/// Every variant is raised before any state is touched, so the caller can
/// simply re-query the engine and carry on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("cannot rank an empty item set")]
    EmptyItemSet,

    #[error("duplicate item id: {0}")]
    DuplicateItem(String),

    #[error("tier count must be at least 1")]
    InvalidTierCount,

    /// The submitted ids are not the two members of the current pair.
    #[error("{winner} vs {loser} is not the current pair")]
    InvalidPair { winner: String, loser: String },

    /// The handle predates the last reset, or the session already completed.
    #[error("session is stale: it was reset or has already completed")]
    StaleSession,
}

pub type Result<T> = std::result::Result<T, EngineError>;
