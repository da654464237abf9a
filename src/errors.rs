use schema::{ActorId, CollectionKind};
use thiserror::Error;

/// Main error type for the roster engine.
///
/// Only hard failures live here. Capacity, eligibility and unknown-destination
/// rejections during a move are reported as [`crate::roster::MoveOutcome`]
/// values instead, because the host treats them as handled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// Strict resolution found no unique trainer for the actor
    #[error("no trainer could be resolved for actor {0}")]
    NoTrainerResolvable(ActorId),
    /// The trainer has no root folder to hold its collections
    #[error("trainer {0} has no root folder")]
    NoRootFolder(ActorId),
    /// The actor is not present in the world snapshot
    #[error("unknown actor {0}")]
    UnknownActor(ActorId),
    /// The destination names a collection the store does not know
    #[error("unknown collection '{0}'")]
    UnknownCollection(String),
    /// A reorder or removal referenced a member that is not in the collection
    #[error("actor {0} is not in collection {1}")]
    NotInCollection(ActorId, CollectionKind),
    /// The document store failed while applying side effects
    #[error("document store error: {0}")]
    Store(#[from] StoreError),
}

/// Failures reported by the external document store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(String),
    #[error("update rejected: {0}")]
    Validation(String),
    #[error("document store unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while loading a [`crate::config::TrainingConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Type alias for Results using RosterError
pub type RosterResult<T> = Result<T, RosterError>;

/// Type alias for Results using StoreError
pub type StoreResult<T> = Result<T, StoreError>;
