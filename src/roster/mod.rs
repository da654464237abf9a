//! A trainer's collections and the rules for moving pokemon between them.

pub mod commands;
pub mod engine;
pub mod resolve;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod tests;

pub use commands::{FolderTarget, StoreCommand};
pub use engine::{
    AssignmentEngine, Decision, DragSource, IgnoreReason, MoveIntent, MoveOutcome, Rejection,
};
pub use resolve::{resolve_trainer, ResolveContext};
pub use session::RosterView;
pub use store::{
    sluggify, CollectionStore, CollectionSummary, CustomGroup, FolderMap, FolderRole,
    InvariantViolation, MemberRef, SelectOutcome,
};
