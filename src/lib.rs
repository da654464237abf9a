//! Pokemon Training Roster Engine
//!
//! Decides which collection a trainer's pokemon belong to (available, party,
//! box, custom groups), validates moves between them, and plans and applies
//! the experience of a daily training cycle. Persistence and rendering are
//! delegated to the [`documents::DocumentStore`] and
//! [`presentation::Presenter`] collaborators.

// --- MODULE DECLARATIONS ---
pub mod config;
pub mod documents;
pub mod errors;
pub mod mcp_interface;
pub mod presentation;
pub mod roster;
pub mod trainer;
pub mod training;
pub mod world;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{ActorId, ActorKind, CollectionKind, FolderId, PartyFlag, TrainingType, UserId};

// --- From this crate's modules (`src/`) ---

// Roster view, engine and store.
pub use roster::{
    resolve_trainer, AssignmentEngine, CollectionStore, Decision, MoveIntent, MoveOutcome,
    ResolveContext, RosterView, StoreCommand,
};

// Training cycle.
pub use training::{complete_training, ExperiencePlan, TrainingReport, TrainingSubmission};

// Collaborators and configuration.
pub use config::{TrainingCatalog, TrainingConfig};
pub use documents::{DocumentStore, InMemoryDocumentStore};
pub use presentation::{LogPresenter, Notice, Presenter, Severity};
pub use trainer::{CapSource, ExpAllowance, Trainer};
pub use world::{Actor, World};

// Crate-specific error and result types.
pub use errors::{ConfigError, RosterError, RosterResult, StoreError, StoreResult};
