// Pokemon Training Schema - Shared type definitions
// This crate contains the identifiers, binding tags and enums that are shared
// between the roster engine and anything that persists or transmits roster state.

// Re-export the main types
pub use collections::*;
pub use ids::*;
pub use party::*;
pub use training_types::*;

pub mod collections;
pub mod ids;
pub mod party;
pub mod training_types;
