use crate::ActorId;
use serde::{Deserialize, Serialize};

/// Binding tag stored on a pokemon that belongs to a trainer.
/// Absent entirely for unbound (available) pokemon.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartyFlag {
    pub trainer: ActorId,
    pub boxed: bool,
}

impl PartyFlag {
    pub fn party(trainer: ActorId) -> Self {
        Self {
            trainer,
            boxed: false,
        }
    }

    pub fn boxed(trainer: ActorId) -> Self {
        Self {
            trainer,
            boxed: true,
        }
    }

    pub fn is_bound_to(&self, trainer: &ActorId) -> bool {
        &self.trainer == trainer
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    /// A player or NPC character that can act as a trainer
    Character,
    Pokemon,
}
