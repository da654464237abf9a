use crate::world::Actor;
use schema::{ActorId, FolderId};
use std::fmt;
use tracing::warn;

/// Where the per-instance experience amount came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapSource {
    /// The trainer's own prepared training data
    Dedicated,
    /// The level/milestone formula used when prepared data is unavailable.
    /// Treated as a degraded outcome and surfaced to callers.
    Fallback,
}

/// Experience granted per training instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpAllowance {
    pub per_instance: u32,
    pub source: CapSource,
}

impl ExpAllowance {
    pub fn is_degraded(&self) -> bool {
        self.source == CapSource::Fallback
    }
}

/// A resolved trainer. Owns exactly one collection store per roster view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trainer {
    pub id: ActorId,
    pub name: String,
    pub level: u32,
    pub milestones: u32,
    pub folder: Option<FolderId>,
    exp_training_level_cap: Option<u32>,
}

impl Trainer {
    pub fn from_actor(actor: &Actor) -> Self {
        Self {
            id: actor.id.clone(),
            name: actor.name.clone(),
            level: actor.level.current,
            milestones: actor.level.milestones,
            folder: actor.folder.clone(),
            exp_training_level_cap: actor.exp_training_level_cap,
        }
    }

    /// Experience per training instance.
    /// Formula: level × (2 + 2 × milestones)
    pub fn exp_allowance(&self) -> ExpAllowance {
        match self.exp_training_level_cap {
            Some(per_instance) => ExpAllowance {
                per_instance,
                source: CapSource::Dedicated,
            },
            None => {
                let per_instance = fallback_exp_per_instance(self.level, self.milestones);
                warn!(
                    trainer = %self.id,
                    level = self.level,
                    milestones = self.milestones,
                    per_instance,
                    "Trainer training data unavailable, using fallback formula"
                );
                ExpAllowance {
                    per_instance,
                    source: CapSource::Fallback,
                }
            }
        }
    }
}

impl fmt::Display for Trainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Lv. {})", self.name, self.level)
    }
}

fn fallback_exp_per_instance(level: u32, milestones: u32) -> u32 {
    level
        .max(1)
        .saturating_mul(2u32.saturating_add(milestones.saturating_mul(2)))
}
