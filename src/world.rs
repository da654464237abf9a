//! Host snapshot passed explicitly into the roster engine.
//!
//! The host keeps actors, folders and users in global registries. The engine
//! never reaches into those; callers hand it a [`World`] instead, which keeps
//! every decision a pure function of its inputs.

use schema::{ActorId, ActorKind, FolderId, PartyFlag, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ownership level that lets a user act on an actor
pub const OWNER_LEVEL: u8 = 3;
/// Ownership key that applies to every user without an explicit entry
pub const DEFAULT_OWNERSHIP_KEY: &str = "default";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorLevel {
    pub current: u32,
    #[serde(default)]
    pub milestones: u32,
    #[serde(default)]
    pub exp: u32,
}

/// Per-pokemon training ceilings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingCaps {
    /// Highest level at which the pokemon may still train
    pub level: u32,
    /// Most experience a single training may grant
    pub amount: u32,
}

impl Default for TrainingCaps {
    fn default() -> Self {
        Self {
            level: u32::MAX,
            amount: u32::MAX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub kind: ActorKind,
    #[serde(default)]
    pub folder: Option<FolderId>,
    /// User id (or `default`) to ownership level
    #[serde(default)]
    pub ownership: BTreeMap<String, u8>,
    #[serde(default)]
    pub party: Option<PartyFlag>,
    #[serde(default)]
    pub level: ActorLevel,
    #[serde(default)]
    pub caps: TrainingCaps,
    /// Experience per training instance as computed by the trainer's own
    /// data preparation. `None` when that calculation is unavailable.
    #[serde(default)]
    pub exp_training_level_cap: Option<u32>,
    /// Effect documents attached to this actor
    #[serde(default)]
    pub effects: Vec<String>,
}

impl Actor {
    pub fn is_pokemon(&self) -> bool {
        self.kind == ActorKind::Pokemon
    }

    pub fn is_character(&self) -> bool {
        self.kind == ActorKind::Character
    }

    pub fn trainer_id(&self) -> Option<&ActorId> {
        self.party.as_ref().map(|flag| &flag.trainer)
    }

    pub fn is_bound_to(&self, trainer: &ActorId) -> bool {
        self.trainer_id() == Some(trainer)
    }

    /// A pokemon may only train while at or below its training level cap
    pub fn is_eligible_for_training(&self) -> bool {
        self.level.current <= self.caps.level
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    #[serde(default)]
    pub parent: Option<FolderId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub character: Option<ActorId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    #[serde(default)]
    pub actors: BTreeMap<ActorId, Actor>,
    #[serde(default)]
    pub folders: BTreeMap<FolderId, Folder>,
    #[serde(default)]
    pub users: BTreeMap<UserId, User>,
}

impl World {
    pub fn from_ron_str(content: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(content)
    }

    pub fn actor(&self, id: &ActorId) -> Option<&Actor> {
        self.actors.get(id)
    }

    pub fn actor_mut(&mut self, id: &ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(id)
    }

    pub fn folder(&self, id: &FolderId) -> Option<&Folder> {
        self.folders.get(id)
    }

    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    pub fn insert_actor(&mut self, actor: Actor) {
        self.actors.insert(actor.id.clone(), actor);
    }

    pub fn insert_folder(&mut self, folder: Folder) {
        self.folders.insert(folder.id.clone(), folder);
    }

    pub fn insert_user(&mut self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    /// The user's bound character, if it is actually a character actor
    pub fn character_of(&self, user: &UserId) -> Option<&Actor> {
        self.user(user)
            .and_then(|user| user.character.as_ref())
            .and_then(|id| self.actor(id))
            .filter(|actor| actor.is_character())
    }

    /// Pokemon whose folder is exactly `folder`
    pub fn pokemon_in_folder<'a>(
        &'a self,
        folder: &'a FolderId,
    ) -> impl Iterator<Item = &'a Actor> + 'a {
        self.actors
            .values()
            .filter(move |actor| actor.is_pokemon() && actor.folder.as_ref() == Some(folder))
    }

    /// Direct child folders of `parent`
    pub fn child_folders<'a>(
        &'a self,
        parent: &'a FolderId,
    ) -> impl Iterator<Item = &'a Folder> + 'a {
        self.folders
            .values()
            .filter(move |folder| folder.parent.as_ref() == Some(parent))
    }

    /// Child folder of `parent` with the given display name
    pub fn find_child_folder(&self, parent: &FolderId, name: &str) -> Option<&Folder> {
        self.folders
            .values()
            .find(|folder| folder.parent.as_ref() == Some(parent) && folder.name == name)
    }

    /// Pokemon bound to `trainer` with the given boxed state
    pub fn bound_pokemon<'a>(
        &'a self,
        trainer: &'a ActorId,
        boxed: bool,
    ) -> impl Iterator<Item = &'a Actor> + 'a {
        self.actors.values().filter(move |actor| {
            actor.is_pokemon()
                && actor
                    .party
                    .as_ref()
                    .is_some_and(|flag| flag.is_bound_to(trainer) && flag.boxed == boxed)
        })
    }
}
