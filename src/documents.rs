//! Contract with the external document store, plus an in-memory store over a
//! [`World`] used by the MCP server and the tests.

use crate::errors::{StoreError, StoreResult};
use crate::roster::commands::{FolderTarget, StoreCommand};
use crate::roster::store::FolderMap;
use crate::world::{Folder, World};
use async_trait::async_trait;
use schema::{ActorId, FolderId, PartyFlag};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Asynchronous document operations the engine depends on.
/// Every call may fail; callers decide whether a failure is fatal.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create_folder(&self, name: &str, parent: &FolderId) -> StoreResult<FolderId>;
    async fn relocate(&self, actor: &ActorId, folder: &FolderId) -> StoreResult<()>;
    async fn set_party_flag(&self, actor: &ActorId, flag: &PartyFlag) -> StoreResult<()>;
    async fn unset_party_flag(&self, actor: &ActorId) -> StoreResult<()>;
    async fn update_experience(&self, actor: &ActorId, total: u32) -> StoreResult<()>;
    async fn attach_effect(&self, actor: &ActorId, effect: &str) -> StoreResult<()>;
}

/// Apply one command. Folders created by `CreateFolder` are recorded in
/// `folders` so later `FolderTarget::Role` relocations can find them.
pub async fn apply_command(
    docs: &dyn DocumentStore,
    command: &StoreCommand,
    folders: Option<&mut FolderMap>,
) -> StoreResult<()> {
    match command {
        StoreCommand::CreateFolder { role, parent } => {
            let folders = folders.ok_or_else(|| {
                StoreError::Validation(format!("no folder map for {} folder", role.folder_name()))
            })?;
            if folders.role(*role).is_some() {
                return Ok(());
            }
            let id = docs.create_folder(role.folder_name(), parent).await?;
            info!(folder = %id, parent = %parent, name = role.folder_name(), "Created folder");
            folders.set_role(*role, id);
        }
        StoreCommand::Relocate { actor, folder } => {
            let folder = match folder {
                FolderTarget::Existing(id) => id.clone(),
                FolderTarget::Role(role) => folders
                    .and_then(|folders| folders.role(*role).cloned())
                    .ok_or_else(|| {
                        StoreError::NotFound(format!("{} folder", role.folder_name()))
                    })?,
            };
            docs.relocate(actor, &folder).await?;
            debug!(actor = %actor, folder = %folder, "Relocated actor");
        }
        StoreCommand::SetPartyFlag { actor, flag } => docs.set_party_flag(actor, flag).await?,
        StoreCommand::UnsetPartyFlag { actor } => docs.unset_party_flag(actor).await?,
        StoreCommand::UpdateExperience { actor, total } => {
            docs.update_experience(actor, *total).await?
        }
        StoreCommand::AttachEffect { actor, effect } => docs.attach_effect(actor, effect).await?,
    }
    Ok(())
}

/// Apply commands in order, stopping at the first failure
pub async fn apply_commands(
    docs: &dyn DocumentStore,
    commands: &[StoreCommand],
    folders: &mut FolderMap,
) -> StoreResult<()> {
    for command in commands {
        apply_command(docs, command, Some(&mut *folders)).await?;
    }
    Ok(())
}

/// Document store backed by an in-memory [`World`]
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    world: RwLock<World>,
    next_folder: AtomicU64,
    failing: RwLock<HashSet<ActorId>>,
}

impl InMemoryDocumentStore {
    pub fn new(world: World) -> Self {
        Self {
            world: RwLock::new(world),
            next_folder: AtomicU64::new(1),
            failing: RwLock::new(HashSet::new()),
        }
    }

    /// Copy of the current world
    pub async fn snapshot(&self) -> World {
        self.world.read().await.clone()
    }

    /// Make every update to `actor` fail, as a host validation error would
    pub async fn reject_updates_for(&self, actor: ActorId) {
        self.failing.write().await.insert(actor);
    }

    async fn with_actor<F>(&self, actor: &ActorId, update: F) -> StoreResult<()>
    where
        F: FnOnce(&mut crate::world::Actor) + Send,
    {
        if self.failing.read().await.contains(actor) {
            return Err(StoreError::Validation(format!("update of {} rejected", actor)));
        }
        let mut world = self.world.write().await;
        let entry = world
            .actor_mut(actor)
            .ok_or_else(|| StoreError::NotFound(actor.to_string()))?;
        update(entry);
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create_folder(&self, name: &str, parent: &FolderId) -> StoreResult<FolderId> {
        let mut world = self.world.write().await;
        if world.folder(parent).is_none() {
            return Err(StoreError::NotFound(parent.to_string()));
        }
        let n = self.next_folder.fetch_add(1, Ordering::Relaxed);
        let id = FolderId::new(format!("{}-{}-{}", parent, name.to_lowercase(), n));
        world.insert_folder(Folder {
            id: id.clone(),
            name: name.to_string(),
            parent: Some(parent.clone()),
        });
        Ok(id)
    }

    async fn relocate(&self, actor: &ActorId, folder: &FolderId) -> StoreResult<()> {
        if self.world.read().await.folder(folder).is_none() {
            return Err(StoreError::NotFound(folder.to_string()));
        }
        let folder = folder.clone();
        self.with_actor(actor, move |entry| entry.folder = Some(folder))
            .await
    }

    async fn set_party_flag(&self, actor: &ActorId, flag: &PartyFlag) -> StoreResult<()> {
        let flag = flag.clone();
        self.with_actor(actor, move |entry| entry.party = Some(flag))
            .await
    }

    async fn unset_party_flag(&self, actor: &ActorId) -> StoreResult<()> {
        self.with_actor(actor, |entry| entry.party = None).await
    }

    async fn update_experience(&self, actor: &ActorId, total: u32) -> StoreResult<()> {
        self.with_actor(actor, move |entry| entry.level.exp = total)
            .await
    }

    async fn attach_effect(&self, actor: &ActorId, effect: &str) -> StoreResult<()> {
        let effect = effect.to_string();
        self.with_actor(actor, move |entry| entry.effects.push(effect))
            .await
    }
}
