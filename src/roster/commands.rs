use crate::roster::store::FolderRole;
use schema::{ActorId, FolderId, PartyFlag};

/// Destination folder of a relocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderTarget {
    Existing(FolderId),
    /// The party or box folder, created earlier in the same command list
    Role(FolderRole),
}

/// Side effects for the external document store, applied in order.
/// Produced by the assignment engine and the training processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCommand {
    CreateFolder {
        role: FolderRole,
        parent: FolderId,
    },
    Relocate {
        actor: ActorId,
        folder: FolderTarget,
    },
    SetPartyFlag {
        actor: ActorId,
        flag: PartyFlag,
    },
    UnsetPartyFlag {
        actor: ActorId,
    },
    UpdateExperience {
        actor: ActorId,
        total: u32,
    },
    AttachEffect {
        actor: ActorId,
        effect: String,
    },
}

impl StoreCommand {
    /// The actor this command touches, if any
    pub fn actor(&self) -> Option<&ActorId> {
        match self {
            StoreCommand::CreateFolder { .. } => None,
            StoreCommand::Relocate { actor, .. }
            | StoreCommand::SetPartyFlag { actor, .. }
            | StoreCommand::UnsetPartyFlag { actor }
            | StoreCommand::UpdateExperience { actor, .. }
            | StoreCommand::AttachEffect { actor, .. } => Some(actor),
        }
    }
}
