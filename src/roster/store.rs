use crate::config::TrainingConfig;
use crate::errors::{RosterError, RosterResult};
use crate::trainer::Trainer;
use crate::world::{Actor, World};
use schema::{ActorId, CollectionKind, FolderId};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;
use tracing::{debug, warn};

pub const PARTY_FOLDER_NAME: &str = "Party";
pub const BOX_FOLDER_NAME: &str = "Box";

/// A pokemon as seen by the roster view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRef {
    pub id: ActorId,
    pub name: String,
    pub level: u32,
}

impl MemberRef {
    pub fn from_actor(actor: &Actor) -> Self {
        Self {
            id: actor.id.clone(),
            name: actor.name.clone(),
            level: actor.level.current,
        }
    }
}

/// The two folders a trainer's root folder creates on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FolderRole {
    Party,
    Box,
}

impl FolderRole {
    pub fn folder_name(self) -> &'static str {
        match self {
            FolderRole::Party => PARTY_FOLDER_NAME,
            FolderRole::Box => BOX_FOLDER_NAME,
        }
    }
}

/// Folders backing each persistent collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderMap {
    pub root: FolderId,
    pub party: Option<FolderId>,
    pub boxed: Option<FolderId>,
    custom: BTreeMap<String, FolderId>,
}

impl FolderMap {
    pub fn new(root: FolderId) -> Self {
        Self {
            root,
            party: None,
            boxed: None,
            custom: BTreeMap::new(),
        }
    }

    pub fn role(&self, role: FolderRole) -> Option<&FolderId> {
        match role {
            FolderRole::Party => self.party.as_ref(),
            FolderRole::Box => self.boxed.as_ref(),
        }
    }

    pub fn set_role(&mut self, role: FolderRole, folder: FolderId) {
        match role {
            FolderRole::Party => self.party = Some(folder),
            FolderRole::Box => self.boxed = Some(folder),
        }
    }

    pub fn custom(&self, slug: &str) -> Option<&FolderId> {
        self.custom.get(slug)
    }

    /// Folder a member of `kind` should live in. `None` for training and
    /// for party/box folders that do not exist yet.
    pub fn folder_for(&self, kind: &CollectionKind) -> Option<&FolderId> {
        match kind {
            CollectionKind::Available => Some(&self.root),
            CollectionKind::Party => self.party.as_ref(),
            CollectionKind::Boxed => self.boxed.as_ref(),
            CollectionKind::Custom(slug) => self.custom.get(slug),
            CollectionKind::Training => None,
        }
    }
}

/// A trainer-defined group discovered under the trainer's root folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomGroup {
    pub slug: String,
    pub name: String,
    pub members: Vec<MemberRef>,
}

/// Result of adding a member to the training selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Added,
    AlreadySelected,
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("actor {0} appears in more than one collection")]
    Duplicate(ActorId),
    #[error("party holds {len} members, capacity is {capacity}")]
    PartyOverCapacity { len: usize, capacity: usize },
    #[error("training selection holds {len} members, capacity is {capacity}")]
    TrainingOverCapacity { len: usize, capacity: usize },
}

/// Count and average level of one collection
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSummary {
    pub kind: CollectionKind,
    pub count: usize,
    pub average_level: Option<f64>,
}

/// In-memory view of one trainer's collections.
///
/// Persistent homes (available, party, boxed, custom groups) are disjoint.
/// The training selection is an overlay and may repeat members of any home.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionStore {
    trainer: ActorId,
    party_capacity: usize,
    training_capacity: usize,
    folders: FolderMap,
    available: Vec<MemberRef>,
    party: Vec<MemberRef>,
    boxed: Vec<MemberRef>,
    custom: Vec<CustomGroup>,
    training: Vec<MemberRef>,
}

impl CollectionStore {
    pub fn new(trainer: ActorId, folders: FolderMap, config: &TrainingConfig) -> Self {
        Self {
            trainer,
            party_capacity: config.party_capacity,
            training_capacity: config.instance_count,
            folders,
            available: Vec::new(),
            party: Vec::new(),
            boxed: Vec::new(),
            custom: Vec::new(),
            training: Vec::new(),
        }
    }

    /// Build the store for `trainer` from the folder layout and party tags in `world`.
    pub fn load(trainer: &Trainer, world: &World, config: &TrainingConfig) -> RosterResult<Self> {
        let root = trainer
            .folder
            .clone()
            .ok_or_else(|| RosterError::NoRootFolder(trainer.id.clone()))?;

        let mut folders = FolderMap::new(root.clone());
        folders.party = world
            .find_child_folder(&root, PARTY_FOLDER_NAME)
            .map(|folder| folder.id.clone());
        folders.boxed = world
            .find_child_folder(&root, BOX_FOLDER_NAME)
            .map(|folder| folder.id.clone());

        let mut store = Self::new(trainer.id.clone(), folders, config);

        let party_folder = store.folders.party.clone();
        let party: Vec<&Actor> = match &party_folder {
            Some(folder) => world.pokemon_in_folder(folder).collect(),
            None => world.bound_pokemon(&trainer.id, false).collect(),
        };
        for actor in party {
            store.absorb(CollectionKind::Party, actor);
        }

        let box_folder = store.folders.boxed.clone();
        let boxed: Vec<&Actor> = match &box_folder {
            Some(folder) => world.pokemon_in_folder(folder).collect(),
            None => world.bound_pokemon(&trainer.id, true).collect(),
        };
        for actor in boxed {
            store.absorb(CollectionKind::Boxed, actor);
        }

        let role_folders: Vec<FolderId> = [party_folder, box_folder].into_iter().flatten().collect();
        for folder in world.child_folders(&root) {
            if role_folders.contains(&folder.id) {
                continue;
            }
            let slug = group_slug(&folder.name);
            if store.folders.custom.contains_key(&slug) {
                warn!(folder = %folder.id, slug = %slug, "Duplicate group slug, folder skipped");
                continue;
            }
            store.folders.custom.insert(slug.clone(), folder.id.clone());
            store.custom.push(CustomGroup {
                slug: slug.clone(),
                name: folder.name.clone(),
                members: Vec::new(),
            });
            for actor in world.pokemon_in_folder(&folder.id) {
                store.absorb(CollectionKind::Custom(slug.clone()), actor);
            }
        }

        for actor in world.pokemon_in_folder(&root) {
            if actor.party.is_none() {
                store.absorb(CollectionKind::Available, actor);
            }
        }

        if store.party.len() > store.party_capacity {
            warn!(
                trainer = %trainer.id,
                party = store.party.len(),
                capacity = store.party_capacity,
                "Loaded party exceeds capacity"
            );
        }
        debug!(
            trainer = %trainer.id,
            available = store.available.len(),
            party = store.party.len(),
            boxed = store.boxed.len(),
            groups = store.custom.len(),
            "Loaded collection store"
        );

        Ok(store)
    }

    /// Place a freshly discovered actor unless an earlier collection claimed it
    fn absorb(&mut self, kind: CollectionKind, actor: &Actor) {
        if let Some(home) = self.home_of(&actor.id) {
            debug!(actor = %actor.id, home = %home, skipped = %kind, "Actor already placed");
            return;
        }
        if let Some(list) = self.list_mut(&kind) {
            list.push(MemberRef::from_actor(actor));
        }
    }

    pub fn trainer(&self) -> &ActorId {
        &self.trainer
    }

    pub fn folders(&self) -> &FolderMap {
        &self.folders
    }

    pub fn folders_mut(&mut self) -> &mut FolderMap {
        &mut self.folders
    }

    pub fn party_capacity(&self) -> usize {
        self.party_capacity
    }

    pub fn training_capacity(&self) -> usize {
        self.training_capacity
    }

    pub fn party_has_room(&self) -> bool {
        self.party.len() < self.party_capacity
    }

    pub fn training_has_room(&self) -> bool {
        self.training.len() < self.training_capacity
    }

    pub fn custom_groups(&self) -> &[CustomGroup] {
        &self.custom
    }

    /// Whether `kind` names a collection this store holds
    pub fn knows(&self, kind: &CollectionKind) -> bool {
        self.list(kind).is_some()
    }

    pub fn list(&self, kind: &CollectionKind) -> Option<&[MemberRef]> {
        match kind {
            CollectionKind::Available => Some(&self.available),
            CollectionKind::Party => Some(&self.party),
            CollectionKind::Boxed => Some(&self.boxed),
            CollectionKind::Training => Some(&self.training),
            CollectionKind::Custom(slug) => self
                .custom
                .iter()
                .find(|group| &group.slug == slug)
                .map(|group| group.members.as_slice()),
        }
    }

    fn list_mut(&mut self, kind: &CollectionKind) -> Option<&mut Vec<MemberRef>> {
        match kind {
            CollectionKind::Available => Some(&mut self.available),
            CollectionKind::Party => Some(&mut self.party),
            CollectionKind::Boxed => Some(&mut self.boxed),
            CollectionKind::Training => Some(&mut self.training),
            CollectionKind::Custom(slug) => self
                .custom
                .iter_mut()
                .find(|group| &group.slug == slug)
                .map(|group| &mut group.members),
        }
    }

    pub fn len(&self, kind: &CollectionKind) -> usize {
        self.list(kind).map_or(0, <[MemberRef]>::len)
    }

    pub fn contains(&self, kind: &CollectionKind, member: &ActorId) -> bool {
        self.list(kind)
            .is_some_and(|list| list.iter().any(|m| &m.id == member))
    }

    fn persistent_kinds(&self) -> Vec<CollectionKind> {
        let mut kinds = vec![
            CollectionKind::Available,
            CollectionKind::Party,
            CollectionKind::Boxed,
        ];
        kinds.extend(
            self.custom
                .iter()
                .map(|group| CollectionKind::Custom(group.slug.clone())),
        );
        kinds
    }

    /// The persistent collection currently holding `member`
    pub fn home_of(&self, member: &ActorId) -> Option<CollectionKind> {
        self.persistent_kinds()
            .into_iter()
            .find(|kind| self.contains(kind, member))
    }

    /// All members across persistent collections
    pub fn members(&self) -> impl Iterator<Item = &MemberRef> {
        self.available
            .iter()
            .chain(&self.party)
            .chain(&self.boxed)
            .chain(self.custom.iter().flat_map(|group| &group.members))
    }

    /// Relocate `member` into the persistent collection `to`.
    ///
    /// The member is removed from whichever persistent collection held it, so
    /// it ends in exactly one. When `from` is given the member must be in it.
    /// Party capacity is not enforced here; the assignment engine routes
    /// overflow to the box before calling this. Returns the vacated home.
    pub fn move_member(
        &mut self,
        member: MemberRef,
        from: Option<&CollectionKind>,
        to: &CollectionKind,
        target_index: Option<usize>,
    ) -> RosterResult<Option<CollectionKind>> {
        if !to.is_persistent() || !self.knows(to) {
            return Err(RosterError::UnknownCollection(to.to_string()));
        }
        if let Some(from) = from {
            if !self.contains(from, &member.id) {
                return Err(RosterError::NotInCollection(member.id.clone(), from.clone()));
            }
        }

        let vacated = self.home_of(&member.id);
        if let Some(home) = &vacated {
            if let Some(list) = self.list_mut(home) {
                list.retain(|m| m.id != member.id);
            }
        }

        let list = self
            .list_mut(to)
            .ok_or_else(|| RosterError::UnknownCollection(to.to_string()))?;
        match target_index {
            Some(index) => list.insert(index.min(list.len()), member),
            None => list.push(member),
        }
        Ok(vacated)
    }

    /// Move `member` to `index` within `kind` without changing its home
    pub fn reorder(
        &mut self,
        kind: &CollectionKind,
        member: &ActorId,
        index: usize,
    ) -> RosterResult<()> {
        let list = self
            .list_mut(kind)
            .ok_or_else(|| RosterError::UnknownCollection(kind.to_string()))?;
        let position = list
            .iter()
            .position(|m| &m.id == member)
            .ok_or_else(|| RosterError::NotInCollection(member.clone(), kind.clone()))?;
        let entry = list.remove(position);
        let index = index.min(list.len());
        list.insert(index, entry);
        Ok(())
    }

    /// Add to the training selection. Adding twice leaves the selection unchanged.
    pub fn select_for_training(&mut self, member: MemberRef) -> SelectOutcome {
        if self.training.iter().any(|m| m.id == member.id) {
            debug!(actor = %member.id, "Pokemon already selected for training");
            return SelectOutcome::AlreadySelected;
        }
        if !self.training_has_room() {
            return SelectOutcome::Full;
        }
        self.training.push(member);
        SelectOutcome::Added
    }

    /// Remove from the training selection; returns whether it was present
    pub fn deselect(&mut self, member: &ActorId) -> bool {
        let before = self.training.len();
        self.training.retain(|m| &m.id != member);
        before != self.training.len()
    }

    pub fn clear_training(&mut self) {
        self.training.clear();
    }

    pub fn training(&self) -> &[MemberRef] {
        &self.training
    }

    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let mut seen = HashSet::new();
        for member in self.members() {
            if !seen.insert(&member.id) {
                return Err(InvariantViolation::Duplicate(member.id.clone()));
            }
        }
        if self.party.len() > self.party_capacity {
            return Err(InvariantViolation::PartyOverCapacity {
                len: self.party.len(),
                capacity: self.party_capacity,
            });
        }
        if self.training.len() > self.training_capacity {
            return Err(InvariantViolation::TrainingOverCapacity {
                len: self.training.len(),
                capacity: self.training_capacity,
            });
        }
        Ok(())
    }

    /// Per-collection counts and average levels, training first
    pub fn summaries(&self) -> Vec<CollectionSummary> {
        let mut kinds = vec![CollectionKind::Training];
        kinds.extend(self.persistent_kinds());
        kinds
            .into_iter()
            .map(|kind| {
                let list = self.list(&kind).unwrap_or(&[]);
                let average_level = if list.is_empty() {
                    None
                } else {
                    let sum: u64 = list.iter().map(|m| u64::from(m.level)).sum();
                    Some(sum as f64 / list.len() as f64)
                };
                CollectionSummary {
                    count: list.len(),
                    average_level,
                    kind,
                }
            })
            .collect()
    }
}

/// Lowercase a display name into a collection slug, e.g. "Day Care" -> "day-care"
pub fn sluggify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Slug of a custom group folder. Names that collide with a built-in
/// collection get a `-group` suffix so they stay addressable.
pub fn group_slug(name: &str) -> String {
    let slug = sluggify(name);
    if CollectionKind::is_builtin_slug(&slug) {
        let renamed = format!("{}-group", slug);
        warn!(folder = name, slug = %renamed, "Group name shadows a built-in collection");
        renamed
    } else {
        slug
    }
}
