use crate::config::TrainingConfig;
use crate::roster::store::{sluggify, CollectionStore, BOX_FOLDER_NAME, PARTY_FOLDER_NAME};
use crate::trainer::Trainer;
use crate::world::{Actor, ActorLevel, Folder, TrainingCaps, User, World};
use schema::{ActorId, ActorKind, FolderId, PartyFlag, UserId};

/// A builder for small test worlds with predictable folder ids.
///
/// Trainers get a root folder `"{trainer}-root"`. Party, box and custom
/// group folders live under it as `"{trainer}-party"`, `"{trainer}-box"`
/// and `"{trainer}-{slug}"`.
///
/// # Example
/// ```ignore
/// let world = TestWorldBuilder::new()
///     .trainer("ash", "Ash")
///     .party_folder("ash")
///     .party_pokemon("pikachu", "Pikachu", "ash", 20)
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct TestWorldBuilder {
    world: World,
}

impl TestWorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A level 10 character with its own root folder
    pub fn trainer(mut self, id: &str, name: &str) -> Self {
        let root = root_folder(id);
        self.world.insert_folder(Folder {
            id: root.clone(),
            name: name.to_string(),
            parent: None,
        });
        self.world.insert_actor(actor(id, name, ActorKind::Character, Some(root), 10));
        self
    }

    pub fn trainer_without_folder(mut self, id: &str, name: &str) -> Self {
        self.world.insert_actor(actor(id, name, ActorKind::Character, None, 10));
        self
    }

    pub fn user(mut self, id: &str, character: Option<&str>) -> Self {
        self.world.insert_user(User {
            id: UserId::from(id),
            character: character.map(ActorId::from),
        });
        self
    }

    pub fn party_folder(self, trainer: &str) -> Self {
        self.child_folder(trainer, &format!("{}-party", trainer), PARTY_FOLDER_NAME)
    }

    pub fn box_folder(self, trainer: &str) -> Self {
        self.child_folder(trainer, &format!("{}-box", trainer), BOX_FOLDER_NAME)
    }

    pub fn custom_folder(self, trainer: &str, name: &str) -> Self {
        let id = custom_folder_id(trainer, name);
        self.child_folder(trainer, &id, name)
    }

    fn child_folder(mut self, trainer: &str, id: &str, name: &str) -> Self {
        self.world.insert_folder(Folder {
            id: FolderId::from(id),
            name: name.to_string(),
            parent: Some(root_folder(trainer)),
        });
        self
    }

    pub fn party_pokemon(self, id: &str, name: &str, trainer: &str, level: u32) -> Self {
        let folder = FolderId::new(format!("{}-party", trainer));
        self.pokemon(id, name, Some(folder), Some(PartyFlag::party(trainer.into())), level)
    }

    pub fn boxed_pokemon(self, id: &str, name: &str, trainer: &str, level: u32) -> Self {
        let folder = FolderId::new(format!("{}-box", trainer));
        self.pokemon(id, name, Some(folder), Some(PartyFlag::boxed(trainer.into())), level)
    }

    pub fn custom_pokemon(
        self,
        id: &str,
        name: &str,
        trainer: &str,
        group: &str,
        level: u32,
    ) -> Self {
        let folder = FolderId::new(custom_folder_id(trainer, group));
        self.pokemon(id, name, Some(folder), Some(PartyFlag::boxed(trainer.into())), level)
    }

    /// An unbound pokemon sitting in the trainer's root folder
    pub fn available_pokemon(self, id: &str, name: &str, trainer: &str, level: u32) -> Self {
        self.pokemon(id, name, Some(root_folder(trainer)), None, level)
    }

    /// An unbound pokemon in an arbitrary folder (or none)
    pub fn loose_pokemon(self, id: &str, name: &str, folder: Option<&str>, level: u32) -> Self {
        self.pokemon(id, name, folder.map(FolderId::from), None, level)
    }

    fn pokemon(
        mut self,
        id: &str,
        name: &str,
        folder: Option<FolderId>,
        party: Option<PartyFlag>,
        level: u32,
    ) -> Self {
        let mut pokemon = actor(id, name, ActorKind::Pokemon, folder, level);
        pokemon.party = party;
        self.world.insert_actor(pokemon);
        self
    }

    pub fn owned_by(self, actor: &str, user: &str, level: u8) -> Self {
        self.update(actor, |a| {
            a.ownership.insert(user.to_string(), level);
        })
    }

    pub fn with_caps(self, actor: &str, level_cap: u32, amount_cap: u32) -> Self {
        self.update(actor, |a| {
            a.caps = TrainingCaps {
                level: level_cap,
                amount: amount_cap,
            }
        })
    }

    pub fn with_exp(self, actor: &str, exp: u32) -> Self {
        self.update(actor, |a| a.level.exp = exp)
    }

    /// Give a trainer prepared per-instance training experience
    pub fn with_training_exp(self, trainer: &str, per_instance: u32) -> Self {
        self.update(trainer, |a| a.exp_training_level_cap = Some(per_instance))
    }

    fn update(mut self, id: &str, change: impl FnOnce(&mut Actor)) -> Self {
        match self.world.actor_mut(&ActorId::from(id)) {
            Some(actor) => change(actor),
            None => panic!("Test world has no actor {}", id),
        }
        self
    }

    pub fn build(self) -> World {
        self.world
    }
}

fn root_folder(trainer: &str) -> FolderId {
    FolderId::new(format!("{}-root", trainer))
}

fn custom_folder_id(trainer: &str, name: &str) -> String {
    format!("{}-{}", trainer, sluggify(name))
}

fn actor(id: &str, name: &str, kind: ActorKind, folder: Option<FolderId>, level: u32) -> Actor {
    Actor {
        id: ActorId::from(id),
        name: name.to_string(),
        kind,
        folder,
        ownership: Default::default(),
        party: None,
        level: ActorLevel {
            current: level,
            milestones: 0,
            exp: 0,
        },
        caps: TrainingCaps::default(),
        exp_training_level_cap: None,
        effects: Vec::new(),
    }
}

/// Resolve `trainer` in `world` and load its collection store.
pub fn load_store(world: &World, trainer: &str, config: &TrainingConfig) -> CollectionStore {
    let actor = match world.actor(&ActorId::from(trainer)) {
        Some(actor) => actor,
        None => panic!("Test world has no trainer {}", trainer),
    };
    match CollectionStore::load(&Trainer::from_actor(actor), world, config) {
        Ok(store) => store,
        Err(err) => panic!("Failed to load store for {}: {}", trainer, err),
    }
}
