use crate::errors::RosterResult;
use crate::presentation::Notice;
use crate::roster::commands::{FolderTarget, StoreCommand};
use crate::roster::store::{CollectionStore, FolderRole, MemberRef, SelectOutcome};
use crate::world::{Actor, World};
use schema::{ActorId, CollectionKind, PartyFlag};
use tracing::{debug, info, warn};

/// Where a dragged pokemon came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    /// Dropped in from outside the roster view (e.g. the actor directory)
    External,
    /// Dragged out of one of the view's own collections
    Collection(CollectionKind),
}

/// "Move pokemon X to collection Y"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveIntent {
    pub member: ActorId,
    pub source: DragSource,
    /// `None` is a drop onto the view itself with no specific collection
    pub destination: Option<CollectionKind>,
    pub target_index: Option<usize>,
}

impl MoveIntent {
    pub fn external(member: impl Into<ActorId>) -> Self {
        Self {
            member: member.into(),
            source: DragSource::External,
            destination: None,
            target_index: None,
        }
    }

    pub fn from_collection(member: impl Into<ActorId>, source: CollectionKind) -> Self {
        Self {
            member: member.into(),
            source: DragSource::Collection(source),
            destination: None,
            target_index: None,
        }
    }

    pub fn to(mut self, destination: CollectionKind) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn at(mut self, index: usize) -> Self {
        self.target_index = Some(index);
        self
    }
}

/// Why a move was refused. The store is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Current level is above the pokemon's training level cap
    Ineligible { level: u32, cap: u32 },
    UnknownCollection(String),
}

/// Why a move was a silent no-op
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    UnknownActor,
    NotAPokemon,
    /// An external drop of a pokemon this trainer already holds
    AlreadyBound,
    AlreadySelected,
    TrainingFull,
    /// Another relocation for this view has not finished yet
    RelocationInFlight,
    NoChange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved {
        from: Option<CollectionKind>,
        to: CollectionKind,
    },
    Reordered {
        collection: CollectionKind,
        index: usize,
    },
    SelectedForTraining,
    Deselected,
    Rejected(Rejection),
    Ignored(IgnoreReason),
}

impl MoveOutcome {
    /// Whether the store differs from before the move
    pub fn changed_state(&self) -> bool {
        matches!(
            self,
            MoveOutcome::Moved { .. }
                | MoveOutcome::Reordered { .. }
                | MoveOutcome::SelectedForTraining
                | MoveOutcome::Deselected
        )
    }
}

/// Everything a move produces: the next store, side effects for the
/// document store, and notices for the user
#[derive(Debug, Clone)]
pub struct Decision {
    pub store: CollectionStore,
    pub commands: Vec<StoreCommand>,
    pub notices: Vec<Notice>,
    pub outcome: MoveOutcome,
}

impl Decision {
    fn unchanged(store: &CollectionStore, outcome: MoveOutcome) -> Self {
        Self {
            store: store.clone(),
            commands: Vec::new(),
            notices: Vec::new(),
            outcome,
        }
    }

    fn with_notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }
}

/// Turns move intents into validated store changes.
///
/// `decide` is pure: it never touches the document store, it only says what
/// the store should look like and which commands get it there.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssignmentEngine;

impl AssignmentEngine {
    pub fn decide(
        &self,
        intent: &MoveIntent,
        snapshot: &CollectionStore,
        world: &World,
    ) -> RosterResult<Decision> {
        let Some(actor) = world.actor(&intent.member) else {
            debug!(actor = %intent.member, "Dropped actor not found");
            return Ok(Decision::unchanged(snapshot, MoveOutcome::Ignored(IgnoreReason::UnknownActor)));
        };
        if !actor.is_pokemon() {
            return Ok(Decision::unchanged(snapshot, MoveOutcome::Ignored(IgnoreReason::NotAPokemon)));
        }

        match &intent.source {
            DragSource::Collection(CollectionKind::Training) => {
                return Ok(self.drag_out_of_training(intent, actor, snapshot));
            }
            DragSource::External if actor.is_bound_to(snapshot.trainer()) => {
                return Ok(Decision::unchanged(snapshot, MoveOutcome::Ignored(IgnoreReason::AlreadyBound)));
            }
            _ => {}
        }

        let destination = match (&intent.destination, &intent.source) {
            (Some(destination), _) => destination.clone(),
            (None, DragSource::External) => self.default_destination(snapshot),
            (None, DragSource::Collection(_)) => {
                return Ok(Decision::unchanged(snapshot, MoveOutcome::Ignored(IgnoreReason::NoChange)));
            }
        };

        match destination {
            CollectionKind::Training => Ok(self.select_for_training(actor, snapshot)),
            destination => self.relocate(actor, destination, intent.target_index, snapshot),
        }
    }

    /// Party while it has room, otherwise the box
    pub fn default_destination(&self, store: &CollectionStore) -> CollectionKind {
        if store.party_has_room() {
            CollectionKind::Party
        } else {
            CollectionKind::Boxed
        }
    }

    fn drag_out_of_training(
        &self,
        intent: &MoveIntent,
        actor: &Actor,
        snapshot: &CollectionStore,
    ) -> Decision {
        match (&intent.destination, intent.target_index) {
            (Some(CollectionKind::Training), Some(index)) => {
                let mut store = snapshot.clone();
                match store.reorder(&CollectionKind::Training, &actor.id, index) {
                    Ok(()) => Decision {
                        store,
                        commands: Vec::new(),
                        notices: Vec::new(),
                        outcome: MoveOutcome::Reordered {
                            collection: CollectionKind::Training,
                            index,
                        },
                    },
                    Err(_) => Decision::unchanged(snapshot, MoveOutcome::Ignored(IgnoreReason::NoChange)),
                }
            }
            (Some(CollectionKind::Training), None) => {
                Decision::unchanged(snapshot, MoveOutcome::Ignored(IgnoreReason::NoChange))
            }
            _ => {
                let mut store = snapshot.clone();
                if store.deselect(&actor.id) {
                    info!(actor = %actor.id, "Removed from training");
                    Decision {
                        store,
                        commands: Vec::new(),
                        notices: Vec::new(),
                        outcome: MoveOutcome::Deselected,
                    }
                } else {
                    Decision::unchanged(snapshot, MoveOutcome::Ignored(IgnoreReason::NoChange))
                }
            }
        }
    }

    fn select_for_training(&self, actor: &Actor, snapshot: &CollectionStore) -> Decision {
        if !actor.is_eligible_for_training() {
            let (level, cap) = (actor.level.current, actor.caps.level);
            return Decision::unchanged(
                snapshot,
                MoveOutcome::Rejected(Rejection::Ineligible { level, cap }),
            )
            .with_notice(Notice::warning(format!(
                "{} is too high level ({}) for training. Maximum level: {}",
                actor.name, level, cap
            )));
        }

        let mut store = snapshot.clone();
        match store.select_for_training(MemberRef::from_actor(actor)) {
            SelectOutcome::Added => {
                info!(actor = %actor.id, selected = store.training().len(), "Selected for training");
                Decision {
                    store,
                    commands: Vec::new(),
                    notices: Vec::new(),
                    outcome: MoveOutcome::SelectedForTraining,
                }
            }
            SelectOutcome::AlreadySelected => {
                Decision::unchanged(snapshot, MoveOutcome::Ignored(IgnoreReason::AlreadySelected))
            }
            SelectOutcome::Full => {
                debug!(actor = %actor.id, capacity = store.training_capacity(), "Training selection full");
                Decision::unchanged(snapshot, MoveOutcome::Ignored(IgnoreReason::TrainingFull))
            }
        }
    }

    fn relocate(
        &self,
        actor: &Actor,
        requested: CollectionKind,
        target_index: Option<usize>,
        snapshot: &CollectionStore,
    ) -> RosterResult<Decision> {
        let from = snapshot.home_of(&actor.id);
        let mut notices = Vec::new();

        if from.as_ref() == Some(&requested) {
            return Ok(match target_index {
                Some(index) => {
                    let mut store = snapshot.clone();
                    store.reorder(&requested, &actor.id, index)?;
                    Decision {
                        store,
                        commands: Vec::new(),
                        notices,
                        outcome: MoveOutcome::Reordered {
                            collection: requested,
                            index,
                        },
                    }
                }
                None => Decision::unchanged(snapshot, MoveOutcome::Ignored(IgnoreReason::NoChange)),
            });
        }

        let overflow = requested == CollectionKind::Party && !snapshot.party_has_room();
        let destination = if overflow { CollectionKind::Boxed } else { requested };
        if from.as_ref() == Some(&destination) {
            return Ok(Decision::unchanged(snapshot, MoveOutcome::Ignored(IgnoreReason::NoChange)));
        }
        if overflow {
            notices.push(Notice::info(format!(
                "The party is full, {} was sent to the box",
                actor.name
            )));
        }

        if !snapshot.knows(&destination) {
            return Ok(Decision::unchanged(
                snapshot,
                MoveOutcome::Rejected(Rejection::UnknownCollection(destination.to_string())),
            )
            .with_notice(Notice::error(format!("Invalid folder: {}", destination))));
        }

        let trainer = snapshot.trainer().clone();
        let folders = snapshot.folders();
        let mut commands = Vec::new();

        let folder = match (&destination, folders.folder_for(&destination)) {
            (_, Some(folder)) => FolderTarget::Existing(folder.clone()),
            (CollectionKind::Party, None) => self.create_role_folder(FolderRole::Party, snapshot, &mut commands),
            (CollectionKind::Boxed, None) => self.create_role_folder(FolderRole::Box, snapshot, &mut commands),
            (other, None) => {
                return Ok(Decision::unchanged(
                    snapshot,
                    MoveOutcome::Rejected(Rejection::UnknownCollection(other.to_string())),
                )
                .with_notice(Notice::error(format!("Invalid folder: {}", other))));
            }
        };
        let already_there = matches!(&folder, FolderTarget::Existing(id) if actor.folder.as_ref() == Some(id));
        if !already_there {
            commands.push(StoreCommand::Relocate {
                actor: actor.id.clone(),
                folder,
            });
        }

        match &destination {
            CollectionKind::Available => {
                if actor.party.is_some() {
                    commands.push(StoreCommand::UnsetPartyFlag {
                        actor: actor.id.clone(),
                    });
                }
            }
            CollectionKind::Party => commands.push(StoreCommand::SetPartyFlag {
                actor: actor.id.clone(),
                flag: PartyFlag::party(trainer),
            }),
            _ => commands.push(StoreCommand::SetPartyFlag {
                actor: actor.id.clone(),
                flag: PartyFlag::boxed(trainer),
            }),
        }

        let mut store = snapshot.clone();
        store.move_member(MemberRef::from_actor(actor), from.as_ref(), &destination, target_index)?;
        info!(actor = %actor.id, from = ?from, to = %destination, "Relocated pokemon");

        Ok(Decision {
            store,
            commands,
            notices,
            outcome: MoveOutcome::Moved {
                from,
                to: destination,
            },
        })
    }

    fn create_role_folder(
        &self,
        role: FolderRole,
        snapshot: &CollectionStore,
        commands: &mut Vec<StoreCommand>,
    ) -> FolderTarget {
        commands.push(StoreCommand::CreateFolder {
            role,
            parent: snapshot.folders().root.clone(),
        });
        FolderTarget::Role(role)
    }

    /// Commands that give a trainer's root folder its party and box folders.
    ///
    /// When the party folder is missing, unbound pokemon sitting in the root
    /// folder are bound to the trainer and moved into the party (the box once
    /// the party is full), and party-bound pokemon are moved into the new
    /// folder. When the box folder is missing, boxed pokemon are moved into it.
    pub fn bootstrap_folders(&self, snapshot: &CollectionStore) -> Decision {
        let mut store = snapshot.clone();
        let mut commands = Vec::new();
        let trainer = snapshot.trainer().clone();
        let folders = snapshot.folders().clone();

        let party_folder = match &folders.party {
            Some(id) => FolderTarget::Existing(id.clone()),
            None => self.create_role_folder(FolderRole::Party, snapshot, &mut commands),
        };
        let box_folder = match &folders.boxed {
            Some(id) => FolderTarget::Existing(id.clone()),
            None => self.create_role_folder(FolderRole::Box, snapshot, &mut commands),
        };

        if folders.party.is_none() {
            for member in snapshot.list(&CollectionKind::Party).unwrap_or(&[]) {
                commands.push(StoreCommand::Relocate {
                    actor: member.id.clone(),
                    folder: party_folder.clone(),
                });
            }
            for member in snapshot.list(&CollectionKind::Available).unwrap_or(&[]) {
                let (kind, folder, flag) = if store.party_has_room() {
                    (CollectionKind::Party, party_folder.clone(), PartyFlag::party(trainer.clone()))
                } else {
                    (CollectionKind::Boxed, box_folder.clone(), PartyFlag::boxed(trainer.clone()))
                };
                commands.push(StoreCommand::Relocate {
                    actor: member.id.clone(),
                    folder,
                });
                commands.push(StoreCommand::SetPartyFlag {
                    actor: member.id.clone(),
                    flag,
                });
                if let Err(err) = store.move_member(member.clone(), None, &kind, None) {
                    warn!(actor = %member.id, error = %err, "Could not place pokemon during bootstrap");
                }
            }
        }

        if folders.boxed.is_none() {
            for member in snapshot.list(&CollectionKind::Boxed).unwrap_or(&[]) {
                commands.push(StoreCommand::Relocate {
                    actor: member.id.clone(),
                    folder: box_folder.clone(),
                });
            }
        }

        if !commands.is_empty() {
            let touched = commands.iter().filter(|c| c.actor().is_some()).count();
            info!(trainer = %trainer, commands = commands.len(), touched, "Bootstrapping roster folders");
        }

        Decision {
            store,
            commands,
            notices: Vec::new(),
            outcome: MoveOutcome::Ignored(IgnoreReason::NoChange),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrainingConfig;
    use crate::roster::tests::common::{load_store, TestWorldBuilder};
    use crate::presentation::Severity;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unknown_actor_is_ignored() {
        let world = TestWorldBuilder::new().trainer("ash", "Ash").build();
        let store = load_store(&world, "ash", &TrainingConfig::default());

        let decision = AssignmentEngine
            .decide(&MoveIntent::external("missingno"), &store, &world)
            .unwrap();

        assert_eq!(decision.outcome, MoveOutcome::Ignored(IgnoreReason::UnknownActor));
        assert_eq!(decision.store, store);
    }

    #[test]
    fn test_characters_cannot_be_dropped() {
        let world = TestWorldBuilder::new()
            .trainer("ash", "Ash")
            .trainer("brock", "Brock")
            .build();
        let store = load_store(&world, "ash", &TrainingConfig::default());

        let decision = AssignmentEngine
            .decide(&MoveIntent::external("brock"), &store, &world)
            .unwrap();

        assert_eq!(decision.outcome, MoveOutcome::Ignored(IgnoreReason::NotAPokemon));
    }

    #[test]
    fn test_external_drop_of_own_pokemon_is_ignored() {
        let world = TestWorldBuilder::new()
            .trainer("ash", "Ash")
            .party_folder("ash")
            .party_pokemon("pikachu", "Pikachu", "ash", 20)
            .build();
        let store = load_store(&world, "ash", &TrainingConfig::default());

        let decision = AssignmentEngine
            .decide(&MoveIntent::external("pikachu").to(CollectionKind::Boxed), &store, &world)
            .unwrap();

        assert_eq!(decision.outcome, MoveOutcome::Ignored(IgnoreReason::AlreadyBound));
        assert!(decision.commands.is_empty());
    }

    #[test]
    fn test_move_to_available_clears_binding() {
        let world = TestWorldBuilder::new()
            .trainer("ash", "Ash")
            .party_folder("ash")
            .party_pokemon("pikachu", "Pikachu", "ash", 20)
            .build();
        let store = load_store(&world, "ash", &TrainingConfig::default());

        let decision = AssignmentEngine
            .decide(
                &MoveIntent::from_collection("pikachu", CollectionKind::Party)
                    .to(CollectionKind::Available),
                &store,
                &world,
            )
            .unwrap();

        assert_eq!(
            decision.outcome,
            MoveOutcome::Moved {
                from: Some(CollectionKind::Party),
                to: CollectionKind::Available
            }
        );
        assert_eq!(
            decision.commands,
            vec![
                StoreCommand::Relocate {
                    actor: "pikachu".into(),
                    folder: FolderTarget::Existing("ash-root".into()),
                },
                StoreCommand::UnsetPartyFlag {
                    actor: "pikachu".into()
                },
            ]
        );
        assert_eq!(decision.store.len(&CollectionKind::Party), 0);
        assert_eq!(decision.store.len(&CollectionKind::Available), 1);
    }

    #[test]
    fn test_custom_group_binds_as_boxed() {
        let world = TestWorldBuilder::new()
            .trainer("ash", "Ash")
            .party_folder("ash")
            .custom_folder("ash", "Day Care")
            .party_pokemon("pikachu", "Pikachu", "ash", 20)
            .build();
        let store = load_store(&world, "ash", &TrainingConfig::default());

        let decision = AssignmentEngine
            .decide(
                &MoveIntent::from_collection("pikachu", CollectionKind::Party)
                    .to(CollectionKind::Custom("day-care".into())),
                &store,
                &world,
            )
            .unwrap();

        assert_eq!(
            decision.commands,
            vec![
                StoreCommand::Relocate {
                    actor: "pikachu".into(),
                    folder: FolderTarget::Existing("ash-day-care".into()),
                },
                StoreCommand::SetPartyFlag {
                    actor: "pikachu".into(),
                    flag: PartyFlag::boxed("ash".into()),
                },
            ]
        );
        assert_eq!(
            decision.store.home_of(&"pikachu".into()),
            Some(CollectionKind::Custom("day-care".into()))
        );
    }

    #[test]
    fn test_unknown_group_is_soft_rejection() {
        let world = TestWorldBuilder::new()
            .trainer("ash", "Ash")
            .party_pokemon("pikachu", "Pikachu", "ash", 20)
            .build();
        let store = load_store(&world, "ash", &TrainingConfig::default());

        let decision = AssignmentEngine
            .decide(
                &MoveIntent::from_collection("pikachu", CollectionKind::Party)
                    .to(CollectionKind::Custom("lab".into())),
                &store,
                &world,
            )
            .unwrap();

        assert_eq!(
            decision.outcome,
            MoveOutcome::Rejected(Rejection::UnknownCollection("lab".to_string()))
        );
        assert_eq!(decision.store, store);
        assert!(decision.commands.is_empty());
        assert_eq!(decision.notices[0].severity, Severity::Error);
    }

    #[test]
    fn test_missing_party_folder_is_created_first() {
        let world = TestWorldBuilder::new()
            .trainer("ash", "Ash")
            .loose_pokemon("rattata", "Rattata", None, 4)
            .build();
        let store = load_store(&world, "ash", &TrainingConfig::default());

        let decision = AssignmentEngine
            .decide(&MoveIntent::external("rattata"), &store, &world)
            .unwrap();

        assert_eq!(
            decision.commands,
            vec![
                StoreCommand::CreateFolder {
                    role: FolderRole::Party,
                    parent: "ash-root".into(),
                },
                StoreCommand::Relocate {
                    actor: "rattata".into(),
                    folder: FolderTarget::Role(FolderRole::Party),
                },
                StoreCommand::SetPartyFlag {
                    actor: "rattata".into(),
                    flag: PartyFlag::party("ash".into()),
                },
            ]
        );
    }

    #[test]
    fn test_reorder_has_no_side_effects() {
        let world = TestWorldBuilder::new()
            .trainer("ash", "Ash")
            .party_folder("ash")
            .party_pokemon("a-pidgey", "Pidgey", "ash", 9)
            .party_pokemon("b-pikachu", "Pikachu", "ash", 20)
            .build();
        let store = load_store(&world, "ash", &TrainingConfig::default());

        let decision = AssignmentEngine
            .decide(
                &MoveIntent::from_collection("b-pikachu", CollectionKind::Party)
                    .to(CollectionKind::Party)
                    .at(0),
                &store,
                &world,
            )
            .unwrap();

        assert_eq!(
            decision.outcome,
            MoveOutcome::Reordered {
                collection: CollectionKind::Party,
                index: 0
            }
        );
        assert!(decision.commands.is_empty());
        let order: Vec<_> = decision
            .store
            .list(&CollectionKind::Party)
            .unwrap()
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(order, vec!["b-pikachu", "a-pidgey"]);
    }

    #[test]
    fn test_drag_out_of_training_only_deselects() {
        let world = TestWorldBuilder::new()
            .trainer("ash", "Ash")
            .party_folder("ash")
            .party_pokemon("pikachu", "Pikachu", "ash", 20)
            .build();
        let mut store = load_store(&world, "ash", &TrainingConfig::default());
        let pikachu = store.list(&CollectionKind::Party).unwrap()[0].clone();
        store.select_for_training(pikachu);

        let decision = AssignmentEngine
            .decide(
                &MoveIntent::from_collection("pikachu", CollectionKind::Training)
                    .to(CollectionKind::Boxed),
                &store,
                &world,
            )
            .unwrap();

        assert_eq!(decision.outcome, MoveOutcome::Deselected);
        assert!(decision.commands.is_empty());
        assert!(decision.store.training().is_empty());
        assert_eq!(decision.store.home_of(&"pikachu".into()), Some(CollectionKind::Party));
    }

    #[test]
    fn test_bootstrap_moves_loose_pokemon_into_new_party() {
        let world = TestWorldBuilder::new()
            .trainer("ash", "Ash")
            .party_pokemon("pikachu", "Pikachu", "ash", 20)
            .available_pokemon("caterpie", "Caterpie", "ash", 3)
            .box_folder("ash")
            .build();
        let store = load_store(&world, "ash", &TrainingConfig::default());

        let decision = AssignmentEngine.bootstrap_folders(&store);

        assert_eq!(
            decision.commands,
            vec![
                StoreCommand::CreateFolder {
                    role: FolderRole::Party,
                    parent: "ash-root".into(),
                },
                StoreCommand::Relocate {
                    actor: "pikachu".into(),
                    folder: FolderTarget::Role(FolderRole::Party),
                },
                StoreCommand::Relocate {
                    actor: "caterpie".into(),
                    folder: FolderTarget::Role(FolderRole::Party),
                },
                StoreCommand::SetPartyFlag {
                    actor: "caterpie".into(),
                    flag: PartyFlag::party("ash".into()),
                },
            ]
        );
        assert_eq!(decision.store.len(&CollectionKind::Party), 2);
        assert_eq!(decision.store.len(&CollectionKind::Available), 0);
    }

    #[test]
    fn test_bootstrap_sends_party_overflow_to_box() {
        let mut builder = TestWorldBuilder::new().trainer("ash", "Ash").box_folder("ash");
        for id in ["rattata", "pidgey", "spearow", "zubat", "geodude", "oddish", "bellsprout"] {
            builder = builder.available_pokemon(id, id, "ash", 5);
        }
        let world = builder.build();
        let store = load_store(&world, "ash", &TrainingConfig::default());
        let available: Vec<ActorId> = store
            .list(&CollectionKind::Available)
            .unwrap()
            .iter()
            .map(|m| m.id.clone())
            .collect();

        let decision = AssignmentEngine.bootstrap_folders(&store);

        assert_eq!(decision.store.len(&CollectionKind::Party), 6);
        assert_eq!(decision.store.len(&CollectionKind::Boxed), 1);
        assert_eq!(decision.store.len(&CollectionKind::Available), 0);
        assert_eq!(decision.store.validate(), Ok(()));

        let flags: Vec<(ActorId, bool)> = decision
            .commands
            .iter()
            .filter_map(|command| match command {
                StoreCommand::SetPartyFlag { actor, flag } => Some((actor.clone(), flag.boxed)),
                _ => None,
            })
            .collect();
        let expected: Vec<(ActorId, bool)> = available
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i >= 6))
            .collect();
        assert_eq!(flags, expected);

        let overflow = &available[6];
        assert!(decision.commands.contains(&StoreCommand::Relocate {
            actor: overflow.clone(),
            folder: FolderTarget::Existing("ash-box".into()),
        }));
        assert!(decision.commands.contains(&StoreCommand::SetPartyFlag {
            actor: overflow.clone(),
            flag: PartyFlag::boxed("ash".into()),
        }));
        assert_eq!(decision.store.home_of(overflow), Some(CollectionKind::Boxed));
    }

    #[test]
    fn test_bootstrap_is_noop_when_folders_exist() {
        let world = TestWorldBuilder::new()
            .trainer("ash", "Ash")
            .party_folder("ash")
            .box_folder("ash")
            .available_pokemon("caterpie", "Caterpie", "ash", 3)
            .build();
        let store = load_store(&world, "ash", &TrainingConfig::default());

        let decision = AssignmentEngine.bootstrap_folders(&store);

        assert!(decision.commands.is_empty());
        assert_eq!(decision.store, store);
    }
}
