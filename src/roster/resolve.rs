use crate::errors::{RosterError, RosterResult};
use crate::trainer::Trainer;
use crate::world::{World, DEFAULT_OWNERSHIP_KEY, OWNER_LEVEL};
use schema::{ActorId, UserId};
use tracing::{debug, warn};

/// Explicit stand-ins for the host's global lookups
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub world: &'a World,
    /// The user opening the roster view, if any
    pub active_user: Option<&'a UserId>,
}

impl<'a> ResolveContext<'a> {
    pub fn new(world: &'a World, active_user: Option<&'a UserId>) -> Self {
        Self { world, active_user }
    }
}

/// Determine the trainer that owns `candidate`.
///
/// A character resolves to itself. A pokemon resolves, in order, to its bound
/// trainer, the active user's character, or the single character among users
/// holding owner permission over it. With `strict` set, failing all three is
/// an error; otherwise it yields `Ok(None)`.
pub fn resolve_trainer(
    candidate: &ActorId,
    ctx: ResolveContext<'_>,
    strict: bool,
) -> RosterResult<Option<Trainer>> {
    let actor = ctx
        .world
        .actor(candidate)
        .ok_or_else(|| RosterError::UnknownActor(candidate.clone()))?;

    if actor.is_character() {
        return Ok(Some(Trainer::from_actor(actor)));
    }

    if let Some(bound) = actor.trainer_id() {
        match ctx.world.actor(bound).filter(|trainer| trainer.is_character()) {
            Some(trainer) => {
                debug!(pokemon = %candidate, trainer = %bound, "Resolved trainer from binding");
                return Ok(Some(Trainer::from_actor(trainer)));
            }
            None => warn!(pokemon = %candidate, trainer = %bound, "Bound trainer is missing"),
        }
    }

    if let Some(character) = ctx.active_user.and_then(|user| ctx.world.character_of(user)) {
        debug!(pokemon = %candidate, trainer = %character.id, "Resolved trainer from active user");
        return Ok(Some(Trainer::from_actor(character)));
    }

    let owners: Vec<_> = actor
        .ownership
        .iter()
        .filter(|(owner, level)| owner.as_str() != DEFAULT_OWNERSHIP_KEY && **level >= OWNER_LEVEL)
        .filter_map(|(owner, _)| ctx.world.character_of(&UserId::from(owner.as_str())))
        .collect();

    if let [trainer] = owners.as_slice() {
        debug!(pokemon = %candidate, trainer = %trainer.id, "Resolved trainer from ownership");
        return Ok(Some(Trainer::from_actor(trainer)));
    }

    if strict {
        warn!(pokemon = %candidate, candidates = owners.len(), "No trainer resolvable");
        return Err(RosterError::NoTrainerResolvable(candidate.clone()));
    }
    Ok(None)
}
