use crate::config::TrainingCatalog;
use crate::documents::{apply_command, DocumentStore};
use crate::presentation::Presenter;
use crate::roster::commands::StoreCommand;
use crate::trainer::Trainer;
use crate::training::planner::{ExperiencePlan, PlannedShare};
use crate::training::report::{MemberResult, ResultNote, TrainingReport};
use crate::world::World;
use schema::TrainingType;
use tracing::{info, warn};

/// Apply a training plan member by member and broadcast the outcome.
///
/// Members are independent: an unknown member, an ineligible member or a
/// rejected update is noted in the report and the rest still train.
/// Collection membership is never touched.
pub async fn complete_training(
    trainer: &Trainer,
    training_type: TrainingType,
    plan: &ExperiencePlan,
    world: &World,
    docs: &dyn DocumentStore,
    catalog: &TrainingCatalog,
    presenter: &dyn Presenter,
) -> TrainingReport {
    let effect = catalog.effect_for(training_type);
    let mut report = TrainingReport::new(trainer.name.clone(), training_type);

    for share in plan.shares() {
        let result = train_member(share, effect, world, docs).await;
        report.results.push(result);
    }

    info!(
        trainer = %trainer.id,
        training = %training_type,
        members = report.results.len(),
        granted = report.total_granted(),
        "Training completed"
    );
    presenter.broadcast(&report.compose());
    report
}

async fn train_member(
    share: &PlannedShare,
    effect: Option<&str>,
    world: &World,
    docs: &dyn DocumentStore,
) -> MemberResult {
    let Some(actor) = world.actor(&share.member).filter(|actor| actor.is_pokemon()) else {
        warn!(actor = %share.member, "Training member not found");
        let mut result = MemberResult::new(share.member.clone(), share.member.to_string(), share.amount);
        result.notes.push(ResultNote::Unresolved);
        return result;
    };
    let mut result = MemberResult::new(actor.id.clone(), actor.name.clone(), share.amount);

    if !actor.is_eligible_for_training() {
        result.notes.push(ResultNote::Ineligible {
            level: actor.level.current,
            cap: actor.caps.level,
        });
        return result;
    }

    let granted = share.amount.min(actor.caps.amount);
    if granted < share.amount {
        result.notes.push(ResultNote::Capped {
            proposed: share.amount,
            granted,
            cap: actor.caps.amount,
        });
    }

    let total = actor.level.exp.saturating_add(granted);
    let update = StoreCommand::UpdateExperience {
        actor: actor.id.clone(),
        total,
    };
    if let Err(err) = apply_command(docs, &update, None).await {
        warn!(actor = %actor.id, error = %err, "Experience update failed");
        result.notes.push(ResultNote::UpdateFailed(err.to_string()));
        return result;
    }
    result.granted = granted;
    result.total = Some(total);
    info!(actor = %actor.id, granted, total, "Pokemon trained");

    if let Some(effect) = effect {
        let attach = StoreCommand::AttachEffect {
            actor: actor.id.clone(),
            effect: effect.to_string(),
        };
        if let Err(err) = apply_command(docs, &attach, None).await {
            warn!(actor = %actor.id, effect, error = %err, "Training effect not attached");
            result.notes.push(ResultNote::EffectFailed {
                effect: effect.to_string(),
                reason: err.to_string(),
            });
        }
    }

    result
}
