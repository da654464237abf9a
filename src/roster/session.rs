use crate::config::TrainingConfig;
use crate::documents::{apply_commands, DocumentStore};
use crate::errors::{RosterError, RosterResult};
use crate::presentation::{Notice, Presenter};
use crate::roster::engine::{AssignmentEngine, IgnoreReason, MoveIntent, MoveOutcome};
use crate::roster::resolve::{resolve_trainer, ResolveContext};
use crate::roster::store::CollectionStore;
use crate::trainer::{ExpAllowance, Trainer};
use crate::training::{complete_training, ExperiencePlan, TrainingReport};
use crate::world::World;
use schema::{ActorId, TrainingType};
use tokio::sync::Mutex;
use tracing::{info, warn};

/// One open roster view for one trainer.
///
/// The store sits behind an async mutex. A drop that finds the mutex held is
/// turned away instead of queued, so at most one relocation is in flight.
#[derive(Debug)]
pub struct RosterView {
    trainer: Trainer,
    config: TrainingConfig,
    allowance: ExpAllowance,
    engine: AssignmentEngine,
    store: Mutex<CollectionStore>,
}

impl RosterView {
    /// Resolve the trainer for `candidate`, load its collections and create
    /// any missing party/box folders.
    ///
    /// Without `strict`, an unresolvable trainer or a trainer with no root
    /// folder yields `Ok(None)`. A pokemon that cannot be migrated into the
    /// new folders is reported and keeps its previous collection.
    pub async fn open(
        candidate: &ActorId,
        ctx: ResolveContext<'_>,
        config: TrainingConfig,
        docs: &dyn DocumentStore,
        presenter: &dyn Presenter,
        strict: bool,
    ) -> RosterResult<Option<Self>> {
        let Some(trainer) = resolve_trainer(candidate, ctx, strict)? else {
            return Ok(None);
        };

        let loaded = match CollectionStore::load(&trainer, ctx.world, &config) {
            Ok(store) => store,
            Err(RosterError::NoRootFolder(id)) if !strict => {
                warn!(trainer = %id, "Trainer has no root folder, roster not opened");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        let engine = AssignmentEngine;
        let bootstrap = engine.bootstrap_folders(&loaded);
        let mut store = bootstrap.store;
        let (folder_commands, member_commands): (Vec<_>, Vec<_>) = bootstrap
            .commands
            .into_iter()
            .partition(|command| command.actor().is_none());
        apply_commands(docs, &folder_commands, store.folders_mut()).await?;

        for commands in member_commands.chunk_by(|a, b| a.actor() == b.actor()) {
            let Some(actor) = commands.first().and_then(|command| command.actor()) else {
                continue;
            };
            if let Err(err) = apply_commands(docs, commands, store.folders_mut()).await {
                warn!(trainer = %trainer.id, actor = %actor, error = %err, "Could not migrate pokemon");
                presenter.notify(&Notice::error(format!(
                    "Could not move {} into the roster folders of {}: {}",
                    actor, trainer.name, err
                )));
                restore_home(&mut store, &loaded, actor)?;
            }
        }
        store.clear_training();

        let allowance = trainer.exp_allowance();
        info!(
            trainer = %trainer.id,
            members = store.members().count(),
            per_instance = allowance.per_instance,
            "Opened roster"
        );

        Ok(Some(Self {
            trainer,
            config,
            allowance,
            engine,
            store: Mutex::new(store),
        }))
    }

    pub fn trainer(&self) -> &Trainer {
        &self.trainer
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn allowance(&self) -> ExpAllowance {
        self.allowance
    }

    /// Experience spread over one training cycle
    pub fn training_metric(&self) -> u64 {
        u64::from(self.allowance.per_instance) * self.config.instance_count as u64
    }

    /// Copy of the current collections
    pub async fn snapshot(&self) -> CollectionStore {
        self.store.lock().await.clone()
    }

    /// Handle one drop. The new store is committed only after every side
    /// effect was applied; a failing side effect leaves the view as it was.
    pub async fn drop_member(
        &self,
        intent: &MoveIntent,
        world: &World,
        docs: &dyn DocumentStore,
        presenter: &dyn Presenter,
    ) -> RosterResult<MoveOutcome> {
        let Ok(mut store) = self.store.try_lock() else {
            warn!(trainer = %self.trainer.id, actor = %intent.member, "Relocation already in flight");
            presenter.notify(&Notice::warning(
                "Another move is still being applied, try again once it finishes",
            ));
            return Ok(MoveOutcome::Ignored(IgnoreReason::RelocationInFlight));
        };

        let decision = self.engine.decide(intent, &store, world)?;
        for notice in &decision.notices {
            presenter.notify(notice);
        }
        if !decision.outcome.changed_state() {
            return Ok(decision.outcome);
        }

        let mut next = decision.store;
        if let Err(err) = apply_commands(docs, &decision.commands, next.folders_mut()).await {
            warn!(actor = %intent.member, error = %err, "Move aborted");
            presenter.notify(&Notice::error(format!("Could not move {}: {}", intent.member, err)));
            return Err(err.into());
        }

        *store = next;
        presenter.render(&store);
        Ok(decision.outcome)
    }

    /// Even split of this cycle's experience across the training selection
    pub async fn plan_training(&self, presenter: &dyn Presenter) -> Option<ExperiencePlan> {
        let selected: Vec<ActorId> = self
            .store
            .lock()
            .await
            .training()
            .iter()
            .map(|member| member.id.clone())
            .collect();

        if self.allowance.is_degraded() {
            presenter.notify(&Notice::warning(format!(
                "Training experience for {} uses the fallback formula ({} per instance)",
                self.trainer.name, self.allowance.per_instance
            )));
        }
        ExperiencePlan::distribute(self.allowance.per_instance, self.config.instance_count, &selected)
    }

    /// Apply `plan`, broadcast the outcome and clear the training selection.
    pub async fn complete_training(
        &self,
        training_type: TrainingType,
        plan: &ExperiencePlan,
        world: &World,
        docs: &dyn DocumentStore,
        presenter: &dyn Presenter,
    ) -> TrainingReport {
        let mut store = self.store.lock().await;
        let report = complete_training(
            &self.trainer,
            training_type,
            plan,
            world,
            docs,
            &self.config.catalog,
            presenter,
        )
        .await;
        store.clear_training();
        presenter.render(&store);
        report
    }
}

/// Put `actor` back into the collection it held in `loaded`
fn restore_home(
    store: &mut CollectionStore,
    loaded: &CollectionStore,
    actor: &ActorId,
) -> RosterResult<()> {
    let Some(home) = loaded.home_of(actor) else {
        return Ok(());
    };
    if store.home_of(actor).as_ref() == Some(&home) {
        return Ok(());
    }
    if let Some(member) = loaded.members().find(|member| &member.id == actor) {
        store.move_member(member.clone(), None, &home, None)?;
    }
    Ok(())
}
