//! Text-in, text-out roster operations for the MCP server.
//!
//! Everything here returns plain strings (or `Err(String)` for requests that
//! cannot be served) so the server only has to wrap them in JSON-RPC replies.

use crate::config::TrainingConfig;
use crate::documents::InMemoryDocumentStore;
use crate::presentation::RecordingPresenter;
use crate::roster::{
    sluggify, CollectionStore, DragSource, IgnoreReason, MoveIntent, MoveOutcome, Rejection,
    ResolveContext, RosterView,
};
use crate::training::{ExperiencePlan, TrainingReport, TrainingSubmission};
use crate::world::World;
use schema::{ActorId, CollectionKind, TrainingType, UserId};

const NO_ROSTER: &str = "No roster is open. Use 'open_roster' first.";

/// One open roster over an in-memory world
#[derive(Debug)]
pub struct RosterService {
    docs: InMemoryDocumentStore,
    config: TrainingConfig,
    presenter: RecordingPresenter,
    view: Option<RosterView>,
}

impl RosterService {
    pub fn new(world: World, config: TrainingConfig) -> Self {
        Self {
            docs: InMemoryDocumentStore::new(world),
            config,
            presenter: RecordingPresenter::new(),
            view: None,
        }
    }

    /// Current state of the underlying world
    pub async fn world(&self) -> World {
        self.docs.snapshot().await
    }

    /// Open the roster of the trainer behind `actor`, replacing any open one
    pub async fn open_roster(&mut self, actor: &str, user: Option<&str>) -> Result<String, String> {
        let world = self.docs.snapshot().await;
        let user = user.map(UserId::from);
        let ctx = ResolveContext::new(&world, user.as_ref());

        let opened = RosterView::open(
            &ActorId::from(actor),
            ctx,
            self.config.clone(),
            &self.docs,
            &self.presenter,
            true,
        )
        .await;
        let notices: String = self
            .presenter
            .drain_notices()
            .iter()
            .map(|notice| format!("{}\n", notice))
            .collect();
        let view = opened
            .map_err(|e| format!("{}Could not open roster: {}", notices, e))?
            .ok_or_else(|| format!("No trainer found for {}", actor))?;

        let store = view.snapshot().await;
        let text = format!(
            "{}Opened the roster of {}\n\n{}",
            notices,
            view.trainer(),
            display_roster(&store, &view)
        );
        self.view = Some(view);
        Ok(text)
    }

    pub async fn show_roster(&self) -> Result<String, String> {
        let view = self.view.as_ref().ok_or(NO_ROSTER)?;
        Ok(display_roster(&view.snapshot().await, view))
    }

    /// Drag `member` from `from` (outside the roster when `None`) onto `to`
    pub async fn move_member(
        &self,
        member: &str,
        from: Option<&str>,
        to: Option<&str>,
        index: Option<usize>,
    ) -> Result<String, String> {
        let view = self.view.as_ref().ok_or(NO_ROSTER)?;
        let intent = MoveIntent {
            member: ActorId::from(member),
            source: match from {
                Some(kind) => DragSource::Collection(parse_collection(kind)),
                None => DragSource::External,
            },
            destination: to.map(parse_collection),
            target_index: index,
        };

        let world = self.docs.snapshot().await;
        let name = world
            .actor(&intent.member)
            .map_or_else(|| member.to_string(), |actor| actor.name.clone());
        let outcome = view
            .drop_member(&intent, &world, &self.docs, &self.presenter)
            .await;

        let mut output = String::new();
        for notice in self.presenter.drain_notices() {
            output.push_str(&format!("{}\n", notice));
        }
        match outcome {
            Ok(outcome) => output.push_str(&format!("{}\n", describe_outcome(&name, &outcome))),
            Err(e) => return Err(format!("{}Move failed: {}", output, e)),
        }
        output.push('\n');
        output.push_str(&display_roster(&view.snapshot().await, view));
        Ok(output)
    }

    pub async fn plan_training(&self) -> Result<String, String> {
        let view = self.view.as_ref().ok_or(NO_ROSTER)?;
        let plan = view.plan_training(&self.presenter).await;

        let mut output = String::new();
        for notice in self.presenter.drain_notices() {
            output.push_str(&format!("{}\n", notice));
        }
        match plan {
            Some(plan) => output.push_str(&display_plan(&plan, &self.docs.snapshot().await)),
            None => output.push_str("No pokemon are selected for training."),
        }
        Ok(output)
    }

    /// Finish the training cycle. `amounts` holds manually edited
    /// `member -> text` values; without them the even split is used.
    pub async fn complete_training(
        &self,
        training: &str,
        amounts: Option<Vec<(String, String)>>,
    ) -> Result<String, String> {
        let view = self.view.as_ref().ok_or(NO_ROSTER)?;
        let submission = match amounts {
            Some(amounts) => {
                let fields = std::iter::once(("training", training))
                    .chain(amounts.iter().map(|(id, text)| (id.as_str(), text.as_str())));
                TrainingSubmission::from_form(fields)
            }
            None => TrainingSubmission {
                training_type: TrainingType::from_form_value(training),
                plan: view
                    .plan_training(&self.presenter)
                    .await
                    .ok_or("No pokemon are selected for training.")?,
            },
        };
        self.presenter.drain_notices();

        let world = self.docs.snapshot().await;
        let report = view
            .complete_training(
                submission.training_type,
                &submission.plan,
                &world,
                &self.docs,
                &self.presenter,
            )
            .await;
        self.presenter.drain_broadcasts();
        Ok(display_report(&report))
    }
}

fn parse_collection(name: &str) -> CollectionKind {
    match sluggify(name).parse() {
        Ok(kind) => kind,
        Err(never) => match never {},
    }
}

/// One line saying what a move did
pub fn describe_outcome(name: &str, outcome: &MoveOutcome) -> String {
    match outcome {
        MoveOutcome::Moved { from: Some(from), to } => {
            format!("Moved {} from {} to {}.", name, from, to)
        }
        MoveOutcome::Moved { from: None, to } => format!("Added {} to {}.", name, to),
        MoveOutcome::Reordered { collection, index } => {
            format!("Moved {} to position {} in {}.", name, index + 1, collection)
        }
        MoveOutcome::SelectedForTraining => format!("{} was selected for training.", name),
        MoveOutcome::Deselected => format!("{} was removed from training.", name),
        MoveOutcome::Rejected(Rejection::Ineligible { .. }) => {
            format!("{} cannot be selected for training.", name)
        }
        MoveOutcome::Rejected(Rejection::UnknownCollection(slug)) => {
            format!("There is no collection named '{}'.", slug)
        }
        MoveOutcome::Ignored(reason) => {
            let why = match reason {
                IgnoreReason::UnknownActor => "it does not exist",
                IgnoreReason::NotAPokemon => "it is not a pokemon",
                IgnoreReason::AlreadyBound => "it already belongs to this trainer",
                IgnoreReason::AlreadySelected => "it is already selected for training",
                IgnoreReason::TrainingFull => "the training selection is full",
                IgnoreReason::RelocationInFlight => "another move is in progress",
                IgnoreReason::NoChange => "it is already there",
            };
            format!("Nothing changed for {}: {}.", name, why)
        }
    }
}

/// All collections with counts, average levels and members
pub fn display_roster(store: &CollectionStore, view: &RosterView) -> String {
    let mut output = format!("--- {} ---\n", view.trainer());
    let allowance = view.allowance();
    output.push_str(&format!(
        "Training EXP: {} ({} per instance x {}{})\n",
        view.training_metric(),
        allowance.per_instance,
        view.config().instance_count,
        if allowance.is_degraded() { ", fallback formula" } else { "" }
    ));

    for summary in store.summaries() {
        let title = match &summary.kind {
            CollectionKind::Custom(slug) => store
                .custom_groups()
                .iter()
                .find(|group| &group.slug == slug)
                .map_or_else(|| slug.clone(), |group| group.name.clone()),
            CollectionKind::Available => "Available".to_string(),
            CollectionKind::Party => "Party".to_string(),
            CollectionKind::Boxed => "Box".to_string(),
            CollectionKind::Training => "Training".to_string(),
        };
        let capacity = match summary.kind {
            CollectionKind::Party => format!("/{}", store.party_capacity()),
            CollectionKind::Training => format!("/{}", store.training_capacity()),
            _ => String::new(),
        };
        let average = summary
            .average_level
            .map(|level| format!(", avg Lv. {:.1}", level))
            .unwrap_or_default();
        output.push_str(&format!("\n{} ({}{}{})\n", title, summary.count, capacity, average));

        for (i, member) in store.list(&summary.kind).unwrap_or(&[]).iter().enumerate() {
            output.push_str(&format!(
                "  {}. {} (Lv. {}) [{}]\n",
                i + 1,
                member.name,
                member.level,
                member.id
            ));
        }
    }
    output
}

/// Planned experience per selected pokemon
pub fn display_plan(plan: &ExperiencePlan, world: &World) -> String {
    let mut output = String::from("--- Training Plan ---\n");
    for share in plan.shares() {
        let name = world
            .actor(&share.member)
            .map_or_else(|| share.member.to_string(), |actor| actor.name.clone());
        output.push_str(&format!("  {}: {} EXP\n", name, share.amount));
    }
    output.push_str(&format!("Total: {} EXP\n", plan.total()));
    output
}

pub fn display_report(report: &TrainingReport) -> String {
    format!("{}\n", report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::tests::common::TestWorldBuilder;

    fn service() -> RosterService {
        let world = TestWorldBuilder::new()
            .trainer("ash", "Ash")
            .with_training_exp("ash", 10)
            .party_folder("ash")
            .box_folder("ash")
            .custom_folder("ash", "Day Care")
            .party_pokemon("pikachu", "Pikachu", "ash", 20)
            .party_pokemon("pidgeotto", "Pidgeotto", "ash", 22)
            .loose_pokemon("rattata", "Rattata", None, 4)
            .build();
        RosterService::new(world, TrainingConfig::default())
    }

    #[tokio::test]
    async fn test_tools_need_an_open_roster() {
        let service = service();
        assert_eq!(service.show_roster().await, Err(NO_ROSTER.to_string()));
    }

    #[tokio::test]
    async fn test_open_and_show() {
        let mut service = service();
        let text = service.open_roster("pikachu", None).await.unwrap();

        assert!(text.starts_with("Opened the roster of Ash (Lv. 10)"));
        assert!(text.contains("Party (2/6, avg Lv. 21.0)"));
        assert!(text.contains("Day Care (0)"));
        assert!(text.contains("Training EXP: 60 (10 per instance x 6)"));
    }

    #[tokio::test]
    async fn test_move_and_train_by_text() {
        let mut service = service();
        service.open_roster("ash", None).await.unwrap();

        let moved = service.move_member("rattata", None, Some("day-care"), None).await.unwrap();
        assert!(moved.starts_with("Added Rattata to day-care."));

        service
            .move_member("pikachu", Some("party"), Some("training"), None)
            .await
            .unwrap();
        let plan = service.plan_training().await.unwrap();
        assert!(plan.contains("Pikachu: 60 EXP"));

        let report = service
            .complete_training(
                "agility-training",
                Some(vec![("pikachu".to_string(), "25".to_string())]),
            )
            .await
            .unwrap();
        assert!(report.contains("Pikachu gained 25 EXP totaling to 25 EXP"));
        assert_eq!(service.world().await.actors[&ActorId::from("pikachu")].level.exp, 25);
    }

    #[tokio::test]
    async fn test_box_alias_and_shadowing_group_names() {
        let world = TestWorldBuilder::new()
            .trainer("ash", "Ash")
            .party_folder("ash")
            .box_folder("ash")
            .custom_folder("ash", "Training")
            .party_pokemon("pikachu", "Pikachu", "ash", 20)
            .loose_pokemon("rattata", "Rattata", None, 4)
            .build();
        let mut service = RosterService::new(world, TrainingConfig::default());
        service.open_roster("ash", None).await.unwrap();

        let boxed = service
            .move_member("pikachu", Some("party"), Some("Box"), None)
            .await
            .unwrap();
        assert!(boxed.starts_with("Moved Pikachu from party to boxed."));

        let grouped = service
            .move_member("rattata", None, Some("training-group"), None)
            .await
            .unwrap();
        assert!(grouped.starts_with("Added Rattata to training-group."));
        assert!(grouped.contains("Training (1, avg Lv. 4.0)"));
        assert!(grouped.contains("Training (0/6)"));
    }

    #[test]
    fn test_unknown_collection_text() {
        let outcome = MoveOutcome::Rejected(Rejection::UnknownCollection("lab".to_string()));
        assert_eq!(describe_outcome("Muk", &outcome), "There is no collection named 'lab'.");
    }
}
