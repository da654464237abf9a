use schema::{ActorId, TrainingType};
use std::fmt;

/// Something worth telling the GM about one member's training
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultNote {
    /// The member id did not name a pokemon
    Unresolved,
    Ineligible {
        level: u32,
        cap: u32,
    },
    Capped {
        proposed: u32,
        granted: u32,
        cap: u32,
    },
    /// The experience update was rejected by the document store
    UpdateFailed(String),
    EffectFailed {
        effect: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberResult {
    pub member: ActorId,
    pub name: String,
    pub proposed: u32,
    pub granted: u32,
    /// Experience after training. `None` when nothing was written.
    pub total: Option<u32>,
    pub notes: Vec<ResultNote>,
}

impl MemberResult {
    pub fn new(member: ActorId, name: impl Into<String>, proposed: u32) -> Self {
        Self {
            member,
            name: name.into(),
            proposed,
            granted: 0,
            total: None,
            notes: Vec::new(),
        }
    }

    pub fn trained(&self) -> bool {
        self.total.is_some()
    }

    fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .notes
            .iter()
            .map(|note| match note {
                ResultNote::Unresolved => format!("Could not find pokemon {}", self.member),
                ResultNote::Ineligible { level, cap } => format!(
                    "{} is too high level ({}) for training (cap: {})",
                    self.name, level, cap
                ),
                ResultNote::Capped {
                    proposed,
                    granted,
                    cap,
                } => format!(
                    "{} EXP capped from {} to {} (training cap: {})",
                    self.name, proposed, granted, cap
                ),
                ResultNote::UpdateFailed(reason) => {
                    format!("Failed to update EXP for {}: {}", self.name, reason)
                }
                ResultNote::EffectFailed { effect, reason } => {
                    format!("Failed to attach {} to {}: {}", effect, self.name, reason)
                }
            })
            .collect();
        if let Some(total) = self.total {
            lines.push(format!(
                "{} gained {} EXP totaling to {} EXP",
                self.name, self.granted, total
            ));
        }
        lines
    }
}

/// Outcome of one completed training cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingReport {
    pub trainer: String,
    pub training_type: TrainingType,
    pub results: Vec<MemberResult>,
}

impl TrainingReport {
    pub fn new(trainer: impl Into<String>, training_type: TrainingType) -> Self {
        Self {
            trainer: trainer.into(),
            training_type,
            results: Vec::new(),
        }
    }

    pub fn header(&self) -> String {
        format!("{} has completed their daily training!", self.trainer)
    }

    /// Header followed by every member's notes and result line
    pub fn lines(&self) -> Vec<String> {
        std::iter::once(self.header())
            .chain(self.results.iter().flat_map(MemberResult::lines))
            .collect()
    }

    pub fn compose(&self) -> String {
        self.lines().join("\n")
    }

    pub fn total_granted(&self) -> u64 {
        self.results.iter().map(|r| u64::from(r.granted)).sum()
    }

    pub fn result_for(&self, member: &ActorId) -> Option<&MemberResult> {
        self.results.iter().find(|r| &r.member == member)
    }
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.compose())
    }
}
