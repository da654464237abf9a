use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The kind of daily training a trainer ran. Each kind except `None`
/// may grant a bonus effect to every trained pokemon.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
    AsRefStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum TrainingType {
    AgilityTraining,
    BrutalTraining,
    FocusedTraining,
    InspiredTraining,
    #[default]
    None,
}

impl TrainingType {
    /// Parse a submitted training selection; anything unrecognised is `None`.
    pub fn from_form_value(value: &str) -> Self {
        value.trim().parse().unwrap_or(TrainingType::None)
    }
}
