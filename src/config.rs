use crate::errors::ConfigError;
use schema::TrainingType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

// Default number of training instances and party slots
pub const DEFAULT_INSTANCE_COUNT: usize = 6;
pub const DEFAULT_PARTY_CAPACITY: usize = 6;

/// Maps each training type to the effect document granted by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainingCatalog {
    effects: BTreeMap<TrainingType, String>,
}

impl Default for TrainingCatalog {
    fn default() -> Self {
        let effects = [
            (TrainingType::AgilityTraining, "dxO8qRP5QvYxVXxH"),
            (TrainingType::BrutalTraining, "GeViS4FLUZheGYB2"),
            (TrainingType::FocusedTraining, "Zg1mu7XntZ0YInPU"),
            (TrainingType::InspiredTraining, "C5YgcvxK8CyqLXji"),
        ]
        .into_iter()
        .map(|(kind, id)| (kind, id.to_string()))
        .collect();

        Self { effects }
    }
}

impl TrainingCatalog {
    /// Effect granted by a training type. `None` never grants an effect.
    pub fn effect_for(&self, training_type: TrainingType) -> Option<&str> {
        if training_type == TrainingType::None {
            return None;
        }
        self.effects
            .get(&training_type)
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }
}

/// Tunables for a roster view and its training cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of training instances whose experience is split among selected pokemon.
    /// Also the capacity of the training selection.
    pub instance_count: usize,
    pub party_capacity: usize,
    pub catalog: TrainingCatalog,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            instance_count: DEFAULT_INSTANCE_COUNT,
            party_capacity: DEFAULT_PARTY_CAPACITY,
            catalog: TrainingCatalog::default(),
        }
    }
}

impl TrainingConfig {
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: TrainingConfig = ron::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_ron_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.instance_count == 0 {
            return Err(ConfigError::Invalid(
                "instance_count must be at least 1".to_string(),
            ));
        }
        if self.party_capacity == 0 {
            return Err(ConfigError::Invalid(
                "party_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = TrainingConfig::default();
        assert_eq!(config.instance_count, 6);
        assert_eq!(config.party_capacity, 6);
        assert_eq!(
            config.catalog.effect_for(TrainingType::BrutalTraining),
            Some("GeViS4FLUZheGYB2")
        );
        assert_eq!(config.catalog.effect_for(TrainingType::None), None);
    }

    #[test]
    fn test_partial_ron_falls_back_to_defaults() {
        let config = TrainingConfig::from_ron_str("(instance_count: 4)").unwrap();
        assert_eq!(config.instance_count, 4);
        assert_eq!(config.party_capacity, 6);
        assert_eq!(config.catalog, TrainingCatalog::default());
    }

    #[test]
    fn test_custom_catalog_replaces_defaults() {
        let config =
            TrainingConfig::from_ron_str(r#"(catalog: { AgilityTraining: "fast-feet" })"#)
                .unwrap();
        assert_eq!(
            config.catalog.effect_for(TrainingType::AgilityTraining),
            Some("fast-feet")
        );
        assert_eq!(config.catalog.effect_for(TrainingType::FocusedTraining), None);
    }

    #[test]
    fn test_zero_instances_rejected() {
        let result = TrainingConfig::from_ron_str("(instance_count: 0)");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_ron_is_parse_error() {
        let result = TrainingConfig::from_ron_str("(instance_count: six)");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
