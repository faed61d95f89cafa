//! Flow-level types: Flow and Stage

use super::ids::StageId;
use serde::{Deserialize, Serialize};

/// The flow - just metadata (name + description).
/// Stages and deals are stored as individual files for git-friendly merging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flow {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Flow {
    /// Create a new flow with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Add a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The default stages for a new flow
    pub fn default_stages() -> Vec<Stage> {
        vec![
            Stage::new("lead", "Lead", 0),
            Stage::new("qualified", "Qualified", 1).with_probability(25),
            Stage::new("proposal", "Proposal", 2).with_probability(60),
            Stage::new("won", "Won", 3).with_probability(100),
            Stage::new("lost", "Lost", 4).with_probability(0),
        ]
    }
}

/// A stage is one step of the pipeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stage {
    /// Restored from the filename on read
    #[serde(skip)]
    pub id: StageId,
    pub name: String,
    pub order: usize,
    /// Win likelihood in percent, 0-100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<u8>,
}

impl Stage {
    /// Create a new stage
    pub fn new(id: impl Into<StageId>, name: impl Into<String>, order: usize) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            order,
            probability: None,
        }
    }

    /// Set the win probability
    pub fn with_probability(mut self, probability: u8) -> Self {
        self.probability = Some(probability);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_creation() {
        let flow = Flow::new("Enterprise Sales");
        assert_eq!(flow.name, "Enterprise Sales");
        assert!(flow.description.is_none());
    }

    #[test]
    fn test_flow_with_description() {
        let flow = Flow::new("Sales").with_description("Mid-market pipeline");
        assert_eq!(flow.description, Some("Mid-market pipeline".into()));
    }

    #[test]
    fn test_default_stages() {
        let stages = Flow::default_stages();
        assert_eq!(stages.len(), 5);
        assert_eq!(stages[0].id.as_str(), "lead");
        assert_eq!(stages[3].probability, Some(100));
        assert_eq!(stages[4].id.as_str(), "lost");
    }

    #[test]
    fn test_stage_id_not_serialized() {
        let stage = Stage::new("lead", "Lead", 0);
        let json = serde_json::to_string(&stage).unwrap();
        assert!(!json.contains("lead\""));
        let parsed: Stage = serde_json::from_str(&json).unwrap();
        // id comes back empty; storage restores it from the filename
        assert_eq!(parsed.id, StageId::default());
        assert_eq!(parsed.name, "Lead");
    }
}
