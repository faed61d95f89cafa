//! Deal type - one card moving through the pipeline

use super::ids::DealId;
use super::position::Position;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A deal is one opportunity moving through the flow's stages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deal {
    pub id: DealId,
    pub title: String,
    /// Deal value in minor currency units (e.g. cents)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub position: Position,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Deal {
    /// Create a new deal at the given position
    pub fn new(title: impl Into<String>, position: Position) -> Self {
        let now = Utc::now();
        Self {
            id: DealId::new(),
            title: title.into(),
            amount: None,
            description: None,
            position,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the amount
    pub fn with_amount(mut self, amount: i64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Bump the updated timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
