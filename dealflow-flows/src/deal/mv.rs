//! MoveDeal command

use crate::context::FlowContext;
use crate::error::FlowError;
use crate::types::{DealId, Ordinal, Position, StageId};
use dealflow_operations::{async_trait, Execute, ExecutionResult, LogEntry, Operation, Value};
use serde::{Deserialize, Serialize};

/// Move a deal to a new stage and position
#[derive(Debug, Deserialize, Serialize)]
pub struct MoveDeal {
    /// The deal ID to move
    pub id: DealId,
    /// The target stage
    pub stage: StageId,
    /// Target ordinal; defaults to the end of the stage
    pub ordinal: Option<Ordinal>,
}

impl MoveDeal {
    /// Create a MoveDeal command targeting the end of a stage
    pub fn to_stage(id: impl Into<DealId>, stage: impl Into<StageId>) -> Self {
        Self {
            id: id.into(),
            stage: stage.into(),
            ordinal: None,
        }
    }

    /// Set an explicit ordinal
    pub fn at_ordinal(mut self, ordinal: Ordinal) -> Self {
        self.ordinal = Some(ordinal);
        self
    }
}

impl Operation for MoveDeal {
    fn verb(&self) -> &'static str {
        "move"
    }
    fn noun(&self) -> &'static str {
        "deal"
    }
    fn description(&self) -> &'static str {
        "Move a deal to a different stage or position"
    }
}

#[async_trait]
impl Execute<FlowContext, FlowError> for MoveDeal {
    async fn execute(&self, ctx: &FlowContext) -> ExecutionResult<Value, FlowError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result = async {
            let mut deal = ctx.read_deal(&self.id).await?;

            if !ctx.stage_exists(&self.stage) {
                return Err(FlowError::StageNotFound {
                    id: self.stage.to_string(),
                });
            }

            // Calculate ordinal if not specified (default = at end)
            let ordinal = match &self.ordinal {
                Some(ordinal) => ordinal.clone(),
                None => {
                    let deals = ctx.read_all_deals().await?;
                    let last = deals
                        .iter()
                        .filter(|d| d.id != self.id && d.position.stage == self.stage)
                        .map(|d| &d.position.ordinal)
                        .max()
                        .cloned();
                    match last {
                        Some(last) => Ordinal::after(&last),
                        None => Ordinal::first(),
                    }
                }
            };

            deal.position = Position::new(self.stage.clone(), ordinal);
            deal.touch();

            ctx.write_deal(&deal).await?;
            Ok(serde_json::to_value(&deal)?)
        }
        .await;

        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(value) => ExecutionResult::Logged {
                value: value.clone(),
                log_entry: LogEntry::new(self.op_string(), input, value, None, duration_ms),
            },
            Err(error) => {
                let error_msg = error.to_string();
                ExecutionResult::Failed {
                    error,
                    log_entry: Some(LogEntry::new(
                        self.op_string(),
                        input,
                        serde_json::json!({"error": error_msg}),
                        None,
                        duration_ms,
                    )),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deal::AddDeal;
    use crate::flow::InitFlow;
    use tempfile::TempDir;

    async fn setup() -> (TempDir, FlowContext) {
        let temp = TempDir::new().unwrap();
        let ctx = FlowContext::new(temp.path().join(".dealflow"));
        InitFlow::new("Test")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        (temp, ctx)
    }

    #[tokio::test]
    async fn test_move_deal_to_stage() {
        let (_temp, ctx) = setup().await;

        let added = AddDeal::new("Acme")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let id = added["id"].as_str().unwrap();

        let result = MoveDeal::to_stage(id, "proposal")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["position"]["stage"], "proposal");
    }

    #[tokio::test]
    async fn test_move_deal_lands_after_stage_occupants() {
        let (_temp, ctx) = setup().await;

        let resident = AddDeal::new("Resident")
            .in_stage("proposal")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let mover = AddDeal::new("Mover")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let moved = MoveDeal::to_stage(mover["id"].as_str().unwrap(), "proposal")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let resident_ord = resident["position"]["ordinal"].as_str().unwrap();
        let moved_ord = moved["position"]["ordinal"].as_str().unwrap();
        assert!(moved_ord > resident_ord);
    }

    #[tokio::test]
    async fn test_move_deal_invalid_stage() {
        let (_temp, ctx) = setup().await;

        let added = AddDeal::new("Acme")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let id = added["id"].as_str().unwrap();

        let result = MoveDeal::to_stage(id, "nonexistent")
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(FlowError::StageNotFound { .. })));
    }
}
