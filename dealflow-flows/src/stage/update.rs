//! UpdateStage command

use crate::context::FlowContext;
use crate::error::FlowError;
use crate::types::StageId;
use dealflow_operations::{async_trait, Execute, ExecutionResult, LogEntry, Operation, Value};
use serde::{Deserialize, Serialize};

/// Update a stage's name, order, or win probability
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateStage {
    /// The stage ID to update
    pub id: StageId,
    /// New display name
    pub name: Option<String>,
    /// New position in stage order
    pub order: Option<usize>,
    /// New win probability in percent
    pub probability: Option<u8>,
}

impl UpdateStage {
    pub fn new(id: impl Into<StageId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            order: None,
            probability: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_probability(mut self, probability: u8) -> Self {
        self.probability = Some(probability);
        self
    }
}

impl Operation for UpdateStage {
    fn verb(&self) -> &'static str {
        "update"
    }
    fn noun(&self) -> &'static str {
        "stage"
    }
    fn description(&self) -> &'static str {
        "Update a stage's name, order, or probability"
    }
}

#[async_trait]
impl Execute<FlowContext, FlowError> for UpdateStage {
    async fn execute(&self, ctx: &FlowContext) -> ExecutionResult<Value, FlowError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result = async {
            let mut stage = ctx.read_stage(&self.id).await?;

            if let Some(p) = self.probability {
                if p > 100 {
                    return Err(FlowError::invalid_value(
                        "probability",
                        format!("{p} is not a percentage"),
                    ));
                }
                stage.probability = Some(p);
            }
            if let Some(ref name) = self.name {
                stage.name = name.clone();
            }
            if let Some(order) = self.order {
                stage.order = order;
            }

            ctx.write_stage(&stage).await?;

            let mut result = serde_json::to_value(&stage)?;
            result["id"] = serde_json::json!(&stage.id);
            Ok(result)
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
    async fn test_update_stage_name_and_probability() {
        let (_temp, ctx) = setup().await;

        let result = UpdateStage::new("qualified")
            .with_name("Qualified Out")
            .with_probability(10)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["name"], "Qualified Out");
        assert_eq!(result["probability"], 10);

        let stored = ctx
            .read_stage(&StageId::from("qualified"))
            .await
            .unwrap();
        assert_eq!(stored.name, "Qualified Out");
    }

    #[tokio::test]
    async fn test_update_missing_stage() {
        let (_temp, ctx) = setup().await;

        let result = UpdateStage::new("nonexistent")
            .with_name("Ghost")
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(FlowError::StageNotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_stage_bad_probability_leaves_stage_unchanged() {
        let (_temp, ctx) = setup().await;

        let result = UpdateStage::new("qualified")
            .with_probability(200)
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(FlowError::InvalidValue { .. })));

        let stored = ctx
            .read_stage(&StageId::from("qualified"))
            .await
            .unwrap();
        assert_eq!(stored.probability, Some(25));
    }
}
