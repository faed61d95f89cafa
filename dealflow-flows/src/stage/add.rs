//! AddStage command

use crate::context::FlowContext;
use crate::error::FlowError;
use crate::types::{Stage, StageId};
use dealflow_operations::{async_trait, Execute, ExecutionResult, LogEntry, Operation, Value};
use serde::{Deserialize, Serialize};

/// Add a new stage to the flow
#[derive(Debug, Deserialize, Serialize)]
pub struct AddStage {
    /// The stage ID (slug)
    pub id: StageId,
    /// The stage display name
    pub name: String,
    /// Optional position in stage order
    pub order: Option<usize>,
    /// Optional win probability in percent
    pub probability: Option<u8>,
}

impl AddStage {
    /// Create a new AddStage command
    pub fn new(id: impl Into<StageId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            order: None,
            probability: None,
        }
    }

    /// Set the order (position in the pipeline)
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }

    /// Set the win probability
    pub fn with_probability(mut self, probability: u8) -> Self {
        self.probability = Some(probability);
        self
    }
}

impl Operation for AddStage {
    fn verb(&self) -> &'static str {
        "add"
    }
    fn noun(&self) -> &'static str {
        "stage"
    }
    fn description(&self) -> &'static str {
        "Add a new stage to the flow"
    }
}

#[async_trait]
impl Execute<FlowContext, FlowError> for AddStage {
    async fn execute(&self, ctx: &FlowContext) -> ExecutionResult<Value, FlowError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result = async {
            if ctx.stage_exists(&self.id) {
                return Err(FlowError::duplicate_id("stage", self.id.to_string()));
            }

            if let Some(p) = self.probability {
                if p > 100 {
                    return Err(FlowError::invalid_value(
                        "probability",
                        format!("{p} is not a percentage"),
                    ));
                }
            }

            let order = match self.order {
                Some(order) => order,
                None => {
                    let stages = ctx.read_all_stages().await?;
                    stages.iter().map(|s| s.order).max().map(|o| o + 1).unwrap_or(0)
                }
            };

            let mut stage = Stage::new(self.id.clone(), self.name.clone(), order);
            stage.probability = self.probability;

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
