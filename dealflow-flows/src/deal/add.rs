//! AddDeal command

use crate::context::FlowContext;
use crate::error::FlowError;
use crate::types::{Deal, Ordinal, Position, StageId};
use dealflow_operations::{async_trait, Execute, ExecutionResult, LogEntry, Operation, Value};
use serde::{Deserialize, Serialize};

/// Create a new deal at the end of a stage
#[derive(Debug, Deserialize, Serialize)]
pub struct AddDeal {
    /// The deal title
    pub title: String,
    /// Target stage; defaults to the first stage of the pipeline
    pub stage: Option<StageId>,
    /// Deal value in minor currency units
    pub amount: Option<i64>,
    /// Optional description
    pub description: Option<String>,
}

impl AddDeal {
    /// Create a new AddDeal command
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            stage: None,
            amount: None,
            description: None,
        }
    }

    /// Set the target stage
    pub fn in_stage(mut self, stage: impl Into<StageId>) -> Self {
        self.stage = Some(stage.into());
        self
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
}

impl Operation for AddDeal {
    fn verb(&self) -> &'static str {
        "add"
    }
    fn noun(&self) -> &'static str {
        "deal"
    }
    fn description(&self) -> &'static str {
        "Create a new deal"
    }
}

#[async_trait]
impl Execute<FlowContext, FlowError> for AddDeal {
    async fn execute(&self, ctx: &FlowContext) -> ExecutionResult<Value, FlowError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result = async {
            let stage = match &self.stage {
                Some(stage) => {
                    if !ctx.stage_exists(stage) {
                        return Err(FlowError::StageNotFound {
                            id: stage.to_string(),
                        });
                    }
                    stage.clone()
                }
                None => {
                    let stages = ctx.read_all_stages().await?;
                    stages
                        .into_iter()
                        .min_by_key(|s| s.order)
                        .map(|s| s.id)
                        .ok_or_else(|| {
                            FlowError::invalid_value("stage", "flow has no stages")
                        })?
                }
            };

            // Place at the end of the stage
            let deals = ctx.read_all_deals().await?;
            let last_ordinal = deals
                .iter()
                .filter(|d| d.position.stage == stage)
                .map(|d| &d.position.ordinal)
                .max()
                .cloned();
            let ordinal = match last_ordinal {
                Some(last) => Ordinal::after(&last),
                None => Ordinal::first(),
            };

            let mut deal = Deal::new(self.title.clone(), Position::new(stage, ordinal));
            deal.amount = self.amount;
            deal.description = self.description.clone();

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
