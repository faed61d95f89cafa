//! MoveFormField command

use crate::context::FlowContext;
use crate::error::FlowError;
use crate::types::FormLayout;
use dealflow_operations::{async_trait, Execute, ExecutionResult, LogEntry, Operation, Value};
use serde::{Deserialize, Serialize};

/// Move a field to a new position in an entity's form, repacking rows
///
/// Translates a drag event's source/destination indices into the pure
/// rearrangement in `dealflow-layout` and persists the result.
#[derive(Debug, Deserialize, Serialize)]
pub struct MoveFormField {
    /// The entity type (e.g. "deal")
    pub entity: String,
    /// Index the field was dragged from
    pub from_index: usize,
    /// Index the field was dropped at
    pub to_index: usize,
}

impl MoveFormField {
    pub fn new(entity: impl Into<String>, from_index: usize, to_index: usize) -> Self {
        Self {
            entity: entity.into(),
            from_index,
            to_index,
        }
    }
}

impl Operation for MoveFormField {
    fn verb(&self) -> &'static str {
        "move"
    }
    fn noun(&self) -> &'static str {
        "field"
    }
    fn description(&self) -> &'static str {
        "Move a field within an entity's form layout"
    }
}

#[async_trait]
impl Execute<FlowContext, FlowError> for MoveFormField {
    async fn execute(&self, ctx: &FlowContext) -> ExecutionResult<Value, FlowError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value, FlowError> = async {
            let layout = ctx.read_layout(&self.entity).await?;
            let fields =
                dealflow_layout::move_field(&layout.fields, self.from_index, self.to_index)?;
            let updated = FormLayout {
                entity: layout.entity,
                fields,
            };
            ctx.write_layout(&updated).await?;
            Ok(serde_json::to_value(&updated)?)
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
