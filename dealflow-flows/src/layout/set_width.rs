//! SetFieldWidth command

use crate::context::FlowContext;
use crate::error::FlowError;
use crate::types::FormLayout;
use dealflow_layout::FieldWidth;
use dealflow_operations::{async_trait, Execute, ExecutionResult, LogEntry, Operation, Value};
use serde::{Deserialize, Serialize};

/// Change a field's width in an entity's form, repacking rows
#[derive(Debug, Deserialize, Serialize)]
pub struct SetFieldWidth {
    /// The entity type (e.g. "deal")
    pub entity: String,
    /// The field to resize
    pub field_id: String,
    /// The new width
    pub width: FieldWidth,
}

impl SetFieldWidth {
    pub fn new(entity: impl Into<String>, field_id: impl Into<String>, width: FieldWidth) -> Self {
        Self {
            entity: entity.into(),
            field_id: field_id.into(),
            width,
        }
    }
}

impl Operation for SetFieldWidth {
    fn verb(&self) -> &'static str {
        "resize"
    }
    fn noun(&self) -> &'static str {
        "field"
    }
    fn description(&self) -> &'static str {
        "Change a field's width in an entity's form layout"
    }
}

#[async_trait]
impl Execute<FlowContext, FlowError> for SetFieldWidth {
    async fn execute(&self, ctx: &FlowContext) -> ExecutionResult<Value, FlowError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value, FlowError> = async {
            let layout = ctx.read_layout(&self.entity).await?;
            let fields = dealflow_layout::set_width(&layout.fields, &self.field_id, self.width)?;
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
