//! ListStages command

use crate::context::FlowContext;
use crate::error::FlowError;
use dealflow_operations::{async_trait, Execute, ExecutionResult, Operation, Value};
use serde::{Deserialize, Serialize};

/// List all stages in pipeline order
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListStages;

impl ListStages {
    pub fn new() -> Self {
        Self
    }
}

impl Operation for ListStages {
    fn verb(&self) -> &'static str {
        "list"
    }
    fn noun(&self) -> &'static str {
        "stage"
    }
    fn description(&self) -> &'static str {
        "List all stages in pipeline order"
    }
}

#[async_trait]
impl Execute<FlowContext, FlowError> for ListStages {
    async fn execute(&self, ctx: &FlowContext) -> ExecutionResult<Value, FlowError> {
        let result = async {
            let mut stages = ctx.read_all_stages().await?;
            stages.sort_by_key(|s| s.order);

            let values: Vec<Value> = stages
                .iter()
                .map(|stage| {
                    let mut value = serde_json::to_value(stage)?;
                    value["id"] = serde_json::json!(&stage.id);
                    Ok(value)
                })
                .collect::<Result<_, FlowError>>()?;

            Ok(Value::Array(values))
        }
        .await;

        match result {
            Ok(value) => ExecutionResult::Unlogged { value },
            Err(error) => ExecutionResult::Failed {
                error,
                log_entry: None,
            },
        }
    }
}
