//! GetFlow command

use crate::context::FlowContext;
use crate::error::FlowError;
use dealflow_operations::{async_trait, Execute, ExecutionResult, Operation, Value};
use serde::{Deserialize, Serialize};

/// Read the flow metadata together with its stages, in pipeline order
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GetFlow;

impl GetFlow {
    pub fn new() -> Self {
        Self
    }
}

impl Operation for GetFlow {
    fn verb(&self) -> &'static str {
        "get"
    }
    fn noun(&self) -> &'static str {
        "flow"
    }
    fn description(&self) -> &'static str {
        "Read flow metadata and its stages"
    }
}

#[async_trait]
impl Execute<FlowContext, FlowError> for GetFlow {
    async fn execute(&self, ctx: &FlowContext) -> ExecutionResult<Value, FlowError> {
        let result = async {
            let flow = ctx.read_flow().await?;
            let mut stages = ctx.read_all_stages().await?;
            stages.sort_by_key(|s| s.order);

            let stage_values: Vec<Value> = stages
                .iter()
                .map(|stage| {
                    let mut value = serde_json::to_value(stage)?;
                    value["id"] = serde_json::json!(&stage.id);
                    Ok(value)
                })
                .collect::<Result<_, FlowError>>()?;

            Ok(serde_json::json!({
                "name": flow.name,
                "description": flow.description,
                "stages": stage_values,
            }))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::InitFlow;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_get_flow_lists_stages_in_order() {
        let temp = TempDir::new().unwrap();
        let ctx = FlowContext::new(temp.path().join(".dealflow"));
        InitFlow::new("Sales")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let result = GetFlow::new().execute(&ctx).await.into_result().unwrap();
        assert_eq!(result["name"], "Sales");
        let stages = result["stages"].as_array().unwrap();
        assert_eq!(stages.len(), 5);
        assert_eq!(stages[0]["id"], "lead");
        assert_eq!(stages[4]["id"], "lost");
    }

    #[tokio::test]
    async fn test_get_flow_uninitialized() {
        let temp = TempDir::new().unwrap();
        let ctx = FlowContext::new(temp.path().join(".dealflow"));
        let result = GetFlow::new().execute(&ctx).await.into_result();
        assert!(matches!(result, Err(FlowError::NotInitialized { .. })));
    }
}
