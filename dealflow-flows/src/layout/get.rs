//! GetFormLayout command

use crate::context::FlowContext;
use crate::error::FlowError;
use dealflow_operations::{async_trait, Execute, ExecutionResult, Operation, Value};
use serde::{Deserialize, Serialize};

/// Read the packed form layout for an entity type
#[derive(Debug, Deserialize, Serialize)]
pub struct GetFormLayout {
    /// The entity type (e.g. "deal")
    pub entity: String,
}

impl GetFormLayout {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
        }
    }
}

impl Operation for GetFormLayout {
    fn verb(&self) -> &'static str {
        "get"
    }
    fn noun(&self) -> &'static str {
        "layout"
    }
    fn description(&self) -> &'static str {
        "Read the form layout for an entity type"
    }
}

#[async_trait]
impl Execute<FlowContext, FlowError> for GetFormLayout {
    async fn execute(&self, ctx: &FlowContext) -> ExecutionResult<Value, FlowError> {
        let result = async {
            let layout = ctx.read_layout(&self.entity).await?;
            Ok(serde_json::to_value(&layout)?)
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
