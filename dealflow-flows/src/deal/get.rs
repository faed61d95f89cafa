//! GetDeal command

use crate::context::FlowContext;
use crate::error::FlowError;
use crate::types::DealId;
use dealflow_operations::{async_trait, Execute, ExecutionResult, Operation, Value};
use serde::{Deserialize, Serialize};

/// Read a single deal
#[derive(Debug, Deserialize, Serialize)]
pub struct GetDeal {
    /// The deal ID
    pub id: DealId,
}

impl GetDeal {
    pub fn new(id: impl Into<DealId>) -> Self {
        Self { id: id.into() }
    }
}

impl Operation for GetDeal {
    fn verb(&self) -> &'static str {
        "get"
    }
    fn noun(&self) -> &'static str {
        "deal"
    }
    fn description(&self) -> &'static str {
        "Read a single deal"
    }
}

#[async_trait]
impl Execute<FlowContext, FlowError> for GetDeal {
    async fn execute(&self, ctx: &FlowContext) -> ExecutionResult<Value, FlowError> {
        let result = async {
            let deal = ctx.read_deal(&self.id).await?;
            Ok(serde_json::to_value(&deal)?)
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
