//! InitFlow command

use crate::context::FlowContext;
use crate::error::FlowError;
use crate::types::{Flow, FormLayout};
use dealflow_fields::deal_defaults;
use dealflow_layout::LayoutField;
use dealflow_operations::{async_trait, Execute, ExecutionResult, LogEntry, Operation, Value};
use serde::{Deserialize, Serialize};

/// Initialize a new flow with default stages and the default deal form layout
#[derive(Debug, Deserialize, Serialize)]
pub struct InitFlow {
    /// The flow display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
}

impl InitFlow {
    /// Create a new InitFlow command
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Operation for InitFlow {
    fn verb(&self) -> &'static str {
        "init"
    }
    fn noun(&self) -> &'static str {
        "flow"
    }
    fn description(&self) -> &'static str {
        "Initialize a new flow with default stages"
    }
}

/// The built-in deal form, derived from the default field definitions in
/// entity-template order.
fn default_deal_layout() -> FormLayout {
    let defaults = deal_defaults();
    let entries: Vec<LayoutField> = defaults
        .entities()
        .iter()
        .find(|e| e.name == "deal")
        .map(|entity| {
            entity
                .fields
                .iter()
                .filter_map(|name| defaults.fields().iter().find(|f| &f.name == name))
                .map(|def| def.layout_field())
                .collect()
        })
        .unwrap_or_default();
    FormLayout::new("deal", entries)
}

#[async_trait]
impl Execute<FlowContext, FlowError> for InitFlow {
    async fn execute(&self, ctx: &FlowContext) -> ExecutionResult<Value, FlowError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result = async {
            if ctx.is_initialized() {
                return Err(FlowError::AlreadyExists {
                    path: ctx.root().to_path_buf(),
                });
            }

            ctx.create_directories().await?;

            let mut flow = Flow::new(self.name.clone());
            if let Some(ref description) = self.description {
                flow = flow.with_description(description.clone());
            }
            ctx.write_flow(&flow).await?;

            for stage in Flow::default_stages() {
                ctx.write_stage(&stage).await?;
            }

            ctx.write_layout(&default_deal_layout()).await?;

            Ok(serde_json::to_value(&flow)?)
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
