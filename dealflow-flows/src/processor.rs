//! Runs commands and persists their log entries.

use crate::context::FlowContext;
use crate::error::{FlowError, Result};
use dealflow_operations::{Execute, Value};
use tracing::debug;

/// Executes commands against a [`FlowContext`] and appends each produced
/// log entry to the activity log.
///
/// Commands can also be executed directly via [`Execute::execute`]; the
/// processor is for callers that want the audit trail written.
pub struct FlowOperationProcessor {
    actor: Option<String>,
}

impl FlowOperationProcessor {
    /// Create a processor with no actor attribution
    pub fn new() -> Self {
        Self { actor: None }
    }

    /// Attribute executed operations to an actor (user or agent name)
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Execute a command, persist its log entry, and return its value
    pub async fn run<Op>(&self, ctx: &FlowContext, op: &Op) -> Result<Value>
    where
        Op: Execute<FlowContext, FlowError> + Sync,
    {
        let (result, log_entry) = op.execute(ctx).await.split();

        if let Some(mut entry) = log_entry {
            if let Some(ref actor) = self.actor {
                entry = entry.with_actor(actor.clone());
            }
            debug!(op = %entry.op, duration_ms = entry.duration_ms, "recording operation");
            ctx.append_activity(&entry).await?;
        }

        result
    }
}

impl Default for FlowOperationProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deal::AddDeal;
    use crate::flow::InitFlow;
    use crate::stage::ListStages;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_processor_writes_activity() {
        let temp = TempDir::new().unwrap();
        let ctx = FlowContext::new(temp.path().join(".dealflow"));
        let processor = FlowOperationProcessor::new().with_actor("alice");

        processor.run(&ctx, &InitFlow::new("Test")).await.unwrap();
        processor.run(&ctx, &AddDeal::new("Acme")).await.unwrap();

        let entries = ctx.read_activity(None).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].op, "add deal");
        assert_eq!(entries[0].actor.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_read_only_commands_not_logged() {
        let temp = TempDir::new().unwrap();
        let ctx = FlowContext::new(temp.path().join(".dealflow"));
        let processor = FlowOperationProcessor::new();

        processor.run(&ctx, &InitFlow::new("Test")).await.unwrap();
        processor.run(&ctx, &ListStages::new()).await.unwrap();

        let entries = ctx.read_activity(None).await.unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_failures_are_logged_and_returned() {
        let temp = TempDir::new().unwrap();
        let ctx = FlowContext::new(temp.path().join(".dealflow"));
        let processor = FlowOperationProcessor::new();

        processor.run(&ctx, &InitFlow::new("Test")).await.unwrap();
        let result = processor.run(&ctx, &InitFlow::new("Again")).await;
        assert!(matches!(result, Err(FlowError::AlreadyExists { .. })));

        let entries = ctx.read_activity(None).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].output["error"].is_string());
    }
}
