//! The Operation and Execute traits

use crate::ExecutionResult;
use async_trait::async_trait;
use serde_json::Value;

/// Metadata for a command: the verb/noun pair it logs under.
///
/// Implemented by hand on each command struct — three one-line methods.
pub trait Operation {
    fn verb(&self) -> &'static str;
    fn noun(&self) -> &'static str;
    fn description(&self) -> &'static str;

    /// Canonical op string (e.g., "add deal", "move deal")
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Execute a command against a context of type `C`, failing with `E`.
#[async_trait]
pub trait Execute<C, E> {
    async fn execute(&self, ctx: &C) -> ExecutionResult<Value, E>;
}
