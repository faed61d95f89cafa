//! # dealflow operations
//!
//! This crate provides the command seam shared by dealflow's storage-backed
//! crates. Commands are structs where the fields ARE the parameters; each
//! command implements [`Operation`] (metadata) and [`Execute`] (behavior)
//! against its crate's context type.
//!
//! ## Example
//!
//! ```ignore
//! use dealflow_operations::*;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct AddDeal {
//!     pub title: String,
//! }
//!
//! impl Operation for AddDeal {
//!     fn verb(&self) -> &'static str { "add" }
//!     fn noun(&self) -> &'static str { "deal" }
//!     fn description(&self) -> &'static str { "Create a new deal" }
//! }
//!
//! #[async_trait]
//! impl Execute<FlowContext, FlowError> for AddDeal {
//!     async fn execute(&self, ctx: &FlowContext) -> ExecutionResult<Value, FlowError> {
//!         // implementation returns ExecutionResult::Logged or Unlogged
//!     }
//! }
//! ```

mod execution_result;
mod log;
mod operation;

pub use execution_result::ExecutionResult;
pub use log::LogEntry;
pub use operation::{Execute, Operation};

// Re-export for use in implementations
pub use async_trait::async_trait;
pub use serde_json::Value;
