//! Pipeline engine with file-backed storage
//!
//! This crate provides a kanban-style pipeline ("flow") implementation that
//! stores all data as JSON files in a `.dealflow` directory. Deals move
//! through ordered stages; each flow also carries the packed form layouts
//! used to edit its entities.
//!
//! ## Overview
//!
//! - **One project = one flow** - The `.dealflow` directory lives at the
//!   project root
//! - **File-per-entity** - Stages, deals, and form layouts are individual
//!   files
//! - **Git-friendly** - Human-readable JSON, no binary formats
//! - **Audited** - Per-deal JSONL logs plus a global activity log record who
//!   changed what and how long it took
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use dealflow_flows::{flow::InitFlow, deal::AddDeal, Execute, FlowContext};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Initialize a new flow
//! let ctx = FlowContext::new("/path/to/project/.dealflow");
//! InitFlow::new("Enterprise Sales").execute(&ctx).await.into_result()?;
//!
//! // Add a deal to the first stage
//! let result = AddDeal::new("Acme renewal")
//!     .with_amount(250_000_00)
//!     .execute(&ctx)
//!     .await
//!     .into_result()?;
//!
//! println!("Created deal: {}", result["id"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Storage Structure
//!
//! ```text
//! project/
//! └── .dealflow/
//!     ├── flow.json            # Flow metadata
//!     ├── stages/
//!     │   └── {id}.json        # Stage state (id = slug, from filename)
//!     ├── deals/
//!     │   ├── {id}.json        # Deal state
//!     │   └── {id}.jsonl       # Per-deal operation log
//!     ├── layouts/
//!     │   └── {entity}.json    # Packed form layout per entity type
//!     └── activity/
//!         └── current.jsonl    # Global operation log
//! ```

mod context;
mod error;
mod processor;
pub mod types;

// Command modules
pub mod deal;
pub mod flow;
pub mod layout;
pub mod stage;

// Re-export the execution seam from the operations crate
pub use dealflow_operations::{async_trait, Execute, ExecutionResult, LogEntry, Operation};

pub use context::{FlowContext, FlowLock};
pub use error::{FlowError, Result};
pub use processor::FlowOperationProcessor;

// Re-export commonly used types
pub use types::{Deal, DealId, Flow, FormLayout, Ordinal, Position, Stage, StageId};
