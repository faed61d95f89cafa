//! Custom field definitions and entity templates
//!
//! `dealflow-fields` is a standalone, schema-only crate that manages the
//! field definitions and entity templates behind dealflow's configurable
//! forms. It knows nothing about flows, stages, or deals — consumers provide
//! their own built-in definitions via `with_defaults()`.
//!
//! # Architecture
//!
//! - **Schema-only**: owns field definitions and entity templates, not values
//! - **YAML on disk**: one `.yaml` file per field definition, one per entity
//!   template
//! - **Consumer-agnostic**: takes a `Path`, consumers decide where it lives
//! - **Default seeding**: `with_defaults()` writes defaults that don't exist
//!   and preserves customizations

pub mod context;
pub mod defaults;
pub mod error;
pub mod types;

pub use context::{FieldDefaults, FieldsContext, FieldsContextBuilder};
pub use defaults::deal_defaults;
pub use error::{FieldsError, Result};
pub use types::{EntityDef, FieldDef, FieldKind, SelectOption};
