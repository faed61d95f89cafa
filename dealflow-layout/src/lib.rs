//! Row-packing for form-field layouts
//!
//! `dealflow-layout` is a standalone, pure crate that assigns row numbers
//! (`order_index`) to an ordered list of form fields. Fields declare how much
//! of a row they consume (`full`, `half`, `third`); consecutive fields that
//! fit together share a row and receive the same `order_index`.
//!
//! # Architecture
//!
//! - **Pure**: no I/O, no state between calls — input in, fresh output out
//! - **Greedy left-to-right**: visual order is authoritative and never
//!   rearranged to improve packing
//! - **Caller-owned persistence**: consumers decide when a packed layout is
//!   committed and where it lives

pub mod error;
pub mod packer;
pub mod types;

pub use error::{LayoutError, Result};
pub use packer::{move_field, pack, set_width};
pub use types::{FieldWidth, LayoutField};
