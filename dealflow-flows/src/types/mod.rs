//! Core types for the flow engine

mod deal;
mod flow;
mod ids;
mod layout;
mod position;

// Re-export all types
pub use deal::Deal;
pub use flow::{Flow, Stage};
pub use ids::{DealId, StageId};
pub use layout::FormLayout;
pub use position::{Ordinal, Position};
