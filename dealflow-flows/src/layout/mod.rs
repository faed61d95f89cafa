//! Form layout commands
//!
//! These commands adapt drag-and-drop events into the pure rearrangement
//! functions of `dealflow-layout` and persist the repacked result. A failed
//! rearrangement leaves the stored layout untouched.

mod get;
mod move_field;
mod set_width;

pub use get::GetFormLayout;
pub use move_field::MoveFormField;
pub use set_width::SetFieldWidth;
