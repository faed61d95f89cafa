//! Stage commands

mod add;
mod list;
mod update;

pub use add::AddStage;
pub use list::ListStages;
pub use update::UpdateStage;
