//! Deal commands

mod add;
mod get;
mod mv;

pub use add::AddDeal;
pub use get::GetDeal;
pub use mv::MoveDeal;
