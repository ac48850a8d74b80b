//! Column commands

mod add;
mod delete;
mod get;
mod list;
mod mv;
mod reorder;
mod update;

pub use add::AddColumn;
pub use delete::DeleteColumn;
pub use get::GetColumn;
pub use list::ListColumns;
pub use mv::MoveColumn;
pub use reorder::{ColumnOrder, ReorderColumns};
pub use update::UpdateColumn;
