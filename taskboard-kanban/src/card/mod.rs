//! Card commands

mod add;
mod assign;
mod attachment;
mod delete;
mod get;
mod list;
mod mv;
mod reorder;
mod update;

pub use add::AddCard;
pub use assign::{AssignCard, UnassignCard};
pub use attachment::{AddAttachment, DeleteAttachment};
pub use delete::DeleteCard;
pub use get::GetCard;
pub use list::ListCards;
pub use mv::MoveCard;
pub use reorder::{CardOrder, ReorderCards};
pub use update::UpdateCard;
