//! Core types for the kanban engine

mod card;
mod column;
mod ids;

// Re-export all types
pub use card::{Attachment, Card, Priority};
pub use column::Column;
pub use ids::{AttachmentId, BoardId, CardId, ColumnId, UserId};
