//! # Taskboard Operations
//!
//! This crate provides the `Operation` trait for defining board commands.
//! Commands are structs where the fields ARE the parameters, so the same value
//! can be deserialized from a request body and executed directly.
//!
//! ## Example
//!
//! ```ignore
//! use taskboard_operations::*;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct MoveCard {
//!     pub card_id: CardId,
//!     pub new_position: u32,
//! }
//!
//! operation!(MoveCard, verb = "move", noun = "card", description = "Move a card");
//!
//! #[async_trait]
//! impl Execute<KanbanContext, KanbanError> for MoveCard {
//!     async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
//!         // implementation returns ExecutionResult::Logged or Unlogged
//!     }
//! }
//! ```

mod execution_result;
mod log;
mod operation;
mod processor;

pub use execution_result::ExecutionResult;
pub use log::LogEntry;
pub use operation::{Execute, Operation};
pub use processor::OperationProcessor;

// Re-export for use in implementations
pub use async_trait::async_trait;
pub use serde_json::Value;
