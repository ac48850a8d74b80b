//! Kanban board engine with dense, transactional ordering
//!
//! Boards hold ordered columns, columns hold ordered cards. Every container keeps
//! its items at positions `0..n` with no gaps and no duplicates, through appends,
//! moves within and across containers, bulk reorders and deletions.
//!
//! ## Overview
//!
//! - **Commands** - every call is a command struct (`MoveCard`, `ReorderColumns`, ...)
//!   implementing [`Execute`] against a [`KanbanContext`]
//! - **One transaction per command** - the [`Repositioner`] reads, shifts siblings
//!   and writes inside a single store transaction; a failure leaves the board as it was
//! - **Pure position arithmetic** - the [`ledger`] computes shifts, the store applies them
//! - **Best-effort activity log** - successful mutations produce a [`LogEntry`] that
//!   the [`KanbanOperationProcessor`] hands to an [`ActivitySink`] after commit
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taskboard_kanban::{
//!     board::InitBoard, card::{AddCard, MoveCard}, KanbanContext, KanbanOperationProcessor,
//!     MemoryActivityLog, OperationProcessor,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = KanbanContext::in_memory();
//! let processor = KanbanOperationProcessor::with_actor("alice", Arc::new(MemoryActivityLog::new()));
//!
//! let board = processor.process(&InitBoard::new(), &ctx).await?;
//! let todo = board["columns"][0]["id"].as_str().unwrap_or_default().to_string();
//! let done = board["columns"][2]["id"].as_str().unwrap_or_default().to_string();
//!
//! let card = processor.process(&AddCard::new(todo.as_str(), "Write docs"), &ctx).await?;
//! let id = card["id"].as_str().unwrap_or_default();
//! processor.process(&MoveCard::new(id, todo.as_str(), done.as_str(), 0), &ctx).await?;
//! # Ok(())
//! # }
//! ```

pub mod activity;
pub mod board;
pub mod card;
pub mod column;
pub mod config;
mod context;
mod error;
pub mod ledger;
mod outcome;
mod processor;
pub mod reposition;
pub mod types;

// Re-export Execute trait and types from operations crate
pub use taskboard_operations::{
    async_trait, Execute, ExecutionResult, LogEntry, Operation, OperationProcessor,
};

pub use activity::{
    ActivityError, ActivitySink, JsonlActivityLog, MemoryActivityLog, NullActivitySink,
};
pub use config::{ConfigError, KanbanConfig};
pub use context::KanbanContext;
pub use error::{ErrorKind, KanbanError, Result};
pub use processor::KanbanOperationProcessor;
pub use reposition::{BoardItem, Held, Repositioner};

// Re-export commonly used types
pub use types::{Attachment, AttachmentId, BoardId, Card, CardId, Column, ColumnId, Priority, UserId};
