//! Column type

use super::ids::{BoardId, ColumnId};
use crate::error::KanbanError;
use crate::reposition::BoardItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_store::Record;

/// A column, ordered by `position` inside its board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub board_id: BoardId,
    pub title: String,
    pub position: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Column {
    pub fn new(board_id: BoardId, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ColumnId::new(),
            board_id,
            title: title.into(),
            position: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for Column {
    type Id = ColumnId;
    type ContainerId = BoardId;

    fn id(&self) -> &ColumnId {
        &self.id
    }

    fn container_id(&self) -> &BoardId {
        &self.board_id
    }

    fn position(&self) -> u32 {
        self.position
    }

    fn place(&mut self, container: BoardId, position: u32) {
        self.board_id = container;
        self.position = position;
    }
}

impl BoardItem for Column {
    const NOUN: &'static str = "column";

    fn not_found(id: &ColumnId) -> KanbanError {
        KanbanError::ColumnNotFound { id: id.to_string() }
    }
}
