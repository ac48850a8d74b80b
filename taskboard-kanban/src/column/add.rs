//! AddColumn command

use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult};

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::{logged, Outcome};
use crate::types::{BoardId, Column, ColumnId};

/// Add a column to the right-hand end of a board
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddColumn {
    pub board_id: BoardId,
    pub title: String,
    /// Caller-chosen ID; generated when absent
    #[serde(default)]
    pub id: Option<ColumnId>,
}

operation!(
    AddColumn,
    verb = "add",
    noun = "column",
    description = "Add a column at the end of a board"
);

impl AddColumn {
    pub fn new(board_id: impl Into<BoardId>, title: impl Into<String>) -> Self {
        Self {
            board_id: board_id.into(),
            title: title.into(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ColumnId>) -> Self {
        self.id = Some(id.into());
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AddColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();

        let result: Result<Outcome> = async {
            let title = self.title.trim();
            if title.is_empty() {
                return Err(KanbanError::invalid_value("title", "must not be empty"));
            }
            let mut column = Column::new(self.board_id.clone(), title);
            if let Some(id) = &self.id {
                column.id = id.clone();
            }
            let column = ctx.columns().insert_append(column).await?;
            Ok(Outcome::new(
                serde_json::to_value(&column)?,
                &column.id,
                json!({ "title": column.title, "board": column.board_id, "position": column.position }),
            ))
        }
        .await;

        logged(self, started, result)
    }
}
