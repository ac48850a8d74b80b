//! MoveColumn command

use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult};

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::{logged, Outcome};
use crate::types::{BoardId, ColumnId};

/// Move a column to a new position, on its own board or another one.
/// Its cards travel with it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MoveColumn {
    pub column_id: ColumnId,
    pub source_board_id: BoardId,
    pub target_board_id: BoardId,
    pub new_position: u32,
}

operation!(
    MoveColumn,
    verb = "move",
    noun = "column",
    description = "Move a column to a new position"
);

impl MoveColumn {
    pub fn new(
        column_id: impl Into<ColumnId>,
        source_board_id: impl Into<BoardId>,
        target_board_id: impl Into<BoardId>,
        new_position: u32,
    ) -> Self {
        Self {
            column_id: column_id.into(),
            source_board_id: source_board_id.into(),
            target_board_id: target_board_id.into(),
            new_position,
        }
    }

    /// Move within a single board
    pub fn within(column_id: impl Into<ColumnId>, board_id: impl Into<BoardId>, new_position: u32) -> Self {
        let board_id = board_id.into();
        Self::new(column_id, board_id.clone(), board_id, new_position)
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for MoveColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();

        let result: Result<Outcome> = async {
            let column = ctx
                .columns()
                .move_item(
                    &self.column_id,
                    &self.source_board_id,
                    &self.target_board_id,
                    self.new_position,
                )
                .await?;
            Ok(Outcome::new(
                serde_json::to_value(&column)?,
                &column.id,
                json!({
                    "from": self.source_board_id,
                    "to": self.target_board_id,
                    "position": column.position,
                }),
            ))
        }
        .await;

        logged(self, started, result)
    }
}
