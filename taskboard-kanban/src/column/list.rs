//! ListColumns command

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult};

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::unlogged;
use crate::types::BoardId;

/// List the columns of a board, left to right
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListColumns {
    pub board_id: BoardId,
}

operation!(
    ListColumns,
    verb = "list",
    noun = "columns",
    description = "List the columns of a board in order"
);

impl ListColumns {
    pub fn new(board_id: impl Into<BoardId>) -> Self {
        Self {
            board_id: board_id.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListColumns {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let result: Result<Value> = async {
            let columns = ctx.columns().list(&self.board_id).await?;
            Ok(json!({
                "columns": columns,
                "count": columns.len(),
            }))
        }
        .await;
        unlogged(result)
    }
}
