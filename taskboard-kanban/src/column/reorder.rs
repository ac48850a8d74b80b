//! ReorderColumns command

use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult};

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::{logged, Outcome};
use crate::types::{BoardId, ColumnId};

/// One requested position in a column reorder
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ColumnOrder {
    pub column_id: ColumnId,
    pub position: u32,
}

impl ColumnOrder {
    pub fn new(column_id: impl Into<ColumnId>, position: u32) -> Self {
        Self {
            column_id: column_id.into(),
            position,
        }
    }
}

/// Apply explicit positions to columns of one board.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReorderColumns {
    pub board_id: BoardId,
    pub orders: Vec<ColumnOrder>,
}

operation!(
    ReorderColumns,
    verb = "reorder",
    noun = "columns",
    description = "Set explicit positions for columns on a board"
);

impl ReorderColumns {
    pub fn new(board_id: impl Into<BoardId>, orders: Vec<ColumnOrder>) -> Self {
        Self {
            board_id: board_id.into(),
            orders,
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ReorderColumns {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();

        let result: Result<Outcome> = async {
            let orders: Vec<(ColumnId, u32)> = self
                .orders
                .iter()
                .map(|o| (o.column_id.clone(), o.position))
                .collect();
            let columns = ctx.columns().reorder_batch(&self.board_id, &orders).await?;
            Ok(Outcome::new(
                json!({ "columns": columns, "count": columns.len() }),
                &self.board_id,
                json!({ "count": orders.len() }),
            ))
        }
        .await;

        logged(self, started, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::AddColumn;

    #[tokio::test]
    async fn test_reorder_columns() {
        let ctx = KanbanContext::in_memory();
        let mut ids = Vec::new();
        for title in ["A", "B"] {
            let column = AddColumn::new("board", title)
                .execute(&ctx)
                .await
                .into_result()
                .unwrap();
            ids.push(column["id"].as_str().unwrap().to_string());
        }

        let value = ReorderColumns::new(
            "board",
            vec![ColumnOrder::new(ids[0].as_str(), 1), ColumnOrder::new(ids[1].as_str(), 0)],
        )
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();
        assert_eq!(value["columns"][0]["title"], "B");
        assert_eq!(value["columns"][1]["title"], "A");
    }

    #[tokio::test]
    async fn test_reorder_columns_rejects_duplicate_position() {
        let ctx = KanbanContext::in_memory();
        let mut ids = Vec::new();
        for title in ["A", "B"] {
            let column = AddColumn::new("board", title)
                .execute(&ctx)
                .await
                .into_result()
                .unwrap();
            ids.push(column["id"].as_str().unwrap().to_string());
        }

        let result = ReorderColumns::new(
            "board",
            vec![ColumnOrder::new(ids[0].as_str(), 0), ColumnOrder::new(ids[1].as_str(), 0)],
        )
        .execute(&ctx)
        .await
        .into_result();
        assert!(matches!(result, Err(KanbanError::InvalidReorder { .. })));
    }
}
