//! DeleteColumn command

use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult};

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::{logged, Outcome};
use crate::types::ColumnId;

/// Delete an empty column. Columns to its right shift left one slot.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteColumn {
    pub id: ColumnId,
}

operation!(
    DeleteColumn,
    verb = "delete",
    noun = "column",
    description = "Delete an empty column"
);

impl DeleteColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for DeleteColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();

        let result: Result<Outcome> = async {
            let cards = ctx.cards();
            let column = ctx
                .columns()
                .remove_guarded(&self.id, |column| async move {
                    // Keep the card store locked until the column is gone
                    let held = cards.hold().await?;
                    let count = held.list(&column.id).await?.len();
                    if count > 0 {
                        return Err(KanbanError::ColumnNotEmpty {
                            id: column.id.to_string(),
                            count,
                        });
                    }
                    Ok(held)
                })
                .await?;
            Ok(Outcome::new(
                serde_json::to_value(&column)?,
                &column.id,
                json!({ "title": column.title, "board": column.board_id }),
            ))
        }
        .await;

        logged(self, started, result)
    }
}
