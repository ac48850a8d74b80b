//! ListCards command

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult};

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::unlogged;
use crate::types::ColumnId;

/// List the cards of a column in position order
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListCards {
    pub column_id: ColumnId,
}

operation!(
    ListCards,
    verb = "list",
    noun = "cards",
    description = "List the cards of a column in order"
);

impl ListCards {
    pub fn new(column_id: impl Into<ColumnId>) -> Self {
        Self {
            column_id: column_id.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListCards {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let result: Result<Value> = async {
            let cards = ctx.cards().list(&self.column_id).await?;
            Ok(json!({
                "cards": cards,
                "count": cards.len(),
            }))
        }
        .await;
        unlogged(result)
    }
}
