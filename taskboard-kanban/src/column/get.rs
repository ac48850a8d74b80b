//! GetColumn command

use serde::{Deserialize, Serialize};
use serde_json::Value;
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult};

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::unlogged;
use crate::types::ColumnId;

/// Get a column by ID
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetColumn {
    pub id: ColumnId,
}

operation!(GetColumn, verb = "get", noun = "column", description = "Get a column by ID");

impl GetColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for GetColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let result: Result<Value> = async {
            let column = ctx.columns().get(&self.id).await?;
            Ok(serde_json::to_value(&column)?)
        }
        .await;
        unlogged(result)
    }
}
