//! UpdateColumn command

use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult};

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::{logged, Outcome};
use crate::types::ColumnId;

/// Rename a column
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateColumn {
    pub id: ColumnId,
    pub title: String,
}

operation!(UpdateColumn, verb = "update", noun = "column", description = "Rename a column");

impl UpdateColumn {
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for UpdateColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();

        let result: Result<Outcome> = async {
            let title = self.title.trim();
            if title.is_empty() {
                return Err(KanbanError::invalid_value("title", "must not be empty"));
            }
            let (before, after) = ctx
                .columns()
                .modify(&self.id, |column| {
                    if column.title != title {
                        column.title = title.to_string();
                        column.updated_at = Utc::now();
                    }
                    Ok(())
                })
                .await?;
            Ok(Outcome::new(
                serde_json::to_value(&after)?,
                &self.id,
                json!({ "title": { "from": before.title, "to": after.title } }),
            ))
        }
        .await;

        logged(self, started, result)
    }
}
