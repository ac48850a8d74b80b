//! DeleteCard command

use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult};

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::{logged, Outcome};
use crate::types::CardId;

/// Delete a card. Cards below it in the column move up one slot.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteCard {
    pub id: CardId,
}

operation!(DeleteCard, verb = "delete", noun = "card", description = "Delete a card");

impl DeleteCard {
    pub fn new(id: impl Into<CardId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for DeleteCard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();

        let result: Result<Outcome> = async {
            let card = ctx.cards().remove(&self.id).await?;
            Ok(Outcome::new(
                serde_json::to_value(&card)?,
                &card.id,
                json!({ "title": card.title, "column": card.column_id }),
            ))
        }
        .await;

        logged(self, started, result)
    }
}
