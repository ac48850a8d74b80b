//! GetCard command

use serde::{Deserialize, Serialize};
use serde_json::Value;
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult};

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::unlogged;
use crate::types::CardId;

/// Get a card by ID
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetCard {
    pub id: CardId,
}

operation!(GetCard, verb = "get", noun = "card", description = "Get a card by ID");

impl GetCard {
    pub fn new(id: impl Into<CardId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for GetCard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let result: Result<Value> = async {
            let card = ctx.cards().get(&self.id).await?;
            Ok(serde_json::to_value(&card)?)
        }
        .await;
        unlogged(result)
    }
}
