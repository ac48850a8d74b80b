//! AssignCard and UnassignCard commands

use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult};

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::{logged, Outcome};
use crate::types::{CardId, UserId};

/// Assign a card to a user, replacing any previous assignee
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssignCard {
    pub id: CardId,
    pub assignee_id: UserId,
}

operation!(
    AssignCard,
    verb = "assign",
    noun = "card",
    description = "Assign a card to a user"
);

impl AssignCard {
    pub fn new(id: impl Into<CardId>, assignee_id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            assignee_id: assignee_id.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AssignCard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();

        let result: Result<Outcome> = async {
            let (before, after) = ctx
                .cards()
                .modify(&self.id, |card| {
                    card.assignee_id = Some(self.assignee_id.clone());
                    card.touch();
                    Ok(())
                })
                .await?;
            Ok(Outcome::new(
                serde_json::to_value(&after)?,
                &self.id,
                json!({
                    "assignee_id": self.assignee_id,
                    "previous_assignee_id": before.assignee_id,
                }),
            ))
        }
        .await;

        logged(self, started, result)
    }
}

/// Clear a card's assignee
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UnassignCard {
    pub id: CardId,
}

operation!(
    UnassignCard,
    verb = "unassign",
    noun = "card",
    description = "Remove the assignee from a card"
);

impl UnassignCard {
    pub fn new(id: impl Into<CardId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for UnassignCard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();

        let result: Result<Outcome> = async {
            let (before, after) = ctx
                .cards()
                .modify(&self.id, |card| {
                    card.assignee_id = None;
                    card.touch();
                    Ok(())
                })
                .await?;
            Ok(Outcome::new(
                serde_json::to_value(&after)?,
                &self.id,
                json!({ "previous_assignee_id": before.assignee_id }),
            ))
        }
        .await;

        logged(self, started, result)
    }
}
