//! AddCard command

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult};

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::{logged, Outcome};
use crate::types::{Card, ColumnId, Priority, UserId};

/// Create a card at the end of a column. The column must exist.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddCard {
    /// The column the card goes into
    pub column_id: ColumnId,
    /// The card title (required)
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub assignee_id: Option<UserId>,
    pub due_date: Option<DateTime<Utc>>,
    /// Who created the card
    pub creator_id: Option<UserId>,
}

operation!(
    AddCard,
    verb = "add",
    noun = "card",
    description = "Create a new card at the end of a column"
);

impl AddCard {
    /// Create a new AddCard command with just a column and title
    pub fn new(column_id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            title: title.into(),
            description: None,
            priority: None,
            assignee_id: None,
            due_date: None,
            creator_id: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<UserId>) -> Self {
        self.assignee_id = Some(assignee.into());
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_creator(mut self, creator: impl Into<UserId>) -> Self {
        self.creator_id = Some(creator.into());
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AddCard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();

        let result: Result<Outcome> = async {
            let title = self.title.trim();
            if title.is_empty() {
                return Err(KanbanError::invalid_value("title", "must not be empty"));
            }

            let mut card = Card::new(self.column_id.clone(), title);
            card.description = self.description.clone();
            card.priority = self.priority.unwrap_or_default();
            card.assignee_id = self.assignee_id.clone();
            card.creator_id = self.creator_id.clone();
            card.due_date = self.due_date;

            // The column stays locked until the card is in, so it cannot be
            // deleted in between.
            let columns = ctx.columns().hold().await?;
            columns.get(&self.column_id).await?;
            let card = ctx.cards().insert_append(card).await?;
            drop(columns);
            Ok(Outcome::new(
                serde_json::to_value(&card)?,
                &card.id,
                json!({ "title": card.title, "column": card.column_id, "position": card.position }),
            ))
        }
        .await;

        logged(self, started, result)
    }
}
