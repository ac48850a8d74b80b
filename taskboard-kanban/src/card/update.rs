//! UpdateCard command

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult};

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::{logged, Outcome};
use crate::types::{Card, CardId, Priority};

/// Update card fields. Placement is never touched here; use `MoveCard`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateCard {
    pub id: CardId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
    /// Remove the due date
    #[serde(default)]
    pub clear_due_date: bool,
}

operation!(
    UpdateCard,
    verb = "update",
    noun = "card",
    description = "Update a card's title, description, priority or due date"
);

impl UpdateCard {
    pub fn new(id: impl Into<CardId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn clearing_due_date(mut self) -> Self {
        self.clear_due_date = true;
        self
    }

    fn apply(&self, card: &mut Card) -> Result<()> {
        let original = card.clone();
        if let Some(title) = &self.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(KanbanError::invalid_value("title", "must not be empty"));
            }
            card.title = title.to_string();
        }
        if let Some(description) = &self.description {
            card.description = Some(description.clone());
        }
        if let Some(priority) = self.priority {
            card.priority = priority;
        }
        if self.clear_due_date {
            card.due_date = None;
        } else if let Some(due_date) = self.due_date {
            card.due_date = Some(due_date);
        }
        if *card != original {
            card.touch();
        }
        Ok(())
    }
}

/// `{field: {from, to}}` for every field whose value changed
fn changes(before: &Card, after: &Card) -> Map<String, Value> {
    let mut changes = Map::new();
    let mut diff = |field: &str, from: Value, to: Value| {
        if from != to {
            changes.insert(field.to_string(), json!({ "from": from, "to": to }));
        }
    };
    diff("title", json!(before.title), json!(after.title));
    diff("description", json!(before.description), json!(after.description));
    diff("priority", json!(before.priority), json!(after.priority));
    diff("due_date", json!(before.due_date), json!(after.due_date));
    changes
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for UpdateCard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();

        let result: Result<(Value, Map<String, Value>)> = async {
            let (before, after) = ctx.cards().modify(&self.id, |card| self.apply(card)).await?;
            Ok((serde_json::to_value(&after)?, changes(&before, &after)))
        }
        .await;

        match result {
            // Nothing changed: nothing worth recording
            Ok((value, changes)) if changes.is_empty() => ExecutionResult::Unlogged { value },
            Ok((value, changes)) => logged(
                self,
                started,
                Ok(Outcome::new(value, &self.id, Value::Object(changes))),
            ),
            Err(error) => logged(self, started, Err(error)),
        }
    }
}
