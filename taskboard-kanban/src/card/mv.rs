//! MoveCard command

use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult};

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::{logged, Outcome};
use crate::types::{CardId, ColumnId};

/// Move a card to a position in the same or another column.
///
/// `new_position` may be `0..=len-1` within the same column, or `0..=len`
/// when moving into another column (`len` appends). Another column must exist.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MoveCard {
    pub card_id: CardId,
    /// The column the caller believes the card is in
    pub source_column_id: ColumnId,
    pub target_column_id: ColumnId,
    pub new_position: u32,
}

operation!(
    MoveCard,
    verb = "move",
    noun = "card",
    description = "Move a card within its column or to another column"
);

impl MoveCard {
    pub fn new(
        card_id: impl Into<CardId>,
        source_column_id: impl Into<ColumnId>,
        target_column_id: impl Into<ColumnId>,
        new_position: u32,
    ) -> Self {
        Self {
            card_id: card_id.into(),
            source_column_id: source_column_id.into(),
            target_column_id: target_column_id.into(),
            new_position,
        }
    }

    /// Move within a single column
    pub fn within(card_id: impl Into<CardId>, column_id: impl Into<ColumnId>, new_position: u32) -> Self {
        let column_id = column_id.into();
        Self::new(card_id, column_id.clone(), column_id, new_position)
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for MoveCard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();

        let result: Result<Outcome> = async {
            let columns = if self.source_column_id != self.target_column_id {
                let columns = ctx.columns().hold().await?;
                columns.get(&self.target_column_id).await?;
                Some(columns)
            } else {
                None
            };
            let card = ctx
                .cards()
                .move_item(
                    &self.card_id,
                    &self.source_column_id,
                    &self.target_column_id,
                    self.new_position,
                )
                .await?;
            drop(columns);
            Ok(Outcome::new(
                serde_json::to_value(&card)?,
                &card.id,
                json!({
                    "from": self.source_column_id,
                    "to": self.target_column_id,
                    "position": card.position,
                }),
            ))
        }
        .await;

        logged(self, started, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{AddCard, ListCards};

    async fn fill(ctx: &KanbanContext, column: &str, titles: &[&str]) -> Vec<String> {
        let mut ids = Vec::new();
        for title in titles {
            let card = AddCard::new(column, *title)
                .execute(ctx)
                .await
                .into_result()
                .unwrap();
            ids.push(card["id"].as_str().unwrap().to_string());
        }
        ids
    }

    async fn titles(ctx: &KanbanContext, column: &str) -> Vec<String> {
        let listed = ListCards::new(column).execute(ctx).await.into_result().unwrap();
        listed["cards"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["title"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_move_up_within_column() {
        let ctx = KanbanContext::with_columns(&["todo", "doing", "done"]).await;
        let ids = fill(&ctx, "todo", &["A", "B", "C", "D"]).await;

        let (value, entry) = MoveCard::within(ids[3].as_str(), "todo", 1)
            .execute(&ctx)
            .await
            .split();
        assert_eq!(value.unwrap()["position"], 1);
        let entry = entry.unwrap();
        assert_eq!(entry.op, "move card");
        assert_eq!(entry.output["from"], "todo");
        assert_eq!(entry.output["position"], 1);

        assert_eq!(titles(&ctx, "todo").await, ["A", "D", "B", "C"]);
    }

    #[tokio::test]
    async fn test_move_across_columns() {
        let ctx = KanbanContext::with_columns(&["todo", "doing", "done"]).await;
        let source = fill(&ctx, "todo", &["A", "B", "C"]).await;
        fill(&ctx, "doing", &["X", "Y"]).await;

        MoveCard::new(source[1].as_str(), "todo", "doing", 1)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(titles(&ctx, "todo").await, ["A", "C"]);
        assert_eq!(titles(&ctx, "doing").await, ["X", "B", "Y"]);
    }

    #[tokio::test]
    async fn test_move_appends_at_len() {
        let ctx = KanbanContext::with_columns(&["todo", "doing", "done"]).await;
        let source = fill(&ctx, "todo", &["A"]).await;
        fill(&ctx, "done", &["X"]).await;

        MoveCard::new(source[0].as_str(), "todo", "done", 1)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert!(titles(&ctx, "todo").await.is_empty());
        assert_eq!(titles(&ctx, "done").await, ["X", "A"]);
    }

    #[tokio::test]
    async fn test_move_out_of_range() {
        let ctx = KanbanContext::with_columns(&["todo", "doing", "done"]).await;
        let ids = fill(&ctx, "todo", &["A", "B"]).await;

        let result = MoveCard::within(ids[0].as_str(), "todo", 2)
            .execute(&ctx)
            .await;
        assert!(!result.should_log());
        assert!(matches!(
            result.into_result(),
            Err(KanbanError::PositionOutOfRange { position: 2, max: 1 })
        ));
        assert_eq!(titles(&ctx, "todo").await, ["A", "B"]);
    }

    #[tokio::test]
    async fn test_move_from_wrong_column() {
        let ctx = KanbanContext::with_columns(&["todo", "doing", "done"]).await;
        let ids = fill(&ctx, "todo", &["A"]).await;

        let result = MoveCard::new(ids[0].as_str(), "doing", "done", 0)
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(KanbanError::ContainerMismatch { .. })));
    }

    #[tokio::test]
    async fn test_move_to_missing_column() {
        let ctx = KanbanContext::with_columns(&["todo"]).await;
        let ids = fill(&ctx, "todo", &["A"]).await;

        let result = MoveCard::new(ids[0].as_str(), "todo", "gone", 0)
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(KanbanError::ColumnNotFound { .. })));
        assert_eq!(titles(&ctx, "todo").await, ["A"]);
    }
}
