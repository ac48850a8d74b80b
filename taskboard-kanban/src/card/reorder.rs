//! ReorderCards command

use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult};

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::{logged, Outcome};
use crate::types::{CardId, ColumnId};

/// One requested position in a reorder batch
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CardOrder {
    pub card_id: CardId,
    pub position: u32,
}

impl CardOrder {
    pub fn new(card_id: impl Into<CardId>, position: u32) -> Self {
        Self {
            card_id: card_id.into(),
            position,
        }
    }
}

/// Apply explicit positions to cards of one column, typically the result of
/// a drag-and-drop on the client.
///
/// Rejected without writing anything if a card is listed twice, belongs to
/// another column, or the resulting ordering would not be dense.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReorderCards {
    pub column_id: ColumnId,
    pub orders: Vec<CardOrder>,
}

operation!(
    ReorderCards,
    verb = "reorder",
    noun = "cards",
    description = "Set explicit positions for cards in a column"
);

impl ReorderCards {
    pub fn new(column_id: impl Into<ColumnId>, orders: Vec<CardOrder>) -> Self {
        Self {
            column_id: column_id.into(),
            orders,
        }
    }

    /// Reorder a whole column: `card_ids[i]` goes to position `i`
    pub fn from_ids<I, S>(column_id: impl Into<ColumnId>, card_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CardId>,
    {
        let orders = card_ids
            .into_iter()
            .zip(0u32..)
            .map(|(id, position)| CardOrder::new(id, position))
            .collect();
        Self::new(column_id, orders)
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ReorderCards {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();

        let result: Result<Outcome> = async {
            let orders: Vec<(CardId, u32)> = self
                .orders
                .iter()
                .map(|o| (o.card_id.clone(), o.position))
                .collect();
            let cards = ctx.cards().reorder_batch(&self.column_id, &orders).await?;
            Ok(Outcome::new(
                json!({ "cards": cards, "count": cards.len() }),
                &self.column_id,
                json!({ "count": orders.len() }),
            ))
        }
        .await;

        logged(self, started, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::AddCard;

    async fn fill(ctx: &KanbanContext, titles: &[&str]) -> Vec<String> {
        let mut ids = Vec::new();
        for title in titles {
            let card = AddCard::new("todo", *title)
                .execute(ctx)
                .await
                .into_result()
                .unwrap();
            ids.push(card["id"].as_str().unwrap().to_string());
        }
        ids
    }

    fn titles(value: &Value) -> Vec<&str> {
        value["cards"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["title"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_reorder_whole_column() {
        let ctx = KanbanContext::with_columns(&["todo", "done"]).await;
        let ids = fill(&ctx, &["A", "B", "C"]).await;

        let order = [ids[2].as_str(), ids[0].as_str(), ids[1].as_str()];
        let (value, entry) = ReorderCards::from_ids("todo", order)
            .execute(&ctx)
            .await
            .split();
        assert_eq!(titles(&value.unwrap()), ["C", "A", "B"]);
        let entry = entry.unwrap();
        assert_eq!(entry.op, "reorder cards");
        assert_eq!(entry.subject.as_deref(), Some("todo"));
        assert_eq!(entry.output["count"], 3);
    }

    #[tokio::test]
    async fn test_partial_swap() {
        let ctx = KanbanContext::with_columns(&["todo", "done"]).await;
        let ids = fill(&ctx, &["A", "B", "C"]).await;

        let value = ReorderCards::new(
            "todo",
            vec![CardOrder::new(ids[0].as_str(), 2), CardOrder::new(ids[2].as_str(), 0)],
        )
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();
        assert_eq!(titles(&value), ["C", "B", "A"]);
    }

    #[tokio::test]
    async fn test_reorder_rejects_gap() {
        let ctx = KanbanContext::with_columns(&["todo", "done"]).await;
        let ids = fill(&ctx, &["A", "B"]).await;

        let result = ReorderCards::new("todo", vec![CardOrder::new(ids[0].as_str(), 5)])
            .execute(&ctx)
            .await;
        assert!(!result.should_log());
        assert!(matches!(
            result.into_result(),
            Err(KanbanError::InvalidReorder { .. })
        ));
    }

    #[tokio::test]
    async fn test_reorder_rejects_duplicate_card() {
        let ctx = KanbanContext::with_columns(&["todo", "done"]).await;
        let ids = fill(&ctx, &["A", "B"]).await;

        let result = ReorderCards::new(
            "todo",
            vec![CardOrder::new(ids[0].as_str(), 1), CardOrder::new(ids[0].as_str(), 0)],
        )
        .execute(&ctx)
        .await
        .into_result();
        assert!(matches!(result, Err(KanbanError::InvalidReorder { .. })));
    }

    #[tokio::test]
    async fn test_reorder_rejects_foreign_card() {
        let ctx = KanbanContext::with_columns(&["todo", "done"]).await;
        fill(&ctx, &["A"]).await;
        let other = AddCard::new("done", "Z")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let result = ReorderCards::new(
            "todo",
            vec![CardOrder::new(other["id"].as_str().unwrap(), 0)],
        )
        .execute(&ctx)
        .await
        .into_result();
        assert!(matches!(result, Err(KanbanError::ContainerMismatch { .. })));
    }
}
