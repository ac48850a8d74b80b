//! Integration tests for card and column ordering

use std::collections::HashMap;

use taskboard_kanban::{
    board::InitBoard,
    card::{AddCard, CardOrder, DeleteCard, ListCards, MoveCard, ReorderCards},
    column::{AddColumn, DeleteColumn, ListColumns, MoveColumn},
    Card, ColumnId, Execute, KanbanContext, KanbanError,
};

/// In-memory context whose columns carry the given IDs
async fn with_columns(ids: &[&str]) -> KanbanContext {
    let ctx = KanbanContext::in_memory();
    for id in ids {
        AddColumn::new("scratch", *id)
            .with_id(*id)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
    }
    ctx
}

async fn add(ctx: &KanbanContext, column: &str, title: &str) -> String {
    let card = AddCard::new(column, title)
        .execute(ctx)
        .await
        .into_result()
        .unwrap();
    card["id"].as_str().unwrap().to_string()
}

async fn fill(ctx: &KanbanContext, column: &str, titles: &[&str]) -> HashMap<String, String> {
    let mut ids = HashMap::new();
    for title in titles {
        ids.insert(title.to_string(), add(ctx, column, title).await);
    }
    ids
}

async fn cards(ctx: &KanbanContext, column: &str) -> Vec<Card> {
    ctx.cards().list(&ColumnId::from(column)).await.unwrap()
}

/// `title@position` for every card, in position order
async fn layout(ctx: &KanbanContext, column: &str) -> Vec<String> {
    cards(ctx, column)
        .await
        .iter()
        .map(|c| format!("{}@{}", c.title, c.position))
        .collect()
}

async fn assert_dense(ctx: &KanbanContext, column: &str) {
    let positions: Vec<u32> = cards(ctx, column).await.iter().map(|c| c.position).collect();
    let expected: Vec<u32> = (0..positions.len() as u32).collect();
    assert_eq!(positions, expected, "column {column} is not dense");
}

#[test_log::test(tokio::test)]
async fn test_append_positions() {
    let ctx = with_columns(&["todo", "c", "s", "t", "a", "b"]).await;

    let first = AddCard::new("todo", "A").execute(&ctx).await.into_result().unwrap();
    assert_eq!(first["position"], 0);

    fill(&ctx, "todo", &["B", "C"]).await;
    let last = AddCard::new("todo", "D").execute(&ctx).await.into_result().unwrap();
    assert_eq!(last["position"], 3);
}

#[test_log::test(tokio::test)]
async fn test_move_to_front_of_column() {
    let ctx = with_columns(&["todo", "c", "s", "t", "a", "b"]).await;
    let ids = fill(&ctx, "c", &["A", "B", "C", "D"]).await;

    MoveCard::within(ids["D"].as_str(), "c", 0)
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();

    assert_eq!(layout(&ctx, "c").await, ["D@0", "A@1", "B@2", "C@3"]);
}

#[test_log::test(tokio::test)]
async fn test_move_to_second_slot_of_column() {
    let ctx = with_columns(&["todo", "c", "s", "t", "a", "b"]).await;
    let ids = fill(&ctx, "c", &["A", "B", "C", "D"]).await;

    MoveCard::within(ids["D"].as_str(), "c", 1)
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();

    assert_eq!(layout(&ctx, "c").await, ["A@0", "D@1", "B@2", "C@3"]);
}

#[test_log::test(tokio::test)]
async fn test_move_down_within_column() {
    let ctx = with_columns(&["todo", "c", "s", "t", "a", "b"]).await;
    let ids = fill(&ctx, "c", &["A", "B", "C", "D"]).await;

    MoveCard::within(ids["A"].as_str(), "c", 2)
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();

    assert_eq!(layout(&ctx, "c").await, ["B@0", "C@1", "A@2", "D@3"]);
}

#[test_log::test(tokio::test)]
async fn test_move_between_columns() {
    let ctx = with_columns(&["todo", "c", "s", "t", "a", "b"]).await;
    let source = fill(&ctx, "s", &["A", "B", "C"]).await;
    fill(&ctx, "t", &["X", "Y"]).await;

    MoveCard::new(source["B"].as_str(), "s", "t", 1)
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();

    assert_eq!(layout(&ctx, "s").await, ["A@0", "C@1"]);
    assert_eq!(layout(&ctx, "t").await, ["X@0", "B@1", "Y@2"]);
}

#[test_log::test(tokio::test)]
async fn test_cross_move_preserves_count() {
    let ctx = with_columns(&["todo", "c", "s", "t", "a", "b"]).await;
    let source = fill(&ctx, "s", &["A", "B", "C", "D"]).await;
    fill(&ctx, "t", &["X"]).await;

    let before = cards(&ctx, "s").await.len() + cards(&ctx, "t").await.len();
    for (title, position) in [("A", 0), ("C", 2), ("D", 1)] {
        MoveCard::new(source[title].as_str(), "s", "t", position)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
    }
    let after = cards(&ctx, "s").await.len() + cards(&ctx, "t").await.len();

    assert_eq!(before, after);
    assert_eq!(layout(&ctx, "s").await, ["B@0"]);
    assert_eq!(layout(&ctx, "t").await, ["A@0", "D@1", "X@2", "C@3"]);
}

#[test_log::test(tokio::test)]
async fn test_density_after_mixed_sequence() {
    let ctx = with_columns(&["todo", "c", "s", "t", "a", "b"]).await;
    let a = fill(&ctx, "a", &["A1", "A2", "A3", "A4", "A5"]).await;
    let b = fill(&ctx, "b", &["B1", "B2"]).await;

    MoveCard::within(a["A5"].as_str(), "a", 0).execute(&ctx).await.into_result().unwrap();
    MoveCard::new(a["A2"].as_str(), "a", "b", 2).execute(&ctx).await.into_result().unwrap();
    DeleteCard::new(b["B1"].as_str()).execute(&ctx).await.into_result().unwrap();
    add(&ctx, "b", "B3").await;
    MoveCard::new(b["B2"].as_str(), "b", "a", 0).execute(&ctx).await.into_result().unwrap();
    DeleteCard::new(a["A3"].as_str()).execute(&ctx).await.into_result().unwrap();

    let ids: Vec<_> = cards(&ctx, "a").await.into_iter().map(|c| c.id).collect();
    let reversed = ids.iter().rev().cloned().zip(0u32..);
    ReorderCards::new("a", reversed.map(|(id, p)| CardOrder::new(id, p)).collect())
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();

    assert_dense(&ctx, "a").await;
    assert_dense(&ctx, "b").await;
    assert_eq!(cards(&ctx, "a").await.len() + cards(&ctx, "b").await.len(), 6);
}

#[test_log::test(tokio::test)]
async fn test_reorder_result_reads_back_exactly() {
    let ctx = with_columns(&["todo", "c", "s", "t", "a", "b"]).await;
    let ids = fill(&ctx, "c", &["A", "B", "C", "D"]).await;

    let wanted = ["C", "A", "D", "B"];
    ReorderCards::from_ids("c", wanted.iter().map(|t| ids[*t].as_str()))
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();

    let listed = ListCards::new("c").execute(&ctx).await.into_result().unwrap();
    let titles: Vec<&str> = listed["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, wanted);
    assert_dense(&ctx, "c").await;
}

#[test_log::test(tokio::test)]
async fn test_invalid_reorder_writes_nothing() {
    let ctx = with_columns(&["todo", "c", "s", "t", "a", "b"]).await;
    let ids = fill(&ctx, "c", &["A", "B", "C"]).await;
    let before = layout(&ctx, "c").await;

    // A and B collide at 0
    let result = ReorderCards::new(
        "c",
        vec![CardOrder::new(ids["A"].as_str(), 0), CardOrder::new(ids["B"].as_str(), 0)],
    )
    .execute(&ctx)
    .await
    .into_result();
    assert!(matches!(result, Err(KanbanError::InvalidReorder { .. })));

    let result = ReorderCards::new("c", vec![CardOrder::new("ghost", 0)])
        .execute(&ctx)
        .await
        .into_result();
    assert!(matches!(result, Err(KanbanError::CardNotFound { .. })));

    assert_eq!(layout(&ctx, "c").await, before);
}

#[test_log::test(tokio::test)]
async fn test_column_lifecycle() {
    let ctx = KanbanContext::in_memory();
    let board = InitBoard::new()
        .with_board_id("board")
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();
    let column_ids: Vec<String> = board["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect();

    // Done to the front, then delete the now-middle "To Do"
    MoveColumn::within(column_ids[2].as_str(), "board", 0)
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();
    add(&ctx, column_ids[1].as_str(), "blocking").await;
    let refused = DeleteColumn::new(column_ids[1].as_str())
        .execute(&ctx)
        .await
        .into_result();
    assert!(matches!(refused, Err(KanbanError::ColumnNotEmpty { .. })));

    DeleteColumn::new(column_ids[0].as_str())
        .execute(&ctx)
        .await
        .into_result()
        .unwrap();

    let listed = ListColumns::new("board").execute(&ctx).await.into_result().unwrap();
    let titles: Vec<String> = listed["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| format!("{}@{}", c["title"].as_str().unwrap(), c["position"]))
        .collect();
    assert_eq!(titles, ["Done@0", "In Progress@1"]);
}
