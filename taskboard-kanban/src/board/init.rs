//! InitBoard command

use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult};

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::{logged, Outcome};
use crate::types::{BoardId, Column};

/// Columns every new board starts with, left to right
pub const DEFAULT_COLUMNS: [&str; 3] = ["To Do", "In Progress", "Done"];

/// Seed a board with its starting columns in one transaction.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InitBoard {
    /// Board to seed; a fresh ID is generated when absent
    pub board_id: Option<BoardId>,
    /// Column titles; [`DEFAULT_COLUMNS`] when absent
    pub columns: Option<Vec<String>>,
}

operation!(
    InitBoard,
    verb = "init",
    noun = "board",
    description = "Create a board's starting columns"
);

impl InitBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_board_id(mut self, board_id: impl Into<BoardId>) -> Self {
        self.board_id = Some(board_id.into());
        self
    }

    pub fn with_columns<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(titles.into_iter().map(Into::into).collect());
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for InitBoard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();

        let result: Result<Outcome> = async {
            let board_id = self.board_id.clone().unwrap_or_default();
            let titles: Vec<String> = match &self.columns {
                Some(titles) => titles.clone(),
                None => DEFAULT_COLUMNS.iter().map(|t| t.to_string()).collect(),
            };
            if titles.iter().any(|t| t.trim().is_empty()) {
                return Err(KanbanError::invalid_value("columns", "titles must not be empty"));
            }

            let columns = titles
                .iter()
                .map(|title| Column::new(board_id.clone(), title.trim()))
                .collect();
            let columns = ctx.columns().insert_append_all(columns).await?;

            Ok(Outcome::new(
                json!({ "board_id": board_id, "columns": columns }),
                &board_id,
                json!({ "columns": titles }),
            ))
        }
        .await;

        logged(self, started, result)
    }
}
