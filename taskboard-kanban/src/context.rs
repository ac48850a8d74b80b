//! KanbanContext - store handles for kanban commands
//!
//! The context provides access to storage, not logic. Commands do all the work
//! through the [`Repositioner`] views it hands out. Nothing here caches board
//! state: every call reads through a fresh transaction.

use std::sync::Arc;

use taskboard_store::{MemoryStore, TransactionOptions, TransactionalStore};

use crate::config::KanbanConfig;
use crate::reposition::Repositioner;
use crate::types::{Card, Column};

#[cfg(test)]
use crate::{column::AddColumn, Execute};

/// Context passed to every command
#[derive(Clone)]
pub struct KanbanContext {
    cards: Arc<dyn TransactionalStore<Card>>,
    columns: Arc<dyn TransactionalStore<Column>>,
    options: TransactionOptions,
}

impl KanbanContext {
    /// Create a context over the given stores with default transaction bounds
    pub fn new(
        cards: Arc<dyn TransactionalStore<Card>>,
        columns: Arc<dyn TransactionalStore<Column>>,
    ) -> Self {
        Self {
            cards,
            columns,
            options: TransactionOptions::default(),
        }
    }

    /// Create a context backed by fresh in-memory stores
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryStore::<Card>::new()),
            Arc::new(MemoryStore::<Column>::new()),
        )
    }

    /// In-memory context using the transaction bounds from `config`
    pub fn from_config(config: &KanbanConfig) -> Self {
        Self::in_memory().with_config(config)
    }

    /// Apply the transaction bounds from `config`
    pub fn with_config(self, config: &KanbanConfig) -> Self {
        self.with_transaction_options(config.transaction)
    }

    pub fn with_transaction_options(mut self, options: TransactionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn transaction_options(&self) -> TransactionOptions {
        self.options
    }

    /// Card ordering within columns
    pub fn cards(&self) -> Repositioner<'_, Card> {
        Repositioner::new(self.cards.as_ref(), self.options)
    }

    /// Column ordering within boards
    pub fn columns(&self) -> Repositioner<'_, Column> {
        Repositioner::new(self.columns.as_ref(), self.options)
    }
}

impl std::fmt::Debug for KanbanContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KanbanContext")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
impl KanbanContext {
    /// In-memory context with empty columns under the given IDs
    pub(crate) async fn with_columns(ids: &[&str]) -> Self {
        let ctx = Self::in_memory();
        for id in ids {
            AddColumn::new("board", *id)
                .with_id(*id)
                .execute(&ctx)
                .await
                .into_result()
                .unwrap();
        }
        ctx
    }
}
