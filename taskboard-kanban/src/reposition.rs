//! Repositioning service shared by cards and columns.
//!
//! Each public method is exactly one store transaction: read the rows it
//! depends on, compute shifts with the [`ledger`](crate::ledger), write, commit.
//! Nothing is cached between calls and no in-process lock is taken; two
//! callers racing on one container are serialized by the store.

use std::collections::{HashMap, HashSet};
use std::future::Future;

use serde::Serialize;
use taskboard_store::{PositionRange, Record, Transaction, TransactionOptions, TransactionalStore};
use tracing::{debug, info};

use crate::error::{KanbanError, Result};
use crate::ledger;

/// A record the board orders: a card in a column or a column in a board.
pub trait BoardItem: Record + Serialize + PartialEq {
    /// Lowercase name used in errors and log ops
    const NOUN: &'static str;

    /// The error reported when `id` does not exist
    fn not_found(id: &Self::Id) -> KanbanError;
}

/// An open, read-only transaction. Other transactions on the same store
/// wait until it is dropped.
pub struct Held<R: BoardItem> {
    txn: Box<dyn Transaction<R>>,
}

impl<R: BoardItem> Held<R> {
    /// Single item by ID
    pub async fn get(&self, id: &R::Id) -> Result<R> {
        self.txn.find_one(id).await?.ok_or_else(|| R::not_found(id))
    }

    /// Items of `container` in position order
    pub async fn list(&self, container: &R::ContainerId) -> Result<Vec<R>> {
        Ok(self.txn.find_many(container, PositionRange::All).await?)
    }
}

/// Orchestrates ledger arithmetic against a transactional store.
pub struct Repositioner<'a, R: BoardItem> {
    store: &'a dyn TransactionalStore<R>,
    options: TransactionOptions,
}

impl<'a, R: BoardItem> Repositioner<'a, R> {
    pub fn new(store: &'a dyn TransactionalStore<R>, options: TransactionOptions) -> Self {
        Self { store, options }
    }

    async fn begin(&self) -> Result<Box<dyn Transaction<R>>> {
        Ok(self.store.begin(&self.options).await?)
    }

    async fn find(txn: &dyn Transaction<R>, id: &R::Id) -> Result<R> {
        txn.find_one(id).await?.ok_or_else(|| R::not_found(id))
    }

    /// Single item by ID
    pub async fn get(&self, id: &R::Id) -> Result<R> {
        let txn = self.begin().await?;
        Self::find(txn.as_ref(), id).await
    }

    /// Items of `container` in position order
    pub async fn list(&self, container: &R::ContainerId) -> Result<Vec<R>> {
        let txn = self.begin().await?;
        Ok(txn.find_many(container, PositionRange::All).await?)
    }

    /// Open a transaction and keep it until the returned [`Held`] is dropped.
    ///
    /// Used to keep a check on one store valid while writing to another.
    /// Callers take the column store before the card store.
    pub async fn hold(&self) -> Result<Held<R>> {
        Ok(Held {
            txn: self.begin().await?,
        })
    }

    /// Append `record` to the end of its container.
    pub async fn insert_append(&self, record: R) -> Result<R> {
        let mut inserted = self.insert_append_all(vec![record]).await?;
        inserted
            .pop()
            .ok_or_else(|| KanbanError::invalid_value(R::NOUN, "nothing was inserted"))
    }

    /// Append several records, in order, in one transaction.
    pub async fn insert_append_all(&self, records: Vec<R>) -> Result<Vec<R>> {
        let mut txn = self.begin().await?;
        let mut next: HashMap<R::ContainerId, u32> = HashMap::new();
        let mut inserted = Vec::with_capacity(records.len());

        for mut record in records {
            let container = record.container_id().clone();
            let position = match next.get(&container) {
                Some(&position) => position,
                None => {
                    let siblings = txn.find_many(&container, PositionRange::All).await?;
                    ledger::next_append_position(siblings.iter().map(Record::position))
                }
            };
            record.place(container.clone(), position);
            txn.insert(record.clone()).await.map_err(|e| match e {
                taskboard_store::StoreError::DuplicateId { id } => KanbanError::DuplicateId {
                    item_type: R::NOUN.to_string(),
                    id,
                },
                other => other.into(),
            })?;
            next.insert(container, position + 1);
            inserted.push(record);
        }

        txn.commit().await?;
        debug!(noun = R::NOUN, count = inserted.len(), "appended");
        Ok(inserted)
    }

    /// Move an item to `new_position` in `target`, shifting siblings in both
    /// containers so both stay dense.
    pub async fn move_item(
        &self,
        id: &R::Id,
        source: &R::ContainerId,
        target: &R::ContainerId,
        new_position: u32,
    ) -> Result<R> {
        let mut txn = self.begin().await?;
        let mut item = Self::find(txn.as_ref(), id).await?;

        if item.container_id() != source {
            return Err(KanbanError::ContainerMismatch {
                id: id.to_string(),
                expected: source.to_string(),
                actual: item.container_id().to_string(),
            });
        }

        let from = item.position();
        let target_len = txn.find_many(target, PositionRange::All).await?.len();

        if source == target {
            ledger::validate_target(new_position, target_len, true)?;
            if let Some(shift) = ledger::shift_for_intra_container_move(from, new_position) {
                txn.update_many(target, shift).await?;
            }
        } else {
            ledger::validate_target(new_position, target_len, false)?;
            txn.update_many(source, ledger::shift_for_removal(from))
                .await?;
            txn.update_many(target, ledger::shift_for_insertion(new_position))
                .await?;
        }

        item.place(target.clone(), new_position);
        txn.update(item.clone()).await?;
        txn.commit().await?;

        info!(
            noun = R::NOUN,
            %id,
            from = %source,
            to = %target,
            from_position = from,
            position = new_position,
            "moved"
        );
        Ok(item)
    }

    /// Apply caller-supplied positions to items of `container`.
    ///
    /// The batch may cover all items or only some; positions of items it does
    /// not mention stay as they are. The resulting ordering must be dense,
    /// otherwise nothing is written.
    pub async fn reorder_batch(
        &self,
        container: &R::ContainerId,
        orders: &[(R::Id, u32)],
    ) -> Result<Vec<R>> {
        let mut txn = self.begin().await?;
        let current = txn.find_many(container, PositionRange::All).await?;
        let mut by_id: HashMap<R::Id, R> = current
            .into_iter()
            .map(|record| (record.id().clone(), record))
            .collect();

        let mut seen = HashSet::with_capacity(orders.len());
        for (id, _) in orders {
            if !seen.insert(id) {
                return Err(KanbanError::invalid_reorder(format!(
                    "{} {id} appears more than once",
                    R::NOUN
                )));
            }
            if !by_id.contains_key(id) {
                let record = Self::find(txn.as_ref(), id).await?;
                return Err(KanbanError::ContainerMismatch {
                    id: id.to_string(),
                    expected: container.to_string(),
                    actual: record.container_id().to_string(),
                });
            }
        }

        let requested: HashMap<&R::Id, u32> = orders.iter().map(|(id, p)| (id, *p)).collect();
        ledger::check_density(
            by_id
                .values()
                .map(|r| requested.get(r.id()).copied().unwrap_or(r.position())),
        )?;

        let mut written = 0;
        for (id, position) in orders {
            if let Some(record) = by_id.get_mut(id) {
                if record.position() != *position {
                    record.set_position(*position);
                    txn.update(record.clone()).await?;
                    written += 1;
                }
            }
        }
        txn.commit().await?;
        debug!(noun = R::NOUN, %container, written, "reordered");

        let mut ordered: Vec<R> = by_id.into_values().collect();
        ordered.sort_by_key(|r| r.position());
        Ok(ordered)
    }

    /// Edit an item's fields. Its container and position are restored after
    /// `edit` runs; placement only changes through the repositioning methods.
    ///
    /// Nothing is written when the edit leaves the item as it was.
    /// Returns the item before and after the edit.
    pub async fn modify<F>(&self, id: &R::Id, edit: F) -> Result<(R, R)>
    where
        F: FnOnce(&mut R) -> Result<()> + Send,
    {
        let mut txn = self.begin().await?;
        let before = Self::find(txn.as_ref(), id).await?;
        let mut after = before.clone();
        edit(&mut after)?;
        after.place(before.container_id().clone(), before.position());
        if after == before {
            return Ok((before, after));
        }
        txn.update(after.clone()).await?;
        txn.commit().await?;
        Ok((before, after))
    }

    /// Delete an item and close the gap it leaves.
    pub async fn remove(&self, id: &R::Id) -> Result<R> {
        self.remove_guarded(id, |_| async { Ok(()) }).await
    }

    /// Delete an item once `precondition` has accepted it, closing the gap
    /// it leaves.
    ///
    /// `precondition` runs while this store's transaction is open. Whatever
    /// it returns is kept alive until the delete has committed, so it can
    /// hold a transaction on another store across the delete.
    pub async fn remove_guarded<F, Fut, G>(&self, id: &R::Id, precondition: F) -> Result<R>
    where
        F: FnOnce(R) -> Fut + Send,
        Fut: Future<Output = Result<G>> + Send,
        G: Send,
    {
        let mut txn = self.begin().await?;
        let item = Self::find(txn.as_ref(), id).await?;
        let guard = precondition(item.clone()).await?;
        txn.delete(id).await?;
        txn.update_many(item.container_id(), ledger::shift_for_removal(item.position()))
            .await?;
        txn.commit().await?;
        drop(guard);
        debug!(noun = R::NOUN, %id, position = item.position(), "removed");
        Ok(item)
    }
}
