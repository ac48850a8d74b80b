//! Transaction traits for atomic repositioning.
//!
//! # Transaction Semantics
//!
//! - **Atomicity**: all writes in a transaction commit together or not at all
//! - **Read-your-writes**: reads inside a transaction see its own pending writes
//! - **Isolation**: two transactions on the same store never interleave their
//!   read-then-write sequences
//! - **Bounded**: waiting for a slot is limited by `max_wait`, running by `timeout`;
//!   exceeding either fails the transaction with nothing applied

use async_trait::async_trait;

use crate::error::Result;
use crate::filter::{PositionRange, Shift};
use crate::options::TransactionOptions;
use crate::record::Record;

/// A store that hands out transactions over records of type `R`.
#[async_trait]
pub trait TransactionalStore<R: Record>: Send + Sync {
    /// Start a transaction, waiting at most `options.max_wait` for a slot.
    ///
    /// # Errors
    ///
    /// - [`StoreError::WaitTimeout`](crate::StoreError::WaitTimeout) when no slot frees up in time
    async fn begin(&self, options: &TransactionOptions) -> Result<Box<dyn Transaction<R>>>;
}

/// Transaction handle. Dropping it without [`commit`](Transaction::commit) rolls back.
///
/// Every call may fail with [`StoreError::Timeout`](crate::StoreError::Timeout)
/// once the transaction's execution timeout has passed.
#[async_trait]
pub trait Transaction<R: Record>: Send + Sync {
    /// Look up one record by ID.
    async fn find_one(&self, id: &R::Id) -> Result<Option<R>>;

    /// Records of `container` whose position is in `range`, ordered by position.
    async fn find_many(&self, container: &R::ContainerId, range: PositionRange) -> Result<Vec<R>>;

    /// Insert a new record. Fails with `DuplicateId` if the ID is taken.
    async fn insert(&mut self, record: R) -> Result<()>;

    /// Replace an existing record. Fails with `NotFound` if it does not exist.
    async fn update(&mut self, record: R) -> Result<()>;

    /// Apply `shift` to every record of `container` whose position matches.
    /// Returns how many records moved.
    async fn update_many(&mut self, container: &R::ContainerId, shift: Shift) -> Result<usize>;

    /// Delete a record and return it.
    async fn delete(&mut self, id: &R::Id) -> Result<R>;

    /// Publish every buffered write atomically.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Conflict`](crate::StoreError::Conflict) when the commit is rejected
    /// - [`StoreError::Timeout`](crate::StoreError::Timeout) when the deadline has passed
    async fn commit(self: Box<Self>) -> Result<()>;
}
