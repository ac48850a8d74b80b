//! In-memory transactional store
//!
//! - **Serializable**: one transaction at a time per store, queued on a
//!   [`tokio::sync::Mutex`]; waiting is bounded by `max_wait`
//! - **Snapshot writes**: a transaction edits a private copy of the table and
//!   swaps it in on commit, so an abandoned transaction leaves no trace
//! - **Fault injection**: per-call latency and a one-shot commit conflict, for
//!   exercising timeout and rollback paths

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use crate::error::{Result, StoreError};
use crate::filter::{PositionRange, Shift};
use crate::options::TransactionOptions;
use crate::record::Record;
use crate::transaction::{Transaction, TransactionalStore};

type Table<R> = HashMap<<R as Record>::Id, R>;

#[derive(Debug, Default)]
struct Faults {
    latency_ms: AtomicU64,
    fail_next_commit: AtomicBool,
}

/// In-memory [`TransactionalStore`]. Clones share the same table.
pub struct MemoryStore<R: Record> {
    table: Arc<Mutex<Table<R>>>,
    faults: Arc<Faults>,
}

impl<R: Record> MemoryStore<R> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            table: Arc::new(Mutex::new(HashMap::new())),
            faults: Arc::new(Faults::default()),
        }
    }

    /// Delay every transactional call by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        self.faults
            .latency_ms
            .store(latency.as_millis() as u64, Ordering::SeqCst);
    }

    /// Make the next commit fail with [`StoreError::Conflict`].
    pub fn fail_next_commit(&self) {
        self.faults.fail_next_commit.store(true, Ordering::SeqCst);
    }

    /// Committed records of `container`, ordered by position.
    ///
    /// Waits for any running transaction to finish.
    pub async fn snapshot(&self, container: &R::ContainerId) -> Vec<R> {
        let table = self.table.lock().await;
        select(&table, container, PositionRange::All)
    }

    /// Number of committed records across all containers
    pub async fn len(&self) -> usize {
        self.table.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<R: Record> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Clone for MemoryStore<R> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            faults: Arc::clone(&self.faults),
        }
    }
}

fn select<R: Record>(table: &Table<R>, container: &R::ContainerId, range: PositionRange) -> Vec<R> {
    let mut rows: Vec<R> = table
        .values()
        .filter(|r| r.container_id() == container && range.contains(r.position()))
        .cloned()
        .collect();
    rows.sort_by(|a, b| {
        a.position()
            .cmp(&b.position())
            .then_with(|| a.id().cmp(b.id()))
    });
    rows
}

#[async_trait]
impl<R: Record> TransactionalStore<R> for MemoryStore<R> {
    async fn begin(&self, options: &TransactionOptions) -> Result<Box<dyn Transaction<R>>> {
        let guard = tokio::time::timeout(options.max_wait, Arc::clone(&self.table).lock_owned())
            .await
            .map_err(|_| {
                warn!(max_wait_ms = options.max_wait.as_millis() as u64, "transaction slot wait exceeded");
                StoreError::WaitTimeout {
                    waited_ms: options.max_wait.as_millis() as u64,
                }
            })?;

        trace!("transaction started");
        let working = guard.clone();
        Ok(Box::new(MemoryTransaction {
            guard,
            working,
            faults: Arc::clone(&self.faults),
            deadline: Instant::now() + options.timeout,
            timeout: options.timeout,
        }))
    }
}

struct MemoryTransaction<R: Record> {
    guard: OwnedMutexGuard<Table<R>>,
    working: Table<R>,
    faults: Arc<Faults>,
    deadline: Instant,
    timeout: Duration,
}

impl<R: Record> MemoryTransaction<R> {
    fn timed_out(&self) -> StoreError {
        StoreError::Timeout {
            timeout_ms: self.timeout.as_millis() as u64,
        }
    }

    /// Simulated round trip: sleep for the injected latency, but never past
    /// the deadline.
    async fn round_trip(&self) -> Result<()> {
        let latency = Duration::from_millis(self.faults.latency_ms.load(Ordering::SeqCst));
        if !latency.is_zero() {
            tokio::time::timeout_at(self.deadline, tokio::time::sleep(latency))
                .await
                .map_err(|_| self.timed_out())?;
        }
        if Instant::now() >= self.deadline {
            return Err(self.timed_out());
        }
        Ok(())
    }
}

#[async_trait]
impl<R: Record> Transaction<R> for MemoryTransaction<R> {
    async fn find_one(&self, id: &R::Id) -> Result<Option<R>> {
        self.round_trip().await?;
        Ok(self.working.get(id).cloned())
    }

    async fn find_many(&self, container: &R::ContainerId, range: PositionRange) -> Result<Vec<R>> {
        self.round_trip().await?;
        Ok(select(&self.working, container, range))
    }

    async fn insert(&mut self, record: R) -> Result<()> {
        self.round_trip().await?;
        if self.working.contains_key(record.id()) {
            return Err(StoreError::DuplicateId {
                id: record.id().to_string(),
            });
        }
        self.working.insert(record.id().clone(), record);
        Ok(())
    }

    async fn update(&mut self, record: R) -> Result<()> {
        self.round_trip().await?;
        match self.working.get_mut(record.id()) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(StoreError::NotFound {
                id: record.id().to_string(),
            }),
        }
    }

    async fn update_many(&mut self, container: &R::ContainerId, shift: Shift) -> Result<usize> {
        self.round_trip().await?;
        let mut moved = 0;
        for record in self.working.values_mut() {
            if record.container_id() != container || !shift.range.contains(record.position()) {
                continue;
            }
            let position = shift
                .delta
                .apply(record.position())
                .ok_or_else(|| StoreError::PositionUnderflow {
                    id: record.id().to_string(),
                })?;
            record.set_position(position);
            moved += 1;
        }
        trace!(%container, ?shift, moved, "shifted positions");
        Ok(moved)
    }

    async fn delete(&mut self, id: &R::Id) -> Result<R> {
        self.round_trip().await?;
        self.working
            .remove(id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.round_trip().await?;
        if self.faults.fail_next_commit.swap(false, Ordering::SeqCst) {
            debug!("injected commit conflict");
            return Err(StoreError::conflict("injected commit failure"));
        }

        let MemoryTransaction {
            mut guard, working, ..
        } = *self;
        *guard = working;
        trace!("transaction committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        bucket: String,
        position: u32,
    }

    impl Record for Row {
        type Id = u32;
        type ContainerId = String;

        fn id(&self) -> &u32 {
            &self.id
        }

        fn container_id(&self) -> &String {
            &self.bucket
        }

        fn position(&self) -> u32 {
            self.position
        }

        fn place(&mut self, container: String, position: u32) {
            self.bucket = container;
            self.position = position;
        }
    }

    fn row(id: u32, bucket: &str, position: u32) -> Row {
        Row {
            id,
            bucket: bucket.to_string(),
            position,
        }
    }

    async fn seeded() -> MemoryStore<Row> {
        let store = MemoryStore::new();
        let mut txn = store.begin(&TransactionOptions::default()).await.unwrap();
        for (id, pos) in [(1, 0), (2, 1), (3, 2)] {
            txn.insert(row(id, "a", pos)).await.unwrap();
        }
        txn.insert(row(10, "b", 0)).await.unwrap();
        txn.commit().await.unwrap();
        store
    }

    fn positions(rows: &[Row]) -> Vec<(u32, u32)> {
        rows.iter().map(|r| (r.id, r.position)).collect()
    }

    #[test_log::test(tokio::test)]
    async fn test_commit_publishes_writes() {
        let store = seeded().await;
        assert_eq!(store.len().await, 4);
        assert_eq!(
            positions(&store.snapshot(&"a".to_string()).await),
            vec![(1, 0), (2, 1), (3, 2)]
        );
    }

    #[test_log::test(tokio::test)]
    async fn test_drop_rolls_back() {
        let store = seeded().await;
        {
            let mut txn = store.begin(&TransactionOptions::default()).await.unwrap();
            txn.delete(&1).await.unwrap();
            txn.insert(row(4, "a", 3)).await.unwrap();
        }
        assert_eq!(
            positions(&store.snapshot(&"a".to_string()).await),
            vec![(1, 0), (2, 1), (3, 2)]
        );
    }

    #[test_log::test(tokio::test)]
    async fn test_update_many_scoped_by_container() {
        let store = seeded().await;
        let mut txn = store.begin(&TransactionOptions::default()).await.unwrap();
        let moved = txn
            .update_many(&"a".to_string(), Shift::increment(PositionRange::AtLeast(1)))
            .await
            .unwrap();
        assert_eq!(moved, 2);
        let in_txn = txn
            .find_many(&"a".to_string(), PositionRange::All)
            .await
            .unwrap();
        assert_eq!(positions(&in_txn), vec![(1, 0), (2, 2), (3, 3)]);
        txn.commit().await.unwrap();

        assert_eq!(
            positions(&store.snapshot(&"b".to_string()).await),
            vec![(10, 0)]
        );
    }

    #[test_log::test(tokio::test)]
    async fn test_find_many_between() {
        let store = seeded().await;
        let txn = store.begin(&TransactionOptions::default()).await.unwrap();
        let rows = txn
            .find_many(&"a".to_string(), PositionRange::between(1..=2))
            .await
            .unwrap();
        assert_eq!(positions(&rows), vec![(2, 1), (3, 2)]);
    }

    #[test_log::test(tokio::test)]
    async fn test_underflow_is_reported() {
        let store = seeded().await;
        let mut txn = store.begin(&TransactionOptions::default()).await.unwrap();
        let err = txn
            .update_many(&"a".to_string(), Shift::decrement(PositionRange::All))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::PositionUnderflow { .. }));
    }

    #[test_log::test(tokio::test)]
    async fn test_duplicate_and_missing() {
        let store = seeded().await;
        let mut txn = store.begin(&TransactionOptions::default()).await.unwrap();
        assert!(matches!(
            txn.insert(row(1, "a", 9)).await,
            Err(StoreError::DuplicateId { .. })
        ));
        assert!(matches!(
            txn.update(row(99, "a", 0)).await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(txn.delete(&99).await, Err(StoreError::NotFound { .. })));
    }

    #[test_log::test(tokio::test)]
    async fn test_injected_conflict_discards_writes() {
        let store = seeded().await;
        store.fail_next_commit();
        let mut txn = store.begin(&TransactionOptions::default()).await.unwrap();
        txn.delete(&2).await.unwrap();
        let err = txn.commit().await.unwrap_err();
        assert!(err.is_transient());
        assert_eq!(store.len().await, 4);

        // One-shot: the next commit goes through
        let mut txn = store.begin(&TransactionOptions::default()).await.unwrap();
        txn.delete(&2).await.unwrap();
        txn.commit().await.unwrap();
        assert_eq!(store.len().await, 3);
    }

    #[test_log::test(tokio::test)]
    async fn test_wait_timeout_while_slot_held() {
        let store = seeded().await;
        let _held = store.begin(&TransactionOptions::default()).await.unwrap();

        let options = TransactionOptions::default().with_max_wait(Duration::from_millis(20));
        let err = store.begin(&options).await.err().unwrap();
        assert_eq!(err, StoreError::WaitTimeout { waited_ms: 20 });
    }

    #[test_log::test(tokio::test)]
    async fn test_latency_past_deadline_times_out() {
        let store = seeded().await;
        store.set_latency(Duration::from_millis(50));
        let options = TransactionOptions::default().with_timeout(Duration::from_millis(10));

        let mut txn = store.begin(&options).await.unwrap();
        let err = txn.delete(&1).await.unwrap_err();
        assert_eq!(err, StoreError::Timeout { timeout_ms: 10 });
        drop(txn);

        store.set_latency(Duration::ZERO);
        assert_eq!(store.len().await, 4);
    }
}
