//! Transactional record store for positioned items
//!
//! Rows are records that live in a container (a column holds cards, a board holds
//! columns) at a zero-based position. The store knows nothing about density; it
//! only offers the primitives repositioning needs:
//!
//! - **Scoped reads** - `find_one`, `find_many(container, range)`
//! - **Batched shifts** - `update_many(container, shift)` increments or decrements
//!   every position inside a [`PositionRange`]
//! - **Bounded transactions** - a maximum wait for a transaction slot and a
//!   maximum execution time, both from [`TransactionOptions`]
//!
//! Writes are buffered and only become visible on `commit`. Dropping a
//! transaction without committing discards everything it did.
//!
//! ## Basic Usage
//!
//! ```ignore
//! use taskboard_store::{MemoryStore, PositionRange, Shift, TransactionOptions, TransactionalStore};
//!
//! let store = MemoryStore::<Card>::new();
//! let mut txn = store.begin(&TransactionOptions::default()).await?;
//! txn.update_many(&column_id, Shift::increment(PositionRange::AtLeast(2))).await?;
//! txn.commit().await?;
//! ```

mod error;
mod filter;
mod memory;
mod options;
mod record;
mod transaction;

pub use error::{Result, StoreError};
pub use filter::{Delta, PositionRange, Shift};
pub use memory::MemoryStore;
pub use options::TransactionOptions;
pub use record::Record;
pub use transaction::{Transaction, TransactionalStore};
