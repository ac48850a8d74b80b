//! Operation processor trait

use crate::Execute;
use async_trait::async_trait;
use serde_json::Value;

/// Runs operations and handles whatever happens around them (actor
/// attribution, activity logging).
///
/// Implementations must never let post-execution bookkeeping change the
/// operation's own result.
#[async_trait]
pub trait OperationProcessor<C, E>: Send + Sync
where
    C: Send + Sync,
    E: Send,
{
    /// Execute `operation` against `ctx` and return its value or error.
    async fn process<O>(&self, operation: &O, ctx: &C) -> Result<Value, E>
    where
        O: Execute<C, E> + ?Sized;
}
