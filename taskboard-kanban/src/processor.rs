//! Operation processor: executes commands and feeds the activity log

use std::sync::Arc;

use serde_json::Value;
use taskboard_operations::{async_trait, Execute, OperationProcessor};
use tracing::{debug, warn};

use crate::activity::{ActivitySink, NullActivitySink};
use crate::config::KanbanConfig;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};

/// Runs kanban commands, attributes them to an actor, and records
/// successful mutations in the activity sink.
///
/// Recording happens after the command has committed. A sink failure is
/// traced and dropped; the caller still gets the command's own result.
#[derive(Clone)]
pub struct KanbanOperationProcessor {
    actor: Option<String>,
    sink: Arc<dyn ActivitySink>,
}

impl KanbanOperationProcessor {
    pub fn new(sink: Arc<dyn ActivitySink>) -> Self {
        Self { actor: None, sink }
    }

    /// Processor for an authenticated user (e.g. the identity provider's subject ID)
    pub fn with_actor(actor: impl Into<String>, sink: Arc<dyn ActivitySink>) -> Self {
        Self {
            actor: Some(actor.into()),
            sink,
        }
    }

    /// Processor recording to the sink `config` asks for
    pub fn from_config(config: &KanbanConfig) -> Self {
        Self::new(config.activity_sink())
    }

    /// Attribute operations to `actor`
    pub fn for_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }
}

impl Default for KanbanOperationProcessor {
    fn default() -> Self {
        Self::new(Arc::new(NullActivitySink))
    }
}

#[async_trait]
impl OperationProcessor<KanbanContext, KanbanError> for KanbanOperationProcessor {
    async fn process<O>(&self, operation: &O, ctx: &KanbanContext) -> Result<Value>
    where
        O: Execute<KanbanContext, KanbanError> + ?Sized,
    {
        let (result, log_entry) = operation.execute(ctx).await.split();

        let Some(mut entry) = log_entry.filter(|_| result.is_ok()) else {
            return result;
        };
        if entry.actor.is_none() {
            entry.actor = self.actor.clone();
        }

        if let Err(error) = self.sink.record(&entry).await {
            warn!(op = %entry.op, %error, "failed to record activity");
        } else {
            debug!(op = %entry.op, subject = ?entry.subject, "activity recorded");
        }

        result
    }
}
