//! Operation metadata and the `Execute` trait

use crate::ExecutionResult;
use async_trait::async_trait;
use serde_json::Value;

/// Metadata every command carries: what it does, to what.
pub trait Operation {
    /// The action, e.g. "move"
    fn verb(&self) -> &'static str;

    /// The thing acted upon, e.g. "card"
    fn noun(&self) -> &'static str;

    /// Human readable description
    fn description(&self) -> &'static str;

    /// Canonical "verb noun" string used as the log entry op
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Execute a command against a context `C`, failing with `E`.
#[async_trait]
pub trait Execute<C, E>: Operation + Send + Sync
where
    C: Send + Sync,
{
    async fn execute(&self, ctx: &C) -> ExecutionResult<Value, E>;
}

/// Implement [`Operation`] for a command struct.
///
/// ```ignore
/// operation!(MoveCard, verb = "move", noun = "card", description = "Move a card");
/// ```
#[macro_export]
macro_rules! operation {
    ($ty:ty, verb = $verb:literal, noun = $noun:literal, description = $desc:literal) => {
        impl $crate::Operation for $ty {
            fn verb(&self) -> &'static str {
                $verb
            }

            fn noun(&self) -> &'static str {
                $noun
            }

            fn description(&self) -> &'static str {
                $desc
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ping;
    crate::operation!(Ping, verb = "ping", noun = "board", description = "Ping the board");

    #[async_trait]
    impl Execute<(), String> for Ping {
        async fn execute(&self, _ctx: &()) -> ExecutionResult<Value, String> {
            ExecutionResult::Unlogged {
                value: Value::from("pong"),
            }
        }
    }

    #[test]
    fn test_op_string() {
        assert_eq!(Ping.op_string(), "ping board");
        assert_eq!(Ping.description(), "Ping the board");
    }

    #[tokio::test]
    async fn test_execute() {
        let value = Ping.execute(&()).await.into_result().unwrap();
        assert_eq!(value, "pong");
    }
}
