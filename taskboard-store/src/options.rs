//! Transaction options

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bounds applied to every transaction.
///
/// Serialized as milliseconds (`max_wait_ms`, `timeout_ms`) so they read
/// naturally in config files and environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionOptions {
    /// Longest a caller waits for a transaction slot before giving up
    #[serde(rename = "max_wait_ms", with = "millis")]
    pub max_wait: Duration,

    /// Longest a transaction may run, measured from the moment it starts
    #[serde(rename = "timeout_ms", with = "millis")]
    pub timeout: Duration,
}

impl TransactionOptions {
    pub const DEFAULT_MAX_WAIT: Duration = Duration::from_millis(5_000);
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

    pub fn new(max_wait: Duration, timeout: Duration) -> Self {
        Self { max_wait, timeout }
    }

    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for TransactionOptions {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_WAIT, Self::DEFAULT_TIMEOUT)
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
