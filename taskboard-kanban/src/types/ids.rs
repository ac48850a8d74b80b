//! Strongly typed identifiers
//!
//! New IDs are ULIDs; any string is accepted when parsing so IDs issued by
//! other systems (e.g. the identity provider's user IDs) round-trip unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh ULID-backed ID
            pub fn new() -> Self {
                Self(Ulid::new().to_string())
            }

            /// Wrap an existing ID string
            pub fn from_string(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Board identifier
    BoardId
);
define_id!(
    /// Column identifier
    ColumnId
);
define_id!(
    /// Card identifier
    CardId
);
define_id!(
    /// User identifier as issued by the identity provider
    UserId
);
define_id!(
    /// Attachment identifier
    AttachmentId
);
