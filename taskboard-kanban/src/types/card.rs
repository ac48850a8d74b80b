//! Card types

use super::ids::{AttachmentId, CardId, ColumnId, UserId};
use crate::error::KanbanError;
use crate::reposition::BoardItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_store::Record;

/// Card priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

/// Attachment metadata. The bytes live in external file storage at `url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: AttachmentId,
    pub file_name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
}

/// A card on the board, ordered by `position` inside its column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub column_id: ColumnId,
    pub position: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Card {
    /// Create a card in `column`. The position is assigned when it is appended.
    pub fn new(column_id: ColumnId, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CardId::new(),
            column_id,
            position: 0,
            title: title.into(),
            description: None,
            priority: Priority::default(),
            assignee_id: None,
            creator_id: None,
            due_date: None,
            attachments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn find_attachment(&self, id: &AttachmentId) -> Option<&Attachment> {
        self.attachments.iter().find(|a| &a.id == id)
    }

    /// Bump `updated_at`
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Record for Card {
    type Id = CardId;
    type ContainerId = ColumnId;

    fn id(&self) -> &CardId {
        &self.id
    }

    fn container_id(&self) -> &ColumnId {
        &self.column_id
    }

    fn position(&self) -> u32 {
        self.position
    }

    fn place(&mut self, container: ColumnId, position: u32) {
        self.column_id = container;
        self.position = position;
    }
}

impl BoardItem for Card {
    const NOUN: &'static str = "card";

    fn not_found(id: &CardId) -> KanbanError {
        KanbanError::CardNotFound { id: id.to_string() }
    }
}
