//! Attachment commands
//!
//! Only metadata is kept on the card. Uploading and deleting the stored
//! file itself is the caller's business.

use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use taskboard_operations::{async_trait, operation, Execute, ExecutionResult};

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::{logged, Outcome};
use crate::types::{Attachment, AttachmentId, CardId};

/// Attach a stored file to a card
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddAttachment {
    pub card_id: CardId,
    pub file_name: String,
    pub url: String,
    pub mime_type: Option<String>,
    #[serde(default)]
    pub size: u64,
}

operation!(
    AddAttachment,
    verb = "add",
    noun = "attachment",
    description = "Attach a stored file to a card"
);

impl AddAttachment {
    pub fn new(
        card_id: impl Into<CardId>,
        file_name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            card_id: card_id.into(),
            file_name: file_name.into(),
            url: url.into(),
            mime_type: None,
            size: 0,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AddAttachment {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();

        let result: Result<Outcome> = async {
            if self.file_name.trim().is_empty() {
                return Err(KanbanError::invalid_value("file_name", "must not be empty"));
            }
            let attachment = Attachment {
                id: AttachmentId::new(),
                file_name: self.file_name.clone(),
                url: self.url.clone(),
                mime_type: self.mime_type.clone(),
                size: self.size,
                uploaded_at: Utc::now(),
            };

            let added = attachment.clone();
            ctx.cards()
                .modify(&self.card_id, move |card| {
                    card.attachments.push(added);
                    card.touch();
                    Ok(())
                })
                .await?;

            Ok(Outcome::new(
                serde_json::to_value(&attachment)?,
                &self.card_id,
                json!({ "attachment_id": attachment.id, "file_name": attachment.file_name }),
            ))
        }
        .await;

        logged(self, started, result)
    }
}

/// Remove an attachment from a card
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteAttachment {
    pub card_id: CardId,
    pub attachment_id: AttachmentId,
}

operation!(
    DeleteAttachment,
    verb = "delete",
    noun = "attachment",
    description = "Remove an attachment from a card"
);

impl DeleteAttachment {
    pub fn new(card_id: impl Into<CardId>, attachment_id: impl Into<AttachmentId>) -> Self {
        Self {
            card_id: card_id.into(),
            attachment_id: attachment_id.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for DeleteAttachment {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let started = Instant::now();

        let result: Result<Outcome> = async {
            let (before, _) = ctx
                .cards()
                .modify(&self.card_id, |card| {
                    let count = card.attachments.len();
                    card.attachments.retain(|a| a.id != self.attachment_id);
                    if card.attachments.len() == count {
                        return Err(KanbanError::not_found(
                            "attachment",
                            self.attachment_id.to_string(),
                        ));
                    }
                    card.touch();
                    Ok(())
                })
                .await?;

            let removed = before
                .find_attachment(&self.attachment_id)
                .ok_or_else(|| KanbanError::not_found("attachment", self.attachment_id.to_string()))?;

            Ok(Outcome::new(
                serde_json::to_value(removed)?,
                &self.card_id,
                json!({ "attachment_id": removed.id, "file_name": removed.file_name }),
            ))
        }
        .await;

        logged(self, started, result)
    }
}
