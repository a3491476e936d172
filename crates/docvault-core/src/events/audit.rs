//! Audit events describing document mutations.
//!
//! An [`AuditEvent`] is produced after every successful document write and
//! handed to an audit sink. It is never stored as a queryable entity; the
//! worker only records it in the log.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of mutation an audit event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    /// A document was created.
    Create,
    /// A document was patched.
    Update,
    /// A document was removed.
    Delete,
}

impl AuditAction {
    /// Queue event name used as the job type for this action.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::Create => "document-created",
            Self::Update => "document-updated",
            Self::Delete => "document-deleted",
        }
    }

    /// Map a queue event name back to its action.
    pub fn from_event_name(name: &str) -> Option<Self> {
        match name {
            "document-created" => Some(Self::Create),
            "document-updated" => Some(Self::Update),
            "document-deleted" => Some(Self::Delete),
            _ => None,
        }
    }

    /// All actions, in lifecycle order.
    pub fn all() -> [Self; 3] {
        [Self::Create, Self::Update, Self::Delete]
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "CREATE"),
            Self::Update => write!(f, "UPDATE"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// Audit record for a single document mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    /// The document that was mutated.
    pub document_id: Uuid,
    /// What happened to it.
    pub action: AuditAction,
    /// The creator for `CREATE`; the owner at the time of the operation
    /// for `UPDATE` and `DELETE`.
    pub user_id: Uuid,
    /// The patch exactly as submitted. Only present for `UPDATE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<serde_json::Value>,
    /// When the event was produced.
    pub timestamp: DateTime<Utc>,
}

impl AuditEvent {
    /// Event for a freshly created document.
    pub fn created(document_id: Uuid, user_id: Uuid) -> Self {
        Self::new(document_id, AuditAction::Create, user_id, None)
    }

    /// Event for an update, carrying the submitted patch.
    pub fn updated(document_id: Uuid, owner_id: Uuid, changes: serde_json::Value) -> Self {
        Self::new(document_id, AuditAction::Update, owner_id, Some(changes))
    }

    /// Event for a removal.
    pub fn deleted(document_id: Uuid, owner_id: Uuid) -> Self {
        Self::new(document_id, AuditAction::Delete, owner_id, None)
    }

    fn new(
        document_id: Uuid,
        action: AuditAction,
        user_id: Uuid,
        changes: Option<serde_json::Value>,
    ) -> Self {
        Self {
            document_id,
            action,
            user_id,
            changes,
            timestamp: Utc::now(),
        }
    }

    /// Queue event name for this event's action.
    pub fn event_name(&self) -> &'static str {
        self.action.event_name()
    }
}
