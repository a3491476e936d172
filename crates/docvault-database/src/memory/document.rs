//! In-memory document store.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use docvault_core::result::AppResult;
use docvault_entity::document::{CreateDocument, Document, DocumentPatch};

use crate::store::DocumentStore;

/// [`DocumentStore`] holding documents in a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    /// Rows keyed by id, tagged with an insertion sequence that breaks
    /// `created_at` ties when listing.
    documents: DashMap<Uuid, (u64, Document)>,
    sequence: AtomicU64,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create(&self, data: &CreateDocument) -> AppResult<Document> {
        let now = Utc::now();
        let document = Document {
            id: Uuid::new_v4(),
            title: data.title.clone(),
            content: data.content.clone(),
            file: data.file.clone(),
            user_id: data.user_id,
            created_at: now,
            updated_at: now,
        };
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        self.documents.insert(document.id, (seq, document.clone()));
        Ok(document)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>> {
        Ok(self.documents.get(&id).map(|entry| entry.value().1.clone()))
    }

    async fn list_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Document>> {
        let mut rows: Vec<(u64, Document)> = self
            .documents
            .iter()
            .filter(|entry| entry.value().1.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by(|(a_seq, a), (b_seq, b)| {
            b.created_at.cmp(&a.created_at).then(b_seq.cmp(a_seq))
        });
        Ok(rows.into_iter().map(|(_, document)| document).collect())
    }

    async fn update(&self, id: Uuid, patch: &DocumentPatch) -> AppResult<Option<Document>> {
        Ok(self.documents.get_mut(&id).map(|mut entry| {
            let document = &mut entry.value_mut().1;
            patch.apply_to(document);
            document.updated_at = Utc::now();
            document.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<Option<Document>> {
        Ok(self.documents.remove(&id).map(|(_, (_, document))| document))
    }
}
