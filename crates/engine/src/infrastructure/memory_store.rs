//! In-memory document store adapter.
//!
//! A complete `DocumentStorePort` backed by maps, used by the e2e tests and
//! by embedding hosts for dry-run imports. Ids are minted as UUIDs; links
//! use the `@JournalEntry[id]{name}` convention.

use std::sync::Mutex;

use async_trait::async_trait;
use indexmap::IndexMap;
use uuid::Uuid;

use hexmapr_domain::{DocumentHandle, DocumentId, FolderId, SceneId};

use super::ports::{
    DocumentStorePort, FolderSpec, JournalSpec, ObjectFlags, SceneSpec, StoreError,
};

/// A stored journal document.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub spec: JournalSpec,
    pub content: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    folders: IndexMap<FolderId, FolderSpec>,
    documents: IndexMap<DocumentId, StoredDocument>,
    scenes: IndexMap<SceneId, SceneSpec>,
}

/// Map-backed document store.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    state: Mutex<State>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn folders(&self) -> Vec<(FolderId, FolderSpec)> {
        let state = self.state.lock().expect("store lock poisoned");
        state
            .folders
            .iter()
            .map(|(id, spec)| (id.clone(), spec.clone()))
            .collect()
    }

    pub fn documents(&self) -> Vec<(DocumentId, StoredDocument)> {
        let state = self.state.lock().expect("store lock poisoned");
        state
            .documents
            .iter()
            .map(|(id, doc)| (id.clone(), doc.clone()))
            .collect()
    }

    pub fn scenes(&self) -> Vec<(SceneId, SceneSpec)> {
        let state = self.state.lock().expect("store lock poisoned");
        state
            .scenes
            .iter()
            .map(|(id, spec)| (id.clone(), spec.clone()))
            .collect()
    }

    /// The first document whose flags match the given entity or tag id.
    pub fn document_by_flag_id(&self, flag_id: &str) -> Option<(DocumentId, StoredDocument)> {
        let state = self.state.lock().expect("store lock poisoned");
        state
            .documents
            .iter()
            .find(|(_, doc)| doc.spec.flags.id == flag_id)
            .map(|(id, doc)| (id.clone(), doc.clone()))
    }

    fn mint() -> String {
        Uuid::new_v4().simple().to_string()
    }
}

#[async_trait]
impl DocumentStorePort for InMemoryDocumentStore {
    async fn create_folder(&self, spec: FolderSpec) -> Result<FolderId, StoreError> {
        let id = FolderId::new(Self::mint());
        let mut state = self.state.lock().expect("store lock poisoned");
        state.folders.insert(id.clone(), spec);
        Ok(id)
    }

    async fn create_document(&self, spec: JournalSpec) -> Result<DocumentHandle, StoreError> {
        let id = DocumentId::new(Self::mint());
        let link = format!("@JournalEntry[{id}]{{{name}}}", name = spec.name);
        let mut state = self.state.lock().expect("store lock poisoned");
        state.documents.insert(
            id.clone(),
            StoredDocument {
                content: spec.content.clone(),
                spec,
            },
        );
        Ok(DocumentHandle::new(id, link))
    }

    async fn update_document_content(
        &self,
        id: &DocumentId,
        content: String,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().expect("store lock poisoned");
        let document = state
            .documents
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("JournalEntry", id))?;
        document.content = Some(content);
        Ok(())
    }

    async fn create_scene(&self, spec: SceneSpec) -> Result<SceneId, StoreError> {
        let id = SceneId::new(Self::mint());
        let mut state = self.state.lock().expect("store lock poisoned");
        state.scenes.insert(id.clone(), spec);
        Ok(id)
    }

    async fn lookup_flags(&self, id: &DocumentId) -> Result<Option<ObjectFlags>, StoreError> {
        let state = self.state.lock().expect("store lock poisoned");
        Ok(state.documents.get(id).map(|doc| doc.spec.flags.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexmapr_domain::{EntityId, EntityKind};

    #[tokio::test]
    async fn test_documents_round_trip_their_flags() {
        let store = InMemoryDocumentStore::new();
        let handle = store
            .create_document(JournalSpec {
                name: "Topaz".to_string(),
                folder: None,
                flags: ObjectFlags::entity(&EntityId::from("pl-1"), EntityKind::Planet),
                hidden: true,
                image: None,
                content: None,
            })
            .await
            .expect("create succeeds");

        let flags = store
            .lookup_flags(&handle.id)
            .await
            .expect("lookup succeeds")
            .expect("flags present");
        assert_eq!(flags.id, "pl-1");
        assert_eq!(flags.kind, "planet");
        assert!(handle.link.contains("Topaz"));
    }

    #[tokio::test]
    async fn test_updating_unknown_document_fails() {
        let store = InMemoryDocumentStore::new();
        let err = store
            .update_document_content(&DocumentId::from("nope"), "content".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
