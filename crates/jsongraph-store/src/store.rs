use crate::document::{generate_name, JsonDocument};
use serde::{Deserialize, Serialize};
use sled::Db;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Tree holding documents keyed by id.
const DOCUMENTS_TREE: &str = "documents";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sled(#[from] sled::Error),
    #[error("Serialization error: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("Document not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Document count and combined size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreTotals {
    pub total_documents: usize,
    pub total_size: u64,
}

/// A local store of named JSON documents.
pub struct DocumentStore {
    db: Db,
    documents: sled::Tree,
}

impl DocumentStore {
    /// Opens or creates a document store at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path)?;
        let documents = db.open_tree(DOCUMENTS_TREE)?;
        Ok(Self { db, documents })
    }

    /// Creates an empty document named after the current time.
    pub fn create(&self) -> Result<JsonDocument> {
        self.create_named(generate_name(), "")
    }

    /// Creates a document with the given name and content.
    pub fn create_named(
        &self,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<JsonDocument> {
        let doc = JsonDocument::new(name, content);
        self.put(&doc)?;
        debug!("Created document {} ({})", doc.id, doc.name);
        Ok(doc)
    }

    /// Loads a document by id.
    pub fn get(&self, id: &str) -> Result<Option<JsonDocument>> {
        if let Some(bytes) = self.documents.get(id)? {
            let doc: JsonDocument = bincode::deserialize(&bytes)?;
            Ok(Some(doc))
        } else {
            Ok(None)
        }
    }

    /// All documents, most recently updated first.
    pub fn list(&self) -> Result<Vec<JsonDocument>> {
        let mut docs = self
            .documents
            .iter()
            .values()
            .map(|bytes| Ok(bincode::deserialize::<JsonDocument>(&bytes?)?))
            .collect::<Result<Vec<_>>>()?;
        docs.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(docs)
    }

    /// The most recently updated document, if any.
    pub fn most_recent(&self) -> Result<Option<JsonDocument>> {
        Ok(self.list()?.into_iter().next())
    }

    /// Replaces a document's content.
    pub fn save_content(&self, id: &str, content: impl Into<String>) -> Result<JsonDocument> {
        self.update(id, |doc| doc.set_content(content))
    }

    /// Renames a document.
    pub fn rename(&self, id: &str, name: impl Into<String>) -> Result<JsonDocument> {
        self.update(id, |doc| doc.rename(name))
    }

    /// Deletes a document. Returns false if it did not exist.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let existed = self.documents.remove(id)?.is_some();
        self.db.flush()?;
        debug!("Deleted document {} (existed: {})", id, existed);
        Ok(existed)
    }

    /// Deletes several documents in one batch.
    pub fn bulk_delete<S: AsRef<str>>(&self, ids: &[S]) -> Result<()> {
        let mut batch = sled::Batch::default();
        for id in ids {
            batch.remove(id.as_ref());
        }
        self.documents.apply_batch(batch)?;
        self.db.flush()?;
        debug!("Deleted {} documents", ids.len());
        Ok(())
    }

    /// Documents whose name or content contains `query`, ignoring case,
    /// most recently updated first.
    pub fn search(&self, query: &str) -> Result<Vec<JsonDocument>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|doc| doc.matches(query))
            .collect())
    }

    /// Number of documents and their combined size.
    pub fn totals(&self) -> Result<StoreTotals> {
        let docs = self.list()?;
        Ok(StoreTotals {
            total_documents: docs.len(),
            total_size: docs.iter().map(|d| d.size).sum(),
        })
    }

    /// Ids of documents larger than `max_size` bytes.
    pub fn large_documents(&self, max_size: u64) -> Result<Vec<String>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|doc| doc.size > max_size)
            .map(|doc| doc.id)
            .collect())
    }

    /// Deletes every document larger than `max_size` bytes and returns
    /// the removed ids.
    pub fn remove_large_documents(&self, max_size: u64) -> Result<Vec<String>> {
        let ids = self.large_documents(max_size)?;
        if !ids.is_empty() {
            self.bulk_delete(&ids)?;
            info!("Removed {} documents over {} bytes", ids.len(), max_size);
        }
        Ok(ids)
    }

    /// Removes every document.
    pub fn clear(&self) -> Result<()> {
        self.documents.clear()?;
        self.db.flush()?;
        Ok(())
    }

    fn update<F>(&self, id: &str, change: F) -> Result<JsonDocument>
    where
        F: FnOnce(&mut JsonDocument),
    {
        let mut doc = self
            .get(id)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        change(&mut doc);
        self.put(&doc)?;
        debug!("Updated document {}", id);
        Ok(doc)
    }

    fn put(&self, doc: &JsonDocument) -> Result<()> {
        let bytes = bincode::serialize(doc)?;
        self.documents.insert(doc.id.as_bytes(), bytes)?;
        self.db.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_and_get() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();

        let doc = store.create().unwrap();
        assert!(doc.content.is_empty());
        assert!(!doc.name.is_empty());

        let loaded = store.get(&doc.id).unwrap().unwrap();
        assert_eq!(loaded, doc);
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_save_content() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();

        let doc = store.create_named("config", "{}").unwrap();
        let saved = store.save_content(&doc.id, r#"{"port": 8080}"#).unwrap();
        assert_eq!(saved.size, 14);

        let loaded = store.get(&doc.id).unwrap().unwrap();
        assert_eq!(loaded.content, r#"{"port": 8080}"#);
        assert!(loaded.updated_at >= doc.updated_at);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();

        assert!(matches!(
            store.rename("nope", "x"),
            Err(StoreError::NotFound(id)) if id == "nope"
        ));
        assert!(matches!(
            store.save_content("nope", "{}"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_most_recent_first() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();

        let first = store.create_named("first", "1").unwrap();
        store.create_named("second", "2").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        store.rename(&first.id, "first-renamed").unwrap();

        let names: Vec<_> = store.list().unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["first-renamed", "second"]);
        assert_eq!(store.most_recent().unwrap().unwrap().id, first.id);
    }

    #[test]
    fn test_delete_and_bulk_delete() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();

        let a = store.create_named("a", "").unwrap();
        let b = store.create_named("b", "").unwrap();
        let c = store.create_named("c", "").unwrap();

        assert!(store.delete(&a.id).unwrap());
        assert!(!store.delete(&a.id).unwrap());

        store.bulk_delete(&[b.id.clone(), c.id.clone()]).unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_search() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();

        store.create_named("Users", r#"[{"name": "ada"}]"#).unwrap();
        store.create_named("orders", r#"{"user": "Grace"}"#).unwrap();
        store.create_named("empty", "").unwrap();

        assert_eq!(store.search("user").unwrap().len(), 2);
        assert_eq!(store.search("GRACE").unwrap().len(), 1);
        assert!(store.search("nothing").unwrap().is_empty());
    }

    #[test]
    fn test_totals_and_large_documents() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();

        store.create_named("small", "[]").unwrap();
        let big = store.create_named("big", "x".repeat(100)).unwrap();

        let totals = store.totals().unwrap();
        assert_eq!(totals.total_documents, 2);
        assert_eq!(totals.total_size, 102);

        assert_eq!(store.large_documents(50).unwrap(), vec![big.id]);
    }

    #[test]
    fn test_remove_large_documents() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();

        let small = store.create_named("small", "[]").unwrap();
        let big = store.create_named("big", "x".repeat(100)).unwrap();

        assert_eq!(store.remove_large_documents(50).unwrap(), vec![big.id.clone()]);
        assert!(store.get(&big.id).unwrap().is_none());
        assert!(store.get(&small.id).unwrap().is_some());

        assert!(store.remove_large_documents(50).unwrap().is_empty());
    }

    #[test]
    fn test_clear() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();

        store.create_named("a", "{}").unwrap();
        store.create_named("b", "[]").unwrap();
        store.clear().unwrap();

        assert!(store.list().unwrap().is_empty());
        assert!(store.most_recent().unwrap().is_none());
    }
}
