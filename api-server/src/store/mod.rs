//! Document store behind the record routes.
//!
//! # Design
//! Handlers see only `DocumentStore`, a trait over JSON documents grouped
//! into named collections. Documents are kept in insertion order so listing
//! needs no sort key. Each mutation touches exactly one document; there is no
//! transaction spanning several.

mod file;
mod memory;

use std::{fmt, path::Path, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

pub use file::FileStore;
pub use memory::MemoryStore;

/// The two independent record collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Products,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Users, Collection::Products];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Products => "products",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unreachable: {0}")]
    Unreachable(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt collection file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Check that the backing storage is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Append a document to `collection` under `id`.
    async fn insert(&self, collection: Collection, id: Uuid, document: Value) -> Result<(), StoreError>;

    /// All documents of `collection`, oldest first.
    async fn list(&self, collection: Collection) -> Result<Vec<Value>, StoreError>;

    /// Remove the document with `id`. Returns `false` when nothing matched.
    async fn remove(&self, collection: Collection, id: Uuid) -> Result<bool, StoreError>;
}

pub type SharedStore = Arc<dyn DocumentStore>;

/// Open the configured store: file-backed when a data directory is given,
/// in-memory otherwise.
pub async fn open(data_dir: Option<&Path>) -> Result<SharedStore, StoreError> {
    match data_dir {
        Some(dir) => {
            let store = FileStore::open(dir).await?;
            info!("Using file store at {}", dir.display());
            Ok(Arc::new(store))
        }
        None => {
            info!("DATA_DIR not set, using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Per-collection documents in insertion order.
#[derive(Debug, Default, Clone)]
pub(crate) struct Collections {
    users: Vec<(Uuid, Value)>,
    products: Vec<(Uuid, Value)>,
}

impl Collections {
    pub(crate) fn get(&self, collection: Collection) -> &Vec<(Uuid, Value)> {
        match collection {
            Collection::Users => &self.users,
            Collection::Products => &self.products,
        }
    }

    pub(crate) fn get_mut(&mut self, collection: Collection) -> &mut Vec<(Uuid, Value)> {
        match collection {
            Collection::Users => &mut self.users,
            Collection::Products => &mut self.products,
        }
    }

    pub(crate) fn documents(&self, collection: Collection) -> Vec<Value> {
        self.get(collection).iter().map(|(_, doc)| doc.clone()).collect()
    }

    pub(crate) fn take(&mut self, collection: Collection, id: Uuid) -> Option<Value> {
        let docs = self.get_mut(collection);
        let index = docs.iter().position(|(doc_id, _)| *doc_id == id)?;
        Some(docs.remove(index).1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn collection_names_match_routes() {
        assert_eq!(Collection::Users.to_string(), "users");
        assert_eq!(Collection::Products.to_string(), "products");
    }

    #[test]
    fn take_keeps_remaining_order() {
        let mut collections = Collections::default();
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        for (n, id) in ids.iter().enumerate() {
            collections.get_mut(Collection::Users).push((*id, json!({ "n": n })));
        }

        let doc = collections.take(Collection::Users, ids[1]).unwrap();
        assert_eq!(doc["n"], 1);

        let remaining = collections.documents(Collection::Users);
        assert_eq!(remaining, vec![json!({ "n": 0 }), json!({ "n": 2 })]);
        assert!(collections.documents(Collection::Products).is_empty());
    }

    #[test]
    fn take_missing_id_is_none() {
        let mut collections = Collections::default();
        assert!(collections.take(Collection::Products, Uuid::nil()).is_none());
    }
}
