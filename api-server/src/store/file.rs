//! File-backed document store.
//!
//! One JSON array per collection in the data directory. Every mutation
//! rewrites that collection's file through a temp file and a rename, so a
//! crash leaves either the old or the new contents on disk. Memory only
//! changes once the rename has succeeded.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::{fs, sync::RwLock, task};
use tracing::debug;
use uuid::Uuid;

use super::{Collection, Collections, DocumentStore, StoreError};

#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    collections: Arc<RwLock<Collections>>,
}

impl FileStore {
    /// Open (creating if needed) the data directory and load every collection.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).await.map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;

        let mut collections = Collections::default();
        for collection in Collection::ALL {
            let path = collection_path(&dir, collection);
            *collections.get_mut(collection) = load(&path).await?;
            debug!(
                "Loaded {} {} documents from {}",
                collections.get(collection).len(),
                collection,
                path.display()
            );
        }

        Ok(Self {
            dir,
            collections: Arc::new(RwLock::new(collections)),
        })
    }

    /// Apply `edit` to a copy of the collection, write that copy to disk, then
    /// swap it into memory. Runs on the blocking pool so a dropped caller
    /// cannot stop it between the write and the swap. `edit` returning false
    /// means nothing changed and nothing is written.
    async fn commit<F>(&self, collection: Collection, edit: F) -> Result<bool, StoreError>
    where
        F: FnOnce(&mut Vec<(Uuid, Value)>) -> bool + Send + 'static,
    {
        let collections = Arc::clone(&self.collections);
        let path = collection_path(&self.dir, collection);

        task::spawn_blocking(move || -> Result<bool, StoreError> {
            let mut collections = collections.blocking_write();
            let mut staged = collections.get(collection).clone();
            if !edit(&mut staged) {
                return Ok(false);
            }
            write_atomically(&path, &staged)?;
            *collections.get_mut(collection) = staged;
            Ok(true)
        })
        .await
        .map_err(|e| StoreError::Unreachable(format!("write to {collection} aborted: {e}")))?
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn ping(&self) -> Result<(), StoreError> {
        match fs::metadata(&self.dir).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(StoreError::Unreachable(format!(
                "{} is not a directory",
                self.dir.display()
            ))),
            Err(e) => Err(StoreError::Unreachable(format!("{}: {e}", self.dir.display()))),
        }
    }

    async fn insert(&self, collection: Collection, id: Uuid, document: Value) -> Result<(), StoreError> {
        self.commit(collection, move |docs| {
            docs.push((id, document));
            true
        })
        .await?;
        debug!("Inserted {id} into {collection}");
        Ok(())
    }

    async fn list(&self, collection: Collection) -> Result<Vec<Value>, StoreError> {
        Ok(self.collections.read().await.documents(collection))
    }

    async fn remove(&self, collection: Collection, id: Uuid) -> Result<bool, StoreError> {
        let removed = self
            .commit(collection, move |docs| {
                let before = docs.len();
                docs.retain(|(doc_id, _)| *doc_id != id);
                docs.len() != before
            })
            .await?;
        if removed {
            debug!("Removed {id} from {collection}");
        }
        Ok(removed)
    }
}

fn write_atomically(path: &Path, docs: &[(Uuid, Value)]) -> Result<(), StoreError> {
    let tmp = path.with_extension("json.tmp");
    let documents: Vec<&Value> = docs.iter().map(|(_, doc)| doc).collect();
    let bytes = serde_json::to_vec_pretty(&documents).map_err(|e| StoreError::Corrupt {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    std::fs::write(&tmp, bytes).map_err(|source| StoreError::Io {
        path: tmp.clone(),
        source,
    })?;
    std::fs::rename(&tmp, path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn collection_path(dir: &Path, collection: Collection) -> PathBuf {
    dir.join(format!("{}.json", collection.name()))
}

async fn load(path: &Path) -> Result<Vec<(Uuid, Value)>, StoreError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let corrupt = |reason: String| StoreError::Corrupt {
        path: path.to_path_buf(),
        reason,
    };

    let documents: Vec<Value> = serde_json::from_slice(&bytes).map_err(|e| corrupt(e.to_string()))?;
    documents
        .into_iter()
        .map(|doc| {
            let id = doc
                .get("id")
                .and_then(Value::as_str)
                .and_then(|s| Uuid::parse_str(s).ok())
                .ok_or_else(|| corrupt("document without a valid id".to_string()))?;
            Ok((id, doc))
        })
        .collect()
}
