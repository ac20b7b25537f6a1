use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{Collection, Collections, DocumentStore, StoreError};

/// In-process store. Contents live as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert(&self, collection: Collection, id: Uuid, document: Value) -> Result<(), StoreError> {
        self.collections.write().await.get_mut(collection).push((id, document));
        debug!("Inserted {id} into {collection}");
        Ok(())
    }

    async fn list(&self, collection: Collection) -> Result<Vec<Value>, StoreError> {
        Ok(self.collections.read().await.documents(collection))
    }

    async fn remove(&self, collection: Collection, id: Uuid) -> Result<bool, StoreError> {
        let removed = self.collections.write().await.take(collection, id).is_some();
        if removed {
            debug!("Removed {id} from {collection}");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn insert_then_list_preserves_order() {
        let store = MemoryStore::new();
        for n in 0..3 {
            store.insert(Collection::Users, Uuid::new_v4(), json!({ "n": n })).await.unwrap();
        }
        let docs = store.list(Collection::Users).await.unwrap();
        let ns: Vec<i64> = docs.iter().map(|d| d["n"].as_i64().unwrap()).collect();
        assert_eq!(ns, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn collections_are_independent() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        store.insert(Collection::Products, id, json!({ "name": "Pen" })).await.unwrap();

        assert!(store.list(Collection::Users).await.unwrap().is_empty());
        assert!(!store.remove(Collection::Users, id).await.unwrap());
        assert!(store.remove(Collection::Products, id).await.unwrap());
        assert!(store.list(Collection::Products).await.unwrap().is_empty());
    }
}
