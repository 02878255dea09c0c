use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{ItemError, ItemResult};
use crate::models::{Item, ItemChanges};

/// Persistence boundary for items.
///
/// Implementations report a taken id as [`ItemError::DuplicateKey`], a
/// missing id on update or delete as [`ItemError::NotFound`] and backend
/// failures as [`ItemError::Storage`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Store a new item under its own id.
    async fn insert(&self, item: Item) -> ItemResult<Item>;

    async fn find_by_id(&self, id: i64) -> ItemResult<Option<Item>>;

    /// Every stored item, ordered by id.
    async fn find_all(&self) -> ItemResult<Vec<Item>>;

    /// Overwrite the supplied fields and return the stored result.
    async fn update(&self, id: i64, changes: ItemChanges) -> ItemResult<Item>;

    /// Remove an item and return what was stored.
    async fn delete(&self, id: i64) -> ItemResult<Item>;
}

/// Process-local store, lost on restart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemRepository {
    items: Arc<RwLock<BTreeMap<i64, Item>>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn insert(&self, item: Item) -> ItemResult<Item> {
        let mut items = self.items.write().await;
        if items.contains_key(&item.id) {
            return Err(ItemError::DuplicateKey(item.id));
        }
        items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn find_all(&self) -> ItemResult<Vec<Item>> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn update(&self, id: i64, changes: ItemChanges) -> ItemResult<Item> {
        let mut items = self.items.write().await;
        let item = items.get_mut(&id).ok_or(ItemError::NotFound(id))?;
        changes.apply_to(item);
        Ok(item.clone())
    }

    async fn delete(&self, id: i64) -> ItemResult<Item> {
        self.items
            .write()
            .await
            .remove(&id)
            .ok_or(ItemError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, name: &str, price: f64) -> Item {
        Item {
            id,
            name: name.to_string(),
            price,
        }
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let repo = InMemoryItemRepository::new();
        let stored = repo.insert(item(1, "Widget", 9.99)).await.unwrap();
        assert_eq!(stored, item(1, "Widget", 9.99));
        assert_eq!(repo.find_by_id(1).await.unwrap(), Some(stored));
        assert_eq!(repo.find_by_id(2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_insert_rejects_taken_id() {
        let repo = InMemoryItemRepository::new();
        repo.insert(item(5, "First", 1.0)).await.unwrap();

        let err = repo.insert(item(5, "Second", 2.0)).await.unwrap_err();
        assert!(matches!(err, ItemError::DuplicateKey(5)));
        assert_eq!(repo.find_by_id(5).await.unwrap().unwrap().name, "First");
    }

    #[tokio::test]
    async fn test_find_all_is_ordered_by_id() {
        let repo = InMemoryItemRepository::new();
        for id in [30, 10, 20] {
            repo.insert(item(id, "x", 0.0)).await.unwrap();
        }
        let ids: Vec<i64> = repo.find_all().await.unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, [10, 20, 30]);
    }

    #[tokio::test]
    async fn test_update_keeps_omitted_fields() {
        let repo = InMemoryItemRepository::new();
        repo.insert(item(3, "Pen", 1.5)).await.unwrap();

        let updated = repo
            .update(
                3,
                ItemChanges {
                    name: None,
                    price: Some(2.0),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated, item(3, "Pen", 2.0));
        assert_eq!(repo.find_by_id(3).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let repo = InMemoryItemRepository::new();
        let err = repo.update(404, ItemChanges::default()).await.unwrap_err();
        assert!(matches!(err, ItemError::NotFound(404)));
    }

    #[tokio::test]
    async fn test_delete_returns_removed_item() {
        let repo = InMemoryItemRepository::new();
        repo.insert(item(8, "Cup", 4.0)).await.unwrap();

        assert_eq!(repo.delete(8).await.unwrap(), item(8, "Cup", 4.0));
        assert!(matches!(
            repo.delete(8).await.unwrap_err(),
            ItemError::NotFound(8)
        ));
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let repo = InMemoryItemRepository::new();
        let other = repo.clone();
        repo.insert(item(1, "Shared", 1.0)).await.unwrap();
        assert!(other.find_by_id(1).await.unwrap().is_some());
    }
}
