//! Item Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::{ItemError, ItemResult};
use crate::id::generate_id;
use crate::input::ItemInput;
use crate::models::{Item, ItemChanges};
use crate::repository::ItemRepository;
use crate::validation::{ValidationMode, validate_input};

/// Item operations behind the HTTP handlers.
///
/// Validation happens here so that every repository sees only accepted
/// input. New ids come from `id_source`, which defaults to [`generate_id`].
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
    id_source: fn() -> i64,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_id_generator(repository, generate_id)
    }

    /// Use a custom id source, e.g. a fixed sequence in tests.
    pub fn with_id_generator(repository: R, id_source: fn() -> i64) -> Self {
        Self {
            repository: Arc::new(repository),
            id_source,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_items(&self) -> ItemResult<Vec<Item>> {
        self.repository.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, id: i64) -> ItemResult<Item> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))
    }

    /// Validate and store a new item under a fresh id.
    ///
    /// A taken id is retried once with another id; a second collision is
    /// returned as [`ItemError::DuplicateKey`].
    #[instrument(skip(self, input))]
    pub async fn create_item(&self, input: impl Into<ItemInput>) -> ItemResult<Item> {
        let input = input.into();
        let errors = validate_input(&input, ValidationMode::Create);
        let payload = input.payload;
        let (Some(name), Some(price), true) = (payload.name, payload.price, errors.is_empty())
        else {
            return Err(ItemError::Validation(errors));
        };

        let item = Item {
            id: (self.id_source)(),
            name,
            price,
        };

        match self.repository.insert(item.clone()).await {
            Err(ItemError::DuplicateKey(taken)) => {
                let retry = Item {
                    id: (self.id_source)(),
                    ..item
                };
                tracing::warn!(taken_id = taken, retry_id = retry.id, "Item id collision, retrying");
                self.repository.insert(retry).await.inspect_err(|e| {
                    if let ItemError::DuplicateKey(id) = e {
                        tracing::error!(item_id = id, "Item id collided again, giving up");
                    }
                })
            }
            result => result,
        }
    }

    /// Replace the supplied fields of an existing item.
    ///
    /// The lookup runs before the body is looked at, so an unknown id is
    /// reported as not found even when the body is invalid or unreadable.
    #[instrument(skip(self, input))]
    pub async fn update_item(&self, id: i64, input: impl Into<ItemInput>) -> ItemResult<Item> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(ItemError::NotFound(id));
        }

        let input = input.into();
        let errors = validate_input(&input, ValidationMode::Update);
        if !errors.is_empty() {
            return Err(ItemError::Validation(errors));
        }

        self.repository.update(id, ItemChanges::from(input.payload)).await
    }

    /// Remove an item, returning what was stored.
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: i64) -> ItemResult<Item> {
        self.repository.delete(id).await
    }
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            id_source: self.id_source,
        }
    }
}
