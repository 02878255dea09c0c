use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, SqlErr,
};
use std::sync::Arc;
use tracing::instrument;

use crate::{
    entity,
    error::{ItemError, ItemResult},
    models::{Item, ItemChanges},
    repository::ItemRepository,
};

/// [`ItemRepository`] over the `items` table.
///
/// The pool is shared with whoever else holds the `Arc`, e.g. the readiness
/// check and the shutdown hook.
#[derive(Clone)]
pub struct PgItemRepository {
    db: Arc<DatabaseConnection>,
}

impl PgItemRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn find_model(&self, operation: &'static str, id: i64) -> ItemResult<Option<entity::Model>> {
        entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| ItemError::storage(operation, Some(id), e))
    }
}

fn to_item(operation: &'static str, model: entity::Model) -> ItemResult<Item> {
    let id = model.id;
    Item::try_from(model).map_err(|e| ItemError::storage(operation, Some(id), e))
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    #[instrument(skip(self, item), fields(item_id = item.id))]
    async fn insert(&self, item: Item) -> ItemResult<Item> {
        let active_model = entity::ActiveModel::try_from(&item)
            .map_err(|e| ItemError::storage("insert", Some(item.id), e))?;

        let model = active_model.insert(self.db.as_ref()).await.map_err(|e| {
            if let Some(SqlErr::UniqueConstraintViolation(_)) = e.sql_err() {
                ItemError::DuplicateKey(item.id)
            } else {
                ItemError::storage("insert", Some(item.id), e)
            }
        })?;

        tracing::info!(item_id = model.id, "Created item");
        to_item("insert", model)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        self.find_model("find_by_id", id)
            .await?
            .map(|model| to_item("find_by_id", model))
            .transpose()
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> ItemResult<Vec<Item>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| ItemError::storage("find_all", None, e))?;

        models
            .into_iter()
            .map(|model| to_item("find_all", model))
            .collect()
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: i64, changes: ItemChanges) -> ItemResult<Item> {
        let model = self
            .find_model("update", id)
            .await?
            .ok_or(ItemError::NotFound(id))?;

        let mut active_model: entity::ActiveModel = model.into();
        if let Some(name) = changes.name {
            active_model.name = Set(name);
        }
        if let Some(price) = changes.price {
            let price =
                entity::to_decimal(price).map_err(|e| ItemError::storage("update", Some(id), e))?;
            active_model.price = Set(price);
        }

        let updated = active_model.update(self.db.as_ref()).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => ItemError::NotFound(id),
            other => ItemError::storage("update", Some(id), other),
        })?;

        tracing::info!(item_id = id, "Updated item");
        to_item("update", updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> ItemResult<Item> {
        let model = self
            .find_model("delete", id)
            .await?
            .ok_or(ItemError::NotFound(id))?;

        let result = entity::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| ItemError::storage("delete", Some(id), e))?;

        // Removed by someone else between the read and the delete.
        if result.rows_affected == 0 {
            return Err(ItemError::NotFound(id));
        }

        tracing::info!(item_id = id, "Deleted item");
        to_item("delete", model)
    }
}
