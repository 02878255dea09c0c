//! Integration tests for the items domain
//!
//! These use real PostgreSQL via testcontainers to ensure:
//! - The migration matches the entity
//! - The primary key surfaces as `DuplicateKey`
//! - The price check constraint holds even when validation is bypassed
//!
//! Run with `cargo test -p domain_items -- --ignored` on a host with Docker.

use domain_items::*;
use sea_orm::ConnectionTrait;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_insert_and_find_item() {
    let db = TestDatabase::new().await;
    let repo = PgItemRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("insert_and_find");

    let item = Item {
        id: 4312558,
        name: builder.name("item", "main"),
        price: builder.price(),
    };

    let created = repo.insert(item.clone()).await.unwrap();
    assert_eq!(created.id, item.id);
    assert_eq!(created.name, item.name);
    assert_price_eq(created.price, item.price, "created price");

    let found = assert_some(repo.find_by_id(item.id).await.unwrap(), "item should exist");
    assert_eq!(found.name, item.name);
    assert_price_eq(found.price, item.price, "stored price");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_taken_id_is_duplicate_key() {
    let db = TestDatabase::new().await;
    let repo = PgItemRepository::new(db.connection());

    let item = Item {
        id: 77,
        name: "First".to_string(),
        price: 1.0,
    };
    repo.insert(item.clone()).await.unwrap();

    let err = repo
        .insert(Item {
            name: "Second".to_string(),
            ..item
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ItemError::DuplicateKey(77)), "got {err:?}");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_all_orders_by_id() {
    let db = TestDatabase::new().await;
    let repo = PgItemRepository::new(db.connection());

    for id in [300, 100, 200] {
        repo.insert(Item {
            id,
            name: format!("item-{id}"),
            price: 0.0,
        })
        .await
        .unwrap();
    }

    let ids: Vec<i64> = repo.find_all().await.unwrap().into_iter().map(|i| i.id).collect();
    assert_eq!(ids, [100, 200, 300]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_and_delete() {
    let db = TestDatabase::new().await;
    let repo = PgItemRepository::new(db.connection());

    repo.insert(Item {
        id: 5,
        name: "Pen".to_string(),
        price: 1.5,
    })
    .await
    .unwrap();

    let updated = repo
        .update(
            5,
            ItemChanges {
                name: None,
                price: Some(2.0),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Pen");
    assert_price_eq(updated.price, 2.0, "updated price");

    let removed = repo.delete(5).await.unwrap();
    assert_eq!(removed.name, "Pen");
    assert!(repo.find_by_id(5).await.unwrap().is_none());
    assert!(matches!(repo.delete(5).await.unwrap_err(), ItemError::NotFound(5)));
    assert!(matches!(
        repo.update(5, ItemChanges::default()).await.unwrap_err(),
        ItemError::NotFound(5)
    ));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_negative_price_rejected_by_schema() {
    let db = TestDatabase::new().await;

    let result = db
        .connection
        .execute_unprepared("INSERT INTO items (id, name, price) VALUES (1, 'Bad', -1)")
        .await;
    assert!(result.is_err());
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_service_retries_colliding_id() {
    use std::sync::atomic::{AtomicI64, Ordering};

    static NEXT: AtomicI64 = AtomicI64::new(0);
    // Yields 10, 10, 11, ... so the second create collides once.
    fn colliding_ids() -> i64 {
        let n = NEXT.fetch_add(1, Ordering::SeqCst);
        10 + n.saturating_sub(1)
    }

    let db = TestDatabase::new().await;
    let service = ItemService::with_id_generator(PgItemRepository::new(db.connection()), colliding_ids);

    let first = service.create_item(ItemPayload::new("First", 1.0)).await.unwrap();
    let second = service.create_item(ItemPayload::new("Second", 2.0)).await.unwrap();

    assert_eq!(first.id, 10);
    assert_eq!(second.id, 11);
    assert_eq!(service.list_items().await.unwrap().len(), 2);
}
