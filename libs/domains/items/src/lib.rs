//! Items Domain
//!
//! CRUD over a small catalogue of named, priced items, with a PostgreSQL
//! and an in-memory store behind the same repository trait.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, status codes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, id generation, collision retry
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + PostgreSQL / in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Item, payloads, error bodies
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum::Router;
//! use domain_items::{ItemService, PgItemRepository, handlers};
//! use sea_orm::Database;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgresql://localhost/items").await?;
//! let service = ItemService::new(PgItemRepository::new(Arc::new(db)));
//!
//! let app: Router = Router::new().nest("/items", handlers::router(service));
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod id;
pub mod input;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod validation;

pub use error::{ItemError, ItemResult};
pub use handlers::ApiDoc;
pub use input::ItemInput;
pub use models::{FieldError, Item, ItemChanges, ItemPayload};
pub use postgres::PgItemRepository;
pub use repository::{InMemoryItemRepository, ItemRepository};
pub use service::ItemService;
pub use validation::{ValidationMode, validate_input, validate_item};
