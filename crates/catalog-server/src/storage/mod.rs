//! Storage layer
//!
//! Two interchangeable product stores behind one trait: an in-memory
//! store (no durability, single process) and an embedded SQLite store.
//! Switching between them must never change observable API behavior,
//! only durability and latency.

pub mod db;
pub mod memory;

pub use db::SqliteStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use catalog_types::{Product, ProductDraft};

/// Errors a store can produce.
///
/// Validation is not represented here: stores are dumb persistence and
/// only ever see drafts that already passed validation upstream.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("product {0} not found")]
    NotFound(i64),

    #[error("storage unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),
}

/// Polymorphic persistence contract for products.
///
/// Both implementations must produce identical externally observable
/// results for identical operation sequences.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products, in insertion order.
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    /// Assign the next identifier, store, and return the stored product.
    async fn create(&self, draft: ProductDraft) -> Result<Product, StoreError>;

    async fn get_by_id(&self, id: i64) -> Result<Product, StoreError>;

    /// Replace the fields of the product at `id`, preserving the id.
    async fn update(&self, id: i64, draft: ProductDraft) -> Result<Product, StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}
