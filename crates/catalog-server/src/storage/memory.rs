//! In-memory product store
//!
//! No durability and no cross-process visibility. The collection and its
//! id counter live behind one reader/writer lock: reads share it, writes
//! take it exclusively. Identifiers are never reused after delete.

use async_trait::async_trait;
use catalog_types::{Product, ProductDraft};
use tokio::sync::RwLock;

use super::{ProductStore, StoreError};

pub struct MemoryStore {
    inner: RwLock<Inner>,
}

struct Inner {
    products: Vec<Product>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                products: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.products.clone())
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, StoreError> {
        let mut inner = self.inner.write().await;
        let product = Product {
            id: inner.next_id,
            name: draft.name,
            price: draft.price,
        };
        inner.next_id += 1;
        inner.products.push(product.clone());
        Ok(product)
    }

    async fn get_by_id(&self, id: i64) -> Result<Product, StoreError> {
        let inner = self.inner.read().await;
        inner
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn update(&self, id: i64, draft: ProductDraft) -> Result<Product, StoreError> {
        let mut inner = self.inner.write().await;
        let slot = inner
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;
        slot.name = draft.name;
        slot.price = draft.price;
        Ok(slot.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let pos = inner
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;
        inner.products.remove(pos);
        Ok(())
    }
}
