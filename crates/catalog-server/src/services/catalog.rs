//! Catalog service: cache-aside orchestration over a product store
//!
//! Reads serve from the cache when fresh, fall through to storage on a
//! miss, and write the result back with a TTL. Writes go guard ->
//! validate -> storage -> synchronous cache invalidation, in that order,
//! so that no read after an acknowledged write can observe cache state
//! computed before it.

use catalog_types::{validate_draft, Identity, Product, ProductDraft};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cache::CacheLayer;
use crate::error::CatalogError;
use crate::guard::AccessGuard;
use crate::storage::ProductStore;

pub const LIST_KEY: &str = "products:list";

// The list changes on every write; individual items only on their own
// update, so they get the longer window.
pub const LIST_TTL: Duration = Duration::from_secs(5 * 60);
pub const ITEM_TTL: Duration = Duration::from_secs(10 * 60);

fn item_key(id: i64) -> String {
    format!("product:{}", id)
}

/// How a read was served, surfaced as the `X-Cache` response header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
    Disabled,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
            CacheStatus::Disabled => "DISABLED",
        }
    }
}

pub struct CatalogService {
    store: Arc<dyn ProductStore>,
    cache: Option<Arc<CacheLayer>>,
    guard: Arc<dyn AccessGuard>,
}

impl CatalogService {
    pub fn new(
        store: Arc<dyn ProductStore>,
        cache: Option<Arc<CacheLayer>>,
        guard: Arc<dyn AccessGuard>,
    ) -> Self {
        Self {
            store,
            cache,
            guard,
        }
    }

    pub async fn list(
        &self,
        cancel: &CancellationToken,
    ) -> Result<(Vec<Product>, CacheStatus), CatalogError> {
        check_cancelled(cancel)?;

        if let Some(products) = self.cache_read::<Vec<Product>>(LIST_KEY) {
            return Ok((products, CacheStatus::Hit));
        }

        let products = self.store.list().await?;
        let status = self.cache_fill(LIST_KEY, &products, LIST_TTL);
        Ok((products, status))
    }

    pub async fn get(
        &self,
        id: i64,
        cancel: &CancellationToken,
    ) -> Result<(Product, CacheStatus), CatalogError> {
        check_cancelled(cancel)?;

        let key = item_key(id);
        if let Some(product) = self.cache_read::<Product>(&key) {
            return Ok((product, CacheStatus::Hit));
        }

        // NotFound propagates here; negative results are never cached.
        let product = self.store.get_by_id(id).await?;
        let status = self.cache_fill(&key, &product, ITEM_TTL);
        Ok((product, status))
    }

    pub async fn create(
        &self,
        caller: Option<&Identity>,
        draft: ProductDraft,
        cancel: &CancellationToken,
    ) -> Result<Product, CatalogError> {
        check_cancelled(cancel)?;
        let identity = self.authorize(caller)?;
        self.validate(&draft)?;

        info!("user {} creating product {:?}", identity.email, draft.name);
        let created = self.store.create(draft).await?;

        // The set of products changed; there is no item entry yet.
        self.cache_drop(&[LIST_KEY.to_string()]);

        Ok(created)
    }

    pub async fn update(
        &self,
        caller: Option<&Identity>,
        id: i64,
        draft: ProductDraft,
        cancel: &CancellationToken,
    ) -> Result<Product, CatalogError> {
        check_cancelled(cancel)?;
        let identity = self.authorize(caller)?;
        self.validate(&draft)?;

        info!("user {} updating product {}", identity.email, id);
        let updated = self.store.update(id, draft).await?;

        self.cache_drop(&[LIST_KEY.to_string(), item_key(id)]);

        Ok(updated)
    }

    pub async fn delete(
        &self,
        caller: Option<&Identity>,
        id: i64,
        cancel: &CancellationToken,
    ) -> Result<(), CatalogError> {
        check_cancelled(cancel)?;
        let identity = self.authorize(caller)?;

        info!("user {} deleting product {}", identity.email, id);
        self.store.delete(id).await?;

        self.cache_drop(&[LIST_KEY.to_string(), item_key(id)]);

        Ok(())
    }

    fn authorize(&self, caller: Option<&Identity>) -> Result<Identity, CatalogError> {
        self.guard
            .authorize(caller)
            .map_err(|_| CatalogError::Unauthorized)
    }

    fn validate(&self, draft: &ProductDraft) -> Result<(), CatalogError> {
        let errors = validate_draft(draft);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::Validation(errors))
        }
    }

    // Cache access is best-effort throughout: when no cache is configured
    // these are no-ops, and a snapshot that fails to (de)serialize is
    // logged and treated as a miss. Nothing below may fail the operation.

    fn cache_read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let cache = self.cache.as_ref()?;
        let raw = cache.get(key)?;
        match serde_json::from_slice(&raw) {
            Ok(value) => {
                debug!("cache hit for {}", key);
                Some(value)
            }
            Err(e) => {
                warn!("discarding undecodable cache entry {}: {}", key, e);
                cache.delete(&[key.to_string()]);
                None
            }
        }
    }

    fn cache_fill<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> CacheStatus {
        let Some(cache) = self.cache.as_ref() else {
            return CacheStatus::Disabled;
        };
        match serde_json::to_vec(value) {
            Ok(raw) => cache.set(key.to_string(), raw, ttl),
            Err(e) => warn!("failed to serialize cache entry {}: {}", key, e),
        }
        CacheStatus::Miss
    }

    fn cache_drop(&self, keys: &[String]) {
        if let Some(cache) = self.cache.as_ref() {
            debug!("invalidating cache keys {:?}", keys);
            cache.delete(keys);
        }
    }
}

fn check_cancelled(cancel: &CancellationToken) -> Result<(), CatalogError> {
    if cancel.is_cancelled() {
        return Err(CatalogError::Cancelled);
    }
    Ok(())
}
