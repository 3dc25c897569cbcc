//! SQLite product store (embedded, no external dependencies)

use anyhow::{Context, Result};
use async_trait::async_trait;
use catalog_types::{Product, ProductDraft};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::sync::Arc;

use super::{ProductStore, StoreError};

pub struct SqliteStore {
    pool: Arc<SqlitePool>,
}

impl SqliteStore {
    pub async fn new(database_path: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = std::path::Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        // AUTOINCREMENT keeps deleted ids from being reused.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                price REAL NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl ProductStore for SqliteStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, name, price FROM products ORDER BY id
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(StoreError::Unavailable)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO products (name, price) VALUES (?1, ?2)
            "#,
        )
        .bind(&draft.name)
        .bind(draft.price)
        .execute(&*self.pool)
        .await
        .map_err(StoreError::Unavailable)?;

        Ok(Product {
            id: result.last_insert_rowid(),
            name: draft.name,
            price: draft.price,
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Product, StoreError> {
        let row: Option<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, name, price FROM products WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(StoreError::Unavailable)?;

        row.map(|r| r.into()).ok_or(StoreError::NotFound(id))
    }

    async fn update(&self, id: i64, draft: ProductDraft) -> Result<Product, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE products SET name = ?1, price = ?2 WHERE id = ?3
            "#,
        )
        .bind(&draft.name)
        .bind(draft.price)
        .bind(id)
        .execute(&*self.pool)
        .await
        .map_err(StoreError::Unavailable)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(Product {
            id,
            name: draft.name,
            price: draft.price,
        })
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM products WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&*self.pool)
        .await
        .map_err(StoreError::Unavailable)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: f64,
}

impl From<ProductRow> for Product {
    fn from(r: ProductRow) -> Self {
        Product {
            id: r.id,
            name: r.name,
            price: r.price,
        }
    }
}
