//! PostgreSQL document store.
//!
//! Each collection is a table of `(id TEXT PRIMARY KEY, doc JSONB)`.

use async_trait::async_trait;
use domain::models::Filter;
use sqlx::types::Json;
use sqlx::PgPool;

use super::{DocumentMap, DocumentStore, StoreError};
use crate::entities::DocumentEntity;
use crate::metrics::{record_pool_metrics, QueryTimer, StoreOperation};

/// Unique violation.
const PG_UNIQUE_VIOLATION: &str = "23505";

/// Document store backed by JSONB tables.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Creates a new store with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn clamp_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn replace(
        &self,
        collection: &'static str,
        id: &str,
        doc: DocumentMap,
    ) -> Result<(), StoreError> {
        let timer = QueryTimer::start(collection, StoreOperation::Replace);
        let sql = format!(
            "INSERT INTO {collection} (id, doc) VALUES ($1, $2) \
             ON CONFLICT (id) DO UPDATE SET doc = EXCLUDED.doc"
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(Json(doc))
            .execute(&self.pool)
            .await;
        timer.finish(&result);
        result?;
        Ok(())
    }

    async fn insert(
        &self,
        collection: &'static str,
        id: &str,
        doc: DocumentMap,
    ) -> Result<(), StoreError> {
        let timer = QueryTimer::start(collection, StoreOperation::Insert);
        let sql = format!("INSERT INTO {collection} (id, doc) VALUES ($1, $2)");
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(Json(doc))
            .execute(&self.pool)
            .await;
        timer.finish(&result);

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some(PG_UNIQUE_VIOLATION) =>
            {
                Err(StoreError::Duplicate {
                    collection,
                    id: id.to_string(),
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn merge(
        &self,
        collection: &'static str,
        id: &str,
        fields: DocumentMap,
    ) -> Result<bool, StoreError> {
        let timer = QueryTimer::start(collection, StoreOperation::Merge);
        // `||` on jsonb replaces top-level keys and keeps the rest.
        let sql = format!("UPDATE {collection} SET doc = doc || $2 WHERE id = $1");
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(Json(fields))
            .execute(&self.pool)
            .await;
        timer.finish(&result);
        Ok(result?.rows_affected() > 0)
    }

    async fn find_one(
        &self,
        collection: &'static str,
        id: &str,
    ) -> Result<Option<DocumentMap>, StoreError> {
        let timer = QueryTimer::start(collection, StoreOperation::FindOne);
        let sql = format!("SELECT id, doc FROM {collection} WHERE id = $1");
        let row = sqlx::query_as::<_, DocumentEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.finish(&row);
        Ok(row?.map(Into::into))
    }

    async fn find(
        &self,
        collection: &'static str,
        filter: &Filter,
        limit: usize,
    ) -> Result<Vec<DocumentMap>, StoreError> {
        let timer = QueryTimer::start(collection, StoreOperation::Find);
        // Containment of an empty object matches every row.
        let sql = format!("SELECT id, doc FROM {collection} WHERE doc @> $1 LIMIT $2");
        let rows = sqlx::query_as::<_, DocumentEntity>(&sql)
            .bind(Json(filter.predicates()))
            .bind(clamp_limit(limit))
            .fetch_all(&self.pool)
            .await;
        timer.finish(&rows);
        Ok(rows?.into_iter().map(Into::into).collect())
    }

    async fn find_by_ids(
        &self,
        collection: &'static str,
        ids: &[String],
        limit: usize,
    ) -> Result<Vec<DocumentMap>, StoreError> {
        let timer = QueryTimer::start(collection, StoreOperation::FindByIds);
        let sql = format!("SELECT id, doc FROM {collection} WHERE id = ANY($1) LIMIT $2");
        let rows = sqlx::query_as::<_, DocumentEntity>(&sql)
            .bind(ids)
            .bind(clamp_limit(limit))
            .fetch_all(&self.pool)
            .await;
        timer.finish(&rows);
        Ok(rows?.into_iter().map(Into::into).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        record_pool_metrics(&self.pool);
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
