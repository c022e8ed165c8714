//! Repository for the `requests` table.

use sqlx::PgPool;

use crate::models::search_request::{CreateSearchRequest, SearchRequest};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, query_timestamp, image_bucket, image_key, created_at";

/// Provides read and insert operations for stored search requests.
pub struct SearchRequestRepo;

impl SearchRequestRepo {
    /// Insert a new search request, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSearchRequest,
    ) -> Result<SearchRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO requests (name, query_timestamp, image_bucket, image_key)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SearchRequest>(&query)
            .bind(&input.name)
            .bind(input.query_timestamp)
            .bind(&input.image_bucket)
            .bind(&input.image_key)
            .fetch_one(pool)
            .await
    }

    /// List every request whose name matches exactly, newest first.
    ///
    /// Runs inside its own transaction. The transaction is committed whether
    /// or not the read succeeded, and the read error (if any) is returned
    /// after the commit.
    pub async fn list_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Vec<SearchRequest>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "SELECT {COLUMNS} FROM requests
             WHERE name = $1
             ORDER BY query_timestamp DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, SearchRequest>(&query)
            .bind(name)
            .fetch_all(&mut *tx)
            .await;

        tx.commit().await?;
        rows
    }

    /// Number of requests recorded for `name`.
    pub async fn count_by_name(pool: &PgPool, name: &str) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM requests WHERE name = $1")
            .bind(name)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
