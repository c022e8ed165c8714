use actorstats_core::error::CoreError;
use actorstats_core::lookup::RequestHistory;
use actorstats_core::record::NameHistory;
use async_trait::async_trait;

use crate::models::search_request::SearchRequest;
use crate::repositories::SearchRequestRepo;
use crate::DbPool;

/// [`RequestHistory`] backed by the `requests` table.
#[derive(Debug, Clone)]
pub struct PgRequestHistory {
    pool: DbPool,
}

impl PgRequestHistory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestHistory for PgRequestHistory {
    async fn most_recent_by_name(&self, name: &str) -> Result<Option<NameHistory>, CoreError> {
        let rows = SearchRequestRepo::list_by_name(&self.pool, name)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, actor = %name, "Failed to query search requests");
                CoreError::Internal(format!("search request query failed: {e}"))
            })?;

        Ok(NameHistory::from_newest_first(
            rows.into_iter().map(SearchRequest::into_record).collect(),
        ))
    }
}
