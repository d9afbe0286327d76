use crate::error::Result;
use crate::models::feed::{number_page, FeedEventRow, FeedItem, FeedPageRequest};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

// Every job yields a create event; jobs whose updated_at moved yield an update
// event too. Ordering is newest first with (id, event kind) breaking ties.
const FETCH_JOB_FEED_QUERY: &str = r#"
    WITH feed_events AS (
        SELECT id, name, description, price, job_type, owner, created_at, updated_at,
               FALSE AS is_update,
               created_at AS event_timestamp
        FROM jobs
        UNION ALL
        SELECT id, name, description, price, job_type, owner, created_at, updated_at,
               TRUE AS is_update,
               updated_at AS event_timestamp
        FROM jobs
        WHERE updated_at <> created_at
    )
    SELECT id, name, description, price, job_type, owner, created_at, updated_at,
           is_update, event_timestamp
    FROM feed_events
    WHERE $1::timestamptz IS NULL OR event_timestamp < $1::timestamptz
    ORDER BY event_timestamp DESC, id DESC, is_update DESC
    LIMIT $2
"#;

#[derive(Clone)]
pub struct FeedService {
    pool: PgPool,
    max_page_size: i64,
}

impl FeedService {
    pub fn new(pool: PgPool, max_page_size: i64) -> Self {
        Self {
            pool,
            max_page_size,
        }
    }

    /// Returns up to `page_size` job events older than `starting_cursor`
    /// (or the most recent ones when no cursor is given).
    pub async fn fetch_feed(
        &self,
        page_size: Option<i64>,
        starting_cursor: Option<DateTime<Utc>>,
    ) -> Result<Vec<FeedItem>> {
        let request = FeedPageRequest::new(page_size, starting_cursor, self.max_page_size)?;

        let rows = sqlx::query_as::<_, FeedEventRow>(FETCH_JOB_FEED_QUERY)
            .bind(request.starting_cursor)
            .bind(request.page_size)
            .fetch_all(&self.pool)
            .await?;

        debug!(
            page_size = request.page_size,
            cursor = ?request.starting_cursor,
            returned = rows.len(),
            "feed page fetched"
        );
        Ok(number_page(rows))
    }
}
