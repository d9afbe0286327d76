use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

#[derive(Debug, Clone, Serialize, Deserialize, Default, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct FeedQuery {
    /// Number of events to return, from 1 up to the configured maximum
    /// (`FEED_MAX_PAGE_SIZE`, 100 by default). Defaults to 20.
    pub page_chunk_size: Option<i64>,
    /// Only events strictly older than this timestamp are returned.
    pub starting_date: Option<DateTime<Utc>>,
}
