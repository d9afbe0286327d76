use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::{Error, Result};
use crate::models::job::Job;

pub const DEFAULT_PAGE_SIZE: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FeedEventType {
    IsCreate,
    IsUpdate,
}

/// One row of the feed query: a job snapshot plus the event it stands for.
#[derive(Debug, Clone, FromRow)]
pub struct FeedEventRow {
    #[sqlx(flatten)]
    pub job: Job,
    pub is_update: bool,
    pub event_timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedItem {
    #[serde(flatten)]
    pub job: Job,
    pub event_type: FeedEventType,
    pub event_timestamp: DateTime<Utc>,
    /// 1-indexed position within the returned page, for display only.
    pub row_number: i64,
}

/// Turns ordered rows into feed items, numbering them from 1.
pub fn number_page(rows: Vec<FeedEventRow>) -> Vec<FeedItem> {
    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| FeedItem {
            job: row.job,
            event_type: if row.is_update {
                FeedEventType::IsUpdate
            } else {
                FeedEventType::IsCreate
            },
            event_timestamp: row.event_timestamp,
            row_number: idx as i64 + 1,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedPageRequest {
    pub page_size: i64,
    pub starting_cursor: Option<DateTime<Utc>>,
}

impl FeedPageRequest {
    /// Accepts page sizes in `1..=max_page_size`.
    pub fn new(
        page_size: Option<i64>,
        starting_cursor: Option<DateTime<Utc>>,
        max_page_size: i64,
    ) -> Result<Self> {
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size <= 0 {
            return Err(Error::InvalidArgument(format!(
                "page_chunk_size must be a positive integer, got {}",
                page_size
            )));
        }
        if page_size > max_page_size {
            return Err(Error::InvalidArgument(format!(
                "page_chunk_size must not exceed {}, got {}",
                max_page_size, page_size
            )));
        }
        Ok(Self {
            page_size,
            starting_cursor,
        })
    }
}
