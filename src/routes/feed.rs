use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Json},
};

use crate::{
    dto::feed_dto::FeedQuery,
    error::{Error, Result},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/feed/jobs",
    params(FeedQuery),
    responses(
        (status = 200, description = "Newest job events first", body = [FeedItem]),
        (status = 400, description = "Malformed or out-of-range page size or cursor")
    )
)]
#[axum::debug_handler]
pub async fn get_job_feed(
    State(state): State<AppState>,
    query: std::result::Result<Query<FeedQuery>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query.map_err(|rejection| Error::InvalidArgument(rejection.body_text()))?;
    let items = state
        .feed_service
        .fetch_feed(query.page_chunk_size, query.starting_date)
        .await?;
    Ok(Json(items))
}
