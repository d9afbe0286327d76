use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::evaluation_dto::CreateEvaluationPayload,
    error::Result,
    middleware::auth::CurrentUser,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/users/{username}/evaluations/{job_id}",
    params(
        ("username" = String, Path, description = "Username of the evaluated user"),
        ("job_id" = Uuid, Path, description = "Job ID")
    ),
    request_body = CreateEvaluationPayload,
    responses(
        (status = 201, description = "Evaluation recorded and offer completed", body = Evaluation),
        (status = 400, description = "Invalid payload or no accepted offer for this user"),
        (status = 403, description = "Caller does not own the job"),
        (status = 404, description = "Job or user not found"),
        (status = 409, description = "User already evaluated for this job")
    )
)]
#[axum::debug_handler]
pub async fn create_evaluation_for_user(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((username, job_id)): Path<(String, Uuid)>,
    Json(payload): Json<CreateEvaluationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let candidate = state.user_service.get_by_username(&username).await?;
    let evaluation = state
        .evaluation_service
        .create_evaluation(job_id, candidate.id, payload, &user)
        .await?;
    Ok((StatusCode::CREATED, Json(evaluation)))
}

#[utoipa::path(
    get,
    path = "/api/users/{username}/evaluations/{job_id}",
    params(
        ("username" = String, Path, description = "Username of the evaluated user"),
        ("job_id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Evaluation found", body = Evaluation),
        (status = 404, description = "User or evaluation not found")
    )
)]
#[axum::debug_handler]
pub async fn get_evaluation_for_user(
    State(state): State<AppState>,
    Path((username, job_id)): Path<(String, Uuid)>,
) -> Result<impl IntoResponse> {
    let candidate = state.user_service.get_by_username(&username).await?;
    let evaluation = state
        .evaluation_service
        .get_evaluation(job_id, candidate.id)
        .await?;
    Ok(Json(evaluation))
}

#[utoipa::path(
    get,
    path = "/api/users/{username}/evaluations",
    params(
        ("username" = String, Path, description = "Username of the evaluated user")
    ),
    responses(
        (status = 200, description = "Evaluations received by the user", body = [Evaluation]),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn list_evaluations_for_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse> {
    let candidate = state.user_service.get_by_username(&username).await?;
    let evaluations = state
        .evaluation_service
        .list_evaluations_for_candidate(candidate.id)
        .await?;
    Ok(Json(evaluations))
}

#[utoipa::path(
    get,
    path = "/api/users/{username}/evaluations/stats",
    params(
        ("username" = String, Path, description = "Username of the evaluated user")
    ),
    responses(
        (status = 200, description = "Aggregate rating statistics", body = EvaluationAggregate),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn get_stats_for_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse> {
    let candidate = state.user_service.get_by_username(&username).await?;
    let stats = state
        .evaluation_service
        .get_aggregate_stats(candidate.id)
        .await?;
    Ok(Json(stats))
}
