use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::offer_dto::{CandidateSummary, OfferResponse},
    error::Result,
    middleware::auth::CurrentUser,
    models::offer::Offer,
    AppState,
};

// Attaches each candidate's public profile to their offer.
async fn populate(state: &AppState, offers: Vec<Offer>) -> Result<Vec<OfferResponse>> {
    let ids: Vec<Uuid> = offers.iter().map(|o| o.candidate_id).collect();
    let candidates: HashMap<Uuid, CandidateSummary> = state
        .user_service
        .get_many(&ids)
        .await?
        .into_iter()
        .map(|u| (u.id, CandidateSummary::from(u)))
        .collect();

    Ok(offers
        .into_iter()
        .map(|o| {
            let candidate = candidates.get(&o.candidate_id).cloned();
            OfferResponse::from(o).with_candidate(candidate)
        })
        .collect())
}

fn caller_summary(user: &CurrentUser) -> CandidateSummary {
    CandidateSummary {
        id: user.id,
        username: user.username.clone(),
    }
}

#[utoipa::path(
    post,
    path = "/api/jobs/{job_id}/offers",
    params(
        ("job_id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 201, description = "Offer created", body = OfferResponse),
        (status = 400, description = "Owner cannot offer on their own job"),
        (status = 404, description = "Job not found"),
        (status = 409, description = "Offer already exists")
    )
)]
#[axum::debug_handler]
pub async fn create_offer(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let offer = state.offer_service.create_offer(job_id, user.id).await?;
    let response = OfferResponse::from(offer).with_candidate(Some(caller_summary(&user)));
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{job_id}/offers",
    params(
        ("job_id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Offers visible to the caller", body = [OfferResponse]),
        (status = 403, description = "Caller is neither owner nor candidate"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn list_offers_for_job(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let offers = state.offer_service.list_offers_for_job(job_id, &user).await?;
    Ok(Json(populate(&state, offers).await?))
}

#[utoipa::path(
    get,
    path = "/api/jobs/{job_id}/offers/{username}",
    params(
        ("job_id" = Uuid, Path, description = "Job ID"),
        ("username" = String, Path, description = "Username of the offering user")
    ),
    responses(
        (status = 200, description = "Offer found", body = OfferResponse),
        (status = 403, description = "Caller is neither owner nor candidate"),
        (status = 404, description = "Job, user or offer not found")
    )
)]
#[axum::debug_handler]
pub async fn get_offer_from_user(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((job_id, username)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse> {
    let candidate = state.user_service.get_by_username(&username).await?;
    let offer = state
        .offer_service
        .get_offer(job_id, candidate.id, &user)
        .await?;
    Ok(Json(
        OfferResponse::from(offer).with_candidate(Some(candidate.into())),
    ))
}

#[utoipa::path(
    put,
    path = "/api/jobs/{job_id}/offers/{username}",
    params(
        ("job_id" = Uuid, Path, description = "Job ID"),
        ("username" = String, Path, description = "Username of the offering user")
    ),
    responses(
        (status = 200, description = "Offer accepted, other pending offers rejected", body = OfferResponse),
        (status = 400, description = "Offer is not pending or job already taken"),
        (status = 403, description = "Caller does not own the job"),
        (status = 404, description = "Job, user or offer not found")
    )
)]
#[axum::debug_handler]
pub async fn accept_offer_from_user(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((job_id, username)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse> {
    let candidate = state.user_service.get_by_username(&username).await?;
    let offer = state
        .offer_service
        .accept_offer(job_id, candidate.id, &user)
        .await?;
    Ok(Json(
        OfferResponse::from(offer).with_candidate(Some(candidate.into())),
    ))
}

#[utoipa::path(
    put,
    path = "/api/jobs/{job_id}/offers",
    params(
        ("job_id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Own accepted offer cancelled, rejected offers reopened", body = OfferResponse),
        (status = 400, description = "Offer is not accepted"),
        (status = 404, description = "Job or offer not found")
    )
)]
#[axum::debug_handler]
pub async fn cancel_offer(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let offer = state
        .offer_service
        .cancel_offer(job_id, user.id, &user)
        .await?;
    let response = OfferResponse::from(offer).with_candidate(Some(caller_summary(&user)));
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/jobs/{job_id}/offers",
    params(
        ("job_id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 204, description = "Pending offer removed (or there was none)"),
        (status = 400, description = "Offer is no longer pending"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn rescind_offer(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state
        .offer_service
        .rescind_offer(job_id, user.id, &user)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
