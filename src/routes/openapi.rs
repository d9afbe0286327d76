use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

use crate::dto::evaluation_dto::CreateEvaluationPayload;
use crate::dto::job_dto::{CreateJobPayload, JobResponse, UpdateJobPayload};
use crate::dto::offer_dto::{CandidateSummary, OfferResponse};
use crate::models::evaluation::{Evaluation, EvaluationAggregate};
use crate::models::feed::{FeedEventType, FeedItem};
use crate::models::job::{Job, JobType};
use crate::models::offer::OfferStatus;

use super::{evaluations, feed, jobs, offers};

#[derive(OpenApi)]
#[openapi(
    paths(
        jobs::create_job,
        jobs::list_my_jobs,
        jobs::get_job,
        jobs::update_job,
        jobs::delete_job,
        offers::create_offer,
        offers::list_offers_for_job,
        offers::get_offer_from_user,
        offers::accept_offer_from_user,
        offers::cancel_offer,
        offers::rescind_offer,
        evaluations::create_evaluation_for_user,
        evaluations::get_evaluation_for_user,
        evaluations::list_evaluations_for_user,
        evaluations::get_stats_for_user,
        feed::get_job_feed,
    ),
    components(schemas(
        CreateJobPayload,
        UpdateJobPayload,
        JobResponse,
        Job,
        JobType,
        OfferResponse,
        OfferStatus,
        CandidateSummary,
        CreateEvaluationPayload,
        Evaluation,
        EvaluationAggregate,
        FeedItem,
        FeedEventType,
    ))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
