pub mod evaluations;
pub mod feed;
pub mod health;
pub mod jobs;
pub mod offers;
pub mod openapi;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{middleware::auth::require_auth, AppState};

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/jobs", get(jobs::list_my_jobs).post(jobs::create_job))
        .route(
            "/api/jobs/:job_id",
            get(jobs::get_job)
                .patch(jobs::update_job)
                .delete(jobs::delete_job),
        )
        .route(
            "/api/jobs/:job_id/offers",
            get(offers::list_offers_for_job)
                .post(offers::create_offer)
                .put(offers::cancel_offer)
                .delete(offers::rescind_offer),
        )
        .route(
            "/api/jobs/:job_id/offers/:username",
            get(offers::get_offer_from_user).put(offers::accept_offer_from_user),
        )
        .route(
            "/api/users/:username/evaluations",
            get(evaluations::list_evaluations_for_user),
        )
        .route(
            "/api/users/:username/evaluations/stats",
            get(evaluations::get_stats_for_user),
        )
        .route(
            "/api/users/:username/evaluations/:job_id",
            get(evaluations::get_evaluation_for_user)
                .post(evaluations::create_evaluation_for_user),
        )
        .route("/api/feed/jobs", get(feed::get_job_feed))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .merge(api)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
