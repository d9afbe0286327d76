pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use crate::services::{
    evaluation_service::EvaluationService, feed_service::FeedService, job_service::JobService,
    offer_service::OfferService, user_service::UserService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub jwt_secret: String,
    pub user_service: UserService,
    pub job_service: JobService,
    pub offer_service: OfferService,
    pub evaluation_service: EvaluationService,
    pub feed_service: FeedService,
}

impl AppState {
    pub fn new(pool: PgPool, jwt_secret: impl Into<String>, feed_max_page_size: i64) -> Self {
        let user_service = UserService::new(pool.clone());
        let job_service = JobService::new(pool.clone());
        let offer_service = OfferService::new(pool.clone(), job_service.clone());
        let evaluation_service =
            EvaluationService::new(pool.clone(), job_service.clone(), offer_service.clone());
        let feed_service = FeedService::new(pool.clone(), feed_max_page_size);

        Self {
            pool,
            jwt_secret: jwt_secret.into(),
            user_service,
            job_service,
            offer_service,
            evaluation_service,
            feed_service,
        }
    }

    pub fn from_config(pool: PgPool, config: &crate::config::Config) -> Self {
        Self::new(pool, config.jwt_secret.clone(), config.feed_max_page_size)
    }
}
