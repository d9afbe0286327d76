use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::offer::{Offer, OfferStatus};
use crate::models::user::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CandidateSummary {
    pub id: Uuid,
    pub username: String,
}

impl From<User> for CandidateSummary {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            username: value.username,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OfferResponse {
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub status: OfferStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate: Option<CandidateSummary>,
}

impl OfferResponse {
    pub fn with_candidate(mut self, candidate: Option<CandidateSummary>) -> Self {
        self.candidate = candidate;
        self
    }
}

impl From<Offer> for OfferResponse {
    fn from(value: Offer) -> Self {
        Self {
            job_id: value.job_id,
            candidate_id: value.candidate_id,
            status: value.status,
            created_at: value.created_at,
            updated_at: value.updated_at,
            candidate: None,
        }
    }
}
