use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::job::{Job, JobType};

fn non_negative_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        return Err(ValidationError::new("price_must_be_non_negative"));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateJobPayload {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    #[validate(custom(function = "non_negative_price"))]
    pub price: Decimal,
    #[serde(default)]
    pub job_type: JobType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateJobPayload {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "non_negative_price"))]
    pub price: Option<Decimal>,
    pub job_type: Option<JobType>,
}

impl UpdateJobPayload {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.job_type.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct JobResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub job_type: JobType,
    pub owner: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Job> for JobResponse {
    fn from(value: Job) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            price: value.price,
            job_type: value.job_type,
            owner: value.owner,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_price_fails_validation() {
        let payload = CreateJobPayload {
            name: "Deep clean".into(),
            description: None,
            price: Decimal::new(-100, 2),
            job_type: JobType::FullClean,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn job_type_defaults_to_spot_clean() {
        let payload: CreateJobPayload =
            serde_json::from_str(r#"{"name":"Kitchen","price":"19.99"}"#).unwrap();
        assert_eq!(payload.job_type, JobType::SpotClean);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn update_without_fields_is_empty() {
        assert!(UpdateJobPayload::default().is_empty());
        let update = UpdateJobPayload {
            price: Some(Decimal::new(500, 2)),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
