use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEvaluationPayload {
    #[serde(default)]
    pub no_show: bool,
    #[validate(length(max = 200))]
    pub headline: Option<String>,
    pub comment: Option<String>,
    #[validate(range(min = 0, max = 5))]
    pub professionalism: Option<i32>,
    #[validate(range(min = 0, max = 5))]
    pub completeness: Option<i32>,
    #[validate(range(min = 0, max = 5))]
    pub efficiency: Option<i32>,
    #[validate(range(min = 1, max = 5))]
    pub overall_rating: i32,
}
