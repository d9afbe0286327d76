use crate::dto::evaluation_dto::CreateEvaluationPayload;
use crate::error::{Error, Result};
use crate::middleware::auth::CurrentUser;
use crate::models::evaluation::{Evaluation, EvaluationAggregate};
use crate::models::offer::{Offer, OfferStatus};
use crate::services::job_service::JobService;
use crate::services::offer_service::OfferService;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct EvaluationService {
    pool: PgPool,
    jobs: JobService,
    offers: OfferService,
}

impl EvaluationService {
    pub fn new(pool: PgPool, jobs: JobService, offers: OfferService) -> Self {
        Self { pool, jobs, offers }
    }

    /// Records the owner's evaluation of a candidate and completes the
    /// candidate's offer in the same transaction.
    pub async fn create_evaluation(
        &self,
        job_id: Uuid,
        candidate_id: Uuid,
        payload: CreateEvaluationPayload,
        caller: &CurrentUser,
    ) -> Result<Evaluation> {
        let mut tx = self.pool.begin().await?;

        let job = self.jobs.lock(&mut tx, job_id).await?;
        if !job.is_owned_by(caller.id) {
            return Err(Error::Forbidden(
                "Users are unable to leave evaluations for jobs they do not own".to_string(),
            ));
        }

        let already_evaluated = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM evaluations WHERE job_id = $1 AND candidate_id = $2
            )
            "#,
        )
        .bind(job_id)
        .bind(candidate_id)
        .fetch_one(&mut *tx)
        .await?;
        if already_evaluated {
            return Err(Error::Conflict(
                "This user has already been evaluated for this job".to_string(),
            ));
        }

        let offer = sqlx::query_as::<_, Offer>(
            r#"
            SELECT job_id, candidate_id, status, created_at, updated_at
            FROM offers
            WHERE job_id = $1 AND candidate_id = $2
            "#,
        )
        .bind(job_id)
        .bind(candidate_id)
        .fetch_optional(&mut *tx)
        .await?;
        match offer {
            Some(o) if o.candidate_id == candidate_id && o.status == OfferStatus::Accepted => {}
            Some(_) | None => {
                return Err(Error::InvalidOperation(
                    "Only users with accepted offers can be evaluated".to_string(),
                ))
            }
        }

        let evaluation = sqlx::query_as::<_, Evaluation>(
            r#"
            INSERT INTO evaluations (
                job_id, candidate_id, no_show, headline, comment,
                professionalism, completeness, efficiency, overall_rating
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING
                job_id,
                candidate_id,
                no_show,
                headline,
                comment,
                professionalism,
                completeness,
                efficiency,
                overall_rating,
                created_at,
                updated_at
            "#,
        )
        .bind(job_id)
        .bind(candidate_id)
        .bind(payload.no_show)
        .bind(&payload.headline)
        .bind(&payload.comment)
        .bind(payload.professionalism)
        .bind(payload.completeness)
        .bind(payload.efficiency)
        .bind(payload.overall_rating)
        .fetch_one(&mut *tx)
        .await?;

        self.offers
            .mark_completed(&mut tx, job_id, candidate_id)
            .await?;

        tx.commit().await?;
        info!(
            job_id = %job_id,
            candidate_id = %candidate_id,
            overall_rating = evaluation.overall_rating,
            "evaluation recorded"
        );
        Ok(evaluation)
    }

    pub async fn get_evaluation(&self, job_id: Uuid, candidate_id: Uuid) -> Result<Evaluation> {
        sqlx::query_as::<_, Evaluation>(
            r#"
            SELECT job_id, candidate_id, no_show, headline, comment,
                   professionalism, completeness, efficiency, overall_rating,
                   created_at, updated_at
            FROM evaluations
            WHERE job_id = $1 AND candidate_id = $2
            "#,
        )
        .bind(job_id)
        .bind(candidate_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("No evaluation found for this job and user".to_string()))
    }

    pub async fn list_evaluations_for_candidate(&self, candidate_id: Uuid) -> Result<Vec<Evaluation>> {
        let evaluations = sqlx::query_as::<_, Evaluation>(
            r#"
            SELECT job_id, candidate_id, no_show, headline, comment,
                   professionalism, completeness, efficiency, overall_rating,
                   created_at, updated_at
            FROM evaluations
            WHERE candidate_id = $1
            ORDER BY created_at DESC, job_id ASC
            "#,
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(evaluations)
    }

    /// Statistics are computed from one read of the candidate's evaluations.
    pub async fn get_aggregate_stats(&self, candidate_id: Uuid) -> Result<EvaluationAggregate> {
        let evaluations = self.list_evaluations_for_candidate(candidate_id).await?;
        Ok(EvaluationAggregate::from_evaluations(&evaluations))
    }
}
