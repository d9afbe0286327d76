use crate::error::{Error, Result};
use crate::middleware::auth::CurrentUser;
use crate::models::offer::{plan_transition, Offer, OfferAction, OfferStatus, TransitionPlan};
use crate::services::job_service::JobService;
use sqlx::{PgConnection, PgPool};
use tracing::{debug, info};
use uuid::Uuid;

/// Owns the offer lifecycle of every (job, candidate) pair.
///
/// Every mutating call that touches more than one row runs in a single
/// transaction that first locks the job row and then all of the job's offers,
/// so concurrent transitions on one job are applied one after another and the
/// later one re-checks its preconditions against committed state.
#[derive(Clone)]
pub struct OfferService {
    pool: PgPool,
    jobs: JobService,
}

impl OfferService {
    pub fn new(pool: PgPool, jobs: JobService) -> Self {
        Self { pool, jobs }
    }

    pub async fn create_offer(&self, job_id: Uuid, candidate_id: Uuid) -> Result<Offer> {
        let job = self.jobs.get_by_id(job_id).await?;
        if job.is_owned_by(candidate_id) {
            return Err(Error::InvalidOperation(
                "Users cannot make offers on their own jobs".to_string(),
            ));
        }

        let offer = sqlx::query_as::<_, Offer>(
            r#"
            INSERT INTO offers (job_id, candidate_id, status)
            VALUES ($1, $2, $3)
            ON CONFLICT (job_id, candidate_id) DO NOTHING
            RETURNING job_id, candidate_id, status, created_at, updated_at
            "#,
        )
        .bind(job_id)
        .bind(candidate_id)
        .bind(OfferStatus::Pending)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                Error::NotFound("Offering user not found".to_string())
            }
            other => Error::from(other),
        })?
        .ok_or_else(|| {
            Error::Conflict("An offer from this user already exists for this job".to_string())
        })?;

        info!(job_id = %job_id, candidate_id = %candidate_id, "offer created");
        Ok(offer)
    }

    /// Owner sees every offer; a candidate sees only their own.
    pub async fn list_offers_for_job(&self, job_id: Uuid, caller: &CurrentUser) -> Result<Vec<Offer>> {
        let job = self.jobs.get_by_id(job_id).await?;
        if job.is_owned_by(caller.id) {
            let offers = sqlx::query_as::<_, Offer>(
                r#"
                SELECT job_id, candidate_id, status, created_at, updated_at
                FROM offers
                WHERE job_id = $1
                ORDER BY created_at ASC, candidate_id ASC
                "#,
            )
            .bind(job_id)
            .fetch_all(&self.pool)
            .await?;
            return Ok(offers);
        }

        match self.find_offer(job_id, caller.id).await? {
            Some(own) => Ok(vec![own]),
            None => Err(Error::Forbidden(
                "Only the job owner can list offers for this job".to_string(),
            )),
        }
    }

    pub async fn get_offer(
        &self,
        job_id: Uuid,
        candidate_id: Uuid,
        caller: &CurrentUser,
    ) -> Result<Offer> {
        let job = self.jobs.get_by_id(job_id).await?;
        if !job.is_owned_by(caller.id) && caller.id != candidate_id {
            return Err(Error::Forbidden(
                "Only the job owner or the offering user can view this offer".to_string(),
            ));
        }

        self.find_offer(job_id, candidate_id)
            .await?
            .ok_or_else(offer_not_found)
    }

    /// Accepts one offer and rejects every other pending offer on the job.
    pub async fn accept_offer(
        &self,
        job_id: Uuid,
        candidate_id: Uuid,
        caller: &CurrentUser,
    ) -> Result<Offer> {
        let mut tx = self.pool.begin().await?;

        let job = self.jobs.lock(&mut tx, job_id).await?;
        if !job.is_owned_by(caller.id) {
            return Err(Error::Forbidden(
                "Only the job owner can accept offers".to_string(),
            ));
        }

        let offers = lock_offers(&mut tx, job_id).await?;
        let plan = plan_transition(&offers, candidate_id, OfferAction::Accept)?;
        let accepted = apply_plan(&mut tx, job_id, &plan).await?;

        tx.commit().await?;
        info!(
            job_id = %job_id,
            candidate_id = %candidate_id,
            rejected = plan.siblings.len(),
            "offer accepted"
        );
        Ok(accepted)
    }

    /// Withdraws an accepted offer and puts every rejected sibling back to pending.
    pub async fn cancel_offer(
        &self,
        job_id: Uuid,
        candidate_id: Uuid,
        caller: &CurrentUser,
    ) -> Result<Offer> {
        if caller.id != candidate_id {
            return Err(Error::Forbidden(
                "Users can only cancel their own offers".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        self.jobs.lock(&mut tx, job_id).await?;
        let offers = lock_offers(&mut tx, job_id).await?;
        let plan = plan_transition(&offers, candidate_id, OfferAction::Cancel)?;
        let cancelled = apply_plan(&mut tx, job_id, &plan).await?;

        tx.commit().await?;
        info!(
            job_id = %job_id,
            candidate_id = %candidate_id,
            reopened = plan.siblings.len(),
            "offer cancelled"
        );
        Ok(cancelled)
    }

    /// Deletes a pending offer. Returns `false` when there was nothing to delete.
    pub async fn rescind_offer(
        &self,
        job_id: Uuid,
        candidate_id: Uuid,
        caller: &CurrentUser,
    ) -> Result<bool> {
        if caller.id != candidate_id {
            return Err(Error::Forbidden(
                "Users can only rescind their own offers".to_string(),
            ));
        }
        self.jobs.get_by_id(job_id).await?;

        let deleted = sqlx::query(
            r#"
            DELETE FROM offers
            WHERE job_id = $1 AND candidate_id = $2 AND status = $3
            "#,
        )
        .bind(job_id)
        .bind(candidate_id)
        .bind(OfferStatus::Pending)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if deleted > 0 {
            info!(job_id = %job_id, candidate_id = %candidate_id, "offer rescinded");
            return Ok(true);
        }

        match self.find_offer(job_id, candidate_id).await? {
            Some(offer) => Err(Error::InvalidOperation(format!(
                "Only pending offers can be rescinded, this offer is {}",
                offer.status
            ))),
            None => {
                debug!(job_id = %job_id, candidate_id = %candidate_id, "no offer to rescind");
                Ok(false)
            }
        }
    }

    /// Moves an accepted offer to completed on the caller's connection.
    ///
    /// Callers are expected to have validated permissions already and to own
    /// the surrounding transaction.
    pub async fn mark_completed(
        &self,
        conn: &mut PgConnection,
        job_id: Uuid,
        candidate_id: Uuid,
    ) -> Result<Offer> {
        let offers = lock_offers(conn, job_id).await?;
        let plan = plan_transition(&offers, candidate_id, OfferAction::Complete)?;
        let completed = apply_plan(conn, job_id, &plan).await?;
        info!(job_id = %job_id, candidate_id = %candidate_id, "offer completed");
        Ok(completed)
    }

    async fn find_offer(&self, job_id: Uuid, candidate_id: Uuid) -> Result<Option<Offer>> {
        let offer = sqlx::query_as::<_, Offer>(
            r#"
            SELECT job_id, candidate_id, status, created_at, updated_at
            FROM offers
            WHERE job_id = $1 AND candidate_id = $2
            "#,
        )
        .bind(job_id)
        .bind(candidate_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(offer)
    }
}

async fn lock_offers(conn: &mut PgConnection, job_id: Uuid) -> Result<Vec<Offer>> {
    let offers = sqlx::query_as::<_, Offer>(
        r#"
        SELECT job_id, candidate_id, status, created_at, updated_at
        FROM offers
        WHERE job_id = $1
        ORDER BY candidate_id
        FOR UPDATE
        "#,
    )
    .bind(job_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(offers)
}

async fn apply_plan(conn: &mut PgConnection, job_id: Uuid, plan: &TransitionPlan) -> Result<Offer> {
    let target = sqlx::query_as::<_, Offer>(
        r#"
        UPDATE offers
        SET status = $3, updated_at = NOW()
        WHERE job_id = $1 AND candidate_id = $2 AND status = $4
        RETURNING job_id, candidate_id, status, created_at, updated_at
        "#,
    )
    .bind(job_id)
    .bind(plan.target.candidate_id)
    .bind(plan.target.to)
    .bind(plan.target.from)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| Error::Internal("Offer changed while its job was locked".to_string()))?;

    if let (Some(first), Some(to)) = (plan.siblings.first(), plan.sibling_status()) {
        let moved = sqlx::query(
            r#"
            UPDATE offers
            SET status = $2, updated_at = NOW()
            WHERE job_id = $1 AND candidate_id = ANY($3) AND status = $4
            "#,
        )
        .bind(job_id)
        .bind(to)
        .bind(plan.sibling_ids())
        .bind(first.from)
        .execute(&mut *conn)
        .await?
        .rows_affected();

        debug!(job_id = %job_id, from = %first.from, to = %to, moved, "sibling offers updated");
    }

    Ok(target)
}

fn offer_not_found() -> Error {
    Error::NotFound("Offer not found for this job and user".to_string())
}
