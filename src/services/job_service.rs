use crate::dto::job_dto::{CreateJobPayload, UpdateJobPayload};
use crate::error::{Error, Result};
use crate::models::job::Job;
use sqlx::{PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateJobPayload, owner: Uuid) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (name, description, price, job_type, owner)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, price, job_type, owner, created_at, updated_at
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.price)
        .bind(payload.job_type)
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;

        info!(job_id = %job.id, owner = %owner, "job created");
        Ok(job)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Job> {
        sqlx::query_as::<_, Job>(
            r#"
            SELECT id, name, description, price, job_type, owner, created_at, updated_at
            FROM jobs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| job_not_found(id))
    }

    /// Reads the job inside `conn`'s transaction and holds its row lock until
    /// that transaction ends, serializing offer transitions per job.
    pub async fn lock(&self, conn: &mut PgConnection, id: Uuid) -> Result<Job> {
        sqlx::query_as::<_, Job>(
            r#"
            SELECT id, name, description, price, job_type, owner, created_at, updated_at
            FROM jobs
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| job_not_found(id))
    }

    pub async fn list_for_owner(&self, owner: Uuid) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(
            r#"
            SELECT id, name, description, price, job_type, owner, created_at, updated_at
            FROM jobs
            WHERE owner = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateJobPayload, caller: Uuid) -> Result<Job> {
        if payload.is_empty() {
            return Err(Error::BadRequest("No fields to update".to_string()));
        }

        let existing = self.get_by_id(id).await?;
        if !existing.is_owned_by(caller) {
            return Err(Error::Forbidden(
                "Users can only update jobs they own".to_string(),
            ));
        }

        let job = sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs
            SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                job_type = COALESCE($5, job_type),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, price, job_type, owner, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.price)
        .bind(payload.job_type)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| job_not_found(id))?;

        info!(job_id = %job.id, "job updated");
        Ok(job)
    }

    pub async fn delete(&self, id: Uuid, caller: Uuid) -> Result<()> {
        let existing = self.get_by_id(id).await?;
        if !existing.is_owned_by(caller) {
            return Err(Error::Forbidden(
                "Users can only delete jobs they own".to_string(),
            ));
        }

        sqlx::query("DELETE FROM jobs WHERE id = $1 AND owner = $2")
            .bind(id)
            .bind(caller)
            .execute(&self.pool)
            .await?;

        info!(job_id = %id, "job deleted");
        Ok(())
    }
}

fn job_not_found(id: Uuid) -> Error {
    Error::NotFound(format!("No job found with id {}", id))
}
