//! Attempt record repository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::store::AttemptStore,
    error::AppResult,
    models::{AttemptRecord, AttemptRow, AttemptStatus, NewAttempt},
};

/// Postgres-backed attempt store
#[derive(Debug, Clone)]
pub struct PgAttemptStore {
    pool: PgPool,
}

impl PgAttemptStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttemptStore for PgAttemptStore {
    async fn create(&self, attempt: NewAttempt) -> AppResult<AttemptRecord> {
        let row = sqlx::query_as::<_, AttemptRow>(
            r#"
            INSERT INTO attempt_records (
                user_id, problem_id, knowledge_point_id, status, typed_code, submission_id
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(attempt.user_id)
        .bind(attempt.problem_id)
        .bind(attempt.knowledge_point_id)
        .bind(AttemptStatus::Tried.as_str())
        .bind(&attempt.typed_code)
        .bind(attempt.submission_id)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn ensure_tried(&self, user_id: Uuid, problem_id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO attempt_records (user_id, problem_id, status)
            SELECT $1, $2, $3
            WHERE NOT EXISTS (
                SELECT 1 FROM attempt_records WHERE user_id = $1 AND problem_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(problem_id)
        .bind(AttemptStatus::Tried.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_submission(
        &self,
        user_id: Uuid,
        submission_id: i64,
    ) -> AppResult<Option<AttemptRecord>> {
        let row = sqlx::query_as::<_, AttemptRow>(
            r#"
            SELECT * FROM attempt_records
            WHERE user_id = $1 AND submission_id = $2
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(submission_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(AttemptRecord::try_from).transpose()
    }

    async fn update_status(&self, id: Uuid, status: AttemptStatus) -> AppResult<AttemptRecord> {
        let row = sqlx::query_as::<_, AttemptRow>(
            r#"
            UPDATE attempt_records
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn solved_problem_ids(&self, user_id: Uuid) -> AppResult<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT DISTINCT problem_id FROM attempt_records
            WHERE user_id = $1 AND status = $2
            "#,
        )
        .bind(user_id)
        .bind(AttemptStatus::Solved.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn list_for_problem(
        &self,
        user_id: Uuid,
        problem_id: i64,
        limit: i64,
    ) -> AppResult<Vec<AttemptRecord>> {
        let rows = sqlx::query_as::<_, AttemptRow>(
            r#"
            SELECT * FROM attempt_records
            WHERE user_id = $1 AND problem_id = $2
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(problem_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AttemptRecord::try_from).collect()
    }
}
