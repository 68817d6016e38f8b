//! Problem catalog repository

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    db::store::ProblemCatalog,
    error::AppResult,
    models::{
        CandidateProblem, Difficulty, KnowledgePoint, NewProblem, NewTag, Problem, ProblemRow, Tag,
    },
};

/// Postgres-backed problem catalog
#[derive(Debug, Clone)]
pub struct PgProblemCatalog {
    pool: PgPool,
}

impl PgProblemCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProblemCatalog for PgProblemCatalog {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Problem>> {
        let row = sqlx::query_as::<_, ProblemRow>(r#"SELECT * FROM problems WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Problem::try_from).transpose()
    }

    async fn find_by_external_id(&self, external_id: i64) -> AppResult<Option<Problem>> {
        let row =
            sqlx::query_as::<_, ProblemRow>(r#"SELECT * FROM problems WHERE external_id = $1"#)
                .bind(external_id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(Problem::try_from).transpose()
    }

    async fn tags_for_problem(&self, problem_id: i64) -> AppResult<Vec<Tag>> {
        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.id, t.name, t.name_cn
            FROM tags t
            JOIN problem_tags pt ON pt.tag_id = t.id
            WHERE pt.problem_id = $1
            ORDER BY t.id
            "#,
        )
        .bind(problem_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tags)
    }

    async fn knowledge_points_for_problem(&self, problem_id: i64) -> AppResult<Vec<KnowledgePoint>> {
        let points = sqlx::query_as::<_, KnowledgePoint>(
            r#"
            SELECT DISTINCT kp.id, kp.name, kp.course_id
            FROM knowledge_points kp
            JOIN knowledge_point_tags kpt ON kpt.knowledge_point_id = kp.id
            JOIN problem_tags pt ON pt.tag_id = kpt.tag_id
            WHERE pt.problem_id = $1
            ORDER BY kp.id
            "#,
        )
        .bind(problem_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(points)
    }

    async fn knowledge_point_exists(&self, id: i64) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM knowledge_points WHERE id = $1)"#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn candidates(
        &self,
        difficulty: Difficulty,
        excluding: &[i64],
    ) -> AppResult<Vec<CandidateProblem>> {
        let candidates = sqlx::query_as::<_, CandidateProblem>(
            r#"
            SELECT
                p.id,
                COALESCE(
                    array_agg(pt.tag_id) FILTER (WHERE pt.tag_id IS NOT NULL),
                    '{}'::BIGINT[]
                ) AS tag_ids
            FROM problems p
            LEFT JOIN problem_tags pt ON pt.problem_id = p.id
            WHERE p.difficulty = $1 AND NOT (p.id = ANY($2))
            GROUP BY p.id
            ORDER BY p.id
            "#,
        )
        .bind(difficulty.as_str())
        .bind(excluding)
        .fetch_all(&self.pool)
        .await?;

        Ok(candidates)
    }

    async fn upsert_problem(&self, problem: &NewProblem, tags: &[NewTag]) -> AppResult<i64> {
        let mut tx = self.pool.begin().await?;

        let problem_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO problems (
                external_id, title_slug, title, title_cn, difficulty,
                content, content_cn, sample_testcases
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (external_id) DO UPDATE SET
                title_slug = EXCLUDED.title_slug,
                title = EXCLUDED.title,
                title_cn = EXCLUDED.title_cn,
                difficulty = EXCLUDED.difficulty,
                content = EXCLUDED.content,
                content_cn = EXCLUDED.content_cn,
                sample_testcases = EXCLUDED.sample_testcases,
                updated_at = NOW()
            RETURNING id
            "#,
        )
        .bind(problem.external_id)
        .bind(&problem.title_slug)
        .bind(&problem.title)
        .bind(&problem.title_cn)
        .bind(problem.difficulty.as_str())
        .bind(&problem.content)
        .bind(&problem.content_cn)
        .bind(&problem.sample_testcases)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(r#"DELETE FROM problem_tags WHERE problem_id = $1"#)
            .bind(problem_id)
            .execute(&mut *tx)
            .await?;

        for tag in tags {
            let tag_id = sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO tags (name, name_cn)
                VALUES ($1, $2)
                ON CONFLICT (name) DO UPDATE SET
                    name_cn = COALESCE(EXCLUDED.name_cn, tags.name_cn)
                RETURNING id
                "#,
            )
            .bind(&tag.name)
            .bind(&tag.name_cn)
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query(
                r#"
                INSERT INTO problem_tags (problem_id, tag_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(problem_id)
            .bind(tag_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(problem_id)
    }
}
