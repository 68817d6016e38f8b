//! Store seams
//!
//! Services talk to persistence only through these traits. Postgres
//! implementations live in [`super::repositories`], in-memory ones in
//! [`super::memory`].

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        AttemptRecord, AttemptStatus, CandidateProblem, Difficulty, KnowledgePoint, NewAttempt,
        NewProblem, NewTag, Problem, Tag, TaggedProblem,
    },
};

/// Problem, tag and knowledge point catalog
#[async_trait]
pub trait ProblemCatalog: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Problem>>;

    async fn find_by_external_id(&self, external_id: i64) -> AppResult<Option<Problem>>;

    async fn tags_for_problem(&self, problem_id: i64) -> AppResult<Vec<Tag>>;

    /// Knowledge points reachable from the problem through its tags
    async fn knowledge_points_for_problem(&self, problem_id: i64) -> AppResult<Vec<KnowledgePoint>>;

    async fn knowledge_point_exists(&self, id: i64) -> AppResult<bool>;

    /// Problems of `difficulty` whose id is not in `excluding`, with their tag ids
    async fn candidates(
        &self,
        difficulty: Difficulty,
        excluding: &[i64],
    ) -> AppResult<Vec<CandidateProblem>>;

    /// Insert or refresh a problem by external id and replace its tag set.
    /// Returns the local problem id.
    async fn upsert_problem(&self, problem: &NewProblem, tags: &[NewTag]) -> AppResult<i64>;

    async fn find_tagged(&self, id: i64) -> AppResult<Option<TaggedProblem>> {
        let Some(problem) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let tags = self.tags_for_problem(id).await?;
        Ok(Some(TaggedProblem { problem, tags }))
    }
}

/// Per-student attempt records. Records are never deleted.
#[async_trait]
pub trait AttemptStore: Send + Sync {
    async fn create(&self, attempt: NewAttempt) -> AppResult<AttemptRecord>;

    /// Create a bare `Tried` record unless the user already has one for the
    /// problem. Returns whether a record was created.
    async fn ensure_tried(&self, user_id: Uuid, problem_id: i64) -> AppResult<bool>;

    /// Latest record carrying the given judge submission id
    async fn find_by_submission(
        &self,
        user_id: Uuid,
        submission_id: i64,
    ) -> AppResult<Option<AttemptRecord>>;

    async fn update_status(&self, id: Uuid, status: AttemptStatus) -> AppResult<AttemptRecord>;

    /// Problems the user has solved at least once, under any knowledge point
    async fn solved_problem_ids(&self, user_id: Uuid) -> AppResult<Vec<i64>>;

    /// Newest first
    async fn list_for_problem(
        &self,
        user_id: Uuid,
        problem_id: i64,
        limit: i64,
    ) -> AppResult<Vec<AttemptRecord>>;
}
