//! Submission orchestration
//!
//! Ties the external judge to the attempt store: sample runs, final
//! submissions and status checks. The judge is never retried; a failure
//! is returned to the caller untouched.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    db::{AttemptStore, ProblemCatalog},
    error::{AppError, AppResult},
    judge::{JudgeClient, JudgeResult, RunTicket},
    models::{AttemptStatus, NewAttempt, Problem, ProblemSummary},
    services::recommendation::RecommendationEngine,
};

/// Identifiers handed back after a successful submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    /// Judge-side id to poll with `check`
    pub submission_id: i64,
    /// Local attempt record id
    pub record_id: Uuid,
}

/// Judge result with whatever the platform derived from it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckOutcome {
    #[serde(flatten)]
    pub result: JudgeResult,
    /// Status persisted on the attempt record, when one was written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AttemptStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_problem: Option<ProblemSummary>,
}

impl CheckOutcome {
    fn passthrough(result: JudgeResult) -> Self {
        Self {
            result,
            status: None,
            recommended_problem: None,
        }
    }

    /// The judge has finished with this run
    pub fn is_settled(&self) -> bool {
        self.result.state.is_terminal()
    }
}

/// Drives code through the judge and keeps attempt records in step
pub struct SubmissionOrchestrator {
    judge: Arc<dyn JudgeClient>,
    catalog: Arc<dyn ProblemCatalog>,
    attempts: Arc<dyn AttemptStore>,
    recommender: RecommendationEngine,
}

impl SubmissionOrchestrator {
    pub fn new(
        judge: Arc<dyn JudgeClient>,
        catalog: Arc<dyn ProblemCatalog>,
        attempts: Arc<dyn AttemptStore>,
    ) -> Self {
        let recommender = RecommendationEngine::new(catalog.clone(), attempts.clone());
        Self {
            judge,
            catalog,
            attempts,
            recommender,
        }
    }

    pub fn recommender(&self) -> &RecommendationEngine {
        &self.recommender
    }

    async fn problem_by_external_id(&self, external_id: i64) -> AppResult<Problem> {
        self.catalog
            .find_by_external_id(external_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Problem {} not found", external_id)))
    }

    /// Run code against the problem's sample input.
    ///
    /// Marks the problem as tried for the user if they have no record yet;
    /// existing records are left alone.
    #[instrument(skip(self, code), fields(code_len = code.len()))]
    pub async fn run_test_case(
        &self,
        user_id: Uuid,
        external_id: i64,
        code: &str,
        language: &str,
    ) -> AppResult<RunTicket> {
        let problem = self.problem_by_external_id(external_id).await?;

        let ticket = self
            .judge
            .interpret(
                &problem.title_slug,
                problem.external_id,
                code,
                language,
                &problem.sample_testcases,
            )
            .await?;

        if self.attempts.ensure_tried(user_id, problem.id).await? {
            info!(problem_id = problem.id, "First attempt recorded from sample run");
        }

        Ok(ticket)
    }

    /// Submit code for full judging and record a new attempt
    #[instrument(skip(self, code), fields(code_len = code.len()))]
    pub async fn submit(
        &self,
        user_id: Uuid,
        language: &str,
        knowledge_point_id: i64,
        external_id: i64,
        code: &str,
    ) -> AppResult<SubmitOutcome> {
        let problem = self.problem_by_external_id(external_id).await?;

        if !self.catalog.knowledge_point_exists(knowledge_point_id).await? {
            return Err(AppError::NotFound(format!(
                "Knowledge point {} not found",
                knowledge_point_id
            )));
        }

        let ticket = self
            .judge
            .submit(&problem.title_slug, problem.external_id, code, language)
            .await?;

        let record = self
            .attempts
            .create(NewAttempt {
                user_id,
                problem_id: problem.id,
                knowledge_point_id: Some(knowledge_point_id),
                typed_code: Some(code.to_string()),
                submission_id: Some(ticket.submission_id),
            })
            .await?;

        info!(
            submission_id = ticket.submission_id,
            record_id = %record.id,
            problem_id = problem.id,
            "Submission recorded"
        );

        Ok(SubmitOutcome {
            submission_id: ticket.submission_id,
            record_id: record.id,
        })
    }

    /// Poll the judge once.
    ///
    /// Test-only checks never touch attempt state. Otherwise a terminal
    /// verdict is written to the matching record, and a solve attaches a
    /// recommendation when one exists. Non-terminal states pass through.
    #[instrument(skip(self))]
    pub async fn check(&self, user_id: Uuid, run_id: &str, is_test: bool) -> AppResult<CheckOutcome> {
        let result = self.judge.check(run_id).await?;

        if is_test {
            return Ok(CheckOutcome::passthrough(result));
        }

        let Some(status) = result.state.attempt_status() else {
            return Ok(CheckOutcome::passthrough(result));
        };

        let submission_id: i64 = run_id
            .trim()
            .parse()
            .map_err(|_| AppError::NotFound(format!("Submission {} not found", run_id)))?;

        let record = self
            .attempts
            .find_by_submission(user_id, submission_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Submission {} not found", run_id)))?;

        let record = self.attempts.update_status(record.id, status).await?;
        info!(record_id = %record.id, status = %status, "Attempt settled");

        let recommended_problem = if status == AttemptStatus::Solved {
            match self.recommender.recommend(record.problem_id, user_id).await {
                Ok(problem) => problem.map(|p| p.summary()),
                Err(e) => {
                    warn!(error = %e, problem_id = record.problem_id, "Recommendation skipped");
                    None
                }
            }
        } else {
            None
        };

        Ok(CheckOutcome {
            result,
            status: Some(status),
            recommended_problem,
        })
    }
}
