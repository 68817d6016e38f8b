//! External judge integration
//!
//! The orchestrator only ever sees the [`JudgeClient`] trait; the HTTP
//! implementation lives in [`http`] and can be swapped for a test double.

pub mod catalog;
pub mod http;
pub mod types;

use async_trait::async_trait;

use crate::error::AppResult;

pub use catalog::{ProblemSource, QuestionDetail, QuestionPage, QuestionSummary, TopicTag};
pub use http::HttpJudgeClient;
pub use types::{JudgeResult, JudgeState, RunTicket, SubmissionTicket, TestCaseOutcome};

/// Upstream judging service.
///
/// Every call is a single round-trip with no retry; failures surface as
/// [`AppError::Judge`](crate::error::AppError::Judge) or
/// [`AppError::JudgeProtocol`](crate::error::AppError::JudgeProtocol).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JudgeClient: Send + Sync {
    /// Run code against sample input only
    async fn interpret(
        &self,
        title_slug: &str,
        external_id: i64,
        code: &str,
        language: &str,
        data_input: &str,
    ) -> AppResult<RunTicket>;

    /// Enqueue a fully judged run
    async fn submit(
        &self,
        title_slug: &str,
        external_id: i64,
        code: &str,
        language: &str,
    ) -> AppResult<SubmissionTicket>;

    /// Poll a run or submission; may report a pending state
    async fn check(&self, run_id: &str) -> AppResult<JudgeResult>;
}
