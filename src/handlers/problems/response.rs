//! Problem response DTOs

use serde::Serialize;

use crate::models::{AttemptRecord, KnowledgePoint, Problem, Tag};

/// Problem with its tags and the knowledge points reachable through them
#[derive(Debug, Serialize)]
pub struct ProblemDetailResponse {
    #[serde(flatten)]
    pub problem: Problem,
    pub tags: Vec<Tag>,
    pub knowledge_points: Vec<KnowledgePoint>,
}

/// Caller's attempts on one problem, newest first
#[derive(Debug, Serialize)]
pub struct AttemptHistoryResponse {
    pub problem_id: i64,
    pub attempts: Vec<AttemptRecord>,
}
