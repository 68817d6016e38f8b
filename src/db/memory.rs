//! In-memory store implementations
//!
//! Backs the service and router tests. Semantics follow the SQL
//! repositories; ids are assigned sequentially.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::Arc,
};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    db::store::{AttemptStore, ProblemCatalog},
    error::{AppError, AppResult},
    models::{
        AttemptRecord, AttemptStatus, CandidateProblem, Difficulty, KnowledgePoint, NewAttempt,
        NewProblem, NewTag, Problem, Tag,
    },
};

#[derive(Debug, Default)]
struct CatalogData {
    problems: BTreeMap<i64, Problem>,
    tags: BTreeMap<i64, Tag>,
    problem_tags: HashMap<i64, Vec<i64>>,
    knowledge_points: BTreeMap<i64, KnowledgePoint>,
    knowledge_point_tags: HashMap<i64, Vec<i64>>,
}

impl CatalogData {
    fn next_problem_id(&self) -> i64 {
        self.problems.keys().next_back().map_or(1, |id| id + 1)
    }

    fn next_tag_id(&self) -> i64 {
        self.tags.keys().next_back().map_or(1, |id| id + 1)
    }
}

/// In-memory problem catalog
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    data: Arc<RwLock<CatalogData>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a problem as-is, tagging it with `tag_ids`
    pub async fn insert_problem(&self, problem: Problem, tag_ids: &[i64]) {
        let mut data = self.data.write().await;
        data.problem_tags.insert(problem.id, tag_ids.to_vec());
        data.problems.insert(problem.id, problem);
    }

    pub async fn insert_tag(&self, tag: Tag) {
        self.data.write().await.tags.insert(tag.id, tag);
    }

    pub async fn insert_knowledge_point(&self, point: KnowledgePoint, tag_ids: &[i64]) {
        let mut data = self.data.write().await;
        data.knowledge_point_tags.insert(point.id, tag_ids.to_vec());
        data.knowledge_points.insert(point.id, point);
    }

    pub async fn remove_problem(&self, id: i64) {
        let mut data = self.data.write().await;
        data.problems.remove(&id);
        data.problem_tags.remove(&id);
    }

    pub async fn problem_count(&self) -> usize {
        self.data.read().await.problems.len()
    }

    pub async fn tag_count(&self) -> usize {
        self.data.read().await.tags.len()
    }
}

#[async_trait]
impl ProblemCatalog for MemoryCatalog {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Problem>> {
        Ok(self.data.read().await.problems.get(&id).cloned())
    }

    async fn find_by_external_id(&self, external_id: i64) -> AppResult<Option<Problem>> {
        let data = self.data.read().await;
        Ok(data
            .problems
            .values()
            .find(|p| p.external_id == external_id)
            .cloned())
    }

    async fn tags_for_problem(&self, problem_id: i64) -> AppResult<Vec<Tag>> {
        let data = self.data.read().await;
        let mut tags: Vec<Tag> = data
            .problem_tags
            .get(&problem_id)
            .into_iter()
            .flatten()
            .filter_map(|id| data.tags.get(id).cloned())
            .collect();
        tags.sort_by_key(|t| t.id);
        Ok(tags)
    }

    async fn knowledge_points_for_problem(&self, problem_id: i64) -> AppResult<Vec<KnowledgePoint>> {
        let data = self.data.read().await;
        let problem_tags: HashSet<i64> = data
            .problem_tags
            .get(&problem_id)
            .into_iter()
            .flatten()
            .copied()
            .collect();

        Ok(data
            .knowledge_points
            .values()
            .filter(|kp| {
                data.knowledge_point_tags
                    .get(&kp.id)
                    .is_some_and(|tags| tags.iter().any(|t| problem_tags.contains(t)))
            })
            .cloned()
            .collect())
    }

    async fn knowledge_point_exists(&self, id: i64) -> AppResult<bool> {
        Ok(self.data.read().await.knowledge_points.contains_key(&id))
    }

    async fn candidates(
        &self,
        difficulty: Difficulty,
        excluding: &[i64],
    ) -> AppResult<Vec<CandidateProblem>> {
        let data = self.data.read().await;
        Ok(data
            .problems
            .values()
            .filter(|p| p.difficulty == difficulty && !excluding.contains(&p.id))
            .map(|p| CandidateProblem {
                id: p.id,
                tag_ids: data.problem_tags.get(&p.id).cloned().unwrap_or_default(),
            })
            .collect())
    }

    async fn upsert_problem(&self, problem: &NewProblem, tags: &[NewTag]) -> AppResult<i64> {
        let mut data = self.data.write().await;
        let now = Utc::now();

        let existing = data
            .problems
            .values()
            .find(|p| p.external_id == problem.external_id)
            .map(|p| (p.id, p.created_at));
        let (id, created_at) = existing.unwrap_or_else(|| (data.next_problem_id(), now));

        let previous = data.problems.remove(&id);
        data.problems.insert(
            id,
            Problem {
                id,
                external_id: problem.external_id,
                title_slug: problem.title_slug.clone(),
                title: problem.title.clone(),
                title_cn: problem.title_cn.clone(),
                difficulty: problem.difficulty,
                content: problem.content.clone(),
                content_cn: problem.content_cn.clone(),
                sample_testcases: problem.sample_testcases.clone(),
                full_testcases: previous.as_ref().and_then(|p| p.full_testcases.clone()),
                time_limit_ms: previous.as_ref().and_then(|p| p.time_limit_ms),
                memory_limit_kb: previous.as_ref().and_then(|p| p.memory_limit_kb),
                is_custom: previous.as_ref().is_some_and(|p| p.is_custom),
                created_at,
                updated_at: now,
            },
        );

        let mut tag_ids = Vec::with_capacity(tags.len());
        for tag in tags {
            let found = data
                .tags
                .values_mut()
                .find(|t| t.name == tag.name)
                .map(|t| {
                    if tag.name_cn.is_some() {
                        t.name_cn = tag.name_cn.clone();
                    }
                    t.id
                });
            let tag_id = match found {
                Some(tag_id) => tag_id,
                None => {
                    let tag_id = data.next_tag_id();
                    data.tags.insert(
                        tag_id,
                        Tag {
                            id: tag_id,
                            name: tag.name.clone(),
                            name_cn: tag.name_cn.clone(),
                        },
                    );
                    tag_id
                }
            };
            if !tag_ids.contains(&tag_id) {
                tag_ids.push(tag_id);
            }
        }
        data.problem_tags.insert(id, tag_ids);

        Ok(id)
    }
}

/// In-memory attempt store; records are kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct MemoryAttemptStore {
    records: Arc<RwLock<Vec<AttemptRecord>>>,
}

impl MemoryAttemptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<AttemptRecord> {
        self.records.read().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl AttemptStore for MemoryAttemptStore {
    async fn create(&self, attempt: NewAttempt) -> AppResult<AttemptRecord> {
        let now = Utc::now();
        let record = AttemptRecord {
            id: Uuid::new_v4(),
            user_id: attempt.user_id,
            problem_id: attempt.problem_id,
            knowledge_point_id: attempt.knowledge_point_id,
            status: AttemptStatus::Tried,
            typed_code: attempt.typed_code,
            submission_id: attempt.submission_id,
            analysis: None,
            created_at: now,
            updated_at: now,
        };
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn ensure_tried(&self, user_id: Uuid, problem_id: i64) -> AppResult<bool> {
        let mut records = self.records.write().await;
        if records
            .iter()
            .any(|r| r.user_id == user_id && r.problem_id == problem_id)
        {
            return Ok(false);
        }

        let now = Utc::now();
        records.push(AttemptRecord {
            id: Uuid::new_v4(),
            user_id,
            problem_id,
            knowledge_point_id: None,
            status: AttemptStatus::Tried,
            typed_code: None,
            submission_id: None,
            analysis: None,
            created_at: now,
            updated_at: now,
        });
        Ok(true)
    }

    async fn find_by_submission(
        &self,
        user_id: Uuid,
        submission_id: i64,
    ) -> AppResult<Option<AttemptRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .rev()
            .find(|r| r.user_id == user_id && r.submission_id == Some(submission_id))
            .cloned())
    }

    async fn update_status(&self, id: Uuid, status: AttemptStatus) -> AppResult<AttemptRecord> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Attempt {} not found", id)))?;

        record.status = status;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn solved_problem_ids(&self, user_id: Uuid) -> AppResult<Vec<i64>> {
        let records = self.records.read().await;
        let mut ids: Vec<i64> = records
            .iter()
            .filter(|r| r.user_id == user_id && r.status == AttemptStatus::Solved)
            .map(|r| r.problem_id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }

    async fn list_for_problem(
        &self,
        user_id: Uuid,
        problem_id: i64,
        limit: i64,
    ) -> AppResult<Vec<AttemptRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id && r.problem_id == problem_id)
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }
}
