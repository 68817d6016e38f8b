//! Next-problem recommendation

use std::{collections::HashSet, sync::Arc};

use rand::{seq::IndexedRandom, Rng};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::{
    db::{AttemptStore, ProblemCatalog},
    error::{AppError, AppResult},
    models::{CandidateProblem, Problem},
};

/// Picks an unsolved problem of the same difficulty, preferring shared tags
pub struct RecommendationEngine {
    catalog: Arc<dyn ProblemCatalog>,
    attempts: Arc<dyn AttemptStore>,
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<dyn ProblemCatalog>, attempts: Arc<dyn AttemptStore>) -> Self {
        Self { catalog, attempts }
    }

    /// Recommend a follow-up to `current_id` for `user_id`.
    ///
    /// `Ok(None)` means no candidate exists; an unknown current problem is
    /// a not-found error.
    #[instrument(skip(self))]
    pub async fn recommend(&self, current_id: i64, user_id: Uuid) -> AppResult<Option<Problem>> {
        let current = self
            .catalog
            .find_tagged(current_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Problem {} not found", current_id)))?;

        let mut excluding = self.attempts.solved_problem_ids(user_id).await?;
        excluding.push(current_id);

        let candidates = self
            .catalog
            .candidates(current.problem.difficulty, &excluding)
            .await?;

        let picked = pick_candidate(&current.tag_ids(), &candidates, &mut rand::rng());
        let Some(id) = picked else {
            debug!(candidates = candidates.len(), "No recommendation available");
            return Ok(None);
        };

        debug!(recommended = id, "Recommendation picked");
        self.catalog.find_by_id(id).await
    }
}

/// Choose uniformly among candidates sharing a tag with the current problem,
/// falling back to all candidates when none do.
pub fn pick_candidate<R>(
    current_tags: &HashSet<i64>,
    candidates: &[CandidateProblem],
    rng: &mut R,
) -> Option<i64>
where
    R: Rng + ?Sized,
{
    if !current_tags.is_empty() {
        let related: Vec<&CandidateProblem> = candidates
            .iter()
            .filter(|c| c.tag_ids.iter().any(|t| current_tags.contains(t)))
            .collect();
        if let Some(choice) = related.choose(&mut *rng) {
            return Some(choice.id);
        }
    }

    candidates.choose(rng).map(|c| c.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{MemoryAttemptStore, MemoryCatalog},
        models::{AttemptStatus, Difficulty},
        test_utils::fixtures,
    };
    use rand::{rngs::StdRng, SeedableRng};

    fn candidate(id: i64, tags: &[i64]) -> CandidateProblem {
        CandidateProblem {
            id,
            tag_ids: tags.to_vec(),
        }
    }

    #[test]
    fn test_prefers_shared_tags() {
        let mut rng = StdRng::seed_from_u64(7);
        let current: HashSet<i64> = [1].into_iter().collect();
        let candidates = vec![candidate(2, &[1]), candidate(5, &[2]), candidate(6, &[])];

        for _ in 0..50 {
            assert_eq!(pick_candidate(&current, &candidates, &mut rng), Some(2));
        }
    }

    #[test]
    fn test_falls_back_without_overlap() {
        let mut rng = StdRng::seed_from_u64(7);
        let current: HashSet<i64> = [9].into_iter().collect();
        let candidates = vec![candidate(5, &[2]), candidate(6, &[])];

        let picked = pick_candidate(&current, &candidates, &mut rng);
        assert!(matches!(picked, Some(5) | Some(6)));
    }

    #[test]
    fn test_untagged_current_uses_whole_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        let candidates = vec![candidate(5, &[2])];
        assert_eq!(pick_candidate(&HashSet::new(), &candidates, &mut rng), Some(5));
    }

    #[test]
    fn test_empty_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        let current: HashSet<i64> = [1].into_iter().collect();
        assert_eq!(pick_candidate(&current, &[], &mut rng), None);
    }

    /// Easy problem tagged "array"; user solved 3 and 4; pool has 2 (array)
    /// and 5 (string).
    async fn array_scenario() -> (RecommendationEngine, MemoryCatalog, Uuid) {
        let catalog = MemoryCatalog::new();
        let attempts = MemoryAttemptStore::new();
        let user = Uuid::new_v4();

        catalog.insert_tag(fixtures::tag(1, "array")).await;
        catalog.insert_tag(fixtures::tag(2, "string")).await;
        catalog.insert_problem(fixtures::problem(1, 1001, Difficulty::Easy), &[1]).await;
        catalog.insert_problem(fixtures::problem(2, 1002, Difficulty::Easy), &[1]).await;
        catalog.insert_problem(fixtures::problem(3, 1003, Difficulty::Easy), &[1]).await;
        catalog.insert_problem(fixtures::problem(4, 1004, Difficulty::Easy), &[]).await;
        catalog.insert_problem(fixtures::problem(5, 1005, Difficulty::Easy), &[2]).await;
        catalog.insert_problem(fixtures::problem(6, 1006, Difficulty::Hard), &[1]).await;

        for problem_id in [3, 4] {
            let record = attempts
                .create(fixtures::new_attempt(user, problem_id, Some(problem_id * 10)))
                .await
                .unwrap();
            attempts
                .update_status(record.id, AttemptStatus::Solved)
                .await
                .unwrap();
        }

        let engine = RecommendationEngine::new(Arc::new(catalog.clone()), Arc::new(attempts));
        (engine, catalog, user)
    }

    #[tokio::test]
    async fn test_array_scenario_picks_tagged_unsolved() {
        let (engine, _, user) = array_scenario().await;
        for _ in 0..20 {
            let picked = engine.recommend(1, user).await.unwrap().unwrap();
            assert_eq!(picked.id, 2);
        }
    }

    #[tokio::test]
    async fn test_array_scenario_falls_back_when_tagged_candidate_removed() {
        let (engine, catalog, user) = array_scenario().await;
        catalog.remove_problem(2).await;

        let picked = engine.recommend(1, user).await.unwrap().unwrap();
        assert_eq!(picked.id, 5);
    }

    #[tokio::test]
    async fn test_never_returns_current_or_solved() {
        let (engine, catalog, user) = array_scenario().await;
        catalog.remove_problem(2).await;
        catalog.remove_problem(5).await;

        assert!(engine.recommend(1, user).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_current_problem() {
        let (engine, _, user) = array_scenario().await;
        let err = engine.recommend(404, user).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
