//! Catalog sync from the upstream problem list

use std::{sync::Arc, time::Duration};

use serde::Serialize;
use tracing::{info, warn};

use crate::{
    config::SyncConfig,
    db::ProblemCatalog,
    error::AppResult,
    judge::{ProblemSource, QuestionSummary},
    models::{NewProblem, NewTag},
};

/// Counters reported at the end of a sync run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Questions listed upstream
    pub total: usize,
    pub upserted: usize,
    pub failed: usize,
}

/// Pages the upstream list and upserts every question by external id
pub struct CatalogSync {
    source: Arc<dyn ProblemSource>,
    catalog: Arc<dyn ProblemCatalog>,
    page_size: u32,
    page_delay: Duration,
}

impl CatalogSync {
    pub fn new(
        source: Arc<dyn ProblemSource>,
        catalog: Arc<dyn ProblemCatalog>,
        config: &SyncConfig,
    ) -> Self {
        Self {
            source,
            catalog,
            page_size: config.page_size.max(1),
            page_delay: Duration::from_millis(config.page_delay_ms),
        }
    }

    /// Run a full sync. Listing failures abort; a failed question is logged
    /// and counted.
    pub async fn run(&self) -> AppResult<SyncReport> {
        let mut report = SyncReport::default();
        let mut skip = 0u32;

        loop {
            let page = self.source.fetch_page(skip, self.page_size).await?;
            let listed = page.questions.len();
            report.total += listed;

            for question in &page.questions {
                match self.sync_question(question).await {
                    Ok(problem_id) => {
                        report.upserted += 1;
                        info!(slug = %question.title_slug, problem_id, "Problem synced");
                    }
                    Err(e) => {
                        report.failed += 1;
                        warn!(slug = %question.title_slug, error = %e, "Problem sync failed");
                    }
                }
            }

            info!(
                fetched = report.total,
                page = listed,
                has_more = page.has_more,
                "Catalog page processed"
            );

            if !page.has_more || listed == 0 {
                break;
            }
            skip += self.page_size;

            if !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
        }

        Ok(report)
    }

    async fn sync_question(&self, question: &QuestionSummary) -> AppResult<i64> {
        let detail = self.source.fetch_detail(&question.title_slug).await?;
        let problem = NewProblem::try_from(detail)?;
        let tags: Vec<NewTag> = question.topic_tags.iter().map(NewTag::from).collect();

        self.catalog.upsert_problem(&problem, &tags).await
    }
}
