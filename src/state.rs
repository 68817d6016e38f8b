//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::{
    config::Config,
    db::{AttemptStore, ProblemCatalog},
    judge::JudgeClient,
    services::{PollPolicy, SubmissionOrchestrator},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Judge orchestration and recommendations
    orchestrator: SubmissionOrchestrator,

    /// Problem catalog reads for the problem routes
    catalog: Arc<dyn ProblemCatalog>,

    /// Attempt history reads
    attempts: Arc<dyn AttemptStore>,

    /// Application configuration
    config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        judge: Arc<dyn JudgeClient>,
        catalog: Arc<dyn ProblemCatalog>,
        attempts: Arc<dyn AttemptStore>,
        config: Config,
    ) -> Self {
        let orchestrator = SubmissionOrchestrator::new(judge, catalog.clone(), attempts.clone());
        Self {
            inner: Arc::new(AppStateInner {
                orchestrator,
                catalog,
                attempts,
                config,
            }),
        }
    }

    pub fn orchestrator(&self) -> &SubmissionOrchestrator {
        &self.inner.orchestrator
    }

    pub fn catalog(&self) -> &dyn ProblemCatalog {
        self.inner.catalog.as_ref()
    }

    pub fn attempts(&self) -> &dyn AttemptStore {
        self.inner.attempts.as_ref()
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Poll budget for the waiting check route
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::from(&self.inner.config.judge)
    }
}
