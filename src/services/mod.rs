//! Business logic services

pub mod catalog_sync;
pub mod orchestrator;
pub mod poller;
pub mod recommendation;

pub use catalog_sync::{CatalogSync, SyncReport};
pub use orchestrator::{CheckOutcome, SubmissionOrchestrator, SubmitOutcome};
pub use poller::{poll_until_settled, PollOutcome, PollPolicy};
pub use recommendation::RecommendationEngine;
