//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod attempt_repo;
pub mod problem_repo;

pub use attempt_repo::PgAttemptStore;
pub use problem_repo::PgProblemCatalog;
