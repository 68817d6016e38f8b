//! Utility functions

pub mod ids;
pub mod validation;

pub use ids::string_or_number;
pub use validation::{validate_language, validate_run_id, validate_source_code};
