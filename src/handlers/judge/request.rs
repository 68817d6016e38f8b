//! Judge request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::utils::string_or_number;

/// Sample run request
#[derive(Debug, Deserialize, Validate)]
pub struct RunRequest {
    /// Judge language identifier
    #[validate(length(min = 1, max = 20))]
    pub lang: String,

    /// External problem id; number or numeric string
    #[serde(deserialize_with = "string_or_number")]
    pub question_id: i64,

    #[validate(length(min = 1, max = 1048576))] // 1MB max
    pub typed_code: String,
}

/// Final submission request
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitRequest {
    #[validate(length(min = 1, max = 20))]
    pub lang: String,

    #[serde(deserialize_with = "string_or_number")]
    pub knowledge_point_id: i64,

    #[serde(deserialize_with = "string_or_number")]
    pub question_id: i64,

    #[validate(length(min = 1, max = 1048576))] // 1MB max
    pub typed_code: String,
}

/// Check query parameters
#[derive(Debug, Default, Deserialize)]
pub struct CheckQuery {
    /// Sample-run check; never touches attempt state
    #[serde(default)]
    pub test: bool,
}
