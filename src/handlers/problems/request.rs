//! Problem request DTOs

use serde::Deserialize;

/// Attempt history query parameters
#[derive(Debug, Default, Deserialize)]
pub struct AttemptHistoryQuery {
    pub limit: Option<i64>,
}
