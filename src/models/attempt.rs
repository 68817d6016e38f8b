//! Attempt record model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::AppError;

/// Attempt row as stored in the database
#[derive(Debug, Clone, FromRow)]
pub struct AttemptRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub problem_id: i64,
    pub knowledge_point_id: Option<i64>,
    pub status: String,
    pub typed_code: Option<String>,
    pub submission_id: Option<i64>,
    pub analysis: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One student's interaction with a problem under a knowledge point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub problem_id: i64,
    pub knowledge_point_id: Option<i64>,
    pub status: AttemptStatus,
    /// Code snapshot taken at submit time
    pub typed_code: Option<String>,
    /// Judge-side identifier used to correlate later checks
    pub submission_id: Option<i64>,
    /// AI-generated analysis, written by the tutoring feature
    pub analysis: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<AttemptRow> for AttemptRecord {
    type Error = AppError;

    fn try_from(row: AttemptRow) -> Result<Self, Self::Error> {
        let status = row.status.parse().map_err(|_| {
            AppError::Database(format!(
                "Attempt {} has unknown status '{}'",
                row.id, row.status
            ))
        })?;

        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            problem_id: row.problem_id,
            knowledge_point_id: row.knowledge_point_id,
            status,
            typed_code: row.typed_code,
            submission_id: row.submission_id,
            analysis: row.analysis,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl AttemptRecord {
    /// Whether a judge verdict is still outstanding for this record
    pub fn is_in_flight(&self) -> bool {
        self.status == AttemptStatus::Tried && self.submission_id.is_some()
    }
}

/// Fields of a freshly inserted attempt; status always starts at `Tried`
#[derive(Debug, Clone)]
pub struct NewAttempt {
    pub user_id: Uuid,
    pub problem_id: i64,
    pub knowledge_point_id: Option<i64>,
    pub typed_code: Option<String>,
    pub submission_id: Option<i64>,
}

/// Attempt status. "Untried" is implicit: no record exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttemptStatus {
    Tried,
    Solved,
    Failed,
}

impl AttemptStatus {
    /// Get status as stored string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tried => "TRIED",
            Self::Solved => "SOLVED",
            Self::Failed => "FAILED",
        }
    }
}

impl std::str::FromStr for AttemptStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TRIED" => Ok(Self::Tried),
            "SOLVED" => Ok(Self::Solved),
            "FAILED" => Ok(Self::Failed),
            other => Err(AppError::InvalidInput(format!("Unknown attempt status: {}", other))),
        }
    }
}

impl std::fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str) -> AttemptRow {
        AttemptRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            problem_id: 7,
            knowledge_point_id: Some(3),
            status: status.to_string(),
            typed_code: Some("class Solution {}".to_string()),
            submission_id: Some(991),
            analysis: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_conversion() {
        let record = AttemptRecord::try_from(row("TRIED")).unwrap();
        assert_eq!(record.status, AttemptStatus::Tried);
        assert!(record.is_in_flight());

        let solved = AttemptRecord::try_from(row("SOLVED")).unwrap();
        assert!(!solved.is_in_flight());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!(AttemptRecord::try_from(row("UNTRIED")).is_err());
    }
}
