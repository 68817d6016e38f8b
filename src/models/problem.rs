//! Problem catalog models

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

/// Problem row as stored in the database
#[derive(Debug, Clone, FromRow)]
pub struct ProblemRow {
    pub id: i64,
    pub external_id: i64,
    pub title_slug: String,
    pub title: String,
    pub title_cn: Option<String>,
    pub difficulty: String,
    pub content: String,
    pub content_cn: Option<String>,
    pub sample_testcases: String,
    pub full_testcases: Option<String>,
    pub time_limit_ms: Option<i32>,
    pub memory_limit_kb: Option<i32>,
    pub is_custom: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Catalog problem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub id: i64,
    /// Identifier of the problem on the external judge
    pub external_id: i64,
    pub title_slug: String,
    pub title: String,
    pub title_cn: Option<String>,
    pub difficulty: Difficulty,
    pub content: String,
    pub content_cn: Option<String>,
    pub sample_testcases: String,
    /// Hidden test data for self-hosted judging
    #[serde(skip_serializing)]
    pub full_testcases: Option<String>,
    pub time_limit_ms: Option<i32>,
    pub memory_limit_kb: Option<i32>,
    pub is_custom: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProblemRow> for Problem {
    type Error = AppError;

    fn try_from(row: ProblemRow) -> Result<Self, Self::Error> {
        let difficulty = row.difficulty.parse().map_err(|_| {
            AppError::Database(format!(
                "Problem {} has unknown difficulty '{}'",
                row.id, row.difficulty
            ))
        })?;

        Ok(Self {
            id: row.id,
            external_id: row.external_id,
            title_slug: row.title_slug,
            title: row.title,
            title_cn: row.title_cn,
            difficulty,
            content: row.content,
            content_cn: row.content_cn,
            sample_testcases: row.sample_testcases,
            full_testcases: row.full_testcases,
            time_limit_ms: row.time_limit_ms,
            memory_limit_kb: row.memory_limit_kb,
            is_custom: row.is_custom,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl Problem {
    /// Compact view used when recommending this problem
    pub fn summary(&self) -> ProblemSummary {
        ProblemSummary {
            id: self.id,
            external_id: self.external_id,
            title: self.title.clone(),
            title_cn: self.title_cn.clone(),
            difficulty: self.difficulty,
        }
    }
}

/// Problem difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Get difficulty as stored string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Easy" | "EASY" | "easy" => Ok(Self::Easy),
            "Medium" | "MEDIUM" | "medium" => Ok(Self::Medium),
            "Hard" | "HARD" | "hard" => Ok(Self::Hard),
            other => Err(AppError::InvalidInput(format!("Unknown difficulty: {}", other))),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Problem tag
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub name_cn: Option<String>,
}

/// Problem together with its tags
#[derive(Debug, Clone)]
pub struct TaggedProblem {
    pub problem: Problem,
    pub tags: Vec<Tag>,
}

impl TaggedProblem {
    pub fn tag_ids(&self) -> HashSet<i64> {
        self.tags.iter().map(|t| t.id).collect()
    }
}

/// Recommendation candidate: a problem id and the ids of its tags
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct CandidateProblem {
    pub id: i64,
    pub tag_ids: Vec<i64>,
}

/// Compact problem summary attached to a successful check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemSummary {
    pub id: i64,
    pub external_id: i64,
    pub title: String,
    pub title_cn: Option<String>,
    pub difficulty: Difficulty,
}

/// Problem data pulled from the upstream catalog
#[derive(Debug, Clone)]
pub struct NewProblem {
    pub external_id: i64,
    pub title_slug: String,
    pub title: String,
    pub title_cn: Option<String>,
    pub difficulty: Difficulty,
    pub content: String,
    pub content_cn: Option<String>,
    pub sample_testcases: String,
}

/// Tag data pulled from the upstream catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: String,
    pub name_cn: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("Easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("MEDIUM".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("Expert".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_difficulty_serializes_as_stored() {
        assert_eq!(serde_json::to_string(&Difficulty::Medium).unwrap(), "\"Medium\"");
        assert_eq!(Difficulty::Hard.to_string(), "Hard");
    }
}
