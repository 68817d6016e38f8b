//! Knowledge point model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Course-scoped concept that groups problems through tags
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct KnowledgePoint {
    pub id: i64,
    pub name: String,
    pub course_id: i64,
}
