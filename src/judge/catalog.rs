//! Upstream problem catalog queries (GraphQL)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{NewProblem, NewTag},
    utils::ids::string_or_number,
};

pub(crate) const PROBLEM_LIST_QUERY: &str = r#"
query problemsetQuestionList($categorySlug: String, $limit: Int, $skip: Int, $filters: QuestionListFilterInput) {
    problemsetQuestionList(categorySlug: $categorySlug, limit: $limit, skip: $skip, filters: $filters) {
        hasMore
        total
        questions {
            difficulty
            frontendQuestionId
            paidOnly
            title
            titleCn
            titleSlug
            topicTags { name nameTranslated id slug }
        }
    }
}"#;

pub(crate) const PROBLEM_DETAIL_QUERY: &str = r#"
query questionData($titleSlug: String!) {
    question(titleSlug: $titleSlug) {
        questionId
        title
        translatedTitle
        titleSlug
        content
        translatedContent
        difficulty
        sampleTestCase
    }
}"#;

/// GraphQL request envelope
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlQuery {
    pub query: &'static str,
    pub variables: Value,
    pub operation_name: &'static str,
}

impl GraphQlQuery {
    pub fn problem_list(category: &str, skip: u32, limit: u32) -> Self {
        Self {
            query: PROBLEM_LIST_QUERY,
            variables: json!({
                "categorySlug": category,
                "limit": limit,
                "skip": skip,
                "filters": {},
            }),
            operation_name: "problemsetQuestionList",
        }
    }

    pub fn problem_detail(title_slug: &str) -> Self {
        Self {
            query: PROBLEM_DETAIL_QUERY,
            variables: json!({ "titleSlug": title_slug }),
            operation_name: "questionData",
        }
    }
}

/// GraphQL response envelope
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    /// Unwrap `data`, turning GraphQL-level errors into judge protocol errors
    pub fn into_data(self) -> AppResult<T> {
        match self.data {
            Some(data) => Ok(data),
            None => {
                let reason = self
                    .errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; ");
                Err(AppError::JudgeProtocol(if reason.is_empty() {
                    "GraphQL response has no data".to_string()
                } else {
                    reason
                }))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemListData {
    pub problemset_question_list: QuestionPage,
}

#[derive(Debug, Deserialize)]
pub struct ProblemDetailData {
    pub question: Option<QuestionDetail>,
}

/// One page of the upstream question list
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPage {
    pub has_more: bool,
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub questions: Vec<QuestionSummary>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSummary {
    pub title_slug: String,
    #[serde(default)]
    pub paid_only: bool,
    #[serde(default)]
    pub topic_tags: Vec<TopicTag>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicTag {
    pub name: String,
    #[serde(default)]
    pub name_translated: Option<String>,
}

impl From<&TopicTag> for NewTag {
    fn from(tag: &TopicTag) -> Self {
        Self {
            name: tag.name.clone(),
            name_cn: tag.name_translated.clone().filter(|n| !n.is_empty()),
        }
    }
}

/// Full upstream problem description
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDetail {
    #[serde(deserialize_with = "string_or_number")]
    pub question_id: i64,
    pub title: String,
    #[serde(default)]
    pub translated_title: Option<String>,
    pub title_slug: String,
    /// Absent for paid-only questions
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub translated_content: Option<String>,
    pub difficulty: String,
    #[serde(default)]
    pub sample_test_case: Option<String>,
}

impl TryFrom<QuestionDetail> for NewProblem {
    type Error = AppError;

    fn try_from(detail: QuestionDetail) -> Result<Self, Self::Error> {
        let difficulty = detail.difficulty.parse().map_err(|_| {
            AppError::JudgeProtocol(format!(
                "Question {} has unknown difficulty '{}'",
                detail.title_slug, detail.difficulty
            ))
        })?;

        Ok(Self {
            external_id: detail.question_id,
            title_slug: detail.title_slug,
            title: detail.title,
            title_cn: detail.translated_title.filter(|t| !t.is_empty()),
            difficulty,
            content: detail.content.unwrap_or_default(),
            content_cn: detail.translated_content.filter(|c| !c.is_empty()),
            sample_testcases: detail.sample_test_case.unwrap_or_default(),
        })
    }
}

/// Source of catalog data for the sync job
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProblemSource: Send + Sync {
    async fn fetch_page(&self, skip: u32, limit: u32) -> AppResult<QuestionPage>;

    async fn fetch_detail(&self, title_slug: &str) -> AppResult<QuestionDetail>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    #[test]
    fn test_decode_problem_page() {
        let raw = json!({
            "data": {
                "problemsetQuestionList": {
                    "hasMore": true,
                    "total": 3200,
                    "questions": [{
                        "difficulty": "EASY",
                        "frontendQuestionId": "1",
                        "paidOnly": false,
                        "title": "Two Sum",
                        "titleCn": "两数之和",
                        "titleSlug": "two-sum",
                        "topicTags": [{ "name": "Array", "nameTranslated": "数组", "id": "x", "slug": "array" }]
                    }]
                }
            }
        });
        let page = serde_json::from_value::<GraphQlResponse<ProblemListData>>(raw)
            .unwrap()
            .into_data()
            .unwrap()
            .problemset_question_list;

        assert!(page.has_more);
        assert_eq!(page.questions[0].title_slug, "two-sum");
        let tag = NewTag::from(&page.questions[0].topic_tags[0]);
        assert_eq!(tag.name_cn.as_deref(), Some("数组"));
    }

    #[test]
    fn test_detail_into_new_problem() {
        let detail: QuestionDetail = serde_json::from_value(json!({
            "questionId": "1",
            "title": "Two Sum",
            "translatedTitle": "两数之和",
            "titleSlug": "two-sum",
            "content": null,
            "translatedContent": "",
            "difficulty": "Easy",
            "sampleTestCase": "[2,7,11,15]\n9"
        }))
        .unwrap();
        let problem = NewProblem::try_from(detail).unwrap();

        assert_eq!(problem.external_id, 1);
        assert_eq!(problem.difficulty, Difficulty::Easy);
        assert_eq!(problem.content, "");
        assert_eq!(problem.content_cn, None);
    }

    #[test]
    fn test_graphql_errors_surface() {
        let response: GraphQlResponse<ProblemDetailData> = serde_json::from_value(json!({
            "data": null,
            "errors": [{ "message": "rate limited" }]
        }))
        .unwrap();
        let err = response.into_data().unwrap_err();
        assert!(matches!(err, AppError::JudgeProtocol(msg) if msg == "rate limited"));
    }
}
