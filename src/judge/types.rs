//! Typed judge payloads
//!
//! Upstream responses are decoded once here. Fields the platform does not
//! interpret are kept in `extra` and passed back to the caller as-is.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{constants::judge_states, models::AttemptStatus, utils::ids::string_or_number};

/// Upstream state token of a run or submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JudgeState {
    Pending,
    Started,
    Success,
    Failed,
    Other(String),
}

impl JudgeState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => judge_states::PENDING,
            Self::Started => judge_states::STARTED,
            Self::Success => judge_states::SUCCESS,
            Self::Failed => judge_states::FAILED,
            Self::Other(token) => token,
        }
    }

    /// The judge has produced a final answer
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }

    /// Local status a final submission check moves its attempt to.
    /// `None` means the run is still pending (or the token is unknown).
    pub fn attempt_status(&self) -> Option<AttemptStatus> {
        match self {
            Self::Success => Some(AttemptStatus::Solved),
            Self::Failed => Some(AttemptStatus::Failed),
            _ => None,
        }
    }
}

impl From<String> for JudgeState {
    fn from(token: String) -> Self {
        match token.as_str() {
            judge_states::PENDING => Self::Pending,
            judge_states::STARTED => Self::Started,
            judge_states::SUCCESS => Self::Success,
            judge_states::FAILED => Self::Failed,
            _ => Self::Other(token),
        }
    }
}

impl From<JudgeState> for String {
    fn from(state: JudgeState) -> Self {
        state.as_str().to_string()
    }
}

impl std::fmt::Display for JudgeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interpret (sample run) request body
#[derive(Debug, Serialize)]
pub struct InterpretBody<'a> {
    pub data_input: &'a str,
    pub lang: &'a str,
    pub question_id: i64,
    pub typed_code: &'a str,
}

/// Submit request body; the judge expects the question id as a string here
#[derive(Debug, Serialize)]
pub struct SubmitBody<'a> {
    pub lang: &'a str,
    pub question_id: String,
    pub typed_code: &'a str,
}

/// Response of an interpret call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunTicket {
    /// Identifier to poll with `check`
    pub interpret_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_case: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of a submit call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionTicket {
    #[serde(deserialize_with = "string_or_number")]
    pub submission_id: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Check response exactly as the judge sends it
#[derive(Debug, Clone, Deserialize)]
pub struct CheckResponse {
    pub state: JudgeState,
    #[serde(default)]
    pub status_msg: Option<String>,
    #[serde(default)]
    pub status_runtime: Option<String>,
    #[serde(default)]
    pub status_memory: Option<String>,
    #[serde(default)]
    pub run_success: Option<bool>,
    #[serde(default)]
    pub total_correct: Option<u32>,
    #[serde(default)]
    pub total_testcases: Option<u32>,
    #[serde(default)]
    pub compile_error: Option<String>,
    #[serde(default)]
    pub runtime_error: Option<String>,
    #[serde(default)]
    pub code_answer: Option<Value>,
    #[serde(default)]
    pub expected_code_answer: Option<Value>,
    #[serde(default)]
    pub compare_result: Option<String>,
    #[serde(default)]
    pub last_testcase: Option<String>,
    #[serde(default)]
    pub expected_output: Option<String>,
    #[serde(default)]
    pub code_output: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Outcome of a single test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCaseOutcome {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passed: Option<bool>,
}

/// Current state of a run or submission on the judge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JudgeResult {
    pub state: JudgeState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_runtime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_memory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_correct: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_testcases: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compile_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub test_cases: Vec<TestCaseOutcome>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JudgeResult {
    /// Result carrying only a state token
    pub fn with_state(state: JudgeState) -> Self {
        Self {
            state,
            status_msg: None,
            status_runtime: None,
            status_memory: None,
            run_success: None,
            total_correct: None,
            total_testcases: None,
            compile_error: None,
            runtime_error: None,
            test_cases: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl From<CheckResponse> for JudgeResult {
    fn from(raw: CheckResponse) -> Self {
        let test_cases = collect_test_cases(&raw);

        Self {
            state: raw.state,
            status_msg: raw.status_msg,
            status_runtime: raw.status_runtime,
            status_memory: raw.status_memory,
            run_success: raw.run_success,
            total_correct: raw.total_correct,
            total_testcases: raw.total_testcases,
            compile_error: raw.compile_error,
            runtime_error: raw.runtime_error,
            test_cases,
            extra: raw.extra,
        }
    }
}

/// Sample runs report parallel answer arrays plus a `compare_result` bitmap;
/// final submissions only report the first failing case.
fn collect_test_cases(raw: &CheckResponse) -> Vec<TestCaseOutcome> {
    let actual = raw.code_answer.as_ref().map(value_lines).unwrap_or_default();
    let expected = raw
        .expected_code_answer
        .as_ref()
        .map(value_lines)
        .unwrap_or_default();

    if !actual.is_empty() || !expected.is_empty() {
        let verdicts: Vec<char> = raw
            .compare_result
            .as_deref()
            .unwrap_or_default()
            .chars()
            .collect();
        let count = actual.len().max(expected.len());

        return (0..count)
            .map(|index| TestCaseOutcome {
                index,
                input: None,
                expected: expected.get(index).cloned(),
                actual: actual.get(index).cloned(),
                passed: verdicts.get(index).map(|c| *c == '1'),
            })
            .collect();
    }

    match &raw.last_testcase {
        Some(input) if !input.is_empty() => vec![TestCaseOutcome {
            index: 0,
            input: Some(input.clone()),
            expected: raw.expected_output.clone(),
            actual: raw
                .code_output
                .as_ref()
                .map(|v| value_lines(v).join("\n")),
            passed: Some(false),
        }],
        _ => Vec::new(),
    }
}

/// The judge sends answers either as a string or as an array of strings
fn value_lines(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_state_tokens() {
        let state: JudgeState = serde_json::from_value(json!("SUCCESS")).unwrap();
        assert_eq!(state, JudgeState::Success);
        assert_eq!(state.attempt_status(), Some(AttemptStatus::Solved));

        let failed: JudgeState = serde_json::from_value(json!("FAILED")).unwrap();
        assert_eq!(failed.attempt_status(), Some(AttemptStatus::Failed));

        let odd: JudgeState = serde_json::from_value(json!("QUEUED")).unwrap();
        assert_eq!(odd, JudgeState::Other("QUEUED".to_string()));
        assert_eq!(odd.attempt_status(), None);
        assert!(!odd.is_terminal());
        assert_eq!(serde_json::to_value(&odd).unwrap(), json!("QUEUED"));
    }

    #[test]
    fn test_check_response_requires_state() {
        let missing = serde_json::from_value::<CheckResponse>(json!({ "status_msg": "Accepted" }));
        assert!(missing.is_err());
    }

    #[test]
    fn test_sample_run_cases() {
        let raw: CheckResponse = serde_json::from_value(json!({
            "state": "SUCCESS",
            "status_msg": "Accepted",
            "run_success": true,
            "code_answer": ["[0,1]", "[1,2]"],
            "expected_code_answer": ["[0,1]", "[0,2]"],
            "compare_result": "10",
            "lang": "rust"
        }))
        .unwrap();
        let result = JudgeResult::from(raw);

        assert_eq!(result.test_cases.len(), 2);
        assert_eq!(result.test_cases[0].passed, Some(true));
        assert_eq!(result.test_cases[1].passed, Some(false));
        assert_eq!(result.test_cases[1].actual.as_deref(), Some("[1,2]"));
        assert_eq!(result.extra.get("lang"), Some(&json!("rust")));
    }

    #[test]
    fn test_failed_submission_case() {
        let raw: CheckResponse = serde_json::from_value(json!({
            "state": "SUCCESS",
            "status_msg": "Wrong Answer",
            "total_correct": 10,
            "total_testcases": 63,
            "last_testcase": "[3,2,4]\n6",
            "expected_output": "[1,2]",
            "code_output": "[0,0]"
        }))
        .unwrap();
        let result = JudgeResult::from(raw);

        assert_eq!(result.total_correct, Some(10));
        assert_eq!(
            result.test_cases,
            vec![TestCaseOutcome {
                index: 0,
                input: Some("[3,2,4]\n6".to_string()),
                expected: Some("[1,2]".to_string()),
                actual: Some("[0,0]".to_string()),
                passed: Some(false),
            }]
        );
    }

    #[test]
    fn test_submission_ticket_accepts_float_ids() {
        let ticket: SubmissionTicket =
            serde_json::from_value(json!({ "submission_id": 123456.0 })).unwrap();
        assert_eq!(ticket.submission_id, 123456);

        let ticket: SubmissionTicket =
            serde_json::from_value(json!({ "submission_id": "98765" })).unwrap();
        assert_eq!(ticket.submission_id, 98765);
    }

    #[test]
    fn test_pending_result_serializes_compactly() {
        let value = serde_json::to_value(JudgeResult::with_state(JudgeState::Pending)).unwrap();
        assert_eq!(value, json!({ "state": "PENDING" }));
    }
}
