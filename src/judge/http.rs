//! HTTP judge client
//!
//! Speaks the LeetCode-compatible REST endpoints for interpret/submit/check
//! and the GraphQL endpoint for catalog queries. The session cookie is set
//! once on the client; nothing here retries.

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE, COOKIE, REFERER},
    Method, RequestBuilder,
};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::{
    config::{JudgeConfig, SyncConfig},
    constants::JUDGE_SESSION_COOKIE,
    error::{AppError, AppResult},
};

use super::{
    catalog::{GraphQlQuery, GraphQlResponse, ProblemDetailData, ProblemListData},
    types::{CheckResponse, InterpretBody, SubmitBody},
    JudgeClient, JudgeResult, ProblemSource, QuestionDetail, QuestionPage, RunTicket,
    SubmissionTicket,
};

/// reqwest-backed judge client
#[derive(Debug, Clone)]
pub struct HttpJudgeClient {
    client: reqwest::Client,
    base_url: String,
    category: String,
    session_cookie: Option<HeaderValue>,
}

impl HttpJudgeClient {
    /// Build a client from configuration
    pub fn new(judge: &JudgeConfig, sync: &SyncConfig) -> AppResult<Self> {
        let session_cookie = if judge.session.is_empty() {
            None
        } else {
            let cookie = HeaderValue::from_str(&format!("{}={}", JUDGE_SESSION_COOKIE, judge.session))
                .map_err(|_| {
                    AppError::Configuration("JUDGE_SESSION is not a valid header value".to_string())
                })?;
            Some(cookie)
        };

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(judge.request_timeout())
            .user_agent(concat!("coursejudge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build judge client: {}", e)))?;

        Ok(Self {
            client,
            base_url: judge.base_url.trim_end_matches('/').to_string(),
            category: sync.category.clone(),
            session_cookie,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn problem_page(&self, title_slug: &str) -> String {
        self.url(&format!("/problems/{}/", title_slug))
    }

    /// Base request with the session cookie attached
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.client.request(method, self.url(path));
        match &self.session_cookie {
            Some(cookie) => request.header(COOKIE, cookie.clone()),
            None => request,
        }
    }

    fn interpret_request(
        &self,
        title_slug: &str,
        external_id: i64,
        code: &str,
        language: &str,
        data_input: &str,
    ) -> RequestBuilder {
        let body = InterpretBody {
            data_input,
            lang: language,
            question_id: external_id,
            typed_code: code,
        };
        self.request(Method::POST, &format!("/problems/{}/interpret_solution/", title_slug))
            .header(REFERER, self.problem_page(title_slug))
            .json(&body)
    }

    fn submit_request(&self, title_slug: &str, external_id: i64, code: &str, language: &str) -> RequestBuilder {
        let body = SubmitBody {
            lang: language,
            question_id: external_id.to_string(),
            typed_code: code,
        };
        self.request(Method::POST, &format!("/problems/{}/submit/", title_slug))
            .header(REFERER, self.problem_page(title_slug))
            .json(&body)
    }

    fn check_request(&self, run_id: &str) -> AppResult<RequestBuilder> {
        if run_id.is_empty() || run_id.contains('/') || run_id == "." || run_id == ".." {
            return Err(AppError::InvalidInput(format!("Invalid run id: {:?}", run_id)));
        }
        Ok(self.request(Method::GET, &format!("/submissions/detail/{}/check/", run_id)))
    }

    fn graphql_request(&self, query: &GraphQlQuery) -> RequestBuilder {
        self.request(Method::POST, "/graphql/").json(query)
    }

    async fn send<T>(request: RequestBuilder) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await?.error_for_status()?;
        let url = response.url().path().to_string();
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| AppError::JudgeProtocol(format!("{} returned unexpected payload: {}", url, e)))
    }
}

#[async_trait]
impl JudgeClient for HttpJudgeClient {
    #[instrument(skip(self, code, data_input), fields(code_len = code.len()))]
    async fn interpret(
        &self,
        title_slug: &str,
        external_id: i64,
        code: &str,
        language: &str,
        data_input: &str,
    ) -> AppResult<RunTicket> {
        let request = self.interpret_request(title_slug, external_id, code, language, data_input);
        let ticket: RunTicket = Self::send(request).await?;
        debug!(interpret_id = %ticket.interpret_id, "Judge accepted sample run");
        Ok(ticket)
    }

    #[instrument(skip(self, code), fields(code_len = code.len()))]
    async fn submit(
        &self,
        title_slug: &str,
        external_id: i64,
        code: &str,
        language: &str,
    ) -> AppResult<SubmissionTicket> {
        let request = self.submit_request(title_slug, external_id, code, language);
        let ticket: SubmissionTicket = Self::send(request).await?;
        debug!(submission_id = ticket.submission_id, "Judge accepted submission");
        Ok(ticket)
    }

    #[instrument(skip(self))]
    async fn check(&self, run_id: &str) -> AppResult<JudgeResult> {
        let raw: CheckResponse = Self::send(self.check_request(run_id)?).await?;
        debug!(state = %raw.state, "Judge reported run state");
        Ok(raw.into())
    }
}

#[async_trait]
impl ProblemSource for HttpJudgeClient {
    #[instrument(skip(self))]
    async fn fetch_page(&self, skip: u32, limit: u32) -> AppResult<QuestionPage> {
        let query = GraphQlQuery::problem_list(&self.category, skip, limit);
        let response: GraphQlResponse<ProblemListData> =
            Self::send(self.graphql_request(&query)).await?;
        Ok(response.into_data()?.problemset_question_list)
    }

    #[instrument(skip(self))]
    async fn fetch_detail(&self, title_slug: &str) -> AppResult<QuestionDetail> {
        let query = GraphQlQuery::problem_detail(title_slug);
        let response: GraphQlResponse<ProblemDetailData> =
            Self::send(self.graphql_request(&query)).await?;
        response.into_data()?.question.ok_or_else(|| {
            AppError::JudgeProtocol(format!("Question '{}' is missing upstream", title_slug))
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::constants::{DEFAULT_MAX_POLL_SECONDS, DEFAULT_POLL_INTERVAL_MS};

    fn client(session: &str) -> AppResult<HttpJudgeClient> {
        let judge = JudgeConfig {
            base_url: "https://judge.example.com/".to_string(),
            session: session.to_string(),
            request_timeout_seconds: 5,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_poll_seconds: DEFAULT_MAX_POLL_SECONDS,
        };
        let sync = SyncConfig {
            page_size: 50,
            page_delay_ms: 0,
            category: "algorithms".to_string(),
        };
        HttpJudgeClient::new(&judge, &sync)
    }

    #[test]
    fn test_urls_are_joined_without_double_slash() {
        let client = client("abc").unwrap();
        assert_eq!(
            client.url("/submissions/detail/1/check/"),
            "https://judge.example.com/submissions/detail/1/check/"
        );
        assert_eq!(client.problem_page("two-sum"), "https://judge.example.com/problems/two-sum/");
    }

    #[test]
    fn test_rejects_session_with_newline() {
        assert!(matches!(client("bad\nvalue"), Err(AppError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_check_rejects_path_like_ids() {
        let client = client("").unwrap();
        let err = client.check("../admin").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(client.check_request("..").is_err());
    }

    fn json_body(request: &reqwest::Request) -> Value {
        let bytes = request.body().and_then(|b| b.as_bytes()).unwrap();
        serde_json::from_slice(bytes).unwrap()
    }

    #[test]
    fn test_interpret_request_wire_format() {
        let client = client("abc").unwrap();
        let request = client
            .interpret_request("two-sum", 1, "class Solution {}", "cpp", "[2,7]\n9")
            .build()
            .unwrap();

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(
            request.url().as_str(),
            "https://judge.example.com/problems/two-sum/interpret_solution/"
        );
        assert_eq!(request.headers()[COOKIE], "LEETCODE_SESSION=abc");
        assert_eq!(
            request.headers()[REFERER],
            "https://judge.example.com/problems/two-sum/"
        );
        assert_eq!(
            json_body(&request),
            json!({
                "data_input": "[2,7]\n9",
                "lang": "cpp",
                "question_id": 1,
                "typed_code": "class Solution {}",
            })
        );
    }

    #[test]
    fn test_submit_request_sends_question_id_as_string() {
        let client = client("abc").unwrap();
        let request = client
            .submit_request("two-sum", 1, "print(1)", "python3")
            .build()
            .unwrap();

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.url().as_str(), "https://judge.example.com/problems/two-sum/submit/");
        assert_eq!(request.headers()[COOKIE], "LEETCODE_SESSION=abc");
        assert_eq!(
            json_body(&request),
            json!({ "lang": "python3", "question_id": "1", "typed_code": "print(1)" })
        );
    }

    #[test]
    fn test_check_request_targets_detail_path() {
        let client = client("abc").unwrap();
        let request = client
            .check_request("runcode_1672837266.8327153_IBEXEAvgkU")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(
            request.url().as_str(),
            "https://judge.example.com/submissions/detail/runcode_1672837266.8327153_IBEXEAvgkU/check/"
        );
        assert_eq!(request.headers()[COOKIE], "LEETCODE_SESSION=abc");
        assert!(request.body().is_none());
    }

    #[test]
    fn test_empty_session_sends_no_cookie() {
        let client = client("").unwrap();
        let request = client.check_request("42").unwrap().build().unwrap();
        assert!(request.headers().get(COOKIE).is_none());
    }
}
