//! Shared test fixtures

#[cfg(test)]
pub mod fixtures {
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::Map;
    use uuid::Uuid;

    use crate::{
        config::{Config, DatabaseConfig, JudgeConfig, JwtConfig, ServerConfig, SyncConfig},
        constants::roles,
        judge::{RunTicket, SubmissionTicket},
        middleware::auth::Claims,
        models::{Difficulty, KnowledgePoint, NewAttempt, NewProblem, Problem, Tag},
    };

    pub const JWT_SECRET: &str = "test-secret";

    /// Configuration with fast polling and no external services
    pub fn config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                rust_log: "debug".to_string(),
            },
            database: DatabaseConfig {
                url: "postgres://localhost/coursejudge_test".to_string(),
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: JWT_SECRET.to_string(),
            },
            judge: JudgeConfig {
                base_url: "http://judge.invalid".to_string(),
                session: String::new(),
                request_timeout_seconds: 1,
                poll_interval_ms: 1,
                max_poll_seconds: 1,
            },
            sync: SyncConfig {
                page_size: 10,
                page_delay_ms: 0,
                category: "all-code-essentials".to_string(),
            },
        }
    }

    /// Bearer token for a regular user
    pub fn token(user_id: Uuid, secret: &str) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            role: roles::USER.to_string(),
            exp: now + 3600,
            iat: now,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    pub fn problem(id: i64, external_id: i64, difficulty: Difficulty) -> Problem {
        Problem {
            id,
            external_id,
            title_slug: format!("problem-{}", external_id),
            title: format!("Problem {}", external_id),
            title_cn: None,
            difficulty,
            content: "<p>Statement</p>".to_string(),
            content_cn: None,
            sample_testcases: "[1,2]\n3".to_string(),
            full_testcases: None,
            time_limit_ms: None,
            memory_limit_kb: None,
            is_custom: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn new_problem(external_id: i64, slug: &str, difficulty: Difficulty) -> NewProblem {
        NewProblem {
            external_id,
            title_slug: slug.to_string(),
            title: slug.to_string(),
            title_cn: None,
            difficulty,
            content: String::new(),
            content_cn: None,
            sample_testcases: String::new(),
        }
    }

    pub fn tag(id: i64, name: &str) -> Tag {
        Tag {
            id,
            name: name.to_string(),
            name_cn: None,
        }
    }

    pub fn knowledge_point(id: i64, name: &str) -> KnowledgePoint {
        KnowledgePoint {
            id,
            name: name.to_string(),
            course_id: 1,
        }
    }

    pub fn new_attempt(user_id: Uuid, problem_id: i64, submission_id: Option<i64>) -> NewAttempt {
        NewAttempt {
            user_id,
            problem_id,
            knowledge_point_id: None,
            typed_code: Some("code".to_string()),
            submission_id,
        }
    }

    pub fn run_ticket(interpret_id: &str) -> RunTicket {
        RunTicket {
            interpret_id: interpret_id.to_string(),
            test_case: None,
            extra: Map::new(),
        }
    }

    pub fn submission_ticket(submission_id: i64) -> SubmissionTicket {
        SubmissionTicket {
            submission_id,
            extra: Map::new(),
        }
    }
}
