//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Prefix of the Authorization header value
pub const BEARER_PREFIX: &str = "Bearer ";

// =============================================================================
// EXTERNAL JUDGE DEFAULTS
// =============================================================================

/// Default upstream judge host
pub const DEFAULT_JUDGE_BASE_URL: &str = "https://leetcode.cn";

/// Name of the session cookie sent with every judge request
pub const JUDGE_SESSION_COOKIE: &str = "LEETCODE_SESSION";

/// Default per-request timeout against the judge, in seconds
pub const DEFAULT_JUDGE_TIMEOUT_SECONDS: u64 = 30;

/// Default delay between two polls of the same run, in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Default upper bound for a server-side poll, in seconds
pub const DEFAULT_MAX_POLL_SECONDS: u64 = 60;

/// Judge state tokens
pub mod judge_states {
    pub const PENDING: &str = "PENDING";
    pub const STARTED: &str = "STARTED";
    pub const SUCCESS: &str = "SUCCESS";
    pub const FAILED: &str = "FAILED";
}

// =============================================================================
// CATALOG SYNC DEFAULTS
// =============================================================================

/// Questions requested per catalog page
pub const DEFAULT_SYNC_PAGE_SIZE: u32 = 100;

/// Pause between two catalog pages, in milliseconds
pub const DEFAULT_SYNC_PAGE_DELAY_MS: u64 = 3000;

/// Upstream category the catalog is pulled from
pub const DEFAULT_SYNC_CATEGORY: &str = "all-code-essentials";

// =============================================================================
// SUPPORTED LANGUAGES
// =============================================================================

/// Language identifiers understood by the judge
pub mod languages {
    pub const C: &str = "c";
    pub const CPP: &str = "cpp";
    pub const JAVA: &str = "java";
    pub const PYTHON: &str = "python";
    pub const PYTHON3: &str = "python3";
    pub const CSHARP: &str = "csharp";
    pub const JAVASCRIPT: &str = "javascript";
    pub const TYPESCRIPT: &str = "typescript";
    pub const GO: &str = "golang";
    pub const RUST: &str = "rust";
    pub const KOTLIN: &str = "kotlin";
    pub const SWIFT: &str = "swift";

    /// All supported language identifiers
    pub const ALL: &[&str] = &[
        C, CPP, JAVA, PYTHON, PYTHON3, CSHARP, JAVASCRIPT, TYPESCRIPT, GO, RUST, KOTLIN, SWIFT,
    ];
}

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers; tokens without a role claim get `USER`
pub mod roles {
    pub const USER: &str = "USER";
}

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum source code size in bytes (1 MB)
pub const MAX_SOURCE_CODE_SIZE: u64 = 1024 * 1024;

/// Maximum number of attempts returned by the history endpoint
pub const MAX_ATTEMPT_HISTORY: i64 = 100;
