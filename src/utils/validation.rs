//! Input validation utilities

use crate::constants::{self, MAX_SOURCE_CODE_SIZE};

/// Longest run or submission id accepted on the check routes
const MAX_RUN_ID_LENGTH: usize = 64;

/// Validate programming language
pub fn validate_language(language: &str) -> Result<(), &'static str> {
    if constants::languages::ALL.contains(&language) {
        Ok(())
    } else {
        Err("Unsupported programming language")
    }
}

/// Validate source code size
pub fn validate_source_code(code: &str) -> Result<(), &'static str> {
    if code.trim().is_empty() {
        return Err("Source code cannot be empty");
    }
    if code.len() as u64 > MAX_SOURCE_CODE_SIZE {
        return Err("Source code exceeds maximum size of 1MB");
    }
    Ok(())
}

/// Validate a judge run id (`runcode_...`) or numeric submission id
pub fn validate_run_id(run_id: &str) -> Result<(), &'static str> {
    if run_id.is_empty() {
        return Err("Run id cannot be empty");
    }
    if run_id.len() > MAX_RUN_ID_LENGTH {
        return Err("Run id is too long");
    }
    if !run_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err("Run id can only contain letters, numbers, dots, underscores, and hyphens");
    }
    // The id becomes a path segment on the judge
    if run_id == "." || run_id == ".." {
        return Err("Run id cannot be a relative path segment");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_language() {
        assert!(validate_language("cpp").is_ok());
        assert!(validate_language("python3").is_ok());
        assert!(validate_language("golang").is_ok());
        assert!(validate_language("go").is_err());
        assert!(validate_language("Rust").is_err());
    }

    #[test]
    fn test_validate_source_code() {
        assert!(validate_source_code("int main() {}").is_ok());
        assert!(validate_source_code("  \n ").is_err());
        let huge = "a".repeat(MAX_SOURCE_CODE_SIZE as usize + 1);
        assert!(validate_source_code(&huge).is_err());
    }

    #[test]
    fn test_validate_run_id() {
        assert!(validate_run_id("123456").is_ok());
        assert!(validate_run_id("runcode_1672837266.8327153_IBEXEAvgkU").is_ok());
        assert!(validate_run_id("runcode_1700000000_abc").is_ok());
        assert!(validate_run_id("../admin").is_err());
        assert!(validate_run_id("..").is_err());
        assert!(validate_run_id(".").is_err());
        assert!(validate_run_id("run code").is_err());
        assert!(validate_run_id("").is_err());
    }
}
