use thiserror::Error;

/// Result type for tola operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the analysis core.
///
/// Resolution and suppression matching never error; they produce total
/// result values. The only fault that escapes a file is a check failure
/// under the fail-fast policy.
#[derive(Error, Debug)]
pub enum Error {
    #[error("check {rule_key} failed on {file}: {message}")]
    CheckFailure {
        rule_key: String,
        file: String,
        message: String,
    },
}
