use thiserror::Error;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("password must be at least 8 characters")]
    WeakPassword,
    #[error("user already exists")]
    DuplicateEmail,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("access denied")]
    Unauthenticated,
    #[error("invalid token")]
    InvalidToken,
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("token error: {0}")]
    Token(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::PasswordMismatch => 1002,
            AuthError::WeakPassword => 1003,
            AuthError::DuplicateEmail => 1004,
            AuthError::InvalidCredentials => 1005,
            AuthError::Unauthenticated => 1006,
            AuthError::InvalidToken => 1007,
            AuthError::Hash(_) => 1101,
            AuthError::Token(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }
}
