use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("password hashing failed: {0}")]
    Password(String),
}

impl ModelError {
    pub fn invalid(msg: impl Into<String>) -> Self { Self::Validation(msg.into()) }
}
