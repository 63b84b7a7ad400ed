use thiserror::Error;

pub type Result<T> = std::result::Result<T, GitGraphError>;

#[derive(Debug, Error)]
pub enum GitGraphError {
    #[error("invalid commit hash: {0:?} is not 40 lowercase hex characters")]
    InvalidHash(String),
}
