use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid due date: {0}")]
    InvalidDueDate(String),
}
