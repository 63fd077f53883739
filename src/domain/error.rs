use thiserror::Error;

/// App-level error type. Business errors keep their original message all the
/// way to the HTTP response; unexpected errors are collapsed into `Internal`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    UnprocessableEntity(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}
