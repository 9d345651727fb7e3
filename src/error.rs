use crate::seatcode::CodeError;
use thiserror::Error;

/// Error taxonomy for the lottery/review core. Handlers map these onto IPC
/// error codes at the boundary; infrastructure code (db open, backup) stays
/// on `anyhow`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("not enough active seats: {students} students, {seats} seats")]
    Capacity { students: usize, seats: usize },

    #[error("seat not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    InvalidCode(#[from] CodeError),

    #[error(transparent)]
    Store(#[from] rusqlite::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
