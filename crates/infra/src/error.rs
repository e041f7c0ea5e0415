//! Store error model and sqlx → domain translation.
//!
//! Driver errors are mapped as follows:
//!
//! | sqlx error kind       | DomainError   | Scenario                          |
//! |-----------------------|---------------|-----------------------------------|
//! | UniqueViolation       | Conflict      | duplicate email, duplicate link   |
//! | ForeignKeyViolation   | Referential   | nonexistent equipment/room/user   |
//! | anything else         | (kept raw)    | surfaced as internal error upstream |

use sqlx::error::ErrorKind;
use thiserror::Error;

use chamados_core::DomainError;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Deterministic business failure, already in taxonomy form.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Unexpected driver fault. Logged at the API boundary, never shown to
    /// clients.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Translate a constraint violation into the matching domain error; any
/// other driver error is kept as-is.
pub(crate) fn mapear_sqlx(err: sqlx::Error, conflito: &str, referencia: &str) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        match db.kind() {
            ErrorKind::UniqueViolation => {
                return DomainError::conflict(conflito).into();
            }
            ErrorKind::ForeignKeyViolation => {
                return DomainError::referential(referencia).into();
            }
            _ => {}
        }
    }
    StoreError::Database(err)
}
