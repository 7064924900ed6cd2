//! Database error taxonomy
//!
//! `sqlx::Error` is classified once, at the repository boundary, into the
//! kinds handlers care about: store unavailable, constraint violation,
//! not found, or any other statement failure.

use sqlx::error::ErrorKind;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Pool exhausted, closed, or the server could not be reached
    #[error("database unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    /// Foreign key, unique, not-null or check constraint rejected the write
    #[error("constraint violation: {message}")]
    Constraint { message: String },

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Any other statement failure (malformed SQL, type mismatch, ...)
    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),
}

impl DbError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => Self::Unavailable(e),
            sqlx::Error::Database(ref db) => match db.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => Self::Constraint {
                    message: db.message().to_owned(),
                },
                _ => Self::Query(e),
            },
            _ => Self::Query(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeout_is_unavailable() {
        let err = DbError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, DbError::Unavailable(_)));
    }

    #[test]
    fn pool_closed_is_unavailable() {
        let err = DbError::from(sqlx::Error::PoolClosed);
        assert!(matches!(err, DbError::Unavailable(_)));
    }

    #[test]
    fn io_is_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = DbError::from(sqlx::Error::Io(io));
        assert!(matches!(err, DbError::Unavailable(_)));
    }

    #[test]
    fn row_not_found_is_query_error() {
        // Repositories use fetch_optional and build NotFound themselves.
        let err = DbError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::Query(_)));
    }

    #[test]
    fn not_found_display() {
        let err = DbError::not_found("recipe", 42);
        assert_eq!(err.to_string(), "not found: recipe '42'");
    }
}
