use std::fmt;

/// Result type for message store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for message store operations
#[derive(Debug)]
pub enum Error {
    /// Validation error - invalid configuration or input data
    ValidationError(String),

    /// Connection error - database file unreachable or unopenable
    ConnectionError(String),

    /// Constraint error - a unique or check constraint rejected the write
    ConstraintError(String),

    /// Database error - SQL errors
    DatabaseError(String),

    /// Pool error - connection pool exhausted or closed
    PoolError(String),

    /// Migration error - schema could not be created or upgraded
    MigrationError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Error::ConnectionError(msg) => write!(f, "Connection error: {}", msg),
            Error::ConstraintError(msg) => write!(f, "Constraint violation: {}", msg),
            Error::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            Error::PoolError(msg) => write!(f, "Pool error: {}", msg),
            Error::MigrationError(msg) => write!(f, "Migration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Convert sqlx errors to store errors
impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => Error::PoolError(err.to_string()),
            sqlx::Error::Configuration(e) => Error::ValidationError(e.to_string()),
            sqlx::Error::Io(e) => Error::ConnectionError(e.to_string()),
            sqlx::Error::Database(db_error) => {
                if db_error.is_unique_violation() || db_error.is_check_violation() {
                    Error::ConstraintError(db_error.message().to_string())
                } else {
                    Error::DatabaseError(db_error.message().to_string())
                }
            }
            other => Error::DatabaseError(other.to_string()),
        }
    }
}

/// Convert migration errors to store errors
impl From<sqlx::migrate::MigrateError> for Error {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Error::MigrationError(err.to_string())
    }
}
