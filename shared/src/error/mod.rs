use thiserror::Error;

pub type Result<T> = std::result::Result<T, RestError>;

/// Error kind tags carried in the `error` field of every error body
pub const KIND_BAD_REQUEST: &str = "bad_request";
pub const KIND_NOT_FOUND: &str = "not_found";
pub const KIND_INTERNAL_SERVER_ERROR: &str = "internal_server_error";
pub const KIND_DATABASE_ERROR: &str = "database_error";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RestError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InternalServerError(String),

    #[error("{0}")]
    DatabaseError(String),
}

impl RestError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        RestError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        RestError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        RestError::InternalServerError(message.into())
    }

    pub fn database_error(message: impl Into<String>) -> Self {
        RestError::DatabaseError(message.into())
    }

    pub fn status_code(&self) -> u16 {
        match self {
            RestError::BadRequest(_) => 400,
            RestError::NotFound(_) => 404,
            RestError::InternalServerError(_) => 500,
            RestError::DatabaseError(_) => 500,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RestError::BadRequest(_) => KIND_BAD_REQUEST,
            RestError::NotFound(_) => KIND_NOT_FOUND,
            RestError::InternalServerError(_) => KIND_INTERNAL_SERVER_ERROR,
            RestError::DatabaseError(_) => KIND_DATABASE_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            RestError::BadRequest(msg)
            | RestError::NotFound(msg)
            | RestError::InternalServerError(msg)
            | RestError::DatabaseError(msg) => msg,
        }
    }
}

/// Translates a storage engine error into a `RestError`.
///
/// This is the only place that looks inside raw sqlx errors. Everything above
/// the store works with the taxonomy values produced here.
pub fn map_sqlx_error(err: sqlx::Error) -> RestError {
    match &err {
        sqlx::Error::RowNotFound => RestError::not_found("user not found"),
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            log::debug!("Unique constraint violated: {}", db_err.message());
            RestError::bad_request("email already registered")
        }
        _ => {
            log::error!("Unclassified database error: {}", err);
            RestError::database_error(format!("error processing request: {}", err))
        }
    }
}

// Failure to obtain a connection is reported as an internal error, not a query error
pub fn map_acquire_error(err: sqlx::Error) -> RestError {
    log::error!("Failed to acquire database connection: {}", err);
    RestError::internal_server_error(format!("error acquiring database connection: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = map_sqlx_error(sqlx::Error::RowNotFound);
        assert_eq!(err, RestError::not_found("user not found"));
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.kind(), "not_found");
    }

    #[test]
    fn test_other_errors_map_to_database_error() {
        let err = map_sqlx_error(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.kind(), "database_error");
        assert!(err.message().starts_with("error processing request: "));
        assert!(err.message().contains(&sqlx::Error::PoolTimedOut.to_string()));
    }

    #[test]
    fn test_acquire_error_is_internal_server_error() {
        let err = map_acquire_error(sqlx::Error::PoolClosed);
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.kind(), "internal_server_error");
    }

    #[test]
    fn test_constructors_carry_status_and_kind() {
        let cases = [
            (RestError::bad_request("x"), 400, "bad_request"),
            (RestError::not_found("x"), 404, "not_found"),
            (RestError::internal_server_error("x"), 500, "internal_server_error"),
            (RestError::database_error("x"), 500, "database_error"),
        ];

        for (err, status, kind) in cases {
            assert_eq!(err.status_code(), status);
            assert_eq!(err.kind(), kind);
            assert_eq!(err.message(), "x");
            assert_eq!(err.to_string(), "x");
        }
    }
}
