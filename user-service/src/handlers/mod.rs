pub mod user_handlers;

use axum::extract::{rejection::PathRejection, Path};
use bookstore_shared::error::RestError;

use crate::error::AppError;

/// Parses the `user_id` path segment as a base-10 signed 64-bit integer
pub fn parse_user_id(user_id_param: &str) -> Result<i64, AppError> {
    user_id_param.parse::<i64>().map_err(|_| {
        tracing::debug!("Rejecting non-numeric user id: {}", user_id_param);
        AppError::from(RestError::bad_request("user id must be a number"))
    })
}

/// Parses the `user_id` path segment, treating an undecodable segment like a non-numeric one
pub fn user_id_from_path(
    user_id: Result<Path<String>, PathRejection>,
) -> Result<i64, AppError> {
    match user_id {
        Ok(Path(user_id)) => parse_user_id(&user_id),
        Err(rejection) => {
            tracing::debug!("Rejected user id path segment: {}", rejection);
            Err(RestError::bad_request("user id must be a number").into())
        }
    }
}
