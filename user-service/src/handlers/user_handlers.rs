use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::{Method, StatusCode},
    Json,
};
use bookstore_shared::{error::RestError, store::UserStore};

use crate::error::{AppError, Result};
use crate::handlers::user_id_from_path;
use crate::models::{SearchParams, StatusResponse, User};
use crate::services::UsersService;

fn invalid_json(rejection: JsonRejection) -> AppError {
    tracing::debug!("Rejected request body: {}", rejection);
    RestError::bad_request("invalid json body").into()
}

// POST /users
pub async fn create_user<S: UserStore>(
    State(service): State<UsersService<S>>,
    payload: std::result::Result<Json<User>, JsonRejection>,
) -> Result<(StatusCode, Json<User>)> {
    let Json(user) = payload.map_err(invalid_json)?;

    let created = service.create_user(user).await?;
    tracing::info!("Created user {}", created.id);

    Ok((StatusCode::CREATED, Json(created)))
}

// GET /users/:user_id
pub async fn get_user<S: UserStore>(
    State(service): State<UsersService<S>>,
    user_id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<User>> {
    let user_id = user_id_from_path(user_id)?;

    // A service error ends the request here; no success body follows it
    let user = service.get_user(user_id).await?;

    Ok(Json(user))
}

// PUT /users/:user_id and PATCH /users/:user_id
pub async fn update_user<S: UserStore>(
    State(service): State<UsersService<S>>,
    method: Method,
    user_id: std::result::Result<Path<String>, PathRejection>,
    payload: std::result::Result<Json<User>, JsonRejection>,
) -> Result<Json<User>> {
    let user_id = user_id_from_path(user_id)?;
    let Json(mut user) = payload.map_err(invalid_json)?;

    // The path id always wins over any id in the body
    user.id = user_id;

    let is_partial = method == Method::PATCH;
    tracing::debug!("Updating user {} (partial={})", user_id, is_partial);

    let updated = service.update_user(is_partial, user).await?;

    Ok(Json(updated))
}

// DELETE /users/:user_id
pub async fn delete_user<S: UserStore>(
    State(service): State<UsersService<S>>,
    user_id: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<StatusResponse>> {
    let user_id = user_id_from_path(user_id)?;

    service.delete_user(user_id).await?;
    tracing::info!("Deleted user {}", user_id);

    Ok(Json(StatusResponse {
        status: "deleted".to_string(),
    }))
}

// GET /users/search?status=
pub async fn search_users<S: UserStore>(
    State(service): State<UsersService<S>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<User>>> {
    let params = SearchParams::from(pairs);
    let users = service.search(&params.status).await?;
    tracing::debug!("Search for status '{}' matched {} user(s)", params.status, users.len());

    Ok(Json(users))
}
