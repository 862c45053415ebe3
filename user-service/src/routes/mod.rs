use axum::{
    extract::Request,
    middleware,
    routing::{get, post},
    Router,
};
use bookstore_shared::error::Result;
use bookstore_shared::store::{sql::SqlUserStore, UserStore};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::user_handlers::{
    create_user, delete_user, get_user, search_users, update_user,
};
use crate::services::UsersService;

/// Creates a router with the default SQL store
pub async fn create_router() -> Result<Router> {
    tracing::info!("Creating router with SQL store");

    // Create the SQL store
    let sql_store = Arc::new(SqlUserStore::new().await?);

    // Check if we should remove the base path prefix
    let remove_base_path = std::env::var("REMOVE_BASE_PATH")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false);

    // If REMOVE_BASE_PATH is set to true, don't add the /Prod prefix
    let prefix = if remove_base_path { "" } else { "/Prod" };
    tracing::info!("Using API route prefix: {}", prefix);

    Ok(create_router_with_store(sql_store, prefix))
}

/// Creates a router with a given store implementation
pub fn create_router_with_store<S>(store: Arc<S>, prefix: &str) -> Router
where
    S: UserStore + 'static,
{
    tracing::info!("Setting up API routes with prefix: '{}'", prefix);

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Logging middleware to trace all requests
    async fn logging_middleware(
        req: Request,
        next: axum::middleware::Next,
    ) -> impl axum::response::IntoResponse {
        tracing::info!(
            "Router received request: method={}, uri={}",
            req.method(),
            req.uri()
        );
        next.run(req).await
    }

    let service = UsersService::new(store);

    // Static search route takes priority over the user id segment; its other
    // verbs go to the id handlers, which reject "search" as an id
    let api_routes = Router::new()
        .route("/users", post(create_user::<S>))
        .route(
            "/users/search",
            get(search_users::<S>)
                .put(update_user::<S>)
                .patch(update_user::<S>)
                .delete(delete_user::<S>),
        )
        .route(
            "/users/:user_id",
            get(get_user::<S>)
                .put(update_user::<S>)
                .patch(update_user::<S>)
                .delete(delete_user::<S>),
        )
        .with_state(service);

    let router = if prefix.is_empty() {
        // For tests or when no prefix is needed, don't nest the routes
        api_routes
    } else {
        // For production, nest the routes under the prefix
        Router::new().nest(prefix, api_routes)
    };

    // Add a fallback handler for 404s
    router
        .fallback(|req: Request| async move {
            tracing::warn!("No route matched for: {} {}", req.method(), req.uri());
            (
                axum::http::StatusCode::NOT_FOUND,
                "The requested resource was not found".to_string(),
            )
        })
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
}
