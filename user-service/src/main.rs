mod error;
mod handlers;
mod models;
mod routes;
mod services;

use axum::{body::Body, extract::Request, response::Response, Router};
use http_body_util::BodyExt;
use lambda_http::{
    run, service_fn, Body as LambdaBody, Error, Request as LambdaRequest,
    Response as LambdaResponse,
};
use once_cell::sync::Lazy;
use std::net::SocketAddr;
use tokio::sync::Mutex;
use tower::ServiceExt;

const DEFAULT_PORT: u16 = 3002;

// Router instance that will be initialized once per Lambda container
static ROUTER: Lazy<Mutex<Option<Router>>> = Lazy::new(|| Mutex::new(None));

async fn shared_router() -> Result<Router, Error> {
    let mut router_option = ROUTER.lock().await;

    if let Some(router) = router_option.as_ref() {
        return Ok(router.clone());
    }

    tracing::info!("Initializing the Axum router");
    let router = routes::create_router().await?;
    *router_option = Some(router.clone());

    Ok(router)
}

// The Lambda handler function
async fn function_handler(event: LambdaRequest) -> Result<LambdaResponse<LambdaBody>, Error> {
    tracing::info!(
        "Received Lambda request: method={:?}, path={:?}, query_params={:?}",
        event.method(),
        event.uri().path(),
        event.uri().query()
    );

    let app = shared_router().await?;

    // Convert the Lambda event to an HTTP request for Axum
    let (parts, body) = event.into_parts();
    let body = match body {
        LambdaBody::Empty => Body::empty(),
        LambdaBody::Text(text) => {
            tracing::debug!("Request body (text): {}", text);
            Body::from(text)
        }
        LambdaBody::Binary(data) => {
            tracing::debug!("Request body (binary): {} bytes", data.len());
            Body::from(data)
        }
    };

    let http_request = Request::from_parts(parts, body);

    let response = match app.oneshot(http_request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };
    tracing::info!("Received response from Axum: status={}", response.status());

    response_to_lambda(response).await
}

// Convert the Axum response to a format suitable for Lambda
async fn response_to_lambda(response: Response) -> Result<LambdaResponse<LambdaBody>, Error> {
    let (parts, body) = response.into_parts();

    let bytes = body.collect().await?.to_bytes();
    tracing::debug!("Response body size: {} bytes", bytes.len());

    let builder = LambdaResponse::builder().status(parts.status);

    let builder_with_headers = parts
        .headers
        .iter()
        .fold(builder, |builder, (name, value)| builder.header(name, value));

    let lambda_response = if bytes.is_empty() {
        builder_with_headers.body(LambdaBody::Empty)?
    } else {
        match String::from_utf8(bytes.to_vec()) {
            Ok(text) => builder_with_headers.body(LambdaBody::Text(text))?,
            Err(_) => builder_with_headers.body(LambdaBody::Binary(bytes.to_vec()))?,
        }
    };

    Ok(lambda_response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let in_lambda = std::env::var("AWS_LAMBDA_FUNCTION_NAME").is_ok();

    // Initialize tracing; `log` records from the shared crate are bridged in
    let log_level = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,bookstore_users_service=debug".into());

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_ansi(!in_lambda) // Disable ANSI colors in Lambda environment
        .with_target(true)
        .init();

    if in_lambda {
        tracing::info!(
            "Running in AWS Lambda environment: {} (version: {})",
            std::env::var("AWS_LAMBDA_FUNCTION_NAME").unwrap_or_default(),
            std::env::var("AWS_LAMBDA_FUNCTION_VERSION").unwrap_or_else(|_| "unknown".into())
        );
        run(service_fn(function_handler)).await?;
    } else {
        tracing::info!("Starting service in non-Lambda environment");
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        tracing::info!("listening on {}", addr);

        let app = routes::create_router().await?;
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app.into_make_service()).await?;
    }

    tracing::info!("Service finished");
    Ok(())
}
