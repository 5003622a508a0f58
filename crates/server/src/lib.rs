pub mod access;
pub mod auth;
pub mod config;
pub mod db;
pub mod error_convert;
pub mod health;
pub mod openapi;
pub mod razorpay;
pub mod repo;
pub mod rest;
pub mod telemetry;

use axum::Router;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::db::AppState;

/// The complete service: REST API, docs, health check, auth and request
/// tracing. Shared by the binary and the router tests.
pub fn app(state: AppState) -> Router {
    let settings = state.settings.clone();
    let max_body = settings.max_body_bytes;

    openapi::api_router(state)
        .layer(axum::extract::DefaultBodyLimit::max(max_body))
        .layer(axum::middleware::from_fn_with_state(
            settings,
            auth::middleware::auth_middleware,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(telemetry::RequestSpan)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
