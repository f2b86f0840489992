use std::sync::Arc;

use std::time::Duration;

use axum::{
    body::Body,
    extract::Extension,
    http::{Request, Response, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::jobs;
use crate::state::AppState;

/// Build the primary axum router with the provided shared application state.
pub fn build_router(state: Arc<AppState>) -> Router {
    build_router_with_cors(state, None)
}

/// Like [`build_router`], with an optional CORS layer in front of every route.
pub fn build_router_with_cors(state: Arc<AppState>, cors: Option<CorsLayer>) -> Router {
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/jobs", get(jobs::list::list).post(jobs::create::create))
        .route(
            "/jobs/{id}",
            get(jobs::get_by_id::get_by_id)
                .patch(jobs::update::update)
                .delete(jobs::delete::delete),
        )
        .layer(
            TraceLayer::new_for_http()
                .on_request(|request: &Request<Body>, _: &tracing::Span| {
                    tracing::debug!(method = %request.method(), uri = %request.uri(), "request");
                })
                .on_response(|response: &Response<Body>, latency: Duration, _: &tracing::Span| {
                    tracing::info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis() as u64,
                        "response"
                    );
                }),
        );

    let router = match cors {
        Some(layer) => router.layer(layer),
        None => router,
    };

    Router::new().nest("/api", router.layer(Extension(state)))
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn ready_handler(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    match state.jobs.ping().await {
        Ok(()) => (StatusCode::OK, "OK"),
        Err(error) => {
            tracing::warn!(%error, "readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "database unavailable")
        }
    }
}
