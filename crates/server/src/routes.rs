pub mod resources;

use axum::{
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use service::resource::Resources;

use crate::errors::JsonApiError;
use crate::openapi::{ApiDoc, HealthResponse};

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> (StatusCode, String) {
    common::metrics::encode_metrics()
}

async fn not_found() -> JsonApiError {
    JsonApiError::new(StatusCode::NOT_FOUND, "route not found")
}

// Routing answers a wrong method with an empty 405; keep its Allow header.
async fn method_not_allowed_as_json(res: Response) -> Response {
    if res.status() != StatusCode::METHOD_NOT_ALLOWED {
        return res;
    }
    let allow = res.headers().get(header::ALLOW).cloned();
    let mut out = JsonApiError::new(StatusCode::METHOD_NOT_ALLOWED, "method not allowed").into_response();
    if let Some(allow) = allow {
        out.headers_mut().insert(header::ALLOW, allow);
    }
    out
}

/// Build the full application router: one CRUD group per resource plus health, metrics and docs.
pub fn build_router(hub: Resources, cors: CorsLayer) -> Router {
    let api = Router::new()
        .nest("/users", resources::router(hub.users))
        .nest("/products", resources::router(hub.products))
        .nest("/orders", resources::router(hub.orders))
        .nest("/stores", resources::router(hub.stores))
        .nest("/suppliers", resources::router(hub.suppliers))
        .nest("/campaigns", resources::router(hub.campaigns));

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .merge(api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .layer(middleware::map_response(method_not_allowed_as_json))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
