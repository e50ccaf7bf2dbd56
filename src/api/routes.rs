//! Router configuration for the API.
//!
//! This module provides centralized route registration, CORS policy, and
//! middleware configuration for the application.

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::middleware;
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::config::CorsConfig;
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Routes
/// - `/api/report`, `/api/notify`, `/api/cleanup-notifications`
/// - `/health`
/// - `/api-docs/openapi.json` and `/swagger-ui`
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs
/// first): request IDs are assigned before logging, and CORS wraps the
/// handlers.
pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    let api_routes = OpenApiRouter::new()
        .merge(handlers::reports::report_routes())
        .merge(handlers::notifications::notification_routes());

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", api_routes)
        .merge(handlers::health::health_routes())
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(build_cors_layer(cors))
        // Middleware is applied in reverse order - last added runs first
        // So logging runs after request_id has set the ID
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Builds the CORS layer from the configured origin allow-list.
///
/// Origins that fail to parse as header values are skipped with a warning
/// rather than aborting startup.
fn build_cors_layer(cors: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Skipping unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_accepts_origin_list() {
        let cors = CorsConfig {
            allowed_origins: vec![
                "https://adrain-driver.web.app".to_string(),
                "https://shopping-cart-4.web.app".to_string(),
            ],
        };
        // Building the layer must not panic; parse failures are skipped.
        let _ = build_cors_layer(&cors);
    }

    #[test]
    fn test_cors_layer_skips_bad_origins() {
        let cors = CorsConfig {
            allowed_origins: vec!["https://ok.example".to_string(), "bad\norigin".to_string()],
        };
        let _ = build_cors_layer(&cors);
    }
}
