/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router and wraps it in the
 * request pipeline.
 *
 * # Pipeline (outermost first)
 *
 * 1. `TraceLayer` - request/response logging
 * 2. `CorsLayer` - one allowed origin (`CLIENT_URL`), credentials enabled
 * 3. `page_not_found_backstop` - replaces 404s that bypassed the error boundary
 * 4. `CatchPanicLayer` - a panicking handler becomes a 500 envelope
 * 5. Routes, with `not_found_guard` as the fallback for unmatched paths and
 *    unsupported methods
 */

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::backend::error::panic_response;
use crate::backend::middleware::{not_found_guard, page_not_found_backstop};
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::demo_routes::{gemini, image_info, liveness};
use crate::backend::server::state::AppState;
use crate::shared::config::AppConfig;

/// Create the Axum router with all routes configured
///
/// - `GET /v1/api` - liveness
/// - `GET /image-info`, `POST /gemini` - demo provider calls
/// - `/v1/api/{auth,user,bots,tools,ai-assistant}/...` - sub-routers
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new()
        .route("/v1/api", get(liveness))
        .route("/image-info", get(image_info))
        .route("/gemini", post(gemini))
        .nest("/v1/api", configure_api_routes());

    with_pipeline(router, app_state)
}

/// Wrap routes in the not-found handling, panic recovery, CORS and tracing
///
/// Public so tests can run extra routes through the same pipeline.
pub fn with_pipeline(router: Router<AppState>, app_state: AppState) -> Router<()> {
    let cors = cors_layer(&app_state.config);

    router
        .fallback(not_found_guard)
        .method_not_allowed_fallback(not_found_guard)
        .with_state(app_state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(page_not_found_backstop))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// CORS policy for the configured client origin
pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origin = match HeaderValue::from_str(&config.client_url) {
        // Only echoed back to a request from this origin
        Ok(origin) => AllowOrigin::list([origin]),
        Err(e) => {
            tracing::error!(client_url = %config.client_url, error = %e, "CLIENT_URL is not a valid origin, CORS will reject all origins");
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::PATCH])
        .allow_credentials(true)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
