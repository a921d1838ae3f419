//! Route table and the layers around it.

mod common;
mod country;

pub use common::common_routes_with_ready;
pub use country::country_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer};

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Pages, forms, probes, and static files from `public_dir`.
///
/// Method override is not applied here; it must wrap the returned router so it runs before routing.
pub fn app(state: AppState, public_dir: &str) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .merge(country_routes(state))
        .fallback_service(ServeDir::new(public_dir))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
}
