//! Hospital operations reporting API server library

#![forbid(unsafe_code)]

pub mod dataset;
pub mod handlers;
pub mod routes;
pub mod state;

pub use state::AppState;

use axum::Router;
use hospdash_core::Config;
use hospdash_core::context_error::Result;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Build the API router with all routes and middleware
///
/// # Errors
///
/// Returns an error if the application state validation fails.
pub fn build_router(config: Config) -> Result<Router> {
    let enable_cors = config.api.enable_cors;

    let state = Arc::new(AppState::new(config));
    state.validate()?;

    let mut app = routes::build_router().with_state(state);

    if enable_cors {
        app = app.layer(CorsLayer::permissive());
    }

    Ok(app)
}
