//! Common routes: health at the root, readiness, version.

use crate::handlers::common::{health, ready, version};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
