//! Beast collection and item routes.

use crate::handlers::beasts::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn beast_routes(state: AppState) -> Router {
    Router::new()
        .route("/beasts", get(list).post(create))
        .route(
            "/beasts/:name",
            get(read).put(update).delete(delete_handler),
        )
        .with_state(state)
}
