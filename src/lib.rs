//! Bestiary: CRUD REST service for creature records backed by PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod server;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{load, AppConfig};
pub use error::{AppError, ConfigError, StartupError, StoreError};
pub use model::Beast;
pub use routes::{beast_routes, common_routes};
pub use server::{build_router, serve};
pub use service::BeastService;
pub use state::AppState;
#[cfg(any(test, feature = "test-util"))]
pub use store::MockStore;
pub use store::{PgStore, RetryPolicy, Store};
