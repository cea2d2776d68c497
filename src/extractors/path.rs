//! Beast key from the `:name` path segment.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Percent-decoded beast name. A segment that does not decode to UTF-8 can
/// never match a stored name, so it is rejected as `AppError::NotFound`.
#[derive(Debug, Clone)]
pub struct BeastKey(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BeastKey
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(name)) => Ok(BeastKey(name)),
            Err(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "undecodable beast key");
                Err(AppError::NotFound(parts.uri.path().to_string()))
            }
        }
    }
}
