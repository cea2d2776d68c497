//! Beast CRUD handlers: list, read, create, update, delete.

use crate::error::AppError;
use crate::extractors::{BeastKey, JsonBody};
use crate::model::{Beast, CreatedBeast, MessageBody};
use crate::service::BeastService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Beast>>, AppError> {
    let beasts = BeastService::list(state.store()).await?;
    Ok(Json(beasts))
}

pub async fn read(
    State(state): State<AppState>,
    BeastKey(name): BeastKey,
) -> Result<Json<Beast>, AppError> {
    match BeastService::get(state.store(), &name).await? {
        Some(beast) => Ok(Json(beast)),
        None => Err(AppError::NotFound(name)),
    }
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(beast): JsonBody<Beast>,
) -> Result<(StatusCode, Json<CreatedBeast>), AppError> {
    BeastService::create(state.store(), &beast).await?;
    tracing::info!(name = %beast.name, "beast created");
    Ok((StatusCode::CREATED, Json(CreatedBeast { name: beast.name })))
}

/// The key comes from the path; a `BeastName` in the body is ignored.
pub async fn update(
    State(state): State<AppState>,
    BeastKey(name): BeastKey,
    JsonBody(beast): JsonBody<Beast>,
) -> Result<Json<MessageBody>, AppError> {
    let affected = BeastService::update(state.store(), &name, &beast).await?;
    if affected == 0 {
        return Err(AppError::NotFound(name));
    }
    Ok(Json(MessageBody {
        message: "Beast updated successfully",
    }))
}

pub async fn delete(
    State(state): State<AppState>,
    BeastKey(name): BeastKey,
) -> Result<Json<MessageBody>, AppError> {
    let affected = BeastService::delete(state.store(), &name).await?;
    if affected == 0 {
        return Err(AppError::NotFound(name));
    }
    tracing::info!(%name, "beast deleted");
    Ok(Json(MessageBody {
        message: "Beast deleted successfully",
    }))
}
