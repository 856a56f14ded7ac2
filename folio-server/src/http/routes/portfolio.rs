//! Portfolio endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde_json::{json, Value};

use crate::db::repos::PortfolioRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, RowId};
use crate::http::server::AppState;
use crate::models::{PortfolioItem, PortfolioItemForm};

/// GET /portfolio - list all items
async fn list_items(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PortfolioItem>>, ApiError> {
    let items = PortfolioRepo::new(&state.pool).list().await?;
    Ok(Json(items))
}

/// POST /portfolio - create an item
async fn create_item(
    State(state): State<Arc<AppState>>,
    JsonBody(form): JsonBody<PortfolioItemForm>,
) -> Result<(StatusCode, Json<PortfolioItem>), ApiError> {
    let item = form.validate()?;
    let created = PortfolioRepo::new(&state.pool).create(item).await?;
    tracing::info!(id = created.id, "Portfolio item created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /portfolio/portfolio-items/{id}
async fn delete_item(
    State(state): State<Arc<AppState>>,
    RowId(id): RowId,
) -> Result<Json<Value>, ApiError> {
    PortfolioRepo::new(&state.pool).delete(id).await?;
    Ok(Json(json!({ "message": "Portfolio item deleted successfully" })))
}

/// Portfolio routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/portfolio", get(list_items).post(create_item))
        .route("/portfolio/", get(list_items).post(create_item))
        .route("/portfolio/portfolio-items/{id}", delete(delete_item))
}
