//! Blog endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::db::repos::BlogRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, RowId};
use crate::http::server::AppState;
use crate::models::{BlogPost, BlogPostForm};

/// GET /blog - list all posts
async fn list_posts(State(state): State<Arc<AppState>>) -> Result<Json<Vec<BlogPost>>, ApiError> {
    let posts = BlogRepo::new(&state.pool).list().await?;
    Ok(Json(posts))
}

/// GET /blog/{id}
async fn get_post(
    State(state): State<Arc<AppState>>,
    RowId(id): RowId,
) -> Result<Json<BlogPost>, ApiError> {
    let post = BlogRepo::new(&state.pool).get(id).await?;
    Ok(Json(post))
}

/// POST /blog/blog-posts
async fn create_post(
    State(state): State<Arc<AppState>>,
    JsonBody(form): JsonBody<BlogPostForm>,
) -> Result<(StatusCode, Json<BlogPost>), ApiError> {
    let post = form.validate()?;
    let created = BlogRepo::new(&state.pool).create(post).await?;
    tracing::info!(id = created.id, "Blog post created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /blog/blogs/{id}
async fn delete_post(
    State(state): State<Arc<AppState>>,
    RowId(id): RowId,
) -> Result<Json<Value>, ApiError> {
    BlogRepo::new(&state.pool).delete(id).await?;
    Ok(Json(json!({ "message": "Blog post deleted successfully" })))
}

/// Blog routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/blog", get(list_posts))
        .route("/blog/", get(list_posts))
        .route("/blog/{id}", get(get_post))
        .route("/blog/blog-posts", post(create_post))
        .route("/blog/blog-posts/", post(create_post))
        .route("/blog/blogs/{id}", delete(delete_post))
}
