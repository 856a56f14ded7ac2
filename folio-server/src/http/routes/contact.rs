//! Contact endpoint

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::server::AppState;
use crate::models::{ContactForm, ContactMessage};

/// POST /contact - store a message and notify the site owner
///
/// Responds 201 with the stored row whether or not the notification went
/// out; `email_sent` says which.
async fn submit_message(
    State(state): State<Arc<AppState>>,
    JsonBody(form): JsonBody<ContactForm>,
) -> Result<(StatusCode, Json<ContactMessage>), ApiError> {
    let submission = form.validate()?;
    let message = state.recorder.record(submission).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// Contact routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/contact", post(submit_message))
        .route("/contact/", post(submit_message))
}
