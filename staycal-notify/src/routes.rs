use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::notify::{self, ChangePayload};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/hooks/visits", post(visit_hook))
}

async fn health() -> &'static str {
    "OK"
}

#[derive(Serialize)]
pub struct HookResponse {
    pub message: String,
}

/// POST /hooks/visits - the database calls this on every visits change
async fn visit_hook(
    State(state): State<AppState>,
    Json(payload): Json<ChangePayload>,
) -> Result<Json<HookResponse>, AppError> {
    if !notify::should_notify(&payload) {
        debug!(kind = ?payload.kind, table = %payload.table, "Skipping change");
        return Ok(Json(HookResponse {
            message: "Skipped - not a new pending visit".to_string(),
        }));
    }

    let email = notify::compose(&payload.record);
    notify::send(
        &state.http,
        &state.resend_api_key,
        &state.config,
        &email,
    )
    .await?;

    info!(visit = %payload.record.id, "Notification sent");
    Ok(Json(HookResponse {
        message: "Email sent".to_string(),
    }))
}

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert anyhow errors to HTTP responses
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {:#}", self.0);
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
