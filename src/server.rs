use std::{
    net::SocketAddr,
    sync::{Arc, Mutex, MutexGuard},
};

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{
    capital::{self, Outcome},
    history::{ConversionHistory, HistoryEntry},
};

#[derive(Clone)]
pub struct AppState {
    history: Arc<Mutex<ConversionHistory>>,
}

impl AppState {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            history: Arc::new(Mutex::new(ConversionHistory::new(history_capacity))),
        }
    }

    fn history(&self) -> ApiResult<MutexGuard<'_, ConversionHistory>> {
        self.history
            .lock()
            .map_err(|_| ApiError::internal("conversion history lock poisoned"))
    }
}

#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    pub amount: String,
    #[serde(default)]
    pub record: bool,
}

#[derive(Serialize)]
struct ApiErrorBody {
    message: String,
}

type ApiResult<T> = std::result::Result<T, ApiError>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .route("/v1/amount/convert", post(convert_amount))
        .route("/v1/history", get(list_history).delete(clear_history))
        .route("/v1/history/last-recorded", delete(forget_last_recorded))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, history_capacity: usize) -> Result<()> {
    let app = router(AppState::new(history_capacity));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind HTTP listener on {addr}"))?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service())
        .await
        .context("HTTP server terminated unexpectedly")
}

async fn health() -> &'static str {
    "ok"
}

async fn convert_amount(
    State(state): State<AppState>,
    Json(payload): Json<ConvertRequest>,
) -> ApiResult<(StatusCode, Json<Outcome>)> {
    let ConvertRequest { amount, record } = payload;

    let result = capital::convert(&amount);
    match &result {
        Ok(text) if record => {
            if state.history()?.record(&amount, text) {
                info!(amount = %amount, "recorded conversion");
            }
        }
        Ok(_) => {}
        Err(err) => warn!(amount = %amount, "rejected amount: {err}"),
    }

    let outcome = Outcome::from(result);
    let status = if outcome.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    Ok((status, Json(outcome)))
}

async fn list_history(State(state): State<AppState>) -> ApiResult<Json<Vec<HistoryEntry>>> {
    let entries = state.history()?.entries().cloned().collect();
    Ok(Json(entries))
}

async fn clear_history(State(state): State<AppState>) -> ApiResult<StatusCode> {
    state.history()?.clear();
    Ok(StatusCode::NO_CONTENT)
}

/// Starts a new input session: the last recorded amount may be recorded again.
async fn forget_last_recorded(State(state): State<AppState>) -> ApiResult<StatusCode> {
    state.history()?.forget_last_recorded();
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = Json(ApiErrorBody {
            message: self.message,
        });
        (self.status, body).into_response()
    }
}
