//! Liveness and status-check log handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::http::response::{ApiError, Message};
use crate::http::server::AppState;
use crate::status::{StatusCheck, StatusCheckCreate};

pub async fn root() -> Json<Message> {
    Json(Message {
        message: "Global Radio API",
    })
}

pub async fn create_status_check(
    State(state): State<AppState>,
    input: Result<Json<StatusCheckCreate>, JsonRejection>,
) -> Result<Json<StatusCheck>, ApiError> {
    let Json(input) = input?;
    let check = StatusCheck::from(input);

    state.store.insert(check.clone()).await?;
    tracing::debug!(id = %check.id, client_name = %check.client_name, "Status check recorded");

    Ok(Json(check))
}

pub async fn list_status_checks(
    State(state): State<AppState>,
) -> Result<Json<Vec<StatusCheck>>, ApiError> {
    Ok(Json(state.store.list(state.list_limit).await?))
}
