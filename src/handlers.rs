// handlers.rs
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppError;
use crate::models::{Poll, VoteRequest, VoteResults};
use crate::poll::{load_poll, submit_vote, sync_poll};
use crate::routes::AppState;

/// Serve the current question and options, resetting stale votes first.
pub async fn get_poll(State(state): State<AppState>) -> Result<Json<Poll>, AppError> {
    let poll = load_poll(state.source.as_ref()).await?;
    sync_poll(state.store.as_ref(), &poll).await?;
    Ok(Json(poll))
}

/// Record one vote for the supplied voter fingerprint and return live tallies.
pub async fn vote(
    State(state): State<AppState>,
    payload: Result<Json<VoteRequest>, JsonRejection>,
) -> Result<Json<VoteResults>, AppError> {
    let Json(request) = payload.map_err(|_| AppError::MalformedRequest)?;

    let poll = load_poll(state.source.as_ref()).await?;
    sync_poll(state.store.as_ref(), &poll).await?;

    let results = submit_vote(
        state.store.as_ref(),
        &request.fingerprint,
        &request.vote,
        &poll.options,
    )
    .await?;
    Ok(Json(VoteResults { results }))
}

/// Fallback for every unrouted path.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
