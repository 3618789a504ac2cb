// routes.rs
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use http::Method;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;
use crate::source::PollSource;
use crate::store::PollStore;

/// Shared handles to the storage and content-source ports.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PollStore>,
    pub source: Arc<dyn PollSource>,
}

pub fn create_routes(store: Arc<dyn PollStore>, source: Arc<dyn PollSource>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/poll", get(handlers::get_poll))
        .route("/vote", post(handlers::vote))
        .fallback(handlers::not_found)
        .layer(cors)
        .with_state(AppState { store, source })
}
