// src/main.rs
mod db;
mod error;
mod fingerprint;
mod handlers;
mod memstore;
mod models;
mod poll;
mod routes;
mod source;
mod store;

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::memstore::MemoryPollStore;
use crate::source::{HttpPollSource, PollSource};
use crate::store::{PgPollStore, PollStore};

#[tokio::main]
async fn main() {
    dotenv().ok(); // Load environment variables from .env file

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Get the port from the environment (default to 3030 for local development)
    let port = env::var("PORT").unwrap_or_else(|_| "3030".to_string());
    let port = port.parse::<u16>().expect("PORT must be a valid number");

    let question_url = env::var("QUESTION_URL").expect("QUESTION_URL must be set");
    let options_url = env::var("OPTIONS_URL").expect("OPTIONS_URL must be set");
    let source: Arc<dyn PollSource> = Arc::new(HttpPollSource::new(question_url, options_url));

    // DATABASE_URL selects the relational backend; without it the poll runs
    // on the in-memory key/value store.
    let store: Arc<dyn PollStore> = match env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = db::create_pool(&database_url)
                .await
                .expect("Failed to connect to the database");
            info!("vote store: postgres");
            Arc::new(PgPollStore::new(pool))
        }
        Err(_) => {
            info!("DATABASE_URL not set, vote store: in-memory");
            Arc::new(MemoryPollStore::new())
        }
    };

    let routes = routes::create_routes(store, source);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting poll server");
    axum_server::bind(addr)
        .serve(routes.into_make_service())
        .await
        .expect("server error");
}
