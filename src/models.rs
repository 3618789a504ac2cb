// models.rs
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The currently active poll, as fetched from the content source this request.
#[derive(Debug, Clone, Serialize)]
pub struct Poll {
    pub question: String,
    pub options: Vec<String>,
}

/// Singleton record identifying the poll content the vote ledger is valid for.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct PollMetadata {
    pub question_hash: String,
    pub options_hash: String,
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub fingerprint: String,
    pub vote: String,
}

#[derive(Debug, Serialize)]
pub struct VoteResults {
    pub results: HashMap<String, i64>,
}
