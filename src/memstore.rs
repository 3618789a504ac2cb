// src/memstore.rs
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::PollMetadata;
use crate::store::PollStore;

const META_QUESTION: &str = "meta:question";
const META_OPTIONS: &str = "meta:options";
const VOTE_PREFIX: &str = "votes:";

/// Key/value rendition of the same store: votes live under
/// `votes:<fingerprint>` keys, the metadata singleton under fixed `meta:`
/// keys. Backs the server when no database is configured, and stands in
/// for the relational store in engine tests.
pub struct MemoryPollStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryPollStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for MemoryPollStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PollStore for MemoryPollStore {
    async fn read_metadata(&self) -> Result<Option<PollMetadata>, StoreError> {
        let entries = self.entries.read().await;
        match (entries.get(META_QUESTION), entries.get(META_OPTIONS)) {
            (Some(question_hash), Some(options_hash)) => Ok(Some(PollMetadata {
                question_hash: question_hash.clone(),
                options_hash: options_hash.clone(),
            })),
            _ => Ok(None),
        }
    }

    async fn reset_for(&self, meta: &PollMetadata) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        entries.retain(|key, _| !key.starts_with(VOTE_PREFIX));
        entries.insert(META_QUESTION.to_string(), meta.question_hash.clone());
        entries.insert(META_OPTIONS.to_string(), meta.options_hash.clone());
        Ok(())
    }

    async fn has_voted(&self, voter: &str) -> Result<bool, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries.contains_key(&format!("{VOTE_PREFIX}{voter}")))
    }

    async fn record_vote(&self, voter: &str, option: &str) -> Result<(), StoreError> {
        // One write lock spans check and insert, keeping dedup atomic.
        let mut entries = self.entries.write().await;
        let key = format!("{VOTE_PREFIX}{voter}");
        if entries.contains_key(&key) {
            return Err(StoreError::DuplicateVote);
        }
        entries.insert(key, option.to_string());
        Ok(())
    }

    async fn tally(&self, options: &[String]) -> Result<HashMap<String, i64>, StoreError> {
        let entries = self.entries.read().await;
        let mut counts: HashMap<String, i64> =
            options.iter().map(|option| (option.clone(), 0)).collect();
        for (key, option) in entries.range(VOTE_PREFIX.to_string()..) {
            if !key.starts_with(VOTE_PREFIX) {
                break;
            }
            if let Some(count) = counts.get_mut(option.as_str()) {
                *count += 1;
            }
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(question_hash: &str, options_hash: &str) -> PollMetadata {
        PollMetadata {
            question_hash: question_hash.to_string(),
            options_hash: options_hash.to_string(),
        }
    }

    fn options(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn metadata_is_absent_until_first_reset() {
        let store = MemoryPollStore::new();
        assert_eq!(store.read_metadata().await.unwrap(), None);

        store.reset_for(&meta("q1", "o1")).await.unwrap();
        assert_eq!(store.read_metadata().await.unwrap(), Some(meta("q1", "o1")));
    }

    #[tokio::test]
    async fn reset_clears_votes_and_is_idempotent() {
        let store = MemoryPollStore::new();
        store.reset_for(&meta("q1", "o1")).await.unwrap();
        store.record_vote("v1", "Red").await.unwrap();
        store.record_vote("v2", "Blue").await.unwrap();

        store.reset_for(&meta("q2", "o2")).await.unwrap();
        store.reset_for(&meta("q2", "o2")).await.unwrap();

        assert_eq!(store.read_metadata().await.unwrap(), Some(meta("q2", "o2")));
        assert!(!store.has_voted("v1").await.unwrap());
        let counts = store.tally(&options(&["Red", "Blue"])).await.unwrap();
        assert_eq!(counts["Red"], 0);
        assert_eq!(counts["Blue"], 0);
    }

    #[tokio::test]
    async fn second_vote_for_same_fingerprint_is_rejected() {
        let store = MemoryPollStore::new();
        store.record_vote("v1", "Red").await.unwrap();

        let err = store.record_vote("v1", "Blue").await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateVote));

        // The first vote is untouched.
        let counts = store.tally(&options(&["Red", "Blue"])).await.unwrap();
        assert_eq!(counts["Red"], 1);
        assert_eq!(counts["Blue"], 0);
    }

    #[tokio::test]
    async fn tally_zero_fills_and_ignores_stale_options() {
        let store = MemoryPollStore::new();
        store.record_vote("v1", "Red").await.unwrap();
        store.record_vote("v2", "Red").await.unwrap();
        store.record_vote("v3", "Green").await.unwrap();

        // "Green" is no longer on the ballot; it must not appear or count.
        let counts = store.tally(&options(&["Red", "Blue"])).await.unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["Red"], 2);
        assert_eq!(counts["Blue"], 0);
    }

    #[tokio::test]
    async fn has_voted_tracks_recorded_fingerprints() {
        let store = MemoryPollStore::new();
        assert!(!store.has_voted("v1").await.unwrap());
        store.record_vote("v1", "Red").await.unwrap();
        assert!(store.has_voted("v1").await.unwrap());
        assert!(!store.has_voted("v2").await.unwrap());
    }
}
