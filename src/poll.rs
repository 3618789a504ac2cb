// src/poll.rs
use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::AppError;
use crate::fingerprint::fingerprint;
use crate::models::{Poll, PollMetadata};
use crate::source::{parse_options, PollSource};
use crate::store::PollStore;

/// Fetches the current poll content from the source host. An option list
/// that is empty after blank-line filtering is rejected here, before any
/// storage interaction.
pub async fn load_poll(source: &dyn PollSource) -> Result<Poll, AppError> {
    let question = source.fetch_question().await?;
    let raw_options = source.fetch_options().await?;
    let options = parse_options(&raw_options);
    if options.is_empty() {
        return Err(AppError::EmptyOptions);
    }
    Ok(Poll { question, options })
}

/// The metadata record identifying `poll`'s content.
pub fn metadata_for(poll: &Poll) -> PollMetadata {
    PollMetadata {
        question_hash: fingerprint(&poll.question),
        options_hash: fingerprint(&poll.options.join("\n")),
    }
}

/// Compares the freshly fetched poll against the stored metadata and clears
/// the vote ledger when the content changed or no poll was ever initialized.
/// Runs once per request, before any routing decision.
pub async fn sync_poll(store: &dyn PollStore, poll: &Poll) -> Result<(), AppError> {
    let current = metadata_for(poll);
    let stored = store.read_metadata().await?;
    if stored.as_ref() != Some(&current) {
        info!(
            question_hash = %current.question_hash,
            options_hash = %current.options_hash,
            "poll content changed, resetting vote ledger"
        );
        store.reset_for(&current).await?;
    }
    Ok(())
}

/// Validates and commits a single vote, then returns the tally over
/// `current_options`. A committed insert is never rolled back if the tally
/// read fails afterwards.
pub async fn submit_vote(
    store: &dyn PollStore,
    voter: &str,
    option: &str,
    current_options: &[String],
) -> Result<HashMap<String, i64>, AppError> {
    if voter.is_empty() || option.is_empty() || !current_options.iter().any(|o| o == option) {
        return Err(AppError::InvalidVote);
    }

    if store.has_voted(voter).await? {
        return Err(AppError::DuplicateVote);
    }
    // The store's own uniqueness guarantee backstops the check above when
    // two submissions for one voter race past it.
    store.record_vote(voter, option).await?;
    debug!(voter, option, "vote recorded");

    Ok(store.tally(current_options).await?)
}
