use serde_json::Value;

use crate::pkg::internal::adaptors::candidates::spec::StoredCandidate;
use crate::pkg::internal::store::{LocalStore, JOB_CANDIDATES_KEY};

/// Same defensive contract as the job collection: non-array input
/// degrades to empty, malformed entries are dropped, newest-first by
/// `submittedAt`.
pub fn parse_candidates_from_value(raw: Option<&str>) -> Vec<StoredCandidate> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(
                "stored candidate collection is not valid JSON, starting empty: {}",
                err
            );
            return Vec::new();
        }
    };
    let Value::Array(entries) = value else {
        tracing::warn!("stored candidate collection is not an array, starting empty");
        return Vec::new();
    };
    let mut candidates: Vec<StoredCandidate> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();
    candidates.sort_by(|a, b| b.submitted_timestamp().cmp(&a.submitted_timestamp()));
    candidates
}

pub struct CandidateSelector<'a> {
    store: &'a LocalStore,
}

impl<'a> CandidateSelector<'a> {
    pub fn new(store: &'a LocalStore) -> Self {
        CandidateSelector { store }
    }

    pub fn all(&self) -> Vec<StoredCandidate> {
        parse_candidates_from_value(self.store.get_item(JOB_CANDIDATES_KEY).as_deref())
    }

    /// Full-collection read filtered by job. The collection stays small
    /// enough that a linear scan is the whole story.
    pub fn for_job(&self, job_id: &str) -> Vec<StoredCandidate> {
        self.all()
            .into_iter()
            .filter(|candidate| candidate.job_id == job_id)
            .collect()
    }
}
