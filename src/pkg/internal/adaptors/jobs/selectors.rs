use serde_json::Value;

use crate::pkg::internal::adaptors::jobs::spec::{JobStatus, StoredJob};
use crate::pkg::internal::store::{LocalStore, JOB_DRAFTS_KEY};

/// Decodes the raw stored collection. Never fails outward: anything that
/// is not a JSON array degrades to empty, entries that do not look like a
/// job are dropped. Result is newest-first by `savedAt`.
pub fn parse_all_jobs(raw: Option<&str>) -> Vec<StoredJob> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!("stored job collection is not valid JSON, starting empty: {}", err);
            return Vec::new();
        }
    };
    let Value::Array(entries) = value else {
        tracing::warn!("stored job collection is not an array, starting empty");
        return Vec::new();
    };
    let mut jobs: Vec<StoredJob> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();
    jobs.sort_by(|a, b| b.saved_timestamp().cmp(&a.saved_timestamp()));
    jobs
}

pub fn parse_draft_jobs(raw: Option<&str>) -> Vec<StoredJob> {
    parse_all_jobs(raw)
        .into_iter()
        .filter(|job| job.status == JobStatus::Draft)
        .collect()
}

pub fn parse_active_jobs(raw: Option<&str>) -> Vec<StoredJob> {
    parse_all_jobs(raw)
        .into_iter()
        .filter(|job| job.status == JobStatus::Active)
        .collect()
}

pub struct JobSelector<'a> {
    store: &'a LocalStore,
}

impl<'a> JobSelector<'a> {
    pub fn new(store: &'a LocalStore) -> Self {
        JobSelector { store }
    }

    pub fn all(&self) -> Vec<StoredJob> {
        parse_all_jobs(self.store.get_item(JOB_DRAFTS_KEY).as_deref())
    }

    pub fn drafts(&self) -> Vec<StoredJob> {
        parse_draft_jobs(self.store.get_item(JOB_DRAFTS_KEY).as_deref())
    }

    pub fn active(&self) -> Vec<StoredJob> {
        parse_active_jobs(self.store.get_item(JOB_DRAFTS_KEY).as_deref())
    }

    pub fn get_by_id(&self, id: &str) -> Option<StoredJob> {
        self.all().into_iter().find(|job| job.id == id)
    }
}
