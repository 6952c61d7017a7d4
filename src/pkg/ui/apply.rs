use std::collections::HashMap;

use chrono::Utc;

use crate::pkg::internal::adaptors::candidates::mutators::CandidateMutator;
use crate::pkg::internal::adaptors::candidates::spec::{
    new_candidate_id, CandidateAttribute, StoredCandidate,
};
use crate::pkg::internal::adaptors::jobs::selectors::JobSelector;
use crate::pkg::internal::adaptors::jobs::spec::{Requirement, StoredJob};
use crate::pkg::internal::events::CandidatesUpdated;
use crate::pkg::ui::state::AppState;
use crate::prelude::Result;

/// Application form for one posting. Field keys follow the posting's
/// profile fields; validation is presence-only.
pub struct ApplyForm {
    state: AppState,
    job: StoredJob,
    values: HashMap<String, String>,
}

impl ApplyForm {
    pub fn open(state: AppState, job_id: &str) -> Option<ApplyForm> {
        let job = JobSelector::new(&state.store).get_by_id(job_id)?;
        Some(ApplyForm {
            state,
            job,
            values: HashMap::new(),
        })
    }

    pub fn job(&self) -> &StoredJob {
        &self.job
    }

    pub fn set_field(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    pub fn missing_mandatory(&self) -> Vec<&str> {
        self.job
            .profile_fields
            .iter()
            .filter(|field| field.requirement == Requirement::Mandatory)
            .filter(|field| {
                self.values
                    .get(&field.key)
                    .map(|value| value.trim().is_empty())
                    .unwrap_or(true)
            })
            .map(|field| field.key.as_str())
            .collect()
    }

    pub fn submit(&self) -> Result<StoredCandidate> {
        let missing = self.missing_mandatory();
        if !missing.is_empty() {
            anyhow::bail!("missing mandatory fields: {}", missing.join(", "));
        }
        let now = Utc::now();
        let attributes = self
            .job
            .profile_fields
            .iter()
            .filter(|field| field.requirement != Requirement::Off)
            .enumerate()
            .map(|(order, field)| CandidateAttribute {
                key: field.key.clone(),
                label: field.label.clone(),
                value: self.values.get(&field.key).cloned().unwrap_or_default(),
                order: order as i64,
            })
            .collect();
        let candidate = StoredCandidate {
            id: new_candidate_id(now),
            job_id: self.job.id.clone(),
            submitted_at: now.to_rfc3339(),
            attributes,
        };
        CandidateMutator::new(&self.state.store).append(candidate.clone())?;
        self.state.events.emit(CandidatesUpdated {
            job_id: Some(self.job.id.clone()),
        });
        Ok(candidate)
    }
}
