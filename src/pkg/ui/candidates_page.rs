use std::sync::mpsc;

use crate::pkg::internal::adaptors::candidates::selectors::CandidateSelector;
use crate::pkg::internal::adaptors::jobs::selectors::JobSelector;
use crate::pkg::internal::adaptors::jobs::spec::StoredJob;
use crate::pkg::internal::events::CandidatesUpdated;
use crate::pkg::internal::store::{StorageEvent, JOB_CANDIDATES_KEY};
use crate::pkg::ui::state::AppState;
use crate::pkg::ui::table::{columns_for_job, CandidatesTable};

/// Per-job candidates view. Listens on both signal paths: the storage
/// watcher for writes from other contexts and the candidates bus for
/// writes in this one.
pub struct CandidatesPage {
    state: AppState,
    job: StoredJob,
    table: CandidatesTable,
    storage_events: mpsc::Receiver<StorageEvent>,
    candidate_events: mpsc::Receiver<CandidatesUpdated>,
}

impl CandidatesPage {
    /// `None` sends the caller back to the admin job list.
    pub fn open(state: AppState, job_id: &str) -> Option<CandidatesPage> {
        let Some(job) = JobSelector::new(&state.store).get_by_id(job_id) else {
            tracing::warn!("candidates page opened for unknown job {}", job_id);
            return None;
        };
        let candidates = CandidateSelector::new(&state.store).for_job(job_id);
        let table = CandidatesTable::new(job_id, columns_for_job(&job), candidates);
        let storage_events = state.store.watch();
        let candidate_events = state.events.subscribe();
        Some(CandidatesPage {
            state,
            job,
            table,
            storage_events,
            candidate_events,
        })
    }

    pub fn job(&self) -> &StoredJob {
        &self.job
    }

    pub fn table(&self) -> &CandidatesTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut CandidatesTable {
        &mut self.table
    }

    pub fn refresh(&mut self) {
        let candidates = CandidateSelector::new(&self.state.store).for_job(&self.job.id);
        self.table.set_candidates(candidates);
    }

    pub fn pump_events(&mut self) {
        let mut dirty = false;
        while let Ok(event) = self.storage_events.try_recv() {
            if event.key == JOB_CANDIDATES_KEY {
                dirty = true;
            }
        }
        while let Ok(event) = self.candidate_events.try_recv() {
            match &event.job_id {
                Some(id) if *id != self.job.id => {}
                _ => dirty = true,
            }
        }
        if dirty {
            self.refresh();
        }
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::pkg::internal::adaptors::candidates::mutators::CandidateMutator;
    use crate::pkg::internal::adaptors::candidates::spec::StoredCandidate;
    use crate::pkg::internal::adaptors::jobs::mutators::{CreateJobInput, JobMutator};
    use crate::pkg::internal::adaptors::jobs::spec::{
        default_profile_fields, JobFormValues, JobStatus,
    };
    use crate::prelude::Result;

    fn seed_job(state: &AppState, name: &str) -> Result<StoredJob> {
        JobMutator::new(&state.store).create(CreateJobInput {
            form_values: JobFormValues {
                name: Some(name.into()),
                ..JobFormValues::default()
            },
            profile_fields: default_profile_fields(),
            status: JobStatus::Active,
        })
    }

    fn candidate(job_id: &str, n: usize) -> StoredCandidate {
        StoredCandidate {
            id: format!("cand_20250105_{:04}", n),
            job_id: job_id.into(),
            submitted_at: "2025-01-05T08:00:00+00:00".into(),
            attributes: Vec::new(),
        }
    }

    #[test]
    #[traced_test]
    fn test_unknown_job_redirects() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let state = AppState::open(dir.path())?;
        assert!(CandidatesPage::open(state, "job_20990101_1").is_none());
        Ok(())
    }

    #[test]
    #[traced_test]
    fn test_storage_event_refreshes_snapshot() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let state = AppState::open(dir.path())?;
        let job = seed_job(&state, "Backend Engineer")?;
        let mut page = CandidatesPage::open(state.clone(), &job.id).unwrap();
        assert_eq!(page.table().candidate_count(), 0);

        CandidateMutator::new(&state.store).append(candidate(&job.id, 1))?;
        page.pump_events();
        assert_eq!(page.table().candidate_count(), 1);
        Ok(())
    }

    #[test]
    #[traced_test]
    fn test_bus_event_for_other_jobs_is_ignored() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let state = AppState::open(dir.path())?;
        let job = seed_job(&state, "Backend Engineer")?;
        let mut page = CandidatesPage::open(state.clone(), &job.id).unwrap();

        state.events.emit(CandidatesUpdated {
            job_id: Some("job_20990101_1".into()),
        });
        page.pump_events();
        assert_eq!(page.table().candidate_count(), 0);

        state.events.emit(CandidatesUpdated {
            job_id: Some(job.id.clone()),
        });
        page.pump_events();
        assert_eq!(page.table().candidate_count(), 0);
        Ok(())
    }

    #[test]
    #[traced_test]
    fn test_columns_follow_profile_fields() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let state = AppState::open(dir.path())?;
        let job = seed_job(&state, "Backend Engineer")?;
        let page = CandidatesPage::open(state, &job.id).unwrap();
        let order = page.table().column_order();
        assert_eq!(order.first().map(String::as_str), Some("fullName"));
        assert_eq!(order.last().map(String::as_str), Some("submittedAt"));
        // fields switched off do not become columns
        assert!(!order.iter().any(|key| key == "linkedin"));
        Ok(())
    }
}
