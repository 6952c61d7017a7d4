use std::sync::mpsc;

use crate::pkg::internal::adaptors::jobs::mutators::{CreateJobInput, JobMutator};
use crate::pkg::internal::adaptors::jobs::selectors::JobSelector;
use crate::pkg::internal::adaptors::jobs::spec::StoredJob;
use crate::pkg::internal::store::{StorageEvent, JOB_DRAFTS_KEY};
use crate::pkg::ui::state::AppState;
use crate::prelude::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobModal {
    Create,
    Edit(String),
}

/// Admin view over both job lists. Mutations go through the job mutator
/// and the lists are re-read afterwards; writes from elsewhere arrive via
/// the storage watcher.
pub struct AdminDashboard {
    state: AppState,
    drafts: Vec<StoredJob>,
    active: Vec<StoredJob>,
    modal: Option<JobModal>,
    notice: Option<String>,
    storage_events: mpsc::Receiver<StorageEvent>,
}

impl AdminDashboard {
    pub fn new(state: AppState) -> AdminDashboard {
        let storage_events = state.store.watch();
        let mut dashboard = AdminDashboard {
            state,
            drafts: Vec::new(),
            active: Vec::new(),
            modal: None,
            notice: None,
            storage_events,
        };
        dashboard.refresh();
        dashboard
    }

    pub fn refresh(&mut self) {
        let selector = JobSelector::new(&self.state.store);
        self.drafts = selector.drafts();
        self.active = selector.active();
    }

    pub fn pump_events(&mut self) {
        let mut dirty = false;
        while let Ok(event) = self.storage_events.try_recv() {
            if event.key == JOB_DRAFTS_KEY {
                dirty = true;
            }
        }
        if dirty {
            self.refresh();
        }
    }

    pub fn drafts(&self) -> &[StoredJob] {
        &self.drafts
    }

    pub fn active(&self) -> &[StoredJob] {
        &self.active
    }

    pub fn modal(&self) -> Option<&JobModal> {
        self.modal.as_ref()
    }

    pub fn open_create(&mut self) {
        self.modal = Some(JobModal::Create);
    }

    pub fn open_edit(&mut self, id: &str) {
        self.modal = Some(JobModal::Edit(id.to_string()));
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    pub fn create_job(&mut self, input: CreateJobInput) -> Result<StoredJob> {
        let job = JobMutator::new(&self.state.store).create(input)?;
        self.modal = None;
        self.notice = Some(format!("Job \"{}\" saved", job.form_values.display_name()));
        self.refresh();
        Ok(job)
    }

    pub fn update_job(&mut self, id: &str, input: CreateJobInput) -> Result<Option<StoredJob>> {
        let job = JobMutator::new(&self.state.store).update(id, input)?;
        if let Some(job) = &job {
            self.modal = None;
            self.notice = Some(format!("Job \"{}\" saved", job.form_values.display_name()));
        }
        self.refresh();
        Ok(job)
    }

    pub fn publish(&mut self, id: &str) -> Result<Option<StoredJob>> {
        let job = JobMutator::new(&self.state.store).publish(id)?;
        if let Some(job) = &job {
            self.notice = Some(format!(
                "Job \"{}\" published",
                job.form_values.display_name()
            ));
        }
        self.refresh();
        Ok(job)
    }

    pub fn delete_job(&mut self, id: &str) -> Result<bool> {
        let removed = JobMutator::new(&self.state.store).delete(id)?;
        if removed {
            self.notice = Some("Job deleted".into());
        }
        self.refresh();
        Ok(removed)
    }
}

/// What applicants see: active postings only.
pub struct UserDashboard {
    state: AppState,
    jobs: Vec<StoredJob>,
    selected: Option<String>,
    storage_events: mpsc::Receiver<StorageEvent>,
}

impl UserDashboard {
    pub fn new(state: AppState) -> UserDashboard {
        let storage_events = state.store.watch();
        let mut dashboard = UserDashboard {
            state,
            jobs: Vec::new(),
            selected: None,
            storage_events,
        };
        dashboard.refresh();
        dashboard
    }

    pub fn refresh(&mut self) {
        self.jobs = JobSelector::new(&self.state.store).active();
        if let Some(selected) = &self.selected {
            if !self.jobs.iter().any(|job| job.id == *selected) {
                self.selected = None;
            }
        }
    }

    pub fn pump_events(&mut self) {
        let mut dirty = false;
        while let Ok(event) = self.storage_events.try_recv() {
            if event.key == JOB_DRAFTS_KEY {
                dirty = true;
            }
        }
        if dirty {
            self.refresh();
        }
    }

    pub fn jobs(&self) -> &[StoredJob] {
        &self.jobs
    }

    pub fn select(&mut self, id: &str) -> bool {
        if self.jobs.iter().any(|job| job.id == id) {
            self.selected = Some(id.to_string());
            return true;
        }
        false
    }

    pub fn selected_job(&self) -> Option<&StoredJob> {
        let selected = self.selected.as_deref()?;
        self.jobs.iter().find(|job| job.id == selected)
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::pkg::internal::adaptors::jobs::spec::{
        default_profile_fields, JobFormValues, JobStatus,
    };
    use crate::prelude::Result;

    fn input(name: &str, status: JobStatus) -> CreateJobInput {
        CreateJobInput {
            form_values: JobFormValues {
                name: Some(name.into()),
                ..JobFormValues::default()
            },
            profile_fields: default_profile_fields(),
            status,
        }
    }

    #[test]
    #[traced_test]
    fn test_published_job_reaches_user_dashboard() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let state = AppState::open(dir.path())?;
        let mut admin = AdminDashboard::new(state.clone());
        let mut user = UserDashboard::new(state);

        let job = admin.create_job(input("Backend Engineer", JobStatus::Active))?;
        user.pump_events();
        assert_eq!(user.jobs().len(), 1);
        assert_eq!(user.jobs()[0].id, job.id);

        admin.delete_job(&job.id)?;
        user.pump_events();
        assert!(user.jobs().is_empty());
        assert!(admin.drafts().is_empty());
        assert!(admin.active().is_empty());
        Ok(())
    }

    #[test]
    #[traced_test]
    fn test_drafts_stay_off_the_user_dashboard() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let state = AppState::open(dir.path())?;
        let mut admin = AdminDashboard::new(state.clone());
        let mut user = UserDashboard::new(state);

        let job = admin.create_job(input("Product Designer", JobStatus::Draft))?;
        user.pump_events();
        assert!(user.jobs().is_empty());
        assert_eq!(admin.drafts().len(), 1);

        admin.publish(&job.id)?;
        user.pump_events();
        assert_eq!(user.jobs().len(), 1);
        assert!(admin.drafts().is_empty());
        assert_eq!(admin.active().len(), 1);
        Ok(())
    }

    #[test]
    #[traced_test]
    fn test_modal_and_notice_lifecycle() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let state = AppState::open(dir.path())?;
        let mut admin = AdminDashboard::new(state);

        admin.open_create();
        assert_eq!(admin.modal(), Some(&JobModal::Create));
        let job = admin.create_job(input("Backend Engineer", JobStatus::Draft))?;
        assert_eq!(admin.modal(), None);
        assert_eq!(
            admin.take_notice().as_deref(),
            Some("Job \"Backend Engineer\" saved")
        );
        assert_eq!(admin.take_notice(), None);

        admin.open_edit(&job.id);
        assert_eq!(admin.modal(), Some(&JobModal::Edit(job.id.clone())));
        admin.close_modal();
        assert_eq!(admin.modal(), None);
        Ok(())
    }

    #[test]
    #[traced_test]
    fn test_selection_follows_the_active_list() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let state = AppState::open(dir.path())?;
        let mut admin = AdminDashboard::new(state.clone());
        let mut user = UserDashboard::new(state);

        let job = admin.create_job(input("Backend Engineer", JobStatus::Active))?;
        user.pump_events();
        assert!(user.select(&job.id));
        assert_eq!(user.selected_job().unwrap().id, job.id);

        admin.delete_job(&job.id)?;
        user.pump_events();
        assert!(user.selected_job().is_none());
        assert!(!user.select(&job.id));
        Ok(())
    }
}
