use chrono::Utc;

use crate::pkg::internal::adaptors::jobs::selectors::parse_all_jobs;
use crate::pkg::internal::adaptors::jobs::spec::{
    next_job_id, JobFormValues, JobStatus, ProfileField, StoredJob,
};
use crate::pkg::internal::store::{LocalStore, JOB_DRAFTS_KEY};
use crate::prelude::Result;

pub struct CreateJobInput {
    pub form_values: JobFormValues,
    pub profile_fields: Vec<ProfileField>,
    pub status: JobStatus,
}

pub struct JobMutator<'a> {
    store: &'a LocalStore,
}

impl<'a> JobMutator<'a> {
    pub fn new(store: &'a LocalStore) -> Self {
        JobMutator { store }
    }

    fn read(&self) -> Vec<StoredJob> {
        parse_all_jobs(self.store.get_item(JOB_DRAFTS_KEY).as_deref())
    }

    fn write(&self, jobs: &[StoredJob]) -> Result<()> {
        self.store
            .set_item(JOB_DRAFTS_KEY, &serde_json::to_string(jobs)?)
    }

    pub fn create(&self, input: CreateJobInput) -> Result<StoredJob> {
        let now = Utc::now();
        let job = StoredJob {
            id: next_job_id(&self.read(), now),
            status: input.status,
            saved_at: now.to_rfc3339(),
            published_at: (input.status == JobStatus::Active).then(|| now.to_rfc3339()),
            form_values: input.form_values,
            profile_fields: input.profile_fields,
        };
        self.save(job.clone())?;
        Ok(job)
    }

    pub fn update(&self, id: &str, input: CreateJobInput) -> Result<Option<StoredJob>> {
        let jobs = self.read();
        let Some(existing) = jobs.iter().find(|job| job.id == id) else {
            return Ok(None);
        };
        let now = Utc::now();
        // publishedAt is stamped once, on the first transition to active
        let published_at = match (&existing.published_at, input.status) {
            (Some(ts), _) => Some(ts.clone()),
            (None, JobStatus::Active) => Some(now.to_rfc3339()),
            (None, JobStatus::Draft) => None,
        };
        let job = StoredJob {
            id: id.to_string(),
            status: input.status,
            saved_at: now.to_rfc3339(),
            published_at,
            form_values: input.form_values,
            profile_fields: input.profile_fields,
        };
        self.save(job.clone())?;
        Ok(Some(job))
    }

    /// Upsert: any entry with the same id is removed before the record is
    /// prepended, then the whole collection is rewritten.
    pub fn save(&self, job: StoredJob) -> Result<Vec<StoredJob>> {
        let mut jobs = self.read();
        jobs.retain(|existing| existing.id != job.id);
        jobs.insert(0, job);
        self.write(&jobs)?;
        Ok(jobs)
    }

    pub fn publish(&self, id: &str) -> Result<Option<StoredJob>> {
        let Some(mut job) = self.read().into_iter().find(|job| job.id == id) else {
            return Ok(None);
        };
        let now = Utc::now();
        job.status = JobStatus::Active;
        if job.published_at.is_none() {
            job.published_at = Some(now.to_rfc3339());
        }
        job.saved_at = now.to_rfc3339();
        self.save(job.clone())?;
        Ok(Some(job))
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut jobs = self.read();
        let before = jobs.len();
        jobs.retain(|job| job.id != id);
        let removed = jobs.len() < before;
        if removed {
            self.write(&jobs)?;
        }
        Ok(removed)
    }
}
