//! In-process job store
//!
//! Each job sits behind its own mutex so a quote can refresh the cached
//! totals without racing a concurrent edit of the same job.

use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::domain::{Job, JobSnapshot, PriceOverride};

type JobKey = (Uuid, Uuid);

#[derive(Clone, Default)]
pub struct JobStore {
    inner: Arc<RwLock<HashMap<JobKey, Arc<Mutex<Job>>>>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lockable handle to a job. Jobs are only visible to their own company.
    pub fn handle(&self, company_id: Uuid, job_id: Uuid) -> Option<Arc<Mutex<Job>>> {
        self.inner.read().get(&(company_id, job_id)).cloned()
    }

    pub fn get(&self, company_id: Uuid, job_id: Uuid) -> Option<Job> {
        self.handle(company_id, job_id).map(|job| job.lock().clone())
    }

    /// Replace the survey data of a job, creating it if needed. Cached
    /// totals are kept until the next quote refreshes them, and an admin
    /// price override survives a re-upload.
    pub fn upsert(&self, company_id: Uuid, job_id: Uuid, survey: JobSnapshot) -> Job {
        if let Some(handle) = self.handle(company_id, job_id) {
            let mut job = handle.lock();
            replace_survey(&mut job, survey);
            info!(%company_id, %job_id, rooms = job.survey.rooms.len(), "Job updated");
            return job.clone();
        }

        let mut jobs = self.inner.write();
        // Another writer may have created it between the two locks
        let handle = jobs
            .entry((company_id, job_id))
            .or_insert_with(|| {
                Arc::new(Mutex::new(Job::new(
                    job_id,
                    company_id,
                    JobSnapshot::default(),
                )))
            })
            .clone();
        drop(jobs);

        let mut job = handle.lock();
        replace_survey(&mut job, survey);
        info!(%company_id, %job_id, rooms = job.survey.rooms.len(), "Job created");
        job.clone()
    }

    /// Set or clear the admin price override. `None` when the job is unknown.
    pub fn set_override(
        &self,
        company_id: Uuid,
        job_id: Uuid,
        price_override: Option<PriceOverride>,
    ) -> Option<Job> {
        let handle = self.handle(company_id, job_id)?;
        let mut job = handle.lock();
        job.survey.price_override = price_override;
        job.updated_at = Utc::now();

        match price_override {
            Some(p) => info!(%company_id, %job_id, low = p.low, high = p.high, "Price override set"),
            None => info!(%company_id, %job_id, "Price override cleared"),
        }
        Some(job.clone())
    }
}

fn replace_survey(job: &mut Job, survey: JobSnapshot) {
    let price_override = job.survey.price_override;
    job.survey = JobSnapshot {
        price_override,
        ..survey
    };
    job.updated_at = Utc::now();
}
