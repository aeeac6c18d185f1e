//! Quote orchestration
//!
//! Loads the records, runs the engine and writes the cached totals back.

use tracing::{info, instrument};
use uuid::Uuid;

use super::{JobStore, RateTableStore};
use crate::domain::{JobSnapshot, QuoteResult};
use crate::error::PricingError;
use crate::pricing::compute_quote;

#[derive(Clone)]
pub struct QuoteService {
    rate_tables: RateTableStore,
    jobs: JobStore,
}

impl QuoteService {
    pub fn new(rate_tables: RateTableStore, jobs: JobStore) -> Self {
        Self { rate_tables, jobs }
    }

    /// Quote a stored job and refresh its cached volume and weight.
    ///
    /// The rate table snapshot is taken before the job is locked. The
    /// totals write happens under the job's lock so it never interleaves
    /// with a concurrent edit.
    #[instrument(skip(self))]
    pub fn quote_job(&self, company_id: Uuid, job_id: Uuid) -> Result<QuoteResult, PricingError> {
        let rates = self.rate_tables.snapshot(company_id)?;
        let handle = self
            .jobs
            .handle(company_id, job_id)
            .ok_or(PricingError::JobNotFound { job_id })?;

        let mut job = handle.lock();
        let quote = compute_quote(&job.quote_request(), &rates);

        let totals = quote.computed_totals();
        if job.apply_computed_totals(&totals) {
            info!(
                %company_id,
                %job_id,
                total_cbm = %totals.total_cbm,
                total_weight_kg = %totals.total_weight_kg,
                "Cached job totals refreshed"
            );
        }

        Ok(quote)
    }

    /// Quote survey data that is not stored. Nothing is written.
    #[instrument(skip(self, survey))]
    pub fn preview(
        &self,
        company_id: Uuid,
        survey: &JobSnapshot,
    ) -> Result<QuoteResult, PricingError> {
        let rates = self.rate_tables.snapshot(company_id)?;
        Ok(compute_quote(&survey.quote_request(), &rates))
    }
}
