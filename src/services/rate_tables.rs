//! Company rate table store
//!
//! Tables are held as `Arc` snapshots. A write validates, then swaps the
//! whole snapshot, so a quote that already took one keeps reading it.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::{RateTable, UpdateRateTableRequest};
use crate::error::{PricingError, ValidationError};

#[derive(Clone, Default)]
pub struct RateTableStore {
    inner: Arc<RwLock<HashMap<Uuid, Arc<RateTable>>>>,
}

impl RateTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot for a company, if it has one.
    pub fn get(&self, company_id: Uuid) -> Option<Arc<RateTable>> {
        self.inner.read().get(&company_id).cloned()
    }

    /// Snapshot for pricing. A company without a table is a configuration
    /// error; there is no fallback to defaults.
    pub fn snapshot(&self, company_id: Uuid) -> Result<Arc<RateTable>, PricingError> {
        self.get(company_id)
            .ok_or(PricingError::NotConfigured { company_id })
    }

    /// Create the onboarding defaults unless the company already has a table.
    #[instrument(skip(self))]
    pub fn provision_defaults(&self, company_id: Uuid) -> Arc<RateTable> {
        let mut tables = self.inner.write();
        tables
            .entry(company_id)
            .or_insert_with(|| {
                info!(%company_id, "Provisioned default rate table");
                Arc::new(RateTable::with_defaults(company_id))
            })
            .clone()
    }

    /// Apply a partial edit. Creates the table from defaults first if the
    /// company has none. A rejected edit leaves the stored table unchanged.
    #[instrument(skip(self, update))]
    pub fn update(
        &self,
        company_id: Uuid,
        update: &UpdateRateTableRequest,
    ) -> Result<Arc<RateTable>, ValidationError> {
        let mut tables = self.inner.write();
        let next = match tables.get(&company_id) {
            Some(current) => update.apply_to(current),
            None => update.apply_to(&RateTable::with_defaults(company_id)),
        };

        match next {
            Ok(table) => {
                let table = Arc::new(table);
                tables.insert(company_id, table.clone());
                info!(%company_id, "Rate table updated");
                Ok(table)
            }
            Err(e) => {
                warn!(%company_id, error = %e, "Rejected rate table update");
                Err(e)
            }
        }
    }
}
