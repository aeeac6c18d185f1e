//! Service layer: tenant rate tables, job records and quote orchestration.

pub mod jobs;
pub mod quotes;
pub mod rate_tables;

pub use jobs::JobStore;
pub use quotes::QuoteService;
pub use rate_tables::RateTableStore;
