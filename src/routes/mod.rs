pub mod health;
pub mod jobs;
pub mod pricing;
pub mod quotes;

use axum::{routing::get, routing::post, routing::put, Router};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        // Rate tables
        .route(
            "/companies/:company_id/pricing",
            get(pricing::get_pricing).put(pricing::update_pricing),
        )
        .route(
            "/companies/:company_id/pricing/defaults",
            post(pricing::provision_default_pricing),
        )
        // Jobs
        .route(
            "/companies/:company_id/jobs/:job_id",
            get(jobs::get_job).put(jobs::upsert_job),
        )
        .route(
            "/companies/:company_id/jobs/:job_id/price-override",
            put(jobs::set_price_override).delete(jobs::clear_price_override),
        )
        // Quotes
        .route(
            "/companies/:company_id/jobs/:job_id/quote",
            get(quotes::get_job_quote),
        )
        .route(
            "/companies/:company_id/quotes/preview",
            post(quotes::preview_quote),
        )
}
