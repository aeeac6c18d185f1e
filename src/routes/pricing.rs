//! Company rate table endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::DataResponse;
use crate::app::AppState;
use crate::domain::{RateTable, UpdateRateTableRequest};
use crate::error::{ApiResult, PricingError};

/// Current rate table for a company
pub async fn get_pricing(
    State(state): State<Arc<AppState>>,
    Path(company_id): Path<Uuid>,
) -> ApiResult<DataResponse<RateTable>> {
    let table = state
        .rate_tables
        .get(company_id)
        .ok_or(PricingError::NotConfigured { company_id })?;

    Ok(DataResponse::new(table.as_ref().clone()))
}

/// Partial update; fields left out keep their current value
pub async fn update_pricing(
    State(state): State<Arc<AppState>>,
    Path(company_id): Path<Uuid>,
    Json(req): Json<UpdateRateTableRequest>,
) -> ApiResult<DataResponse<RateTable>> {
    let table = state.rate_tables.update(company_id, &req)?;
    Ok(DataResponse::new(table.as_ref().clone()))
}

/// Onboarding: give a company the default rate table. Existing tables are
/// returned untouched.
pub async fn provision_default_pricing(
    State(state): State<Arc<AppState>>,
    Path(company_id): Path<Uuid>,
) -> DataResponse<RateTable> {
    let table = state.rate_tables.provision_defaults(company_id);
    DataResponse::new(table.as_ref().clone())
}
