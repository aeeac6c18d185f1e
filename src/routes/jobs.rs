//! Job record endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{DataResponse, NoContent};
use crate::app::AppState;
use crate::domain::{Job, JobSnapshot, PriceOverride};
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct SetPriceOverrideRequest {
    pub low: i64,
    pub high: i64,
}

/// Store the survey data for a job, replacing what was there
pub async fn upsert_job(
    State(state): State<Arc<AppState>>,
    Path((company_id, job_id)): Path<(Uuid, Uuid)>,
    Json(survey): Json<JobSnapshot>,
) -> DataResponse<Job> {
    DataResponse::new(state.jobs.upsert(company_id, job_id, survey))
}

pub async fn get_job(
    State(state): State<Arc<AppState>>,
    Path((company_id, job_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<DataResponse<Job>> {
    let job = state
        .jobs
        .get(company_id, job_id)
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    Ok(DataResponse::new(job))
}

/// Set a custom price range that replaces the computed estimate
pub async fn set_price_override(
    State(state): State<Arc<AppState>>,
    Path((company_id, job_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<SetPriceOverrideRequest>,
) -> ApiResult<DataResponse<Job>> {
    let price = PriceOverride::new(req.low, req.high)?;
    let job = state
        .jobs
        .set_override(company_id, job_id, Some(price))
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    Ok(DataResponse::new(job))
}

pub async fn clear_price_override(
    State(state): State<Arc<AppState>>,
    Path((company_id, job_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<NoContent> {
    state
        .jobs
        .set_override(company_id, job_id, None)
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    Ok(NoContent)
}
