//! Quote endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::DataResponse;
use crate::app::AppState;
use crate::domain::{JobSnapshot, QuoteResult};
use crate::error::ApiResult;

/// Booking deposit taken from the low end of the shown estimate
#[derive(Debug, Serialize)]
pub struct DepositSummary {
    pub deposit: i64,
    pub balance_due: i64,
}

/// Quote as returned to clients
#[derive(Debug, Serialize)]
pub struct QuoteView {
    #[serde(flatten)]
    pub quote: QuoteResult,
    pub deposit: DepositSummary,
}

impl From<QuoteResult> for QuoteView {
    fn from(quote: QuoteResult) -> Self {
        let (deposit, balance_due) = quote.deposit();
        Self {
            quote,
            deposit: DepositSummary {
                deposit,
                balance_due,
            },
        }
    }
}

/// Price a stored job and refresh its cached totals
pub async fn get_job_quote(
    State(state): State<Arc<AppState>>,
    Path((company_id, job_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<DataResponse<QuoteView>> {
    let quote = state.quotes.quote_job(company_id, job_id)?;
    Ok(DataResponse::new(quote.into()))
}

/// Price survey data without storing anything
pub async fn preview_quote(
    State(state): State<Arc<AppState>>,
    Path(company_id): Path<Uuid>,
    Json(survey): Json<JobSnapshot>,
) -> ApiResult<DataResponse<QuoteView>> {
    let quote = state.quotes.preview(company_id, &survey)?;
    Ok(DataResponse::new(quote.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::services::{JobStore, RateTableStore};
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use serde_json::Value;

    fn configured_state() -> (Arc<AppState>, Uuid) {
        let state = AppState::new(Settings::for_tests(), RateTableStore::new(), JobStore::new());
        let company_id = Uuid::new_v4();
        state.rate_tables.provision_defaults(company_id);
        (state, company_id)
    }

    fn survey() -> JobSnapshot {
        serde_json::from_str(
            r#"{
                "rooms": [{
                    "id": "0b0f4f7e-8f4a-4c59-b1f6-3a1b4a3f2e10",
                    "name": "Kitchen",
                    "items": [
                        {"name": "Plates", "quantity": 30, "packing_requirement": "medium_box"},
                        {"name": "Fridge", "quantity": 1, "cbm": "1.2", "weight_kg": "70"}
                    ]
                }],
                "pickup_access": {"floors": 2, "has_lift": false}
            }"#,
        )
        .expect("valid survey")
    }

    #[tokio::test]
    async fn preview_returns_breakdown_and_deposit() {
        let (state, company_id) = configured_state();

        let response = preview_quote(State(state.clone()), Path(company_id), Json(survey()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        let payload: Value = serde_json::from_slice(&body).expect("json payload");
        let data = &payload["data"];

        assert_eq!(data["total_items"], 31);
        assert_eq!(data["bulky_items"], 1);
        assert_eq!(data["packing_breakdown"]["medium_boxes"]["qty"], "2");
        assert!(data["access_breakdown"]["pickup"]["total"].is_string());

        let low = data["estimate"]["low"].as_i64().expect("low estimate");
        let deposit = data["deposit"]["deposit"].as_i64().expect("deposit");
        let balance = data["deposit"]["balance_due"].as_i64().expect("balance");
        assert_eq!(deposit + balance, low);
    }

    #[tokio::test]
    async fn preview_needs_a_rate_table() {
        let state = AppState::new(Settings::for_tests(), RateTableStore::new(), JobStore::new());

        let response = preview_quote(State(state), Path(Uuid::new_v4()), Json(survey()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_job_is_404() {
        let (state, company_id) = configured_state();

        let response = get_job_quote(State(state), Path((company_id, Uuid::new_v4())))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), 1024).await.expect("read body");
        let payload: Value = serde_json::from_slice(&body).expect("json payload");
        assert_eq!(payload["code"], "NOT_FOUND");
    }
}
