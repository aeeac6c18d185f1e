//! Error types
//!
//! Engine-facing errors plus the unified API error every endpoint returns.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Failures when producing a quote
#[derive(Debug, Error)]
pub enum PricingError {
    /// No rate table exists for the company
    #[error("Pricing not configured for company {company_id}")]
    NotConfigured { company_id: Uuid },

    #[error("Job {job_id} not found")]
    JobNotFound { job_id: Uuid },
}

/// Rejected writes to a rate table or price override
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    #[error("{field} must be greater than zero")]
    NonPositiveMultiplier { field: &'static str },

    #[error("Low estimate multiplier ({low}) must be less than high estimate multiplier ({high})")]
    MultiplierOrder { low: Decimal, high: Decimal },

    #[error("Custom prices must not be negative")]
    NegativePrice,

    #[error("Custom low price ({low}) must not exceed custom high price ({high})")]
    OverrideOrder { low: i64, high: i64 },
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::Pricing(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) | Self::Pricing(PricingError::JobNotFound { .. }) => "NOT_FOUND",
            Self::Pricing(PricingError::NotConfigured { .. }) => "PRICING_NOT_CONFIGURED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::NotFound(msg) => msg.clone(),
            Self::Pricing(PricingError::NotConfigured { .. }) => {
                "Pricing not configured for this company".to_string()
            }
            Self::Pricing(PricingError::JobNotFound { .. }) => "Job not found".to_string(),
            Self::Validation(e) => e.to_string(),
            // Don't leak internal error details
            Self::Internal(_) => "An internal error occurred".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = ?e, "Internal server error");
            }
            Self::Pricing(e @ PricingError::NotConfigured { .. }) => {
                tracing::warn!(error = %e, "Quote requested without a rate table");
            }
            _ => {
                tracing::warn!(error = %self, "API error");
            }
        }

        let status = self.status_code();
        let body = ErrorResponse {
            code: self.error_code().to_string(),
            message: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
