//! Removal job records
//!
//! What the survey flow leaves behind for pricing: rooms, two access
//! profiles, the two addresses and a few customer choices.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use super::access::AccessProfile;
use super::inventory::Room;
use super::quote::{ComputedTotals, PriceOverride};

/// Geocoded address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Location {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

impl Location {
    pub fn at(lat: f64, lng: f64) -> Self {
        Self {
            label: None,
            lat: Some(lat),
            lng: Some(lng),
        }
    }
}

/// Request DTO carrying a job's survey data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobSnapshot {
    #[serde(default)]
    pub pickup: Option<Location>,
    #[serde(default)]
    pub dropoff: Option<Location>,
    #[serde(default)]
    pub pickup_access: Option<AccessProfile>,
    #[serde(default)]
    pub dropoff_access: Option<AccessProfile>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub customer_provides_packing: bool,
    /// Rooms the customer wants packed for them
    #[serde(default)]
    pub packing_service_rooms: BTreeSet<Uuid>,
    /// Set only through the price-override endpoint; ignored in survey uploads
    #[serde(default, skip_deserializing)]
    pub price_override: Option<PriceOverride>,
}

impl JobSnapshot {
    pub fn quote_request(&self) -> QuoteRequest<'_> {
        QuoteRequest {
            rooms: &self.rooms,
            pickup: self.pickup.as_ref(),
            dropoff: self.dropoff.as_ref(),
            pickup_access: self.pickup_access.as_ref(),
            dropoff_access: self.dropoff_access.as_ref(),
            customer_provides_packing: self.customer_provides_packing,
            packing_service_rooms: &self.packing_service_rooms,
            price_override: self.price_override,
        }
    }
}

/// Job entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub company_id: Uuid,
    #[serde(flatten)]
    pub survey: JobSnapshot,
    /// Cached from the last quote
    pub total_cbm: Decimal,
    /// Cached from the last quote
    pub total_weight_kg: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn new(id: Uuid, company_id: Uuid, survey: JobSnapshot) -> Self {
        let now = Utc::now();
        Self {
            id,
            company_id,
            survey,
            total_cbm: Decimal::ZERO,
            total_weight_kg: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn quote_request(&self) -> QuoteRequest<'_> {
        self.survey.quote_request()
    }

    /// Refresh the cached totals. Returns false when they already matched.
    pub fn apply_computed_totals(&mut self, totals: &ComputedTotals) -> bool {
        if self.total_cbm == totals.total_cbm && self.total_weight_kg == totals.total_weight_kg {
            return false;
        }
        self.total_cbm = totals.total_cbm;
        self.total_weight_kg = totals.total_weight_kg;
        self.updated_at = Utc::now();
        true
    }
}

/// Everything the quote engine reads from a job, borrowed
#[derive(Debug, Clone, Copy)]
pub struct QuoteRequest<'a> {
    pub rooms: &'a [Room],
    pub pickup: Option<&'a Location>,
    pub dropoff: Option<&'a Location>,
    pub pickup_access: Option<&'a AccessProfile>,
    pub dropoff_access: Option<&'a AccessProfile>,
    pub customer_provides_packing: bool,
    pub packing_service_rooms: &'a BTreeSet<Uuid>,
    pub price_override: Option<PriceOverride>,
}
