//! Quote result types
//!
//! A quote is recomputed on demand and never stored. Only the admin price
//! override and the cached totals live on the job.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::pricing::rules::DEPOSIT_RATE;

/// How much inventory data backs an estimate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Low/high price range in whole currency units
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceRange {
    pub low: i64,
    pub high: i64,
}

/// Admin-set price range that supersedes the computed one. Deserializing
/// goes through [`PriceOverride::new`], so a stored override is always valid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "PriceRange")]
pub struct PriceOverride {
    pub low: i64,
    pub high: i64,
}

impl PriceOverride {
    pub fn new(low: i64, high: i64) -> Result<Self, ValidationError> {
        if low < 0 || high < 0 {
            return Err(ValidationError::NegativePrice);
        }
        if low > high {
            return Err(ValidationError::OverrideOrder { low, high });
        }
        Ok(Self { low, high })
    }
}

impl TryFrom<PriceRange> for PriceOverride {
    type Error = ValidationError;

    fn try_from(range: PriceRange) -> Result<Self, Self::Error> {
        Self::new(range.low, range.high)
    }
}

/// Named access fees for one location
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AccessFee {
    Floors,
    NoLift,
    Parking,
    ParkingDistance,
    NarrowAccess,
    TimeRestrictions,
    BookingRequired,
    OutdoorPath,
    OutdoorSteps,
}

/// Access fees charged at one location
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationAccessFees {
    pub total: Decimal,
    pub fees: BTreeMap<AccessFee, Decimal>,
}

impl LocationAccessFees {
    pub fn charge(&mut self, fee: AccessFee, amount: Decimal) {
        self.total = self.total.saturating_add(amount);
        let entry = self.fees.entry(fee).or_insert(Decimal::ZERO);
        *entry = entry.saturating_add(amount);
    }

    pub fn get(&self, fee: AccessFee) -> Decimal {
        self.fees.get(&fee).copied().unwrap_or(Decimal::ZERO)
    }
}

/// Pickup and dropoff kept apart
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessBreakdown {
    pub pickup: LocationAccessFees,
    pub dropoff: LocationAccessFees,
}

/// Quantity and cost for one packing material
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MaterialLine {
    pub qty: Decimal,
    pub cost: Decimal,
}

/// Packing materials bill of quantities
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackingMaterialsBreakdown {
    pub small_boxes: MaterialLine,
    pub medium_boxes: MaterialLine,
    pub large_boxes: MaterialLine,
    pub extra_small_boxes: MaterialLine,
    pub wardrobe_boxes: MaterialLine,
    pub mattress_covers: MaterialLine,
    pub tape_rolls: MaterialLine,
    pub paper_packs: MaterialLine,
    pub total_boxes: u64,
    pub total_cost: Decimal,
    /// Quantities are still reported when this is set; costs are zero
    pub customer_provides_packing: bool,
}

/// Packing labour estimate for one room
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomPackingEstimate {
    pub room_id: Uuid,
    pub room_name: String,
    pub items_count: u64,
    pub hours: Decimal,
    pub cost: Decimal,
    pub is_selected: bool,
}

/// Packing labour across rooms; totals cover selected rooms only
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackingLaborBreakdown {
    pub rooms: Vec<RoomPackingEstimate>,
    pub total_hours: Decimal,
    pub total_cost: Decimal,
}

/// Every component of the subtotal
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeeBreakdown {
    pub base: Decimal,
    pub volume: Decimal,
    pub bulky: Decimal,
    pub fragile: Decimal,
    pub weight: Decimal,
    pub distance: Decimal,
    pub access: Decimal,
    pub packing_materials: Decimal,
    pub packing_labor: Decimal,
}

/// Totals written back to the job after a quote
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComputedTotals {
    pub total_cbm: Decimal,
    pub total_weight_kg: Decimal,
}

/// Computed quote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuoteResult {
    /// Range shown to the customer: the override when one is set
    pub estimate: PriceRange,
    /// Range the rate table produced, kept for audit
    pub computed_estimate: PriceRange,
    pub has_custom_price: bool,
    pub subtotal: Decimal,
    pub total_items: u64,
    pub bulky_items: u64,
    pub fragile_items: u64,
    pub total_cbm: Decimal,
    pub total_weight_kg: Decimal,
    pub distance_km: Decimal,
    pub confidence: ConfidenceTier,
    pub auto_approval_eligible: bool,
    pub breakdown: FeeBreakdown,
    pub access_breakdown: AccessBreakdown,
    pub packing_breakdown: PackingMaterialsBreakdown,
    pub packing_service_breakdown: PackingLaborBreakdown,
}

impl QuoteResult {
    /// Cached job totals matching this computation.
    pub fn computed_totals(&self) -> ComputedTotals {
        ComputedTotals {
            total_cbm: self.total_cbm.round_dp(2),
            total_weight_kg: self.total_weight_kg.round_dp(0),
        }
    }

    /// Deposit due at booking and the balance left on the low estimate.
    pub fn deposit(&self) -> (i64, i64) {
        let low = self.estimate.low;
        let deposit = (Decimal::from(low) * DEPOSIT_RATE)
            .floor()
            .to_i64()
            .unwrap_or(0);
        (deposit, low - deposit)
    }
}
