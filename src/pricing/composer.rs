//! Quote composition
//!
//! Runs every calculator against one rate table snapshot and folds the
//! results into a price range. Nothing here mutates the job; callers apply
//! [`QuoteResult::computed_totals`] themselves.

use rust_decimal::prelude::*;

use super::access_fees::location_access_fees;
use super::aggregate::aggregate;
use super::geo::distance_km;
use super::labor::packing_labor;
use super::materials::packing_materials;
use super::rules::{
    money, AUTO_APPROVE_MAX_CBM, AUTO_APPROVE_MAX_HIGH_PRICE, AUTO_APPROVE_MAX_ITEMS,
    LOW_CONFIDENCE_MAX_CBM, LOW_CONFIDENCE_MAX_ITEMS, MEDIUM_CONFIDENCE_MAX_CBM,
    MEDIUM_CONFIDENCE_MAX_ITEMS,
};
use crate::domain::{
    AccessBreakdown, ConfidenceTier, FeeBreakdown, PriceRange, QuoteRequest, QuoteResult, RateTable,
};

/// Confidence from how much inventory was captured. First matching rule wins.
pub fn confidence_tier(total_items: u64, total_cbm: Decimal) -> ConfidenceTier {
    if total_items < LOW_CONFIDENCE_MAX_ITEMS || total_cbm < LOW_CONFIDENCE_MAX_CBM {
        ConfidenceTier::Low
    } else if total_items < MEDIUM_CONFIDENCE_MAX_ITEMS || total_cbm < MEDIUM_CONFIDENCE_MAX_CBM {
        ConfidenceTier::Medium
    } else {
        ConfidenceTier::High
    }
}

/// A small, well-documented move whose quote can skip admin review.
pub fn auto_approval_eligible(
    confidence: ConfidenceTier,
    total_items: u64,
    total_cbm: Decimal,
    estimate: PriceRange,
) -> bool {
    confidence == ConfidenceTier::High
        && total_cbm <= AUTO_APPROVE_MAX_CBM
        && total_items <= AUTO_APPROVE_MAX_ITEMS
        && estimate.high <= AUTO_APPROVE_MAX_HIGH_PRICE
}

/// Whole currency units, saturating at the `i64` range.
fn floor_to_units(value: Decimal) -> i64 {
    value.floor().to_i64().unwrap_or(if value.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Amount by which `value` exceeds `threshold`, never negative.
fn over(value: Decimal, threshold: Decimal) -> Decimal {
    value.saturating_sub(threshold).max(Decimal::ZERO)
}

/// Price a job against a rate table.
pub fn compute_quote(request: &QuoteRequest<'_>, rates: &RateTable) -> QuoteResult {
    let inventory = aggregate(request.rooms, rates.bulky_weight_threshold_kg);

    let distance = distance_km(request.pickup, request.dropoff);

    let pickup = location_access_fees(request.pickup_access, rates);
    let dropoff = location_access_fees(request.dropoff_access, rates);

    let materials = packing_materials(
        &inventory.packing_tally,
        inventory.total_cbm,
        request.customer_provides_packing,
        rates,
    );
    let labor = packing_labor(&inventory.rooms, request.packing_service_rooms, rates);

    // Saturating throughout: an absurd survey yields a huge quote, not a panic
    let base = rates.callout_fee;
    let volume = inventory.total_cbm.saturating_mul(rates.price_per_cbm);
    let bulky = Decimal::from(inventory.bulky_items).saturating_mul(rates.bulky_item_fee);
    let fragile = Decimal::from(inventory.fragile_items).saturating_mul(rates.fragile_item_fee);
    let weight = over(inventory.total_weight_kg, rates.weight_threshold_kg)
        .saturating_mul(rates.price_per_kg_over_threshold);
    let distance_fee =
        over(distance, rates.base_distance_km).saturating_mul(rates.price_per_km);
    let access = pickup.total.saturating_add(dropoff.total);

    let subtotal = [
        volume,
        bulky,
        fragile,
        weight,
        distance_fee,
        access,
        materials.total_cost,
        labor.total_cost,
    ]
    .into_iter()
    .fold(base, Decimal::saturating_add);

    let computed_estimate = PriceRange {
        low: floor_to_units(subtotal.saturating_mul(rates.estimate_low_multiplier)),
        high: floor_to_units(subtotal.saturating_mul(rates.estimate_high_multiplier)),
    };

    let estimate = match request.price_override {
        Some(custom) => PriceRange {
            low: custom.low,
            high: custom.high,
        },
        None => computed_estimate,
    };

    let confidence = confidence_tier(inventory.total_items, inventory.total_cbm);

    tracing::debug!(
        items = inventory.total_items,
        total_cbm = %inventory.total_cbm,
        subtotal = %subtotal,
        low = computed_estimate.low,
        high = computed_estimate.high,
        has_custom_price = request.price_override.is_some(),
        confidence = %confidence,
        "Quote computed"
    );

    QuoteResult {
        estimate,
        computed_estimate,
        has_custom_price: request.price_override.is_some(),
        subtotal: money(subtotal),
        total_items: inventory.total_items,
        bulky_items: inventory.bulky_items,
        fragile_items: inventory.fragile_items,
        total_cbm: inventory.total_cbm,
        total_weight_kg: inventory.total_weight_kg,
        distance_km: distance,
        confidence,
        auto_approval_eligible: auto_approval_eligible(
            confidence,
            inventory.total_items,
            inventory.total_cbm,
            estimate,
        ),
        breakdown: FeeBreakdown {
            base: money(base),
            volume: money(volume),
            bulky: money(bulky),
            fragile: money(fragile),
            weight: money(weight),
            distance: money(distance_fee),
            access: money(access),
            packing_materials: materials.total_cost,
            packing_labor: labor.total_cost,
        },
        access_breakdown: AccessBreakdown { pickup, dropoff },
        packing_breakdown: materials,
        packing_service_breakdown: labor,
    }
}
