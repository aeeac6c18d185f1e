//! Per-company rate table
//!
//! Every named price, fee and multiplier the quote engine reads. A table is
//! validated when it is written; the engine trusts what it is handed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Unit prices for packing materials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingMaterialPrices {
    /// Pack 1, 18x18x10" small box
    pub small_box: Decimal,
    /// Pack 2, 18x18x20" medium box
    pub medium_box: Decimal,
    /// Pack 3, 18x18x30" large box
    pub large_box: Decimal,
    /// Pack 6, 18x13x13" extra small box
    pub extra_small_box: Decimal,
    /// Robe carton
    pub wardrobe_box: Decimal,
    pub tape_roll: Decimal,
    pub paper_pack: Decimal,
    /// King size mattress cover
    pub mattress_cover: Decimal,
}

impl PackingMaterialPrices {
    /// Price list used when the customer brings their own materials.
    pub fn zero() -> Self {
        Self {
            small_box: Decimal::ZERO,
            medium_box: Decimal::ZERO,
            large_box: Decimal::ZERO,
            extra_small_box: Decimal::ZERO,
            wardrobe_box: Decimal::ZERO,
            tape_roll: Decimal::ZERO,
            paper_pack: Decimal::ZERO,
            mattress_cover: Decimal::ZERO,
        }
    }
}

impl Default for PackingMaterialPrices {
    fn default() -> Self {
        Self {
            small_box: dec!(1.05),
            medium_box: dec!(1.55),
            large_box: dec!(2.00),
            extra_small_box: dec!(1.05),
            wardrobe_box: dec!(10.00),
            tape_roll: dec!(1.14),
            paper_pack: dec!(7.50),
            mattress_cover: dec!(1.74),
        }
    }
}

/// Company rate table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    pub company_id: Uuid,

    // Volume
    pub price_per_cbm: Decimal,

    // Base
    pub callout_fee: Decimal,

    // Item surcharges
    pub bulky_item_fee: Decimal,
    /// Items heavier than this are bulky
    pub bulky_weight_threshold_kg: Decimal,
    pub fragile_item_fee: Decimal,

    // Weight over threshold
    pub weight_threshold_kg: Decimal,
    pub price_per_kg_over_threshold: Decimal,

    // Distance, in kilometres
    pub base_distance_km: Decimal,
    pub price_per_km: Decimal,

    // Floors and lift
    pub price_per_floor: Decimal,
    pub no_lift_surcharge: Decimal,

    // Parking
    pub parking_street_fee: Decimal,
    pub parking_permit_fee: Decimal,
    pub parking_limited_fee: Decimal,
    pub parking_distance_per_50m: Decimal,

    // Building restrictions
    pub narrow_access_fee: Decimal,
    pub time_restriction_fee: Decimal,
    pub booking_required_fee: Decimal,

    // Outdoor access
    pub outdoor_steps_per_5: Decimal,
    pub outdoor_path_fee: Decimal,

    pub packing_materials: PackingMaterialPrices,
    pub packing_labor_per_hour: Decimal,

    // Estimate range
    pub estimate_low_multiplier: Decimal,
    pub estimate_high_multiplier: Decimal,

    pub updated_at: DateTime<Utc>,
}

impl RateTable {
    /// Onboarding defaults for a new company.
    pub fn with_defaults(company_id: Uuid) -> Self {
        Self {
            company_id,
            price_per_cbm: dec!(35.00),
            callout_fee: dec!(250.00),
            bulky_item_fee: dec!(25.00),
            bulky_weight_threshold_kg: dec!(50),
            fragile_item_fee: dec!(15.00),
            weight_threshold_kg: dec!(1000),
            price_per_kg_over_threshold: dec!(0.50),
            base_distance_km: dec!(0),
            price_per_km: dec!(2.00),
            price_per_floor: dec!(15.00),
            no_lift_surcharge: dec!(50.00),
            parking_street_fee: dec!(25.00),
            parking_permit_fee: dec!(40.00),
            parking_limited_fee: dec!(60.00),
            parking_distance_per_50m: dec!(10.00),
            narrow_access_fee: dec!(35.00),
            time_restriction_fee: dec!(25.00),
            booking_required_fee: dec!(20.00),
            outdoor_steps_per_5: dec!(15.00),
            outdoor_path_fee: dec!(20.00),
            packing_materials: PackingMaterialPrices::default(),
            packing_labor_per_hour: dec!(40.00),
            estimate_low_multiplier: dec!(0.90),
            estimate_high_multiplier: dec!(1.20),
            updated_at: Utc::now(),
        }
    }

    fn amounts(&self) -> [(&'static str, Decimal); 30] {
        let m = &self.packing_materials;
        [
            ("price_per_cbm", self.price_per_cbm),
            ("callout_fee", self.callout_fee),
            ("bulky_item_fee", self.bulky_item_fee),
            ("bulky_weight_threshold_kg", self.bulky_weight_threshold_kg),
            ("fragile_item_fee", self.fragile_item_fee),
            ("weight_threshold_kg", self.weight_threshold_kg),
            ("price_per_kg_over_threshold", self.price_per_kg_over_threshold),
            ("base_distance_km", self.base_distance_km),
            ("price_per_km", self.price_per_km),
            ("price_per_floor", self.price_per_floor),
            ("no_lift_surcharge", self.no_lift_surcharge),
            ("parking_street_fee", self.parking_street_fee),
            ("parking_permit_fee", self.parking_permit_fee),
            ("parking_limited_fee", self.parking_limited_fee),
            ("parking_distance_per_50m", self.parking_distance_per_50m),
            ("narrow_access_fee", self.narrow_access_fee),
            ("time_restriction_fee", self.time_restriction_fee),
            ("booking_required_fee", self.booking_required_fee),
            ("outdoor_steps_per_5", self.outdoor_steps_per_5),
            ("outdoor_path_fee", self.outdoor_path_fee),
            ("packing_materials.small_box", m.small_box),
            ("packing_materials.medium_box", m.medium_box),
            ("packing_materials.large_box", m.large_box),
            ("packing_materials.extra_small_box", m.extra_small_box),
            ("packing_materials.wardrobe_box", m.wardrobe_box),
            ("packing_materials.tape_roll", m.tape_roll),
            ("packing_materials.paper_pack", m.paper_pack),
            ("packing_materials.mattress_cover", m.mattress_cover),
            ("packing_labor_per_hour", self.packing_labor_per_hour),
            ("estimate_low_multiplier", self.estimate_low_multiplier),
        ]
    }

    /// Check the invariants every stored table must hold.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some((field, _)) = self.amounts().iter().find(|(_, v)| *v < Decimal::ZERO) {
            return Err(ValidationError::Negative { field: *field });
        }

        if self.estimate_low_multiplier <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveMultiplier {
                field: "estimate_low_multiplier",
            });
        }

        if self.estimate_low_multiplier >= self.estimate_high_multiplier {
            return Err(ValidationError::MultiplierOrder {
                low: self.estimate_low_multiplier,
                high: self.estimate_high_multiplier,
            });
        }

        Ok(())
    }
}

/// Partial update of packing material prices
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePackingMaterialPrices {
    #[serde(default)]
    pub small_box: Option<Decimal>,
    #[serde(default)]
    pub medium_box: Option<Decimal>,
    #[serde(default)]
    pub large_box: Option<Decimal>,
    #[serde(default)]
    pub extra_small_box: Option<Decimal>,
    #[serde(default)]
    pub wardrobe_box: Option<Decimal>,
    #[serde(default)]
    pub tape_roll: Option<Decimal>,
    #[serde(default)]
    pub paper_pack: Option<Decimal>,
    #[serde(default)]
    pub mattress_cover: Option<Decimal>,
}

/// Request DTO for editing a rate table. Absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRateTableRequest {
    #[serde(default)]
    pub price_per_cbm: Option<Decimal>,
    #[serde(default)]
    pub callout_fee: Option<Decimal>,
    #[serde(default)]
    pub bulky_item_fee: Option<Decimal>,
    #[serde(default)]
    pub bulky_weight_threshold_kg: Option<Decimal>,
    #[serde(default)]
    pub fragile_item_fee: Option<Decimal>,
    #[serde(default)]
    pub weight_threshold_kg: Option<Decimal>,
    #[serde(default)]
    pub price_per_kg_over_threshold: Option<Decimal>,
    #[serde(default)]
    pub base_distance_km: Option<Decimal>,
    #[serde(default)]
    pub price_per_km: Option<Decimal>,
    #[serde(default)]
    pub price_per_floor: Option<Decimal>,
    #[serde(default)]
    pub no_lift_surcharge: Option<Decimal>,
    #[serde(default)]
    pub parking_street_fee: Option<Decimal>,
    #[serde(default)]
    pub parking_permit_fee: Option<Decimal>,
    #[serde(default)]
    pub parking_limited_fee: Option<Decimal>,
    #[serde(default)]
    pub parking_distance_per_50m: Option<Decimal>,
    #[serde(default)]
    pub narrow_access_fee: Option<Decimal>,
    #[serde(default)]
    pub time_restriction_fee: Option<Decimal>,
    #[serde(default)]
    pub booking_required_fee: Option<Decimal>,
    #[serde(default)]
    pub outdoor_steps_per_5: Option<Decimal>,
    #[serde(default)]
    pub outdoor_path_fee: Option<Decimal>,
    #[serde(default)]
    pub packing_materials: Option<UpdatePackingMaterialPrices>,
    #[serde(default)]
    pub packing_labor_per_hour: Option<Decimal>,
    #[serde(default)]
    pub estimate_low_multiplier: Option<Decimal>,
    #[serde(default)]
    pub estimate_high_multiplier: Option<Decimal>,
}

fn merge(target: &mut Decimal, value: Option<Decimal>) {
    if let Some(v) = value {
        *target = v;
    }
}

impl UpdateRateTableRequest {
    /// Merge onto `current` and validate the result. The current table is
    /// left untouched when validation fails.
    pub fn apply_to(&self, current: &RateTable) -> Result<RateTable, ValidationError> {
        let mut next = current.clone();

        merge(&mut next.price_per_cbm, self.price_per_cbm);
        merge(&mut next.callout_fee, self.callout_fee);
        merge(&mut next.bulky_item_fee, self.bulky_item_fee);
        merge(&mut next.bulky_weight_threshold_kg, self.bulky_weight_threshold_kg);
        merge(&mut next.fragile_item_fee, self.fragile_item_fee);
        merge(&mut next.weight_threshold_kg, self.weight_threshold_kg);
        merge(&mut next.price_per_kg_over_threshold, self.price_per_kg_over_threshold);
        merge(&mut next.base_distance_km, self.base_distance_km);
        merge(&mut next.price_per_km, self.price_per_km);
        merge(&mut next.price_per_floor, self.price_per_floor);
        merge(&mut next.no_lift_surcharge, self.no_lift_surcharge);
        merge(&mut next.parking_street_fee, self.parking_street_fee);
        merge(&mut next.parking_permit_fee, self.parking_permit_fee);
        merge(&mut next.parking_limited_fee, self.parking_limited_fee);
        merge(&mut next.parking_distance_per_50m, self.parking_distance_per_50m);
        merge(&mut next.narrow_access_fee, self.narrow_access_fee);
        merge(&mut next.time_restriction_fee, self.time_restriction_fee);
        merge(&mut next.booking_required_fee, self.booking_required_fee);
        merge(&mut next.outdoor_steps_per_5, self.outdoor_steps_per_5);
        merge(&mut next.outdoor_path_fee, self.outdoor_path_fee);
        merge(&mut next.packing_labor_per_hour, self.packing_labor_per_hour);
        merge(&mut next.estimate_low_multiplier, self.estimate_low_multiplier);
        merge(&mut next.estimate_high_multiplier, self.estimate_high_multiplier);

        if let Some(m) = &self.packing_materials {
            let prices = &mut next.packing_materials;
            merge(&mut prices.small_box, m.small_box);
            merge(&mut prices.medium_box, m.medium_box);
            merge(&mut prices.large_box, m.large_box);
            merge(&mut prices.extra_small_box, m.extra_small_box);
            merge(&mut prices.wardrobe_box, m.wardrobe_box);
            merge(&mut prices.tape_roll, m.tape_roll);
            merge(&mut prices.paper_pack, m.paper_pack);
            merge(&mut prices.mattress_cover, m.mattress_cover);
        }

        next.validate()?;
        next.updated_at = Utc::now();
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let table = RateTable::with_defaults(Uuid::new_v4());
        assert!(table.validate().is_ok());
        assert_eq!(table.bulky_weight_threshold_kg, dec!(50));
    }

    #[test]
    fn partial_update_keeps_other_fields() {
        let current = RateTable::with_defaults(Uuid::new_v4());
        let update = UpdateRateTableRequest {
            price_per_cbm: Some(dec!(40)),
            packing_materials: Some(UpdatePackingMaterialPrices {
                tape_roll: Some(dec!(2.00)),
                ..Default::default()
            }),
            ..Default::default()
        };

        let next = update.apply_to(&current).unwrap();
        assert_eq!(next.price_per_cbm, dec!(40));
        assert_eq!(next.packing_materials.tape_roll, dec!(2.00));
        assert_eq!(next.callout_fee, current.callout_fee);
        assert_eq!(next.packing_materials.small_box, current.packing_materials.small_box);
    }

    #[test]
    fn rejects_inverted_multipliers() {
        let current = RateTable::with_defaults(Uuid::new_v4());
        let update = UpdateRateTableRequest {
            estimate_low_multiplier: Some(dec!(1.20)),
            estimate_high_multiplier: Some(dec!(1.20)),
            ..Default::default()
        };

        assert!(matches!(
            update.apply_to(&current),
            Err(ValidationError::MultiplierOrder { .. })
        ));
    }

    #[test]
    fn rejects_negative_price() {
        let current = RateTable::with_defaults(Uuid::new_v4());
        let update = UpdateRateTableRequest {
            packing_materials: Some(UpdatePackingMaterialPrices {
                paper_pack: Some(dec!(-1)),
                ..Default::default()
            }),
            ..Default::default()
        };

        match update.apply_to(&current) {
            Err(ValidationError::Negative { field }) => {
                assert_eq!(field, "packing_materials.paper_pack")
            }
            other => panic!("expected negative error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_zero_low_multiplier() {
        let current = RateTable::with_defaults(Uuid::new_v4());
        let update = UpdateRateTableRequest {
            estimate_low_multiplier: Some(dec!(0)),
            ..Default::default()
        };

        assert!(matches!(
            update.apply_to(&current),
            Err(ValidationError::NonPositiveMultiplier { .. })
        ));
    }
}
