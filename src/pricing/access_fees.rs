//! Access difficulty surcharges for a single location

use rust_decimal::Decimal;

use super::rules::{started_blocks, OUTDOOR_STEPS_BLOCK, PARKING_WALK_BLOCK_METERS};
use crate::domain::{
    AccessFee, AccessProfile, BuildingRestriction, LocationAccessFees, OutdoorAccess, ParkingType,
    RateTable,
};

/// Fees for one location. Each rule is independent; a missing profile
/// costs nothing.
pub fn location_access_fees(profile: Option<&AccessProfile>, rates: &RateTable) -> LocationAccessFees {
    let mut fees = LocationAccessFees::default();
    let Some(profile) = profile else {
        return fees;
    };

    // Floors, and the lift surcharge only applies when there are floors to climb
    if profile.floors > 0 {
        fees.charge(
            AccessFee::Floors,
            Decimal::from(profile.floors).saturating_mul(rates.price_per_floor),
        );
        if !profile.has_lift {
            fees.charge(AccessFee::NoLift, rates.no_lift_surcharge);
        }
    }

    let parking_fee = match profile.parking_type {
        ParkingType::Driveway => None,
        ParkingType::Street => Some(rates.parking_street_fee),
        ParkingType::PermitZone => Some(rates.parking_permit_fee),
        ParkingType::Limited => Some(rates.parking_limited_fee),
    };
    if let Some(fee) = parking_fee {
        fees.charge(AccessFee::Parking, fee);

        let blocks = started_blocks(profile.parking_distance_meters, PARKING_WALK_BLOCK_METERS);
        if blocks > 0 {
            fees.charge(
                AccessFee::ParkingDistance,
                Decimal::from(blocks).saturating_mul(rates.parking_distance_per_50m),
            );
        }
    }

    if profile.has_narrow_access() {
        fees.charge(AccessFee::NarrowAccess, rates.narrow_access_fee);
    }
    if profile.has_restriction(BuildingRestriction::TimeRestrictions) {
        fees.charge(AccessFee::TimeRestrictions, rates.time_restriction_fee);
    }
    if profile.has_restriction(BuildingRestriction::BookingRequired) {
        fees.charge(AccessFee::BookingRequired, rates.booking_required_fee);
    }

    match profile.outdoor_access {
        OutdoorAccess::Direct => {}
        OutdoorAccess::Path => {
            fees.charge(AccessFee::OutdoorPath, rates.outdoor_path_fee);
        }
        OutdoorAccess::Steps => {
            fees.charge(AccessFee::OutdoorPath, rates.outdoor_path_fee);

            let blocks = started_blocks(profile.outdoor_steps, OUTDOOR_STEPS_BLOCK);
            if blocks > 0 {
                fees.charge(
                    AccessFee::OutdoorSteps,
                    Decimal::from(blocks).saturating_mul(rates.outdoor_steps_per_5),
                );
            }
        }
    }

    fees
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::BTreeSet;
    use uuid::Uuid;

    fn rates() -> RateTable {
        RateTable::with_defaults(Uuid::new_v4())
    }

    #[test]
    fn no_profile_no_fees() {
        let fees = location_access_fees(None, &rates());
        assert_eq!(fees.total, Decimal::ZERO);
        assert!(fees.fees.is_empty());
    }

    #[test]
    fn ground_floor_never_pays_no_lift() {
        let profile = AccessProfile {
            floors: 0,
            has_lift: false,
            ..Default::default()
        };
        let fees = location_access_fees(Some(&profile), &rates());
        assert_eq!(fees.get(AccessFee::NoLift), Decimal::ZERO);
        assert_eq!(fees.total, Decimal::ZERO);
    }

    #[test]
    fn floors_without_lift() {
        let profile = AccessProfile {
            floors: 3,
            has_lift: false,
            ..Default::default()
        };
        let fees = location_access_fees(Some(&profile), &rates());
        assert_eq!(fees.get(AccessFee::Floors), dec!(45));
        assert_eq!(fees.get(AccessFee::NoLift), dec!(50));
        assert_eq!(fees.total, dec!(95));
    }

    #[test]
    fn floors_with_lift() {
        let profile = AccessProfile {
            floors: 3,
            has_lift: true,
            ..Default::default()
        };
        let fees = location_access_fees(Some(&profile), &rates());
        assert_eq!(fees.total, dec!(45));
    }

    #[test]
    fn driveway_ignores_walk_distance() {
        let profile = AccessProfile {
            parking_type: ParkingType::Driveway,
            parking_distance_meters: 200,
            ..Default::default()
        };
        let fees = location_access_fees(Some(&profile), &rates());
        assert_eq!(fees.total, Decimal::ZERO);
    }

    #[test]
    fn parking_walk_blocks() {
        let rates = rates();
        let walk = |meters| {
            let profile = AccessProfile {
                parking_type: ParkingType::Street,
                parking_distance_meters: meters,
                ..Default::default()
            };
            location_access_fees(Some(&profile), &rates).get(AccessFee::ParkingDistance)
        };

        assert_eq!(walk(0), Decimal::ZERO);
        assert_eq!(walk(50), dec!(10));
        assert_eq!(walk(51), dec!(20));
        assert_eq!(walk(100), dec!(20));
    }

    #[test]
    fn parking_types_are_exclusive() {
        let rates = rates();
        let parking = |parking_type| {
            let profile = AccessProfile {
                parking_type,
                ..Default::default()
            };
            location_access_fees(Some(&profile), &rates).get(AccessFee::Parking)
        };

        assert_eq!(parking(ParkingType::Driveway), Decimal::ZERO);
        assert_eq!(parking(ParkingType::Street), dec!(25));
        assert_eq!(parking(ParkingType::PermitZone), dec!(40));
        assert_eq!(parking(ParkingType::Limited), dec!(60));
    }

    #[test]
    fn narrow_access_charged_once() {
        let profile = AccessProfile {
            building_restrictions: BTreeSet::from([
                BuildingRestriction::NarrowStairs,
                BuildingRestriction::NarrowDoorways,
                BuildingRestriction::NarrowHallway,
                BuildingRestriction::TimeRestrictions,
                BuildingRestriction::BookingRequired,
            ]),
            ..Default::default()
        };
        let fees = location_access_fees(Some(&profile), &rates());
        assert_eq!(fees.get(AccessFee::NarrowAccess), dec!(35));
        assert_eq!(fees.get(AccessFee::TimeRestrictions), dec!(25));
        assert_eq!(fees.get(AccessFee::BookingRequired), dec!(20));
        assert_eq!(fees.total, dec!(80));
    }

    #[test]
    fn outdoor_steps_imply_path() {
        let rates = rates();
        let outdoor = |outdoor_access, outdoor_steps| {
            let profile = AccessProfile {
                outdoor_access,
                outdoor_steps,
                ..Default::default()
            };
            location_access_fees(Some(&profile), &rates)
        };

        assert_eq!(outdoor(OutdoorAccess::Direct, 10).total, Decimal::ZERO);
        assert_eq!(outdoor(OutdoorAccess::Path, 10).total, dec!(20));

        let steps = outdoor(OutdoorAccess::Steps, 12);
        assert_eq!(steps.get(AccessFee::OutdoorPath), dec!(20));
        assert_eq!(steps.get(AccessFee::OutdoorSteps), dec!(45));

        let exact = outdoor(OutdoorAccess::Steps, 10);
        assert_eq!(exact.get(AccessFee::OutdoorSteps), dec!(30));
    }
}
