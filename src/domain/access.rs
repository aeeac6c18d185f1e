//! Location access profiles
//!
//! How hard a pickup or dropoff address is to work at. Stored as a JSON blob
//! on the job; every field has a neutral default so a partial or missing
//! profile simply adds no fees.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::lenient;

/// Where the van can park
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum ParkingType {
    #[default]
    Driveway,
    Street,
    PermitZone,
    Limited,
}

impl From<String> for ParkingType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "street" => Self::Street,
            "permit_zone" => Self::PermitZone,
            "limited" => Self::Limited,
            _ => Self::Driveway,
        }
    }
}

/// Building-imposed restrictions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum BuildingRestriction {
    NarrowStairs,
    NarrowDoorways,
    NarrowHallway,
    TimeRestrictions,
    BookingRequired,
    /// Tag this version does not price
    Other,
}

impl From<String> for BuildingRestriction {
    fn from(s: String) -> Self {
        match s.as_str() {
            "narrow_stairs" => Self::NarrowStairs,
            "narrow_doorways" => Self::NarrowDoorways,
            "narrow_hallway" => Self::NarrowHallway,
            "time_restrictions" => Self::TimeRestrictions,
            "booking_required" => Self::BookingRequired,
            _ => Self::Other,
        }
    }
}

impl BuildingRestriction {
    pub fn is_narrow(&self) -> bool {
        matches!(
            self,
            Self::NarrowStairs | Self::NarrowDoorways | Self::NarrowHallway
        )
    }
}

/// Route from the parked van to the front door
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum OutdoorAccess {
    #[default]
    Direct,
    Path,
    /// A path with outdoor steps on it
    Steps,
}

impl From<String> for OutdoorAccess {
    fn from(s: String) -> Self {
        match s.as_str() {
            "path" => Self::Path,
            "steps" => Self::Steps,
            _ => Self::Direct,
        }
    }
}

/// Access difficulty for one location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AccessProfile {
    #[serde(default, deserialize_with = "lenient::count")]
    pub floors: u32,
    #[serde(default)]
    pub has_lift: bool,
    #[serde(default, deserialize_with = "lenient::tag")]
    pub parking_type: ParkingType,
    #[serde(default, deserialize_with = "lenient::count")]
    pub parking_distance_meters: u32,
    #[serde(default)]
    pub building_restrictions: BTreeSet<BuildingRestriction>,
    #[serde(default, deserialize_with = "lenient::tag")]
    pub outdoor_access: OutdoorAccess,
    #[serde(default, deserialize_with = "lenient::count")]
    pub outdoor_steps: u32,
}

impl AccessProfile {
    pub fn has_restriction(&self, restriction: BuildingRestriction) -> bool {
        self.building_restrictions.contains(&restriction)
    }

    pub fn has_narrow_access(&self) -> bool {
        self.building_restrictions.iter().any(|r| r.is_narrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_survey_blob() {
        let profile: AccessProfile = serde_json::from_str(
            r#"{
                "floors": 3,
                "has_lift": false,
                "parking_type": "permit_zone",
                "parking_distance_meters": 120,
                "building_restrictions": ["narrow_stairs", "booking_required", "narrow_stairs"],
                "outdoor_access": "steps",
                "outdoor_steps": 12
            }"#,
        )
        .unwrap();

        assert_eq!(profile.floors, 3);
        assert_eq!(profile.parking_type, ParkingType::PermitZone);
        assert_eq!(profile.building_restrictions.len(), 2);
        assert!(profile.has_narrow_access());
        assert!(profile.has_restriction(BuildingRestriction::BookingRequired));
        assert!(!profile.has_restriction(BuildingRestriction::TimeRestrictions));
        assert_eq!(profile.outdoor_access, OutdoorAccess::Steps);
    }

    #[test]
    fn empty_blob_is_neutral() {
        let profile: AccessProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile, AccessProfile::default());
    }

    #[test]
    fn unknown_values_fall_back() {
        let profile: AccessProfile = serde_json::from_str(
            r#"{"parking_type": "helipad", "outdoor_access": null, "floors": -1, "building_restrictions": ["moat"]}"#,
        )
        .unwrap();

        assert_eq!(profile.parking_type, ParkingType::Driveway);
        assert_eq!(profile.outdoor_access, OutdoorAccess::Direct);
        assert_eq!(profile.floors, 0);
        assert!(!profile.has_narrow_access());
    }
}
