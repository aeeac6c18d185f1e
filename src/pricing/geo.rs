//! Great-circle distance between pickup and dropoff

use rust_decimal::prelude::*;

use super::rules::{EARTH_RADIUS_MILES, KM_PER_MILE};
use crate::domain::Location;

/// Haversine distance in miles.
pub fn haversine_miles(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlng = (lng2 - lng1).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1_rad.cos() * lat2_rad.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_MILES * c
}

/// Coordinates of a location, if usable. Zero is the "not geocoded"
/// sentinel, so a zero latitude or longitude counts as missing.
fn coordinates(location: Option<&Location>) -> Option<(f64, f64)> {
    let location = location?;
    let (lat, lng) = (location.lat?, location.lng?);
    if lat == 0.0 || lng == 0.0 || !lat.is_finite() || !lng.is_finite() {
        return None;
    }
    Some((lat, lng))
}

/// Driving distance proxy in kilometres, rounded to 2 dp.
///
/// Zero when either end is missing coordinates, so the distance fee is
/// skipped rather than failing the quote.
pub fn distance_km(pickup: Option<&Location>, dropoff: Option<&Location>) -> Decimal {
    let (Some((lat1, lng1)), Some((lat2, lng2))) = (coordinates(pickup), coordinates(dropoff)) else {
        return Decimal::ZERO;
    };

    let km = haversine_miles(lat1, lng1, lat2, lng2) * KM_PER_MILE;
    Decimal::from_f64(km)
        .map(|d| d.round_dp(2))
        .unwrap_or(Decimal::ZERO)
}
