// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Great-circle distance and human-readable distance strings

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula, in miles
pub const EARTH_RADIUS_MILES: f64 = 3959.0;
pub const FEET_PER_MILE: f64 = 5280.0;
pub const METERS_PER_MILE: f64 = 1609.34;

/// Below this many miles distances are rendered in feet
const FEET_THRESHOLD_MILES: f64 = 0.1;

/// Average walking pace (3 mph)
const WALKING_MILES_PER_MINUTE: f64 = 0.05;

/// A point on the globe in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Finite and within the latitude/longitude ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Haversine distance between two points, in miles
pub fn distance_miles(from: Coordinates, to: Coordinates) -> f64 {
    let phi1 = from.latitude.to_radians();
    let phi2 = to.latitude.to_radians();
    let d_phi = (to.latitude - from.latitude).to_radians();
    let d_lambda = (to.longitude - from.longitude).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push near-antipodal points just past 1.0
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Haversine distance between two points, in meters
pub fn distance_meters(from: Coordinates, to: Coordinates) -> f64 {
    miles_to_meters(distance_miles(from, to))
}

/// Render a distance in miles: whole feet under 0.1 mi, otherwise one decimal
pub fn format_distance(miles: f64) -> String {
    if miles < FEET_THRESHOLD_MILES {
        let feet = (miles * FEET_PER_MILE).round() as i64;
        format!("{} ft", feet)
    } else {
        format!("{:.1} mi", miles)
    }
}

/// Distance between two points as a display string (e.g. "264 ft", "2.4 mi")
pub fn distance_string(from: Coordinates, to: Coordinates) -> String {
    format_distance(distance_miles(from, to))
}

/// Approximate walking time in whole minutes
pub fn walking_minutes(from: Coordinates, to: Coordinates) -> u64 {
    (distance_miles(from, to) / WALKING_MILES_PER_MINUTE).round() as u64
}

/// Walking time as a display string (e.g. "5 min walk")
pub fn walking_time_string(from: Coordinates, to: Coordinates) -> String {
    format!("{} min walk", walking_minutes(from, to))
}

pub fn miles_to_meters(miles: f64) -> f64 {
    miles * METERS_PER_MILE
}

#[cfg(test)]
#[path = "distance_tests.rs"]
mod tests;
