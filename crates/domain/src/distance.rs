// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Great-circle distance calculation for radius filtering.
//!
//! Resolving a postal code to a coordinate is the geocoding collaborator's
//! job; this module only computes distances between resolved coordinates.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers (IUGG).
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, -90 to 90.
    latitude_deg: f64,
    /// Longitude in degrees, -180 to 180.
    longitude_deg: f64,
}

impl Coordinate {
    /// Creates a new `Coordinate`.
    ///
    /// # Arguments
    ///
    /// * `latitude_deg` - Latitude in degrees
    /// * `longitude_deg` - Longitude in degrees
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinate` if either component is
    /// outside its valid range or not finite.
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Result<Self, DomainError> {
        let valid = latitude_deg.is_finite()
            && longitude_deg.is_finite()
            && (-90.0..=90.0).contains(&latitude_deg)
            && (-180.0..=180.0).contains(&longitude_deg);
        if !valid {
            return Err(DomainError::InvalidCoordinate {
                latitude_deg,
                longitude_deg,
            });
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
        })
    }

    /// Returns the latitude in degrees.
    #[must_use]
    pub const fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    /// Returns the longitude in degrees.
    #[must_use]
    pub const fn longitude_deg(&self) -> f64 {
        self.longitude_deg
    }
}

/// Computes the haversine great-circle distance between two coordinates,
/// in kilometers.
#[must_use]
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.latitude_deg.to_radians();
    let lat_b = b.latitude_deg.to_radians();
    let d_lat = (b.latitude_deg - a.latitude_deg).to_radians();
    let d_lon = (b.longitude_deg - a.longitude_deg).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Checks whether `point` lies within `radius_km` of `center`.
///
/// # Errors
///
/// Returns `DomainError::InvalidRadius` if the radius is not strictly
/// positive and finite.
pub fn within_radius_km(
    center: Coordinate,
    point: Coordinate,
    radius_km: f64,
) -> Result<bool, DomainError> {
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(DomainError::InvalidRadius { radius_km });
    }
    Ok(haversine_km(center, point) <= radius_km)
}
