// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The geocoding collaborator interface used for radius filtering.
//!
//! Resolving a postal code to a coordinate is an external concern (a
//! lookup table, a third-party service); the façade only needs the
//! resolved coordinate to apply the haversine filter. Implementations
//! are injected at the composition root.

use std::collections::HashMap;
use thiserror::Error;

use crate::error::{ApiError, translate_domain_error};
use lawn_bid_domain::{Coordinate, PostalCode, Posting, within_radius_km};

/// Errors a geocoding collaborator can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The postal code is not known to the resolver.
    #[error("postal code '{postal_code}' could not be resolved")]
    UnknownPostalCode {
        /// The unresolvable postal code.
        postal_code: String,
    },
    /// The resolver's backing service failed.
    #[error("geocoding backend failure: {0}")]
    Backend(String),
}

/// Resolves postal codes to geographic coordinates.
pub trait PostalGeocoder {
    /// Resolves a postal code to a coordinate.
    ///
    /// # Errors
    ///
    /// Returns `GeocodeError::UnknownPostalCode` for codes the resolver
    /// does not know, or `GeocodeError::Backend` for service failures.
    fn resolve(&self, postal_code: &PostalCode) -> Result<Coordinate, GeocodeError>;
}

/// A geocoder backed by a fixed in-memory table.
///
/// Suitable for tests and seeded development environments; production
/// deployments wire in a real resolver.
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    table: HashMap<String, Coordinate>,
}

impl StaticGeocoder {
    /// Creates an empty geocoder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Adds a postal code mapping.
    pub fn insert(&mut self, postal_code: &str, coordinate: Coordinate) {
        self.table
            .insert(PostalCode::new(postal_code).value().to_string(), coordinate);
    }
}

impl PostalGeocoder for StaticGeocoder {
    fn resolve(&self, postal_code: &PostalCode) -> Result<Coordinate, GeocodeError> {
        self.table
            .get(postal_code.value())
            .copied()
            .ok_or_else(|| GeocodeError::UnknownPostalCode {
                postal_code: postal_code.value().to_string(),
            })
    }
}

/// Keeps only the postings within `radius_km` of `center`.
///
/// Postings whose postal code the resolver does not know are dropped:
/// the filter cannot place them inside the radius, and a browsing
/// listing prefers omission over a hard failure. Resolver backend
/// failures abort the listing.
///
/// # Errors
///
/// Returns an error if the radius is invalid or the resolver's backing
/// service fails.
pub fn filter_postings_within_radius(
    geocoder: &dyn PostalGeocoder,
    center: Coordinate,
    radius_km: f64,
    postings: Vec<Posting>,
) -> Result<Vec<Posting>, ApiError> {
    let mut kept: Vec<Posting> = Vec::with_capacity(postings.len());
    for posting in postings {
        let coordinate: Coordinate = match geocoder.resolve(&posting.postal_code) {
            Ok(coordinate) => coordinate,
            Err(GeocodeError::UnknownPostalCode { .. }) => continue,
            Err(GeocodeError::Backend(message)) => {
                return Err(ApiError::StoreUnavailable { message });
            }
        };
        if within_radius_km(center, coordinate, radius_km).map_err(translate_domain_error)? {
            kept.push(posting);
        }
    }
    Ok(kept)
}
