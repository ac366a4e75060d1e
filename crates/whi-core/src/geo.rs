//! Great-circle distance and radius filtering for regional indexes.

use serde::Serialize;
use thiserror::Error;

use crate::location::LocationRecord;

const EARTH_RADIUS_KM: f64 = 6371.0;
const MILES_PER_KM: f64 = 0.621_371;

pub const DEFAULT_RADIUS_MILES: f64 = 50.0;

#[derive(Debug, Error, PartialEq)]
pub enum GeoError {
    #[error("latitude must be between -90 and 90, got {0}")]
    Latitude(f64),

    #[error("longitude must be between -180 and 180, got {0}")]
    Longitude(f64),

    #[error("radius must be a non-negative number of miles, got {0}")]
    Radius(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// # Errors
    ///
    /// Returns [`GeoError`] if either coordinate is out of range or not finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::Latitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// A location that fell inside a radius, with its distance from the center.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyLocation {
    pub location: LocationRecord,
    pub distance_miles: f64,
}

/// Haversine distance in statute miles.
#[must_use]
pub fn distance_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();
    let h = (dlat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c * MILES_PER_KM
}

/// Keep locations within `radius_miles` of `center`, nearest first.
///
/// Locations without coordinates are dropped.
///
/// # Errors
///
/// Returns [`GeoError::Radius`] if `radius_miles` is negative or not finite.
pub fn within_radius(
    locations: Vec<LocationRecord>,
    center: GeoPoint,
    radius_miles: f64,
) -> Result<Vec<NearbyLocation>, GeoError> {
    if !radius_miles.is_finite() || radius_miles < 0.0 {
        return Err(GeoError::Radius(radius_miles));
    }

    let mut nearby: Vec<NearbyLocation> = locations
        .into_iter()
        .filter(LocationRecord::has_coordinates)
        .filter_map(|location| {
            let point = GeoPoint::new(location.latitude, location.longitude).ok()?;
            let distance = distance_miles(center, point);
            (distance <= radius_miles).then_some(NearbyLocation {
                location,
                distance_miles: distance,
            })
        })
        .collect();

    nearby.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    Ok(nearby)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(code: &str, latitude: f64, longitude: f64) -> LocationRecord {
        LocationRecord {
            store_code: code.to_string(),
            latitude,
            longitude,
            ..LocationRecord::default()
        }
    }

    fn atlanta() -> GeoPoint {
        GeoPoint::new(33.749, -84.388).unwrap()
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert_eq!(GeoPoint::new(91.0, 0.0), Err(GeoError::Latitude(91.0)));
        assert_eq!(GeoPoint::new(0.0, -181.0), Err(GeoError::Longitude(-181.0)));
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert!(distance_miles(atlanta(), atlanta()).abs() < 1e-9);
    }

    #[test]
    fn atlanta_to_savannah_is_about_215_miles() {
        let savannah = GeoPoint::new(32.0809, -81.0912).unwrap();
        let d = distance_miles(atlanta(), savannah);
        assert!((d - 215.0).abs() < 10.0, "got {d}");
    }

    #[test]
    fn filters_and_sorts_by_distance() {
        let locs = vec![
            store("far", 32.0809, -81.0912),
            store("mid", 33.95, -84.55),
            store("near", 33.76, -84.39),
        ];
        let nearby = within_radius(locs, atlanta(), 50.0).unwrap();
        let codes: Vec<&str> = nearby
            .iter()
            .map(|n| n.location.store_code.as_str())
            .collect();
        assert_eq!(codes, vec!["near", "mid"]);
        assert!(nearby[0].distance_miles <= nearby[1].distance_miles);
    }

    #[test]
    fn drops_stores_without_coordinates() {
        let center = GeoPoint::new(0.0, 0.0).unwrap();
        let nearby = within_radius(vec![store("unknown", 0.0, 0.0)], center, 10.0).unwrap();
        assert!(nearby.is_empty());
    }

    #[test]
    fn negative_radius_is_rejected() {
        let result = within_radius(vec![], atlanta(), -1.0);
        assert_eq!(result.unwrap_err(), GeoError::Radius(-1.0));
    }
}
