use crate::constants::{MAP_LATITUDE_DELTA, MAP_LONGITUDE_DELTA};
use crate::error::{FoodieError, FoodieResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting non-finite or out-of-range components.
    pub fn new(latitude: f64, longitude: f64) -> FoodieResult<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(FoodieError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parses the textual latitude/longitude pair stored in the dataset.
    pub fn parse(latitude: &str, longitude: &str) -> Option<Self> {
        let latitude = latitude.trim().parse::<f64>().ok()?;
        let longitude = longitude.trim().parse::<f64>().ok()?;
        Self::new(latitude, longitude).ok()
    }

    pub(crate) fn clamped(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: latitude.clamp(-90.0, 90.0),
            longitude: longitude.clamp(-180.0, 180.0),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

/// Visible map area centred on a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    pub center: Coordinate,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl MapRegion {
    pub fn around(center: Coordinate) -> Self {
        Self {
            center,
            latitude_delta: MAP_LATITUDE_DELTA,
            longitude_delta: MAP_LONGITUDE_DELTA,
        }
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        (point.latitude - self.center.latitude).abs() <= self.latitude_delta / 2.0
            && (point.longitude - self.center.longitude).abs() <= self.longitude_delta / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_bounds() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(
            Coordinate::new(90.5, 0.0),
            Err(FoodieError::InvalidCoordinate {
                latitude: 90.5,
                longitude: 0.0
            })
        );
        assert!(Coordinate::new(0.0, -180.1).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_parse_dataset_strings() {
        let parsed = Coordinate::parse(" 31.5204", "74.3587 ").unwrap();
        assert_eq!(parsed.latitude, 31.5204);
        assert_eq!(parsed.longitude, 74.3587);
        assert!(Coordinate::parse("north", "74.3").is_none());
        assert!(Coordinate::parse("", "").is_none());
        assert!(Coordinate::parse("120", "74.3").is_none());
    }

    #[test]
    fn test_region_contains_points_inside_viewport() {
        let region = MapRegion::around(Coordinate::new(31.5204, 74.3587).unwrap());
        assert!(region.contains(Coordinate::new(31.55, 74.37).unwrap()));
        assert!(!region.contains(Coordinate::new(31.60, 74.3587).unwrap()));
    }
}
