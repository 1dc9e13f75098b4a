use crate::constants::METERS_PER_KM;
use crate::error::{FoodieError, FoodieResult};
use crate::types::coordinate::Coordinate;
use crate::types::restaurant_info::RestaurantInfo;
use crate::utils::distance_meters;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Search radius entered by the user. Always finite and strictly positive.
///
/// The filter compares against `meters`, so a radius built from a measured
/// distance includes that exact point. Radii too large to express in meters
/// saturate at `f64::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusKm {
    km: f64,
    meters: f64,
}

fn is_valid_length(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl RadiusKm {
    pub fn new(km: f64) -> FoodieResult<Self> {
        if !is_valid_length(km) {
            return Err(FoodieError::InvalidRadius(km.to_string()));
        }
        Ok(Self {
            km,
            meters: (km * METERS_PER_KM).min(f64::MAX),
        })
    }

    pub fn from_meters(meters: f64) -> FoodieResult<Self> {
        if !is_valid_length(meters) {
            return Err(FoodieError::InvalidRadius(meters.to_string()));
        }
        Ok(Self {
            km: meters / METERS_PER_KM,
            meters,
        })
    }

    pub fn km(&self) -> f64 {
        self.km
    }

    pub fn meters(&self) -> f64 {
        self.meters
    }
}

impl fmt::Display for RadiusKm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} km", self.km())
    }
}

/// Parses the radius typed by the user.
///
/// Text that is not a number, is not finite, or is not greater than zero is
/// rejected with [`FoodieError::InvalidRadius`] carrying the original input.
pub fn parse_radius(input: &str) -> FoodieResult<RadiusKm> {
    let invalid = || FoodieError::InvalidRadius(input.to_string());
    let km = input.trim().parse::<f64>().map_err(|_| invalid())?;
    RadiusKm::new(km).map_err(|_| invalid())
}

/// Returns the restaurants whose great-circle distance to `center` is at most
/// `radius`, in catalog order. Entries without a parsed position never match.
pub fn filter_nearby(
    center: Coordinate,
    radius: RadiusKm,
    restaurants: &[RestaurantInfo],
) -> Vec<RestaurantInfo> {
    restaurants
        .iter()
        .filter(|restaurant| {
            restaurant
                .position
                .is_some_and(|position| distance_meters(center, position) <= radius.meters())
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lahore() -> Coordinate {
        Coordinate::new(31.5204, 74.3587).unwrap()
    }

    /// Restaurant due north of Lahore's centre at roughly `km` kilometres.
    fn north_of_lahore(name: &str, km: f64) -> RestaurantInfo {
        let meters_per_degree = crate::constants::EARTH_RADIUS_METERS * 1f64.to_radians();
        let latitude = 31.5204 + km * METERS_PER_KM / meters_per_degree;
        RestaurantInfo::new(name, "Lahore", latitude.to_string(), "74.3587")
    }

    #[test]
    fn test_parse_radius_accepts_positive_numbers() {
        assert_eq!(parse_radius("5").unwrap().km(), 5.0);
        assert_eq!(parse_radius(" 2.5 ").unwrap().meters(), 2500.0);
    }

    #[test]
    fn test_parse_radius_rejects_invalid_input() {
        for input in ["abc", "-5", "0", "", "NaN", "inf", "5km"] {
            assert_eq!(
                parse_radius(input),
                Err(FoodieError::InvalidRadius(input.to_string())),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_huge_radius_saturates_instead_of_failing() {
        let radius = parse_radius("1e306").unwrap();
        assert_eq!(radius.km(), 1e306);
        assert_eq!(radius.meters(), f64::MAX);

        let catalog = vec![north_of_lahore("Close", 1.0), north_of_lahore("Far", 5000.0)];
        assert_eq!(filter_nearby(lahore(), radius, &catalog), catalog);
        assert!(RadiusKm::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_lahore_scenario_keeps_only_the_close_restaurant() {
        let close = north_of_lahore("Close", 3.2);
        let far = north_of_lahore("Far", 8.9);
        let catalog = vec![close.clone(), far];

        let nearby = filter_nearby(lahore(), parse_radius("5").unwrap(), &catalog);

        assert_eq!(nearby, vec![close]);
    }

    #[test]
    fn test_boundary_distance_is_included() {
        let restaurant = north_of_lahore("Edge", 4.0);
        let exact = distance_meters(lahore(), restaurant.position.unwrap());
        let catalog = vec![restaurant.clone()];

        let radius = RadiusKm::from_meters(exact).unwrap();
        assert_eq!(filter_nearby(lahore(), radius, &catalog), vec![restaurant]);

        let shorter = RadiusKm::from_meters(exact - 0.01).unwrap();
        assert!(filter_nearby(lahore(), shorter, &catalog).is_empty());
    }

    #[test]
    fn test_result_keeps_catalog_order() {
        let catalog = vec![
            north_of_lahore("Third closest", 3.0),
            north_of_lahore("Closest", 1.0),
            north_of_lahore("Second closest", 2.0),
        ];
        let nearby = filter_nearby(lahore(), parse_radius("10").unwrap(), &catalog);
        let names: Vec<&str> = nearby.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Third closest", "Closest", "Second closest"]);
    }

    #[test]
    fn test_malformed_entries_never_match() {
        let catalog = vec![
            RestaurantInfo::new("Broken", "Lahore", "not-a-number", "74.3587"),
            RestaurantInfo::new("Out of range", "Lahore", "131.52", "74.3587"),
            north_of_lahore("Fine", 0.5),
        ];
        let nearby = filter_nearby(lahore(), parse_radius("20000").unwrap(), &catalog);
        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby[0].name, "Fine");
    }

    #[test]
    fn test_included_and_excluded_respect_radius() {
        let catalog: Vec<RestaurantInfo> = (0..40)
            .map(|i| north_of_lahore(&format!("R{i}"), i as f64 * 0.37))
            .collect();
        for input in ["0.1", "1", "3.7", "7.5", "12"] {
            let radius = parse_radius(input).unwrap();
            let nearby = filter_nearby(lahore(), radius, &catalog);
            for restaurant in &catalog {
                let distance = distance_meters(lahore(), restaurant.position.unwrap());
                assert_eq!(
                    nearby.contains(restaurant),
                    distance <= radius.meters(),
                    "{} at {distance} m with radius {radius}",
                    restaurant.name
                );
            }
        }
    }

    #[test]
    fn test_filter_is_idempotent() {
        let catalog: Vec<RestaurantInfo> = (0..10)
            .map(|i| north_of_lahore(&format!("R{i}"), i as f64))
            .collect();
        let radius = parse_radius("4.5").unwrap();
        let first = filter_nearby(lahore(), radius, &catalog);
        let second = filter_nearby(lahore(), radius, &catalog);
        assert_eq!(first, second);
    }
}
