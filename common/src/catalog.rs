use crate::error::{FoodieError, FoodieResult};
use crate::proximity::{RadiusKm, filter_nearby};
use crate::types::coordinate::Coordinate;
use crate::types::restaurant_info::RestaurantInfo;
use std::path::Path;

const BUNDLED_RESTAURANTS: &str = include_str!("../assets/restaurants.json");

/// Immutable list of restaurants shipped with the application.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantCatalog {
    restaurants: Vec<RestaurantInfo>,
}

impl RestaurantCatalog {
    /// Parses a JSON array of restaurants and resolves every position once.
    pub fn from_json(json: &str) -> FoodieResult<Self> {
        let mut restaurants: Vec<RestaurantInfo> =
            serde_json::from_str(json).map_err(|e| FoodieError::Catalog(e.to_string()))?;
        for restaurant in restaurants.iter_mut() {
            restaurant.resolve_position();
        }
        Ok(Self { restaurants })
    }

    pub fn bundled() -> FoodieResult<Self> {
        Self::from_json(BUNDLED_RESTAURANTS)
    }

    /// Loads a catalog from a JSON file instead of the bundled dataset.
    pub async fn load(path: impl AsRef<Path>) -> FoodieResult<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| FoodieError::Catalog(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn restaurants(&self) -> &[RestaurantInfo] {
        &self.restaurants
    }

    pub fn get(&self, index: usize) -> Option<&RestaurantInfo> {
        self.restaurants.get(index)
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    /// Number of entries whose coordinates could not be parsed.
    pub fn unlocated_count(&self) -> usize {
        self.restaurants
            .iter()
            .filter(|restaurant| restaurant.position.is_none())
            .count()
    }

    pub fn nearby(&self, center: Coordinate, radius: RadiusKm) -> Vec<RestaurantInfo> {
        filter_nearby(center, radius, &self.restaurants)
    }

    pub fn to_pretty_json(&self) -> FoodieResult<String> {
        serde_json::to_string_pretty(&self.restaurants).map_err(|e| FoodieError::Catalog(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proximity::parse_radius;

    #[test]
    fn test_bundled_catalog_is_fully_located() {
        let catalog = RestaurantCatalog::bundled().unwrap();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.unlocated_count(), 0);
    }

    #[test]
    fn test_from_json_keeps_malformed_entries_without_position() {
        let json = r#"[
            {"name": "A", "address": "x", "latitude": "31.5", "longitude": "74.3"},
            {"name": "B", "address": "y", "latitude": "", "longitude": "74.3"}
        ]"#;
        let catalog = RestaurantCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.unlocated_count(), 1);
        assert!(catalog.get(1).unwrap().position.is_none());
    }

    #[test]
    fn test_from_json_rejects_bad_documents() {
        let result = RestaurantCatalog::from_json("{\"name\": \"not a list\"}");
        assert!(matches!(result, Err(FoodieError::Catalog(_))));
    }

    #[test]
    fn test_pretty_json_round_trips_dataset_fields() {
        let catalog = RestaurantCatalog::bundled().unwrap();
        let json = catalog.to_pretty_json().unwrap();
        assert_eq!(RestaurantCatalog::from_json(&json).unwrap(), catalog);
    }

    #[test]
    fn test_nearby_around_gulberg() {
        let catalog = RestaurantCatalog::bundled().unwrap();
        let gulberg = Coordinate::new(31.5204, 74.3587).unwrap();
        let nearby = catalog.nearby(gulberg, parse_radius("2").unwrap());
        assert!(nearby.iter().any(|r| r.name == "Monal Lahore"));
        assert!(nearby.iter().all(|r| r.name != "Kababjees - Bahria Town"));
    }

    #[actix_rt::test]
    async fn test_load_missing_file_is_a_catalog_error() {
        let result = RestaurantCatalog::load("/definitely/not/here.json").await;
        assert!(matches!(result, Err(FoodieError::Catalog(_))));
    }
}
