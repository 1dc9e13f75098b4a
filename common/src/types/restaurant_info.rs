use crate::types::coordinate::Coordinate;
use serde::{Deserialize, Serialize};

/// One restaurant of the bundled dataset.
///
/// Coordinates are kept as the strings found in the dataset; `position` is
/// filled once when the catalog is loaded and stays `None` for entries whose
/// coordinates cannot be parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantInfo {
    pub name: String,
    pub address: String,
    pub latitude: String,
    pub longitude: String,
    #[serde(skip)]
    pub position: Option<Coordinate>,
}

impl RestaurantInfo {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
    ) -> Self {
        let mut info = Self {
            name: name.into(),
            address: address.into(),
            latitude: latitude.into(),
            longitude: longitude.into(),
            position: None,
        };
        info.resolve_position();
        info
    }

    pub(crate) fn resolve_position(&mut self) {
        self.position = Coordinate::parse(&self.latitude, &self.longitude);
    }

    /// Identifier of the map marker drawn for this restaurant.
    pub fn marker_key(&self) -> String {
        match self.position {
            Some(position) => format!("{}-{}-{}", self.name, position.latitude, position.longitude),
            None => format!("{}-{}-{}", self.name, self.latitude, self.longitude),
        }
    }
}
