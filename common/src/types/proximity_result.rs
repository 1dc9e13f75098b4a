use crate::proximity::RadiusKm;
use crate::types::coordinate::Coordinate;
use crate::types::restaurant_info::RestaurantInfo;
use serde::{Deserialize, Serialize};

/// Outcome of the nearby-restaurants filter as seen by the screen.
///
/// `NotComputed` means no location was available yet, which the screen must
/// not confuse with an empty `Computed` result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum ProximityResult {
    #[default]
    NotComputed,
    Computed {
        /// Device location the filter measured distances from.
        center: Coordinate,
        radius: RadiusKm,
        restaurants: Vec<RestaurantInfo>,
    },
}

impl ProximityResult {
    pub fn is_computed(&self) -> bool {
        matches!(self, ProximityResult::Computed { .. })
    }

    pub fn center(&self) -> Option<Coordinate> {
        match self {
            ProximityResult::NotComputed => None,
            ProximityResult::Computed { center, .. } => Some(*center),
        }
    }

    pub fn restaurants(&self) -> &[RestaurantInfo] {
        match self {
            ProximityResult::NotComputed => &[],
            ProximityResult::Computed { restaurants, .. } => restaurants,
        }
    }

    /// Message shown when a real computation found nothing.
    pub fn empty_message(&self) -> Option<String> {
        match self {
            ProximityResult::Computed {
                radius,
                restaurants,
                ..
            } if restaurants.is_empty() => Some(format!(
                "No restaurants found within {} km",
                radius.km()
            )),
            _ => None,
        }
    }
}
