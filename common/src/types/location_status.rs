use crate::types::coordinate::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Progress of the latest location request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum LocationStatus {
    #[default]
    Idle,
    /// Waiting for the user to answer the permission prompt.
    Requesting,
    /// Permission granted, waiting for the sensor.
    Fetching,
    Resolved(Coordinate),
    PermissionDenied,
    FetchFailed(String),
}

impl LocationStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LocationStatus::Requesting | LocationStatus::Fetching)
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            LocationStatus::PermissionDenied | LocationStatus::FetchFailed(_)
        )
    }
}

impl fmt::Display for LocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationStatus::Idle => write!(f, "Location not requested yet"),
            LocationStatus::Requesting => write!(f, "Requesting location permission..."),
            LocationStatus::Fetching => write!(f, "Loading..."),
            LocationStatus::Resolved(coordinate) => write!(f, "Your location: {}", coordinate),
            LocationStatus::PermissionDenied => {
                write!(f, "Permission to access location was denied")
            }
            LocationStatus::FetchFailed(reason) => write!(f, "Failed to get location: {}", reason),
        }
    }
}
