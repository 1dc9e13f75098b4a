use crate::types::coordinate::Coordinate;
use crate::types::location_status::LocationStatus;
use crate::types::proximity_result::ProximityResult;
use crate::types::session::User;
use serde::{Deserialize, Serialize};

/// State of the location tracker as shown by the map screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSnapshot {
    /// Last committed device position.
    pub coordinate: Option<Coordinate>,
    /// Progress of the most recent request.
    pub status: LocationStatus,
    /// Number of requests issued so far.
    pub generation: u64,
    /// Consumers currently subscribed to resolved positions.
    pub subscribers: usize,
}

impl LocationSnapshot {
    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbySnapshot {
    pub center: Option<Coordinate>,
    /// Radius exactly as typed by the user.
    pub radius_input: String,
    pub result: ProximityResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub loading: bool,
    /// Message of the last failed login or sign-up.
    pub error: Option<String>,
}
