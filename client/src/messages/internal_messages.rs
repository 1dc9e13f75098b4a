use actix::{Message, Recipient};
use common::types::coordinate::Coordinate;
use common::types::dtos::{LocationSnapshot, NearbySnapshot, SessionSnapshot};
use common::types::screen::Screen;

/// Pushed by the tracker to its subscribers whenever a request resolves.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct LocationResolved {
    pub coordinate: Coordinate,
    pub generation: u64,
}

#[derive(Message)]
#[rtype(result = "LocationSubscription")]
pub struct SubscribeLocation {
    pub listener: Recipient<LocationResolved>,
}

#[derive(Debug, Clone)]
pub struct LocationSubscription {
    pub id: u64,
    /// Position already known when the subscription was made.
    pub current: Option<Coordinate>,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct UnsubscribeLocation {
    pub id: u64,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "LocationSnapshot")]
pub struct GetLocationState;

#[derive(Message, Debug, Clone)]
#[rtype(result = "NearbySnapshot")]
pub struct GetNearbyState;

#[derive(Message, Debug, Clone)]
#[rtype(result = "SessionSnapshot")]
pub struct GetSessionState;

#[derive(Message, Debug, Clone)]
#[rtype(result = "Screen")]
pub struct GetScreen;

/// Asks a screen-scoped actor to stop, releasing its subscriptions.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct Shutdown;
