use crate::messages::{
    GetLocationState, LocationResolved, LocationSubscription, RequestLocation, SubscribeLocation,
    UnsubscribeLocation,
};
use actix::prelude::*;
use colored::Color;
use common::error::{FoodieError, FoodieResult};
use common::gateways::{LocationProvider, Permission};
use common::logger::Logger;
use common::types::coordinate::Coordinate;
use common::types::dtos::LocationSnapshot;
use common::types::location_status::LocationStatus;
use std::collections::HashMap;
use std::sync::Arc;

/// The `LocationTracker` actor owns the device's current coordinate and runs
/// the permission-then-fetch cycle against the location provider.
///
/// ## Responsibilities:
/// - Ask for permission before every fetch and report denials.
/// - Commit the coordinate of the most recent request only. Each request gets
///   a generation number and completions of older generations are dropped.
/// - Push every committed coordinate to its subscribers.
pub struct LocationTracker {
    /// Device sensor.
    pub provider: Arc<dyn LocationProvider>,
    /// Last committed coordinate. Failures never touch it.
    pub coordinate: Option<Coordinate>,
    /// Progress of the latest request.
    pub status: LocationStatus,
    /// Generation of the latest request issued.
    pub generation: u64,
    /// Consumers notified on every resolved request.
    pub listeners: HashMap<u64, Recipient<LocationResolved>>,
    pub next_listener_id: u64,
    pub logger: Logger,
}

impl LocationTracker {
    pub fn new(provider: Arc<dyn LocationProvider>) -> Self {
        Self {
            provider,
            coordinate: None,
            status: LocationStatus::Idle,
            generation: 0,
            listeners: HashMap::new(),
            next_listener_id: 1,
            logger: Logger::new("Location Tracker", Color::Cyan),
        }
    }

    fn begin_request(&mut self) -> u64 {
        self.generation += 1;
        self.status = LocationStatus::Requesting;
        self.logger
            .debug(format!("Location request #{} started", self.generation));
        self.generation
    }

    fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Moves to `Fetching` when the permission was granted by the current request.
    fn on_permission(&mut self, generation: u64, permission: Permission) -> FoodieResult<()> {
        if !self.is_current(generation) {
            return Err(FoodieError::StaleLocation);
        }
        match permission {
            Permission::Granted => {
                self.status = LocationStatus::Fetching;
                Ok(())
            }
            Permission::Denied => Err(FoodieError::PermissionDenied),
        }
    }

    fn finish_request(
        &mut self,
        generation: u64,
        result: FoodieResult<Coordinate>,
    ) -> FoodieResult<Coordinate> {
        if !self.is_current(generation) {
            self.logger.debug(format!(
                "Dropping location request #{} superseded by #{}",
                generation, self.generation
            ));
            return Err(FoodieError::StaleLocation);
        }
        match result {
            Ok(coordinate) => {
                self.coordinate = Some(coordinate);
                self.status = LocationStatus::Resolved(coordinate);
                self.logger.info(format!("Location resolved at {}", coordinate));
                self.notify_listeners(coordinate, generation);
                Ok(coordinate)
            }
            Err(err) => {
                self.status = match &err {
                    FoodieError::PermissionDenied => LocationStatus::PermissionDenied,
                    FoodieError::LocationFetchFailed(reason) => {
                        LocationStatus::FetchFailed(reason.clone())
                    }
                    other => LocationStatus::FetchFailed(other.to_string()),
                };
                self.logger.warn(err.to_string());
                Err(err)
            }
        }
    }

    fn notify_listeners(&self, coordinate: Coordinate, generation: u64) {
        for listener in self.listeners.values() {
            listener.do_send(LocationResolved {
                coordinate,
                generation,
            });
        }
    }

    fn snapshot(&self) -> LocationSnapshot {
        LocationSnapshot {
            coordinate: self.coordinate,
            status: self.status.clone(),
            generation: self.generation,
            subscribers: self.listeners.len(),
        }
    }
}

impl Actor for LocationTracker {
    type Context = Context<Self>;
}

impl Handler<RequestLocation> for LocationTracker {
    type Result = ResponseActFuture<Self, FoodieResult<Coordinate>>;

    /// Permission is always resolved before the position is fetched. Requests
    /// are not cancelled when a newer one starts; their outcome is discarded.
    fn handle(&mut self, _msg: RequestLocation, _ctx: &mut Self::Context) -> Self::Result {
        let generation = self.begin_request();
        let permission = self.provider.request_permission();

        Box::pin(
            permission
                .into_actor(self)
                .then(move |permission, act, _ctx| {
                    let fetch = act
                        .on_permission(generation, permission)
                        .map(|_| act.provider.get_current_position());
                    async move {
                        match fetch {
                            Ok(position) => position.await,
                            Err(err) => Err(err),
                        }
                    }
                    .into_actor(act)
                })
                .map(move |result, act, _ctx| act.finish_request(generation, result)),
        )
    }
}

impl Handler<SubscribeLocation> for LocationTracker {
    type Result = MessageResult<SubscribeLocation>;

    fn handle(&mut self, msg: SubscribeLocation, _ctx: &mut Self::Context) -> Self::Result {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.insert(id, msg.listener);
        MessageResult(LocationSubscription {
            id,
            current: self.coordinate,
        })
    }
}

impl Handler<UnsubscribeLocation> for LocationTracker {
    type Result = ();

    fn handle(&mut self, msg: UnsubscribeLocation, _ctx: &mut Self::Context) -> Self::Result {
        self.listeners.remove(&msg.id);
    }
}

impl Handler<GetLocationState> for LocationTracker {
    type Result = MessageResult<GetLocationState>;

    fn handle(&mut self, _msg: GetLocationState, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.snapshot())
    }
}
