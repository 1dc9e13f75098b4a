use crate::client_actors::location_tracker::LocationTracker;
use crate::messages::{
    ApplyRadius, GetNearbyState, LocationResolved, RequestLocation, Shutdown, SubscribeLocation,
    UnsubscribeLocation,
};
use actix::prelude::*;
use colored::Color;
use common::catalog::RestaurantCatalog;
use common::constants::DEFAULT_RADIUS_KM;
use common::error::FoodieResult;
use common::logger::Logger;
use common::proximity::parse_radius;
use common::types::coordinate::Coordinate;
use common::types::dtos::NearbySnapshot;
use common::types::proximity_result::ProximityResult;
use std::sync::Arc;

/// The `NearbyRestaurants` actor backs the "In Your Area" screen. It lives as
/// long as the screen is mounted.
///
/// ## Responsibilities:
/// - Subscribe to the location tracker and start a location request on mount.
/// - Keep the radius typed by the user and re-run the proximity filter every
///   time the radius or the device location changes.
/// - Leave the last result untouched when the radius is invalid or no
///   location is known yet.
pub struct NearbyRestaurants {
    /// Restaurants bundled with the application.
    pub catalog: Arc<RestaurantCatalog>,
    /// The address of the tracker providing device locations.
    pub tracker: Addr<LocationTracker>,
    /// Latest device location. The result keeps its own center, which lags
    /// behind this one while the radius text is invalid.
    pub center: Option<Coordinate>,
    /// Radius text as typed by the user.
    pub radius_input: String,
    pub result: ProximityResult,
    pub subscription_id: Option<u64>,
    pub logger: Logger,
}

impl NearbyRestaurants {
    pub fn new(catalog: Arc<RestaurantCatalog>, tracker: Addr<LocationTracker>) -> Self {
        Self {
            catalog,
            tracker,
            center: None,
            radius_input: DEFAULT_RADIUS_KM.to_string(),
            result: ProximityResult::NotComputed,
            subscription_id: None,
            logger: Logger::new("Nearby Restaurants", Color::Green),
        }
    }

    /// Re-runs the filter with the current center and radius text. The radius
    /// is validated even when no location is known yet.
    fn refresh(&mut self) -> FoodieResult<()> {
        let radius = parse_radius(&self.radius_input)?;
        let Some(center) = self.center else {
            self.logger
                .debug("No device location yet, keeping the previous result.");
            return Ok(());
        };
        let restaurants = self.catalog.nearby(center, radius);
        if restaurants.is_empty() {
            self.logger
                .warn(format!("No restaurants found within {}.", radius));
        } else {
            self.logger.info(format!(
                "Found {} nearby restaurants within {} of {}",
                restaurants.len(),
                radius,
                center
            ));
        }
        self.result = ProximityResult::Computed {
            center,
            radius,
            restaurants,
        };
        Ok(())
    }

    fn snapshot(&self) -> NearbySnapshot {
        NearbySnapshot {
            center: self.center,
            radius_input: self.radius_input.clone(),
            result: self.result.clone(),
        }
    }
}

impl Actor for NearbyRestaurants {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let listener = ctx.address().recipient();
        self.tracker
            .send(SubscribeLocation { listener })
            .into_actor(self)
            .map(|res, act, _ctx| match res {
                Ok(subscription) => {
                    act.subscription_id = Some(subscription.id);
                    if let Some(current) = subscription.current {
                        act.center = Some(current);
                        if let Err(err) = act.refresh() {
                            act.logger.warn(err.to_string());
                        }
                    }
                    act.tracker.do_send(RequestLocation);
                }
                Err(err) => {
                    act.logger
                        .error(format!("Could not subscribe to location updates: {}", err));
                }
            })
            .wait(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(id) = self.subscription_id.take() {
            self.tracker.do_send(UnsubscribeLocation { id });
        }
    }
}

impl Handler<ApplyRadius> for NearbyRestaurants {
    type Result = FoodieResult<NearbySnapshot>;

    fn handle(&mut self, msg: ApplyRadius, _ctx: &mut Self::Context) -> Self::Result {
        self.radius_input = msg.input;
        if let Err(err) = self.refresh() {
            self.logger.warn(err.to_string());
            return Err(err);
        }
        Ok(self.snapshot())
    }
}

impl Handler<LocationResolved> for NearbyRestaurants {
    type Result = ();

    fn handle(&mut self, msg: LocationResolved, _ctx: &mut Self::Context) -> Self::Result {
        self.center = Some(msg.coordinate);
        if let Err(err) = self.refresh() {
            self.logger.warn(format!(
                "Location #{} received but the filter did not run: {}",
                msg.generation, err
            ));
        }
    }
}

impl Handler<Shutdown> for NearbyRestaurants {
    type Result = ();

    fn handle(&mut self, _msg: Shutdown, ctx: &mut Self::Context) -> Self::Result {
        self.logger.debug("Screen closed.");
        ctx.stop();
    }
}

impl Handler<GetNearbyState> for NearbyRestaurants {
    type Result = MessageResult<GetNearbyState>;

    fn handle(&mut self, _msg: GetNearbyState, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::GetLocationState;
    use common::error::FoodieError;
    use common::gateways::{Permission, SimulatedLocationProvider};
    use common::types::location_status::LocationStatus;
    use common::types::restaurant_info::RestaurantInfo;

    const LAHORE: (f64, f64) = (31.5204, 74.3587);

    fn lahore() -> Coordinate {
        Coordinate::new(LAHORE.0, LAHORE.1).unwrap()
    }

    /// About 3.2 km and 8.9 km north of the centre, plus a broken entry.
    fn catalog() -> Arc<RestaurantCatalog> {
        Arc::new(
            RestaurantCatalog::from_json(
                r#"[
                    {"name": "Close", "address": "Gulberg", "latitude": "31.549146", "longitude": "74.3587"},
                    {"name": "Far", "address": "Shahdara", "latitude": "31.600351", "longitude": "74.3587"},
                    {"name": "Broken", "address": "?", "latitude": "n/a", "longitude": "74.3587"}
                ]"#,
            )
            .unwrap(),
        )
    }

    fn names(restaurants: &[RestaurantInfo]) -> Vec<&str> {
        restaurants.iter().map(|r| r.name.as_str()).collect()
    }

    /// Starts the screen actor and waits for its mount-time location request.
    async fn mount(
        permission: Permission,
    ) -> (
        SimulatedLocationProvider,
        Addr<LocationTracker>,
        Addr<NearbyRestaurants>,
    ) {
        let provider = SimulatedLocationProvider::new(permission, lahore());
        let tracker = LocationTracker::new(Arc::new(provider.clone())).start();
        let nearby = NearbyRestaurants::new(catalog(), tracker.clone()).start();
        settle(&tracker, &nearby).await;
        (provider, tracker, nearby)
    }

    /// Waits until the latest location request has resolved and its
    /// notification reached the screen.
    async fn settle(tracker: &Addr<LocationTracker>, nearby: &Addr<NearbyRestaurants>) {
        nearby.send(GetNearbyState).await.unwrap();
        loop {
            let state = tracker.send(GetLocationState).await.unwrap();
            if state.generation > 0 && !state.is_loading() {
                break;
            }
            tokio::task::yield_now().await;
        }
        nearby.send(GetNearbyState).await.unwrap();
    }

    #[actix_rt::test]
    async fn test_mount_filters_with_default_radius() {
        let (_provider, _tracker, nearby) = mount(Permission::Granted).await;

        let state = nearby.send(GetNearbyState).await.unwrap();
        assert_eq!(state.center, Some(lahore()));
        assert_eq!(state.radius_input, "5");
        assert_eq!(names(state.result.restaurants()), vec!["Close"]);
    }

    #[actix_rt::test]
    async fn test_larger_radius_includes_far_restaurant() {
        let (_provider, _tracker, nearby) = mount(Permission::Granted).await;

        let state = nearby
            .send(ApplyRadius {
                input: "10".to_string(),
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(names(state.result.restaurants()), vec!["Close", "Far"]);
    }

    #[actix_rt::test]
    async fn test_invalid_radius_keeps_previous_result() {
        let (_provider, _tracker, nearby) = mount(Permission::Granted).await;
        let before = nearby.send(GetNearbyState).await.unwrap().result;

        for input in ["abc", "-5", "0"] {
            let outcome = nearby
                .send(ApplyRadius {
                    input: input.to_string(),
                })
                .await
                .unwrap();
            assert_eq!(outcome, Err(FoodieError::InvalidRadius(input.to_string())));
            let after = nearby.send(GetNearbyState).await.unwrap();
            assert_eq!(after.result, before);
            assert_eq!(after.radius_input, input);
        }
    }

    #[actix_rt::test]
    async fn test_tiny_radius_computes_an_empty_result() {
        let (_provider, _tracker, nearby) = mount(Permission::Granted).await;

        let state = nearby
            .send(ApplyRadius {
                input: "0.5".to_string(),
            })
            .await
            .unwrap()
            .unwrap();
        assert!(state.result.is_computed());
        assert!(state.result.restaurants().is_empty());
        assert_eq!(
            state.result.empty_message().as_deref(),
            Some("No restaurants found within 0.5 km")
        );
    }

    #[actix_rt::test]
    async fn test_permission_denied_never_runs_the_filter() {
        let (_provider, tracker, nearby) = mount(Permission::Denied).await;

        let location = tracker.send(GetLocationState).await.unwrap();
        assert_eq!(location.status, LocationStatus::PermissionDenied);
        assert_eq!(location.coordinate, None);

        let applied = nearby
            .send(ApplyRadius {
                input: "50".to_string(),
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(applied.center, None);
        assert_eq!(applied.result, ProximityResult::NotComputed);
        assert_eq!(applied.result.empty_message(), None);
    }

    #[actix_rt::test]
    async fn test_invalid_radius_is_reported_without_a_location() {
        let (_provider, _tracker, nearby) = mount(Permission::Denied).await;

        let outcome = nearby
            .send(ApplyRadius {
                input: "abc".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(outcome, Err(FoodieError::InvalidRadius("abc".to_string())));

        let state = nearby.send(GetNearbyState).await.unwrap();
        assert_eq!(state.radius_input, "abc");
        assert_eq!(state.result, ProximityResult::NotComputed);
    }

    #[actix_rt::test]
    async fn test_result_keeps_its_center_while_radius_is_invalid() {
        let (_provider, _tracker, nearby) = mount(Permission::Granted).await;
        let computed = nearby
            .send(ApplyRadius {
                input: "3".to_string(),
            })
            .await
            .unwrap()
            .unwrap()
            .result;
        assert!(nearby
            .send(ApplyRadius {
                input: "abc".to_string(),
            })
            .await
            .unwrap()
            .is_err());

        let shahdara = Coordinate::new(31.600351, 74.3587).unwrap();
        nearby
            .send(LocationResolved {
                coordinate: shahdara,
                generation: 7,
            })
            .await
            .unwrap();

        let state = nearby.send(GetNearbyState).await.unwrap();
        assert_eq!(state.center, Some(shahdara));
        assert_eq!(state.result, computed);
        assert_eq!(state.result.center(), Some(lahore()));
        assert_eq!(names(state.result.restaurants()), vec!["Close"]);
    }

    #[actix_rt::test]
    async fn test_new_location_recomputes_with_existing_radius() {
        let (_provider, _tracker, nearby) = mount(Permission::Granted).await;
        nearby
            .send(ApplyRadius {
                input: "3".to_string(),
            })
            .await
            .unwrap()
            .unwrap();

        let shahdara = Coordinate::new(31.600351, 74.3587).unwrap();
        nearby
            .send(LocationResolved {
                coordinate: shahdara,
                generation: 7,
            })
            .await
            .unwrap();

        let state = nearby.send(GetNearbyState).await.unwrap();
        assert_eq!(state.center, Some(shahdara));
        assert_eq!(state.result.center(), Some(shahdara));
        assert_eq!(names(state.result.restaurants()), vec!["Far"]);
    }

    #[actix_rt::test]
    async fn test_regranted_permission_fills_the_list_on_next_request() {
        let (provider, tracker, nearby) = mount(Permission::Denied).await;
        assert_eq!(
            nearby.send(GetNearbyState).await.unwrap().result,
            ProximityResult::NotComputed
        );

        provider.set_permission(Permission::Granted);
        let located = tracker.send(RequestLocation).await.unwrap();
        assert_eq!(located, Ok(lahore()));
        settle(&tracker, &nearby).await;

        let state = nearby.send(GetNearbyState).await.unwrap();
        assert_eq!(state.center, Some(lahore()));
        assert_eq!(names(state.result.restaurants()), vec!["Close"]);
    }

    #[actix_rt::test]
    async fn test_shutdown_unsubscribes_from_the_tracker() {
        let (_provider, tracker, nearby) = mount(Permission::Granted).await;
        assert_eq!(tracker.send(GetLocationState).await.unwrap().subscribers, 1);

        nearby.send(Shutdown).await.unwrap();
        while nearby.connected() {
            tokio::task::yield_now().await;
        }
        // The unsubscribe is queued before any later query.
        let state = tracker.send(GetLocationState).await.unwrap();
        assert_eq!(state.subscribers, 0);
        assert_eq!(state.coordinate, Some(lahore()));
    }
}
