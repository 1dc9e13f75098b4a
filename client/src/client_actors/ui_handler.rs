use crate::client_actors::location_tracker::LocationTracker;
use crate::client_actors::nearby_restaurants::NearbyRestaurants;
use crate::client_actors::screen_flow::ScreenFlow;
use crate::client_actors::session_manager::SessionManager;
use crate::messages::{
    ApplyRadius, FinishSplash, GetLocationState, GetNearbyState, GetSessionState, GoBack, Login,
    Logout, Navigate, RequestLocation, ResetTo, ResolveInitialScreen, Shutdown, SignUp,
};
use actix::prelude::*;
use colored::*;
use common::catalog::RestaurantCatalog;
use common::error::{FoodieError, FoodieResult};
use common::gateways::{Permission, SimulatedLocationProvider};
use common::logger::Logger;
use common::types::coordinate::MapRegion;
use common::types::dtos::{LocationSnapshot, NearbySnapshot};
use common::types::home_feed::{CATEGORIES, CUISINES, FEATURED_RESTAURANTS};
use common::types::location_status::LocationStatus;
use common::types::restaurant_info::RestaurantInfo;
use common::types::screen::Screen;
use common::types::session::User;
use common::utils::{distance_meters, meters_to_km};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

const LOCATION_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// What an input line did to the navigation stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Stay,
    /// A new screen was pushed or the stack was reset.
    Mounted(Screen),
    /// Back navigation uncovered an already mounted screen.
    Returned(Screen),
}

/// UIHandler: line-oriented terminal front end.
///
/// Reads one command per line from stdin, forwards it to the actor owning the
/// relevant state and renders the resulting screen. It also owns the
/// lifetime of the screen-scoped `NearbyRestaurants` actor.
pub struct UIHandler {
    pub catalog: Arc<RestaurantCatalog>,
    /// Handle on the simulated device, used by the permission toggle.
    pub sensor: SimulatedLocationProvider,
    pub tracker: Addr<LocationTracker>,
    pub session: Addr<SessionManager>,
    pub flow: Addr<ScreenFlow>,
    pub nearby: Option<Addr<NearbyRestaurants>>,
    pub logger: Logger,
}

impl UIHandler {
    pub fn new(
        catalog: Arc<RestaurantCatalog>,
        sensor: SimulatedLocationProvider,
        tracker: Addr<LocationTracker>,
        session: Addr<SessionManager>,
        flow: Addr<ScreenFlow>,
    ) -> Self {
        Self {
            catalog,
            sensor,
            tracker,
            session,
            flow,
            nearby: None,
            logger: Logger::new("UI", Color::White),
        }
    }

    /// Runs until `q` or the end of input.
    pub async fn run(&mut self) -> FoodieResult<()> {
        let mut screen = self.flow.send(ResolveInitialScreen).await?;
        self.logger.debug(format!("Initial screen: {}", screen));
        self.enter(screen).await?;
        self.render(screen).await?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let line = lines
                .next_line()
                .await
                .map_err(|e| FoodieError::Config(format!("cannot read stdin: {}", e)))?;
            let Some(line) = line else { break };
            let input = line.trim();
            if input == "q" {
                break;
            }

            match self.dispatch(screen, input).await {
                Ok(Outcome::Stay) => {}
                Ok(Outcome::Mounted(next)) => {
                    self.leave(screen, next).await;
                    self.enter(next).await?;
                    screen = next;
                }
                Ok(Outcome::Returned(next)) => {
                    self.leave(screen, next).await;
                    screen = next;
                }
                Err(err) => alert(&err),
            }
            self.render(screen).await?;
        }

        self.close_nearby().await;
        self.logger.info("Bye!");
        Ok(())
    }

    async fn dispatch(&mut self, screen: Screen, input: &str) -> FoodieResult<Outcome> {
        if input == "b" {
            return Ok(Outcome::Returned(self.flow.send(GoBack).await?));
        }
        let mut words = input.split_whitespace();
        let command = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();

        match (screen, command, args.as_slice()) {
            (Screen::Splash, _, _) => Ok(Outcome::Mounted(self.flow.send(FinishSplash).await??)),

            (Screen::Login, "login", [email, password]) => {
                let attempt = self
                    .session
                    .send(Login {
                        email: email.to_string(),
                        password: password.to_string(),
                    })
                    .await?;
                self.after_auth(attempt).await
            }
            (Screen::Login, "signup", []) => {
                Ok(Outcome::Mounted(self.flow.send(Navigate(Screen::SignUp)).await??))
            }
            (Screen::SignUp, "signup", [email, password]) => {
                let attempt = self
                    .session
                    .send(SignUp {
                        email: email.to_string(),
                        password: password.to_string(),
                    })
                    .await?;
                self.after_auth(attempt).await
            }
            (Screen::SignUp, "login", []) => Ok(Outcome::Returned(self.flow.send(GoBack).await?)),

            (Screen::Home, "r", []) => self.navigate(Screen::Restaurant).await,
            (Screen::Home, "m", []) => self.navigate(Screen::Map).await,
            (Screen::Home, "j", []) => self.navigate(Screen::JsonPage).await,
            (Screen::Home, "logout", []) => {
                self.session.send(Logout).await??;
                Ok(Outcome::Mounted(self.flow.send(ResetTo(Screen::Login)).await?))
            }

            (Screen::Restaurant, number, []) => match number.parse::<usize>() {
                Ok(n) if n >= 1 && self.catalog.get(n - 1).is_some() => {
                    self.navigate(Screen::RestaurantDetail(n - 1)).await
                }
                _ => Err(FoodieError::Navigation(format!(
                    "pick a restaurant between 1 and {}",
                    self.catalog.len()
                ))),
            },

            (Screen::Map | Screen::NearbyRestaurants, "l", []) => {
                self.locate().await?;
                Ok(Outcome::Stay)
            }
            (Screen::Map | Screen::NearbyRestaurants, "p", []) => {
                self.toggle_permission();
                Ok(Outcome::Stay)
            }
            (Screen::Map, "n", []) => self.navigate(Screen::NearbyRestaurants).await,
            (Screen::NearbyRestaurants, radius, []) => {
                let nearby = self.nearby_screen()?;
                nearby
                    .send(ApplyRadius {
                        input: radius.to_string(),
                    })
                    .await??;
                Ok(Outcome::Stay)
            }

            _ => {
                println!("{}", format!("Unknown command '{}'", input).yellow());
                Ok(Outcome::Stay)
            }
        }
    }

    async fn navigate(&self, screen: Screen) -> FoodieResult<Outcome> {
        Ok(Outcome::Mounted(self.flow.send(Navigate(screen)).await??))
    }

    /// Auth failures are shown by the auth screen itself.
    async fn after_auth(&self, attempt: FoodieResult<User>) -> FoodieResult<Outcome> {
        match attempt {
            Ok(_) => Ok(Outcome::Mounted(self.flow.send(ResetTo(Screen::Home)).await?)),
            Err(FoodieError::AuthFailure(_)) => Ok(Outcome::Stay),
            Err(err) => Err(err),
        }
    }

    /// Mount effects of a freshly shown screen.
    async fn enter(&mut self, screen: Screen) -> FoodieResult<()> {
        match screen {
            Screen::Map => self.locate().await,
            Screen::NearbyRestaurants => {
                let nearby =
                    NearbyRestaurants::new(self.catalog.clone(), self.tracker.clone()).start();
                // Returns once the actor has subscribed and asked for a location.
                nearby.send(GetNearbyState).await?;
                self.nearby = Some(nearby);
                self.wait_for_location().await.map(|_| ())
            }
            _ => Ok(()),
        }
    }

    async fn leave(&mut self, from: Screen, to: Screen) {
        if from == Screen::NearbyRestaurants && to != Screen::NearbyRestaurants {
            self.close_nearby().await;
        }
    }

    async fn close_nearby(&mut self) {
        if let Some(nearby) = self.nearby.take() {
            if let Err(err) = nearby.send(Shutdown).await {
                self.logger
                    .warn(format!("Nearby screen already gone: {}", err));
            }
        }
    }

    fn nearby_screen(&self) -> FoodieResult<&Addr<NearbyRestaurants>> {
        self.nearby
            .as_ref()
            .ok_or_else(|| FoodieError::Navigation("nearby screen is not mounted".to_string()))
    }

    /// Locate button. Failures are reported to the user, not propagated.
    async fn locate(&self) -> FoodieResult<()> {
        match self.tracker.send(RequestLocation).await? {
            Ok(coordinate) => {
                self.logger
                    .debug(format!("Located the device at {}", coordinate));
            }
            Err(FoodieError::StaleLocation) => {}
            Err(err) => alert(&err),
        }
        Ok(())
    }

    async fn wait_for_location(&self) -> FoodieResult<LocationSnapshot> {
        loop {
            let state = self.tracker.send(GetLocationState).await?;
            if !state.is_loading() {
                return Ok(state);
            }
            tokio::time::sleep(LOCATION_POLL_INTERVAL).await;
        }
    }

    fn toggle_permission(&self) {
        let next = match self.sensor.permission() {
            Permission::Granted => Permission::Denied,
            Permission::Denied => Permission::Granted,
        };
        self.sensor.set_permission(next);
        println!(
            "{}",
            format!(
                "Location permission is now {:?}. Press 'l' to locate again.",
                next
            )
            .cyan()
        );
    }

    async fn render(&self, screen: Screen) -> FoodieResult<()> {
        let lines = match screen {
            Screen::Splash => splash_lines(),
            Screen::Login | Screen::SignUp => {
                let state = self.session.send(GetSessionState).await?;
                auth_lines(screen, state.error.as_deref())
            }
            Screen::Home => {
                let state = self.session.send(GetSessionState).await?;
                home_lines(state.user.as_ref())
            }
            Screen::Restaurant => restaurant_list_lines(self.catalog.restaurants()),
            Screen::RestaurantDetail(index) => restaurant_detail_lines(self.catalog.get(index)),
            Screen::JsonPage => self
                .catalog
                .to_pretty_json()?
                .lines()
                .map(str::to_string)
                .collect(),
            Screen::Map => map_lines(&self.tracker.send(GetLocationState).await?),
            Screen::NearbyRestaurants => {
                let nearby = self.nearby_screen()?.send(GetNearbyState).await?;
                let location = self.tracker.send(GetLocationState).await?;
                nearby_screen_lines(&nearby, &location)
            }
        };

        println!();
        println!("{}", format!("=== {} ===", screen.title()).bold());
        for line in lines {
            println!("{}", line);
        }
        println!("{}", hint(screen).dimmed());
        Ok(())
    }
}

fn alert(err: &FoodieError) {
    println!("{} {}", "!".bold().bright_red(), err.to_string().bright_red());
}

pub fn welcome_banner() -> String {
    format!(
        "{}\n{}",
        "Foodie Moodie".bold().bright_red(),
        "Food delivery in your terminal. Type 'q' to quit, 'b' to go back.".dimmed()
    )
}

fn hint(screen: Screen) -> &'static str {
    match screen {
        Screen::Splash => "[enter] continue",
        Screen::Login => "login <email> <password> | signup",
        Screen::SignUp => "signup <email> <password> | login",
        Screen::Home => "r restaurants | m map | j restaurant data | logout",
        Screen::Restaurant => "<number> details | b back",
        Screen::RestaurantDetail(_) | Screen::JsonPage => "b back",
        Screen::Map => "l locate | n in your area | p toggle permission | b back",
        Screen::NearbyRestaurants => "<range in km> filter | l locate | p toggle permission | b back",
    }
}

pub fn splash_lines() -> Vec<String> {
    vec![
        "Welcome to Foodie Moodie!".to_string(),
        "Your favourite restaurants, delivered.".to_string(),
    ]
}

pub fn auth_lines(screen: Screen, error: Option<&str>) -> Vec<String> {
    let mut lines = match screen {
        Screen::SignUp => vec!["Create an account with your email and a password.".to_string()],
        _ => vec!["Sign in with your email and password.".to_string()],
    };
    if let Some(error) = error {
        lines.push(format!("Error: {}", error));
    }
    lines
}

pub fn home_lines(user: Option<&User>) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(user) = user {
        lines.push(format!("Hello, {}", user.email));
    }
    lines.push("Categories:".to_string());
    lines.extend(CATEGORIES.iter().map(|c| format!("  - {}", c.title)));
    lines.push("Cuisines:".to_string());
    lines.extend(CUISINES.iter().map(|c| format!("  - {}", c.title)));
    lines.push("Featured restaurants:".to_string());
    lines.extend(
        FEATURED_RESTAURANTS
            .iter()
            .map(|r| format!("  - {} ({})", r.name, r.delivery_time)),
    );
    lines
}

pub fn restaurant_list_lines(restaurants: &[RestaurantInfo]) -> Vec<String> {
    restaurants
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{:>3}. {}", i + 1, r.name))
        .collect()
}

pub fn restaurant_detail_lines(restaurant: Option<&RestaurantInfo>) -> Vec<String> {
    let Some(restaurant) = restaurant else {
        return vec!["Restaurant not found.".to_string()];
    };
    let location = match restaurant.position {
        Some(position) => position.to_string(),
        None => "unknown location".to_string(),
    };
    vec![
        format!("Name: {}", restaurant.name),
        format!("Address: {}", restaurant.address),
        format!("Location: {}", location),
    ]
}

pub fn map_lines(location: &LocationSnapshot) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(center) = location.coordinate {
        let region = MapRegion::around(center);
        lines.push(format!(
            "Map centred on {} (span {} x {} degrees)",
            center, region.latitude_delta, region.longitude_delta
        ));
        lines.push(format!("  [*] Your Location {}", center));
    }
    lines.extend(status_line(location));
    lines
}

/// Body of the "In Your Area" screen.
///
/// While permission is denied the denial is shown instead of the
/// empty-result message, which only appears after a real computation.
pub fn nearby_screen_lines(nearby: &NearbySnapshot, location: &LocationSnapshot) -> Vec<String> {
    let mut lines = vec![format!("Range (km): {}", nearby.radius_input)];
    if let Some(device) = nearby.center {
        lines.push(format!("  [*] Your Location {}", device));
    }
    // Distances are measured from where the filter ran.
    if let Some(center) = nearby.result.center() {
        let region = MapRegion::around(center);
        for restaurant in nearby.result.restaurants() {
            let Some(position) = restaurant.position else {
                continue;
            };
            let distance = meters_to_km(distance_meters(center, position));
            let visibility = if region.contains(position) {
                ""
            } else {
                " (off map)"
            };
            lines.push(format!(
                "  [R] {} - {} ({:.1} km){}",
                restaurant.name, restaurant.address, distance, visibility
            ));
        }
    }

    match status_line(location) {
        Some(status) => lines.push(status),
        None => lines.extend(nearby.result.empty_message()),
    }
    lines
}

/// Loading indicator or failure message of the latest location request.
fn status_line(location: &LocationSnapshot) -> Option<String> {
    match &location.status {
        status if status.is_loading() => Some(LocationStatus::Fetching.to_string()),
        status if status.is_failure() => Some(status.to_string()),
        _ => None,
    }
}
