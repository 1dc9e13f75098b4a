use serde::{Deserialize, Serialize};
use std::fmt;

/// Screens of the navigation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    Splash,
    Login,
    SignUp,
    Home,
    Restaurant,
    RestaurantDetail(usize),
    JsonPage,
    Map,
    NearbyRestaurants,
}

impl Screen {
    /// Screens reachable without a signed-in user.
    pub fn is_public(&self) -> bool {
        matches!(self, Screen::Splash | Screen::Login | Screen::SignUp)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Splash => "Welcome",
            Screen::Login => "Login",
            Screen::SignUp => "Sign Up",
            Screen::Home => "Foodie Moodie",
            Screen::Restaurant => "Foodie Moodie",
            Screen::RestaurantDetail(_) => "Restaurant Details",
            Screen::JsonPage => "Restaurant's Data",
            Screen::Map => "Map",
            Screen::NearbyRestaurants => "Nearby Restaurants",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}
