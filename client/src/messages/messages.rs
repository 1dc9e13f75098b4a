use actix::Message;
use common::error::FoodieResult;
use common::types::coordinate::Coordinate;
use common::types::dtos::NearbySnapshot;
use common::types::screen::Screen;
use common::types::session::User;

/// Starts a new location acquisition cycle (screen mount or locate button).
#[derive(Message, Debug, Clone)]
#[rtype(result = "FoodieResult<Coordinate>")]
pub struct RequestLocation;

/// Filter button of the nearby-restaurants screen.
#[derive(Message, Debug, Clone)]
#[rtype(result = "FoodieResult<NearbySnapshot>")]
pub struct ApplyRadius {
    pub input: String,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "FoodieResult<User>")]
pub struct Login {
    pub email: String,
    pub password: String,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "FoodieResult<User>")]
pub struct SignUp {
    pub email: String,
    pub password: String,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "FoodieResult<()>")]
pub struct Logout;

/// Picks the first screen from the stored flags and the session.
#[derive(Message, Debug, Clone)]
#[rtype(result = "Screen")]
pub struct ResolveInitialScreen;

#[derive(Message, Debug, Clone)]
#[rtype(result = "FoodieResult<Screen>")]
pub struct FinishSplash;

#[derive(Message, Debug, Clone)]
#[rtype(result = "FoodieResult<Screen>")]
pub struct Navigate(pub Screen);

#[derive(Message, Debug, Clone)]
#[rtype(result = "Screen")]
pub struct GoBack;

/// Replaces the whole navigation stack with a single screen.
#[derive(Message, Debug, Clone)]
#[rtype(result = "Screen")]
pub struct ResetTo(pub Screen);
