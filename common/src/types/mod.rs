pub mod coordinate;
pub mod dtos;
pub mod home_feed;
pub mod location_status;
pub mod proximity_result;
pub mod restaurant_info;
pub mod screen;
pub mod session;
