pub mod location_tracker;
pub mod nearby_restaurants;
pub mod screen_flow;
pub mod session_manager;
pub mod ui_handler;
