use crate::constants::{EARTH_RADIUS_METERS, METERS_PER_KM};
use crate::types::coordinate::Coordinate;
use rand::Rng;
use rand::random;

/// Great-circle distance in meters between two coordinates (haversine).
pub fn distance_meters(from: Coordinate, to: Coordinate) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();
    let a = ((d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_METERS * c
}

pub fn meters_to_km(meters: f64) -> f64 {
    meters / METERS_PER_KM
}

pub fn random_bool_by_given_probability(probability: f64) -> bool {
    let rand_value: f64 = random();
    rand_value < probability
}

/// Moves `origin` by up to `max_meters` in a random direction, clamped to the
/// valid coordinate range.
pub fn jitter_coordinate(origin: Coordinate, max_meters: f64) -> Coordinate {
    if max_meters <= 0.0 {
        return origin;
    }
    let mut rng = rand::thread_rng();
    let distance = rng.gen_range(0.0..=max_meters);
    let bearing = rng.gen_range(0.0..std::f64::consts::TAU);
    let angular = distance / EARTH_RADIUS_METERS;
    let d_lat = (angular * bearing.cos()).to_degrees();
    let cos_lat = origin.latitude.to_radians().cos().max(1e-6);
    let d_lon = (angular * bearing.sin() / cos_lat).to_degrees();
    Coordinate::clamped(origin.latitude + d_lat, origin.longitude + d_lon)
}
