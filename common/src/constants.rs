/// Radius shown in the nearby-restaurants input before the user edits it.
pub const DEFAULT_RADIUS_KM: &str = "5";
/// Equatorial earth radius used by the great-circle distance, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_378_137.0;
pub const METERS_PER_KM: f64 = 1000.0;

pub const MAP_LATITUDE_DELTA: f64 = 0.0922;
pub const MAP_LONGITUDE_DELTA: f64 = 0.0421;

/// Lahore city centre, used when no device location is configured.
pub const DEFAULT_DEVICE_LATITUDE: f64 = 31.5204;
pub const DEFAULT_DEVICE_LONGITUDE: f64 = 74.3587;

pub const USER_STORAGE_KEY: &str = "user";
pub const SPLASH_SEEN_STORAGE_KEY: &str = "hasSeenSplash";

pub const STORAGE_FILE_NAME: &str = "storage.json";
pub const DEFAULT_DATA_DIR: &str = ".foodie";

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

pub const DEBUG_ENV_VAR: &str = "FOODIE_DEBUG";
