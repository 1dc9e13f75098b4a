use common::constants::{
    BCRYPT_COST, DEFAULT_DATA_DIR, DEFAULT_DEVICE_LATITUDE, DEFAULT_DEVICE_LONGITUDE,
    STORAGE_FILE_NAME,
};
use common::error::{FoodieError, FoodieResult};
use common::gateways::Permission;
use common::types::coordinate::Coordinate;
use std::path::PathBuf;

const CATALOG_VAR: &str = "FOODIE_CATALOG";
const LOCATION_VAR: &str = "FOODIE_LOCATION";
const PERMISSION_VAR: &str = "FOODIE_LOCATION_PERMISSION";
const JITTER_VAR: &str = "FOODIE_LOCATION_JITTER_M";
const FAILURE_RATE_VAR: &str = "FOODIE_LOCATION_FAILURE_RATE";
const BCRYPT_COST_VAR: &str = "FOODIE_BCRYPT_COST";

/// Start-up settings of the terminal application.
///
/// The only positional argument is the data directory. Everything else comes
/// from `FOODIE_*` environment variables and falls back to the defaults in
/// `common::constants`.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    /// Replaces the bundled restaurant list when set.
    pub catalog_path: Option<PathBuf>,
    pub device_location: Coordinate,
    pub permission: Permission,
    pub jitter_meters: f64,
    pub failure_probability: f64,
    pub bcrypt_cost: u32,
}

impl AppConfig {
    pub fn from_env() -> FoodieResult<Self> {
        Self::from_sources(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    pub fn from_sources<I, F>(args: I, lookup: F) -> FoodieResult<Self>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut args = args.into_iter();
        let data_dir = args
            .next()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        if let Some(extra) = args.next() {
            return Err(FoodieError::Config(format!(
                "unexpected argument '{}', usage: foodie [data_dir]",
                extra
            )));
        }

        let device_location = match lookup(LOCATION_VAR) {
            Some(raw) => parse_location(&raw)?,
            None => Coordinate::new(DEFAULT_DEVICE_LATITUDE, DEFAULT_DEVICE_LONGITUDE)?,
        };
        let permission = match lookup(PERMISSION_VAR) {
            Some(raw) => parse_permission(&raw)?,
            None => Permission::Granted,
        };

        Ok(Self {
            data_dir,
            catalog_path: lookup(CATALOG_VAR)
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            device_location,
            permission,
            jitter_meters: parse_number(&lookup, JITTER_VAR, 0.0)?,
            failure_probability: parse_number(&lookup, FAILURE_RATE_VAR, 0.0)?,
            bcrypt_cost: parse_number(&lookup, BCRYPT_COST_VAR, BCRYPT_COST)?,
        })
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(STORAGE_FILE_NAME)
    }
}

fn parse_location(raw: &str) -> FoodieResult<Coordinate> {
    let (lat, lon) = raw.split_once(',').ok_or_else(|| {
        FoodieError::Config(format!("{} must look like 'lat,lon', got '{}'", LOCATION_VAR, raw))
    })?;
    Coordinate::parse(lat, lon).ok_or_else(|| {
        FoodieError::Config(format!("{} is not a valid coordinate: '{}'", LOCATION_VAR, raw))
    })
}

fn parse_permission(raw: &str) -> FoodieResult<Permission> {
    match raw.trim().to_lowercase().as_str() {
        "granted" | "grant" | "yes" | "1" => Ok(Permission::Granted),
        "denied" | "deny" | "no" | "0" => Ok(Permission::Denied),
        other => Err(FoodieError::Config(format!(
            "{} must be 'granted' or 'denied', got '{}'",
            PERMISSION_VAR, other
        ))),
    }
}

fn parse_number<T, F>(lookup: &F, key: &str, default: T) -> FoodieResult<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| FoodieError::Config(format!("{} is not a number: '{}'", key, raw))),
        None => Ok(default),
    }
}
