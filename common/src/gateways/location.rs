use crate::error::{FoodieError, FoodieResult};
use crate::gateways::CapabilityFuture;
use crate::types::coordinate::Coordinate;
use crate::utils::{jitter_coordinate, random_bool_by_given_probability};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Answer to the foreground location permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Permission {
    Granted,
    Denied,
}

/// Device location sensor.
pub trait LocationProvider {
    fn request_permission(&self) -> CapabilityFuture<Permission>;

    fn get_current_position(&self) -> CapabilityFuture<FoodieResult<Coordinate>>;
}

#[derive(Debug, Clone)]
struct SimulatedDevice {
    permission: Permission,
    base: Coordinate,
    jitter_meters: f64,
    failure_probability: f64,
}

/// Sensor stand-in for terminal sessions: answers the permission prompt with
/// a configured value and reports a position around a configured point.
#[derive(Debug, Clone)]
pub struct SimulatedLocationProvider {
    device: Arc<Mutex<SimulatedDevice>>,
}

impl SimulatedLocationProvider {
    pub fn new(permission: Permission, base: Coordinate) -> Self {
        Self {
            device: Arc::new(Mutex::new(SimulatedDevice {
                permission,
                base,
                jitter_meters: 0.0,
                failure_probability: 0.0,
            })),
        }
    }

    /// Spreads reported positions up to `meters` away from the base point.
    pub fn with_jitter(self, meters: f64) -> Self {
        self.device.lock().jitter_meters = meters.max(0.0);
        self
    }

    /// Makes a granted fetch fail with the given probability.
    pub fn with_failure_probability(self, probability: f64) -> Self {
        self.device.lock().failure_probability = probability.clamp(0.0, 1.0);
        self
    }

    /// Changes the permission answer, as a user would in the system settings.
    pub fn set_permission(&self, permission: Permission) {
        self.device.lock().permission = permission;
    }

    pub fn permission(&self) -> Permission {
        self.device.lock().permission
    }
}

impl LocationProvider for SimulatedLocationProvider {
    fn request_permission(&self) -> CapabilityFuture<Permission> {
        let permission = self.device.lock().permission;
        Box::pin(async move { permission })
    }

    fn get_current_position(&self) -> CapabilityFuture<FoodieResult<Coordinate>> {
        let device = self.device.lock().clone();
        Box::pin(async move {
            if device.permission == Permission::Denied {
                return Err(FoodieError::PermissionDenied);
            }
            if random_bool_by_given_probability(device.failure_probability) {
                return Err(FoodieError::LocationFetchFailed(
                    "position unavailable".to_string(),
                ));
            }
            Ok(jitter_coordinate(device.base, device.jitter_meters))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lahore() -> Coordinate {
        Coordinate::new(31.5204, 74.3587).unwrap()
    }

    #[actix_rt::test]
    async fn test_granted_device_reports_base_point() {
        let provider = SimulatedLocationProvider::new(Permission::Granted, lahore());
        assert_eq!(provider.request_permission().await, Permission::Granted);
        assert_eq!(provider.get_current_position().await, Ok(lahore()));
    }

    #[actix_rt::test]
    async fn test_denied_device_refuses_to_report() {
        let provider = SimulatedLocationProvider::new(Permission::Denied, lahore());
        assert_eq!(provider.request_permission().await, Permission::Denied);
        assert_eq!(
            provider.get_current_position().await,
            Err(FoodieError::PermissionDenied)
        );
    }

    #[actix_rt::test]
    async fn test_certain_failure_is_reported() {
        let provider = SimulatedLocationProvider::new(Permission::Granted, lahore())
            .with_failure_probability(1.0);
        assert!(matches!(
            provider.get_current_position().await,
            Err(FoodieError::LocationFetchFailed(_))
        ));
    }

    #[actix_rt::test]
    async fn test_permission_can_be_granted_later() {
        let provider = SimulatedLocationProvider::new(Permission::Denied, lahore());
        provider.clone().set_permission(Permission::Granted);
        assert_eq!(provider.permission(), Permission::Granted);
        assert_eq!(provider.request_permission().await, Permission::Granted);
    }
}
