//! Capabilities the application consumes from the outside world: the device
//! location sensor, the credential service and durable key-value storage.
//!
//! Each capability is a trait whose operations return boxed futures, so the
//! actors can drive them with `into_actor` and tests can swap in fakes.

pub mod auth;
pub mod location;
pub mod storage;

use std::future::Future;
use std::pin::Pin;

pub type CapabilityFuture<T> = Pin<Box<dyn Future<Output = T> + 'static>>;

pub use auth::{AuthGateway, LocalAuthGateway, SessionSubscription};
pub use location::{LocationProvider, Permission, SimulatedLocationProvider};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
