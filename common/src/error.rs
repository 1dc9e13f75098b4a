use thiserror::Error;

pub type FoodieResult<T> = std::result::Result<T, FoodieError>;

/// Every failure the application surfaces to the user.
///
/// None of them is fatal: each is reported on screen and the user decides
/// whether to retry the action that produced it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FoodieError {
    /// The user refused access to the device location.
    #[error("Permission to access location was denied")]
    PermissionDenied,

    #[error("Failed to get location: {0}")]
    LocationFetchFailed(String),

    /// A completed location request was overtaken by a newer one.
    #[error("Location request superseded by a newer request")]
    StaleLocation,

    #[error("Invalid range '{0}': please enter a valid distance greater than 0")]
    InvalidRadius(String),

    #[error("Invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// Message reported by the credential service, kept verbatim.
    #[error("{0}")]
    AuthFailure(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Mailbox error: {0}")]
    Mailbox(String),

    #[error("Navigation error: {0}")]
    Navigation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<actix::MailboxError> for FoodieError {
    fn from(err: actix::MailboxError) -> Self {
        FoodieError::Mailbox(err.to_string())
    }
}

impl From<serde_json::Error> for FoodieError {
    fn from(err: serde_json::Error) -> Self {
        FoodieError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for FoodieError {
    fn from(err: std::io::Error) -> Self {
        FoodieError::Storage(err.to_string())
    }
}
