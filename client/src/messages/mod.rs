pub mod internal_messages;
pub mod messages;

pub use internal_messages::*;
pub use messages::*;
