pub mod session_messages;

pub use session_messages::*;
