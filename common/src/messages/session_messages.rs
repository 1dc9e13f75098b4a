use crate::types::session::{Session, SessionEvent};
use actix::Message;
use serde::{Deserialize, Serialize};

/// Pushed by the credential service every time the session changes.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct SessionChanged {
    pub event: SessionEvent,
    pub session: Option<Session>,
}
