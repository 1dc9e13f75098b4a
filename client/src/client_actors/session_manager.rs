use crate::messages::{GetSessionState, Login, Logout, Shutdown, SignUp};
use actix::prelude::*;
use colored::Color;
use common::constants::USER_STORAGE_KEY;
use common::error::{FoodieError, FoodieResult};
use common::gateways::{AuthGateway, CapabilityFuture, KeyValueStore, SessionSubscription};
use common::logger::Logger;
use common::messages::SessionChanged;
use common::types::dtos::SessionSnapshot;
use common::types::session::{Credentials, SessionEvent, User};
use std::sync::Arc;

/// The `SessionManager` actor mirrors the credential service's session into
/// the application.
///
/// ## Responsibilities:
/// - Restore the user on start, preferring the copy kept in storage.
/// - Follow the credential service's session changes and keep the stored
///   user in step with them.
/// - Run login, sign-up and logout, keeping the last failure message.
pub struct SessionManager {
    pub gateway: Arc<dyn AuthGateway>,
    pub store: Arc<dyn KeyValueStore>,
    pub user: Option<User>,
    /// True until the initial restore has finished.
    pub loading: bool,
    /// Message of the last failed login or sign-up.
    pub error: Option<String>,
    pub subscription: Option<SessionSubscription>,
    pub logger: Logger,
}

impl SessionManager {
    pub fn new(gateway: Arc<dyn AuthGateway>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            gateway,
            store,
            user: None,
            loading: true,
            error: None,
            subscription: None,
            logger: Logger::new("Session Manager", Color::Magenta),
        }
    }

    fn persist_user(&self, user: &User) -> CapabilityFuture<FoodieResult<()>> {
        match serde_json::to_string(user) {
            Ok(raw) => self.store.set(USER_STORAGE_KEY, raw),
            Err(e) => Box::pin(async move { Err(FoodieError::from(e)) }),
        }
    }

    fn forget_user(&self) -> CapabilityFuture<FoodieResult<()>> {
        self.store.remove(USER_STORAGE_KEY)
    }

    /// Applies the outcome of a login or sign-up attempt and persists the user
    /// on success.
    fn complete_auth(
        &mut self,
        result: FoodieResult<User>,
    ) -> ResponseActFuture<Self, FoodieResult<User>> {
        let persist = match &result {
            Ok(user) => {
                self.logger.info(format!("Signed in as {}", user.email));
                self.user = Some(user.clone());
                self.error = None;
                Some(self.persist_user(user))
            }
            Err(err) => {
                let message = auth_message(err);
                self.logger.warn(format!("Authentication failed: {}", message));
                self.error = Some(message);
                None
            }
        };
        Box::pin(
            async move {
                let stored = match persist {
                    Some(persist) => persist.await,
                    None => Ok(()),
                };
                (result, stored)
            }
            .into_actor(self)
            .map(|(result, stored), act, _ctx| {
                if let Err(err) = stored {
                    act.logger
                        .warn(format!("Could not store the signed-in user: {}", err));
                }
                result
            }),
        )
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            user: self.user.clone(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }
}

/// Message shown to the user for a failed authentication attempt. Gateway
/// messages pass through unchanged.
fn auth_message(err: &FoodieError) -> String {
    match err {
        FoodieError::AuthFailure(message) => message.clone(),
        other => other.to_string(),
    }
}

/// Stored user first, then any session the credential service still holds.
async fn restore_user(
    store: Arc<dyn KeyValueStore>,
    gateway: Arc<dyn AuthGateway>,
) -> (Option<User>, Vec<FoodieError>) {
    let mut problems = Vec::new();
    match store.get(USER_STORAGE_KEY).await {
        Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
            Ok(user) => return (Some(user), problems),
            Err(e) => problems.push(FoodieError::from(e)),
        },
        Ok(None) => {}
        Err(e) => problems.push(e),
    }
    match gateway.get_session().await {
        Ok(session) => (session.map(|s| s.user), problems),
        Err(e) => {
            problems.push(e);
            (None, problems)
        }
    }
}

impl Actor for SessionManager {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let subscription = self.gateway.on_session_change(ctx.address().recipient());
        self.logger.debug(format!(
            "Listening to session changes as #{}",
            subscription.id()
        ));
        self.subscription = Some(subscription);

        restore_user(self.store.clone(), self.gateway.clone())
            .into_actor(self)
            .map(|(user, problems), act, _ctx| {
                for problem in problems {
                    act.logger
                        .warn(format!("While restoring the session: {}", problem));
                }
                match &user {
                    Some(user) => act.logger.info(format!("Welcome back, {}", user.email)),
                    None => act.logger.debug("No previous session."),
                }
                act.user = user;
                act.loading = false;
            })
            .wait(ctx);
    }

    fn stopping(&mut self, _ctx: &mut Self::Context) -> Running {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        Running::Stop
    }
}

impl Handler<SessionChanged> for SessionManager {
    type Result = ();

    fn handle(&mut self, msg: SessionChanged, ctx: &mut Self::Context) -> Self::Result {
        let write = match (msg.event, msg.session) {
            (SessionEvent::SignedIn, Some(session)) => {
                let write = self.persist_user(&session.user);
                self.user = Some(session.user);
                write
            }
            (SessionEvent::SignedIn, None) => {
                self.logger
                    .warn("Sign-in notification without a session, ignoring it.");
                return;
            }
            (SessionEvent::SignedOut, _) => {
                self.user = None;
                self.forget_user()
            }
        };
        write
            .into_actor(self)
            .map(|res, act, _ctx| {
                if let Err(err) = res {
                    act.logger
                        .error(format!("Could not mirror the session in storage: {}", err));
                }
            })
            .wait(ctx);
    }
}

impl Handler<Login> for SessionManager {
    type Result = ResponseActFuture<Self, FoodieResult<User>>;

    fn handle(&mut self, msg: Login, _ctx: &mut Self::Context) -> Self::Result {
        let attempt = self
            .gateway
            .sign_in(Credentials::new(msg.email, msg.password));
        Box::pin(
            attempt
                .into_actor(self)
                .then(|result, act, _ctx| act.complete_auth(result)),
        )
    }
}

impl Handler<SignUp> for SessionManager {
    type Result = ResponseActFuture<Self, FoodieResult<User>>;

    fn handle(&mut self, msg: SignUp, _ctx: &mut Self::Context) -> Self::Result {
        let attempt = self
            .gateway
            .sign_up(Credentials::new(msg.email, msg.password));
        Box::pin(
            attempt
                .into_actor(self)
                .then(|result, act, _ctx| act.complete_auth(result)),
        )
    }
}

impl Handler<Logout> for SessionManager {
    type Result = ResponseActFuture<Self, FoodieResult<()>>;

    fn handle(&mut self, _msg: Logout, _ctx: &mut Self::Context) -> Self::Result {
        let sign_out = self.gateway.sign_out();
        Box::pin(
            sign_out
                .into_actor(self)
                .then(|result, act, _ctx| {
                    let forget = match result {
                        Ok(()) => {
                            act.logger.info("Signed out.");
                            act.user = None;
                            Ok(act.forget_user())
                        }
                        Err(err) => Err(err),
                    };
                    async move {
                        match forget {
                            Ok(forget) => forget.await,
                            Err(err) => Err(err),
                        }
                    }
                    .into_actor(act)
                }),
        )
    }
}

impl Handler<Shutdown> for SessionManager {
    type Result = ();

    fn handle(&mut self, _msg: Shutdown, ctx: &mut Self::Context) -> Self::Result {
        ctx.stop();
    }
}

impl Handler<GetSessionState> for SessionManager {
    type Result = MessageResult<GetSessionState>;

    fn handle(&mut self, _msg: GetSessionState, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.snapshot())
    }
}
