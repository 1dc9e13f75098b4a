use crate::client_actors::session_manager::SessionManager;
use crate::messages::{
    FinishSplash, GetScreen, GetSessionState, GoBack, Navigate, ResetTo, ResolveInitialScreen,
};
use actix::prelude::*;
use colored::Color;
use common::constants::SPLASH_SEEN_STORAGE_KEY;
use common::error::{FoodieError, FoodieResult};
use common::gateways::KeyValueStore;
use common::logger::Logger;
use common::types::screen::Screen;
use std::sync::Arc;

/// Picks the first screen of a session.
pub fn initial_screen(has_user: bool, first_launch: bool) -> Screen {
    if has_user {
        Screen::Home
    } else if first_launch {
        Screen::Splash
    } else {
        Screen::Login
    }
}

/// The `ScreenFlow` actor owns the navigation stack.
pub struct ScreenFlow {
    pub store: Arc<dyn KeyValueStore>,
    pub session: Addr<SessionManager>,
    /// Navigation stack, root first. Never empty.
    pub stack: Vec<Screen>,
    pub splash_seen: bool,
    pub logger: Logger,
}

impl ScreenFlow {
    pub fn new(store: Arc<dyn KeyValueStore>, session: Addr<SessionManager>) -> Self {
        Self {
            store,
            session,
            stack: vec![Screen::Splash],
            splash_seen: false,
            logger: Logger::new("Screen Flow", Color::Blue),
        }
    }

    fn current(&self) -> Screen {
        self.stack.last().copied().unwrap_or(Screen::Splash)
    }

    fn reset(&mut self, screen: Screen) -> Screen {
        self.logger.debug(format!("Navigation reset to {}", screen));
        self.stack = vec![screen];
        screen
    }

    fn push(&mut self, screen: Screen, signed_in: bool) -> FoodieResult<Screen> {
        if !screen.is_public() && !signed_in {
            return Err(FoodieError::Navigation(format!(
                "sign in to open {}",
                screen
            )));
        }
        if screen == Screen::Splash && self.splash_seen {
            return Err(FoodieError::Navigation(
                "the welcome screen has already been shown".to_string(),
            ));
        }
        if self.current() != screen {
            self.stack.push(screen);
        }
        self.logger.debug(format!("Navigated to {}", screen));
        Ok(screen)
    }
}

impl Actor for ScreenFlow {
    type Context = Context<Self>;
}

impl Handler<ResolveInitialScreen> for ScreenFlow {
    type Result = ResponseActFuture<Self, Screen>;

    fn handle(&mut self, _msg: ResolveInitialScreen, _ctx: &mut Self::Context) -> Self::Result {
        let flag = self.store.get(SPLASH_SEEN_STORAGE_KEY);
        let session = self.session.send(GetSessionState);
        Box::pin(
            async move { (flag.await, session.await) }
                .into_actor(self)
                .map(|(flag, session), act, _ctx| {
                    let seen = match flag {
                        Ok(value) => value.is_some(),
                        Err(err) => {
                            act.logger
                                .warn(format!("Could not read the first-launch flag: {}", err));
                            false
                        }
                    };
                    let has_user = match session {
                        Ok(state) => state.user.is_some(),
                        Err(err) => {
                            act.logger.error(format!(
                                "Session manager unreachable: {}",
                                FoodieError::from(err)
                            ));
                            false
                        }
                    };
                    act.splash_seen = seen;
                    act.reset(initial_screen(has_user, !seen))
                }),
        )
    }
}

impl Handler<FinishSplash> for ScreenFlow {
    type Result = ResponseActFuture<Self, FoodieResult<Screen>>;

    fn handle(&mut self, _msg: FinishSplash, _ctx: &mut Self::Context) -> Self::Result {
        let write = self.store.set(SPLASH_SEEN_STORAGE_KEY, "true".to_string());
        Box::pin(write.into_actor(self).map(|res, act, _ctx| {
            res?;
            act.splash_seen = true;
            Ok(act.reset(Screen::Login))
        }))
    }
}

impl Handler<Navigate> for ScreenFlow {
    type Result = ResponseActFuture<Self, FoodieResult<Screen>>;

    /// Screens other than the public ones need a signed-in user.
    fn handle(&mut self, msg: Navigate, _ctx: &mut Self::Context) -> Self::Result {
        let screen = msg.0;
        if screen.is_public() {
            return Box::pin(fut::ready(self.push(screen, false)));
        }
        let session = self.session.send(GetSessionState);
        Box::pin(session.into_actor(self).map(move |state, act, _ctx| {
            let signed_in = state?.user.is_some();
            act.push(screen, signed_in)
        }))
    }
}

impl Handler<GoBack> for ScreenFlow {
    type Result = MessageResult<GoBack>;

    fn handle(&mut self, _msg: GoBack, _ctx: &mut Self::Context) -> Self::Result {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
        MessageResult(self.current())
    }
}

impl Handler<ResetTo> for ScreenFlow {
    type Result = MessageResult<ResetTo>;

    fn handle(&mut self, msg: ResetTo, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.reset(msg.0))
    }
}

impl Handler<GetScreen> for ScreenFlow {
    type Result = MessageResult<GetScreen>;

    fn handle(&mut self, _msg: GetScreen, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.current())
    }
}
