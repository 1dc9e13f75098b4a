use crate::constants::{BCRYPT_COST, MIN_PASSWORD_LENGTH};
use crate::error::{FoodieError, FoodieResult};
use crate::gateways::CapabilityFuture;
use crate::messages::SessionChanged;
use crate::types::session::{Credentials, Session, SessionEvent, User};
use actix::Recipient;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

const INVALID_CREDENTIALS: &str = "Invalid login credentials";
const ALREADY_REGISTERED: &str = "User already registered";
const INVALID_EMAIL: &str = "Unable to validate email address: invalid format";

/// Opaque credential service.
pub trait AuthGateway {
    fn sign_in(&self, credentials: Credentials) -> CapabilityFuture<FoodieResult<User>>;

    fn sign_up(&self, credentials: Credentials) -> CapabilityFuture<FoodieResult<User>>;

    fn sign_out(&self) -> CapabilityFuture<FoodieResult<()>>;

    fn get_session(&self) -> CapabilityFuture<FoodieResult<Option<Session>>>;

    /// Registers `listener` for every later session change. The listener
    /// stays registered until the returned handle is unsubscribed.
    fn on_session_change(&self, listener: Recipient<SessionChanged>) -> SessionSubscription;
}

/// Handle returned by [`AuthGateway::on_session_change`].
pub struct SessionSubscription {
    id: u64,
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl SessionSubscription {
    pub fn new(id: u64, cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            id,
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for SessionSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSubscription")
            .field("id", &self.id)
            .finish()
    }
}

struct Account {
    user: User,
    password_hash: String,
}

struct LocalAuthState {
    accounts: Mutex<HashMap<String, Account>>,
    session: Mutex<Option<Session>>,
    listeners: Mutex<HashMap<u64, Recipient<SessionChanged>>>,
    next_listener_id: AtomicU64,
    cost: u32,
}

impl LocalAuthState {
    fn notify(&self, event: SessionEvent, session: Option<Session>) {
        let listeners: Vec<Recipient<SessionChanged>> =
            self.listeners.lock().values().cloned().collect();
        for listener in listeners {
            listener.do_send(SessionChanged {
                event: event.clone(),
                session: session.clone(),
            });
        }
    }

    fn start_session(&self, user: User) -> Session {
        let session = Session {
            access_token: Uuid::new_v4().to_string(),
            user,
        };
        *self.session.lock() = Some(session.clone());
        self.notify(SessionEvent::SignedIn, Some(session.clone()));
        session
    }
}

/// In-process credential service with bcrypt-hashed passwords.
#[derive(Clone)]
pub struct LocalAuthGateway {
    state: Arc<LocalAuthState>,
}

impl LocalAuthGateway {
    pub fn new() -> Self {
        Self::with_cost(BCRYPT_COST)
    }

    pub fn with_cost(cost: u32) -> Self {
        Self {
            state: Arc::new(LocalAuthState {
                accounts: Mutex::new(HashMap::new()),
                session: Mutex::new(None),
                listeners: Mutex::new(HashMap::new()),
                next_listener_id: AtomicU64::new(1),
                cost,
            }),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.state.listeners.lock().len()
    }
}

impl Default for LocalAuthGateway {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_credentials(credentials: &Credentials) -> FoodieResult<()> {
    let valid_email = credentials
        .email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid_email {
        return Err(FoodieError::AuthFailure(INVALID_EMAIL.to_string()));
    }
    if credentials.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(FoodieError::AuthFailure(format!(
            "Password should be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

async fn hash_password(password: String, cost: u32) -> FoodieResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| FoodieError::AuthFailure(e.to_string()))?
        .map_err(|e| FoodieError::AuthFailure(e.to_string()))
}

async fn verify_password(password: String, hash: String) -> bool {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
        .await
        .unwrap_or(false)
}

impl AuthGateway for LocalAuthGateway {
    fn sign_in(&self, credentials: Credentials) -> CapabilityFuture<FoodieResult<User>> {
        let state = self.state.clone();
        Box::pin(async move {
            let stored = state
                .accounts
                .lock()
                .get(&credentials.email)
                .map(|account| (account.user.clone(), account.password_hash.clone()));
            let Some((user, hash)) = stored else {
                return Err(FoodieError::AuthFailure(INVALID_CREDENTIALS.to_string()));
            };
            if !verify_password(credentials.password, hash).await {
                return Err(FoodieError::AuthFailure(INVALID_CREDENTIALS.to_string()));
            }
            Ok(state.start_session(user).user)
        })
    }

    fn sign_up(&self, credentials: Credentials) -> CapabilityFuture<FoodieResult<User>> {
        let state = self.state.clone();
        Box::pin(async move {
            validate_credentials(&credentials)?;
            if state.accounts.lock().contains_key(&credentials.email) {
                return Err(FoodieError::AuthFailure(ALREADY_REGISTERED.to_string()));
            }
            let password_hash = hash_password(credentials.password, state.cost).await?;
            let user = User::new(credentials.email.clone());
            {
                let mut accounts = state.accounts.lock();
                if accounts.contains_key(&credentials.email) {
                    return Err(FoodieError::AuthFailure(ALREADY_REGISTERED.to_string()));
                }
                accounts.insert(
                    credentials.email,
                    Account {
                        user: user.clone(),
                        password_hash,
                    },
                );
            }
            Ok(state.start_session(user).user)
        })
    }

    fn sign_out(&self) -> CapabilityFuture<FoodieResult<()>> {
        let state = self.state.clone();
        Box::pin(async move {
            let previous = state.session.lock().take();
            if previous.is_some() {
                state.notify(SessionEvent::SignedOut, None);
            }
            Ok(())
        })
    }

    fn get_session(&self) -> CapabilityFuture<FoodieResult<Option<Session>>> {
        let session = self.state.session.lock().clone();
        Box::pin(async move { Ok(session) })
    }

    fn on_session_change(&self, listener: Recipient<SessionChanged>) -> SessionSubscription {
        let id = self.state.next_listener_id.fetch_add(1, Ordering::SeqCst);
        self.state.listeners.lock().insert(id, listener);
        let state = Arc::downgrade(&self.state);
        SessionSubscription::new(id, move || {
            if let Some(state) = state.upgrade() {
                state.listeners.lock().remove(&id);
            }
        })
    }
}
