//! Login state for the dashboard
//!
//! [`AuthStore`] is an ordinary value handed to the views that need it. The
//! token itself is attached to requests by the API client; this store only
//! remembers who is signed in and persists that through a [`SessionStore`].

pub mod session_store;

use std::rc::Rc;

use crate::services::api::{AccountApi, AuthSession, LoginCredentials, RegisterProfile, User};
use crate::{console_error, console_info, console_warn};

pub use session_store::{BrowserSessionStore, MemorySessionStore, SessionStore, SESSION_STORAGE_KEY};

#[derive(Clone)]
pub struct AuthStore {
    sessions: Rc<dyn SessionStore>,
    session: Option<AuthSession>,
    error: Option<String>,
}

impl PartialEq for AuthStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.sessions, &other.sessions)
            && self.session == other.session
            && self.error == other.error
    }
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("user", &self.user())
            .field("error", &self.error)
            .finish()
    }
}

impl AuthStore {
    /// Start from whatever session the store already holds. A corrupt entry is
    /// cleared and treated as logged out.
    pub fn restore(sessions: Rc<dyn SessionStore>) -> Self {
        let session = match sessions.load() {
            Ok(session) => session,
            Err(e) => {
                console_warn!("[Auth] Discarding stored session: {}", e);
                sessions.clear();
                None
            }
        };
        if let Some(session) = &session {
            console_info!("[Auth] Restored session for {}", session.user.email);
        }
        Self {
            sessions,
            session,
            error: None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Returns `true` on success; otherwise `error()` explains why
    pub async fn login<A>(&mut self, api: &A, credentials: LoginCredentials) -> bool
    where
        A: AccountApi + ?Sized,
    {
        let email = credentials.email.clone();
        console_info!("[Auth] Signing in {}", email);
        let outcome = api.login(credentials).await;
        self.accept(outcome.map_err(|e| e.user_message()))
    }

    pub async fn register<A>(&mut self, api: &A, profile: RegisterProfile) -> bool
    where
        A: AccountApi + ?Sized,
    {
        console_info!("[Auth] Registering {}", profile.email);
        let outcome = api.register(profile).await;
        self.accept(outcome.map_err(|e| e.user_message()))
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user() {
            console_info!("[Auth] Signing out {}", user.email);
        }
        self.sessions.clear();
        self.session = None;
        self.error = None;
    }

    fn accept(&mut self, outcome: Result<AuthSession, String>) -> bool {
        match outcome {
            Ok(session) => {
                // Still signed in for this tab even if persisting failed
                if let Err(e) = self.sessions.save(&session) {
                    console_warn!("[Auth] Session not persisted: {}", e);
                }
                console_info!("[Auth] Signed in as {}", session.user.email);
                self.session = Some(session);
                self.error = None;
                true
            }
            Err(message) => {
                console_error!("[Auth] {}", message);
                self.error = Some(message);
                false
            }
        }
    }
}
