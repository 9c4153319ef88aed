use gloo_storage::{errors::StorageError, SessionStorage, Storage};
use std::cell::RefCell;

use crate::services::api::AuthSession;
use crate::services::errors::SessionError;

pub const SESSION_STORAGE_KEY: &str = "data_migration_session";

/// Where the logged-in session survives page reloads
pub trait SessionStore {
    fn load(&self) -> Result<Option<AuthSession>, SessionError>;

    fn save(&self, session: &AuthSession) -> Result<(), SessionError>;

    fn clear(&self);
}

/// Browser sessionStorage; cleared when the tab closes
pub struct BrowserSessionStore {
    storage_key: String,
}

impl BrowserSessionStore {
    pub fn new(storage_key: &str) -> Self {
        Self {
            storage_key: storage_key.to_string(),
        }
    }
}

impl Default for BrowserSessionStore {
    fn default() -> Self {
        Self::new(SESSION_STORAGE_KEY)
    }
}

impl SessionStore for BrowserSessionStore {
    fn load(&self) -> Result<Option<AuthSession>, SessionError> {
        match SessionStorage::get::<AuthSession>(&self.storage_key) {
            Ok(session) => Ok(Some(session)),
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            Err(StorageError::SerdeError(e)) => Err(SessionError::Corrupt {
                message: e.to_string(),
            }),
            Err(e) => Err(SessionError::Storage {
                message: format!("{:?}", e),
            }),
        }
    }

    fn save(&self, session: &AuthSession) -> Result<(), SessionError> {
        SessionStorage::set(&self.storage_key, session).map_err(|e| SessionError::Storage {
            message: format!("Failed to store session in sessionStorage: {:?}", e),
        })
    }

    fn clear(&self) {
        SessionStorage::delete(&self.storage_key);
    }
}

/// In-process store for tests and non-browser targets
#[derive(Default)]
pub struct MemorySessionStore {
    session: RefCell<Option<AuthSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: AuthSession) -> Self {
        Self {
            session: RefCell::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<AuthSession>, SessionError> {
        Ok(self.session.borrow().clone())
    }

    fn save(&self, session: &AuthSession) -> Result<(), SessionError> {
        *self.session.borrow_mut() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) {
        self.session.borrow_mut().take();
    }
}
