//! Session Layer
//!
//! One process-wide session context instead of every page re-reading
//! the persisted identity values on its own. Components subscribe;
//! login and logout notify.

mod credentials;

pub use credentials::{user_id_from_token, Credentials};

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::UserId;

/// What the resolver yields: a signed-in user or nobody.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    User(UserId),
    Anonymous,
}

impl SessionState {
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            SessionState::User(id) => Some(*id),
            SessionState::Anonymous => None,
        }
    }
}

/// Shared session handle. Cloning is cheap; all clones observe the same
/// login state.
#[derive(Clone)]
pub struct SessionContext {
    tx: Arc<watch::Sender<Option<Credentials>>>,
    path: Option<PathBuf>,
}

impl SessionContext {
    /// In-memory only; nothing survives a restart.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            tx: Arc::new(tx),
            path: None,
        }
    }

    /// Load persisted credentials from `path` if present; subsequent
    /// login/logout writes back to the same file.
    pub fn with_store(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (tx, _rx) = watch::channel(credentials::load(&path));
        Self {
            tx: Arc::new(tx),
            path: Some(path),
        }
    }

    /// The absence of persisted credentials is the sole "logged out"
    /// signal; there is no error case.
    pub fn resolve(&self) -> SessionState {
        match self.tx.borrow().as_ref() {
            Some(creds) => creds
                .user_id()
                .map(SessionState::User)
                .unwrap_or(SessionState::Anonymous),
            None => SessionState::Anonymous,
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.tx.borrow().as_ref().map(|c| c.access_token.clone())
    }

    pub fn login(&self, creds: Credentials) {
        if let Some(path) = &self.path {
            credentials::save(path, &creds);
        }
        self.tx.send_replace(Some(creds));
    }

    pub fn logout(&self) {
        if let Some(path) = &self.path {
            credentials::clear(path);
        }
        self.tx.send_replace(None);
    }

    /// Watch login/logout transitions; a new receiver sees the current
    /// state immediately.
    pub fn subscribe(&self) -> watch::Receiver<Option<Credentials>> {
        self.tx.subscribe()
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
