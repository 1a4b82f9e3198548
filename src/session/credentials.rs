//! Persisted session credentials

use std::path::Path;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::domain::UserId;

/// The persisted identity pair. The user id travels next to the token;
/// when a stored file carries only the token, the id comes from the
/// token's `sub` claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub access_token: String,
}

impl Credentials {
    pub fn new(user_id: UserId, access_token: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id),
            access_token: access_token.into(),
        }
    }

    /// Stored id, falling back to the token's claim.
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id.or_else(|| user_id_from_token(&self.access_token))
    }
}

/// Pull the `sub` claim out of a JWT without verifying it. Good enough
/// to scope reads while the identity store is unreachable; never an
/// authorization decision.
pub fn user_id_from_token(token: &str) -> Option<UserId> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    claims.get("sub")?.as_str()?.parse().ok()
}

pub(super) fn load(path: &Path) -> Option<Credentials> {
    let raw = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(creds) => Some(creds),
        Err(e) => {
            log::warn!("ignoring unreadable credentials file {}: {}", path.display(), e);
            None
        }
    }
}

pub(super) fn save(path: &Path, creds: &Credentials) {
    match serde_json::to_string_pretty(creds) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                log::warn!("failed to persist credentials to {}: {}", path.display(), e);
            }
        }
        Err(e) => log::warn!("failed to encode credentials: {}", e),
    }
}

pub(super) fn clear(path: &Path) {
    if path.exists() {
        if let Err(e) = std::fs::remove_file(path) {
            log::warn!("failed to remove credentials file {}: {}", path.display(), e);
        }
    }
}
