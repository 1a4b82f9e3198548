//! Platform user types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a platform user; the owner key on every record.
pub type UserId = Uuid;

/// The authenticated user as returned by the identity store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A signed-in session: the user plus the bearer token scoping all
/// subsequent platform calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: AuthUser,
    pub access_token: String,
}
