//! Account commands

use crate::collection::ConfirmAction;
use crate::domain::{AuthUser, DomainResult};
use crate::session::Credentials;
use crate::AppState;

/// Password sign-in; persists the credential pair and notifies session
/// subscribers.
pub async fn sign_in(state: &AppState, email: &str, password: &str) -> DomainResult<AuthUser> {
    let session = state.identity.sign_in(email, password).await?;
    state.session.login(Credentials::new(
        session.user.id,
        session.access_token.clone(),
    ));
    Ok(session.user)
}

/// Drop the persisted credentials; subscribers see the logout.
pub fn sign_out(state: &AppState) {
    state.session.logout();
}

/// Confirmed, irreversible account removal through the admin surface of
/// the identity store. One of the few flows whose failure is surfaced
/// to the user rather than just logged.
pub async fn delete_account(state: &AppState, confirm: &dyn ConfirmAction) -> DomainResult<bool> {
    if !confirm.confirm(
        "Are you sure you want to delete your account? This action cannot be undone.",
    ) {
        return Ok(false);
    }

    let user = state.current_user().await?;
    state.identity.delete_user(user.id).await.map_err(|e| {
        log::error!("failed to delete account {}: {}", user.id, e);
        e
    })?;
    state.session.logout();
    Ok(true)
}
