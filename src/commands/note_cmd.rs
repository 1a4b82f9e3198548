//! Note commands

use chrono::Utc;
use serde_json::json;

use crate::domain::{DomainError, DomainResult, Note, RecordId};
use crate::repository::RecordRepository;
use crate::AppState;

/// Insert a new note stamped with the current time. Blank content or a
/// logged-out session is a silent no-op, matching the form.
pub async fn add_note(state: &AppState, content: &str) -> DomainResult<Option<Note>> {
    let Some(owner) = state.session.resolve().user_id() else {
        log::debug!("add note ignored: not signed in");
        return Ok(None);
    };
    if content.trim().is_empty() {
        return Ok(None);
    }

    let note = Note::new(owner, content.to_string(), Utc::now().to_rfc3339());
    let stored = state.repo::<Note>().insert(&note).await.map_err(|e| {
        log::error!("error adding note: {}", e);
        e
    })?;
    Ok(Some(stored))
}

/// Fetch the signed-in user's notes, newest first.
pub async fn list_notes(state: &AppState) -> DomainResult<Vec<Note>> {
    let owner = state
        .session
        .resolve()
        .user_id()
        .ok_or(DomainError::NotAuthenticated)?;
    state.repo::<Note>().list(owner).await
}

/// Replace a note's content. Blank content never saves; a scope
/// mismatch changes zero rows and yields `None`.
pub async fn update_note(
    state: &AppState,
    note: &Note,
    content: &str,
) -> DomainResult<Option<Note>> {
    let owner = state
        .session
        .resolve()
        .user_id()
        .ok_or(DomainError::NotAuthenticated)?;
    if content.trim().is_empty() {
        return Ok(None);
    }

    let touched = state
        .repo::<Note>()
        .update(owner, note.id, json!({ "content": content }))
        .await
        .map_err(|e| {
            log::error!("error updating note {}: {}", note.id, e);
            e
        })?;
    if touched == 0 {
        return Ok(None);
    }
    Ok(Some(Note {
        content: content.to_string(),
        ..note.clone()
    }))
}

/// Delete one note, scoped to the signed-in user.
pub async fn delete_note(state: &AppState, id: RecordId) -> DomainResult<u64> {
    let owner = state
        .session
        .resolve()
        .user_id()
        .ok_or(DomainError::NotAuthenticated)?;
    state.repo::<Note>().delete(owner, id).await
}
