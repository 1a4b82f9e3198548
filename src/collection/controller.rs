//! Scoped collection controller
//!
//! Binds the pure list state to a repository and the session context:
//! fetch on refresh (or on a session change), confirmed deletes,
//! reconcile-on-success only.

use std::sync::Arc;

use crate::domain::{ContentRecord, DomainError, DomainResult, RecordId};
use crate::repository::RecordRepository;
use crate::session::{SessionContext, SessionState};

use super::action::CollectionAction;
use super::view::CollectionView;

/// Interactive gate in front of destructive actions.
pub trait ConfirmAction: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool + Send + Sync> ConfirmAction for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

pub struct ScopedCollection<T: ContentRecord> {
    view: CollectionView<T>,
    repo: Arc<dyn RecordRepository<T>>,
    session: SessionContext,
}

impl<T: ContentRecord> ScopedCollection<T> {
    pub fn new(repo: Arc<dyn RecordRepository<T>>, session: SessionContext) -> Self {
        Self {
            view: CollectionView::new(),
            repo,
            session,
        }
    }

    pub fn view(&self) -> &CollectionView<T> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut CollectionView<T> {
        &mut self.view
    }

    pub fn apply(&mut self, action: CollectionAction<T>) {
        self.view.apply(action);
    }

    /// Scoped fetch. An anonymous session renders the guarded empty
    /// state without querying; a failed fetch logs and keeps the
    /// current collection, with no user-facing message.
    pub async fn refresh(&mut self) {
        match self.session.resolve() {
            SessionState::Anonymous => self.view.apply(CollectionAction::Loaded(Vec::new())),
            SessionState::User(owner) => match self.repo.list(owner).await {
                Ok(records) => self.view.apply(CollectionAction::Loaded(records)),
                Err(e) => log::error!("error fetching {}: {}", T::TABLE, e),
            },
        }
    }

    /// Confirmed remote delete followed by local removal. Declining the
    /// prompt touches nothing; a failed delete keeps the collection
    /// unchanged and reports the error.
    pub async fn delete(
        &mut self,
        id: RecordId,
        confirm: &dyn ConfirmAction,
    ) -> DomainResult<bool> {
        if !confirm.confirm("Are you sure you want to delete this entry?") {
            return Ok(false);
        }
        let owner = self
            .session
            .resolve()
            .user_id()
            .ok_or(DomainError::NotAuthenticated)?;
        match self.repo.delete(owner, id).await {
            Ok(_removed) => {
                self.view.apply(CollectionAction::Deleted(id));
                Ok(true)
            }
            Err(e) => {
                log::error!("error deleting {} {}: {}", T::TABLE, id, e);
                Err(e)
            }
        }
    }
}
