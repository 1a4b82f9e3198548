//! Reviewbox
//!
//! Client library for a personal content site: food reviews, pokemon
//! reviews and markdown notes, each scoped to the signed-in user and
//! persisted through a hosted platform (managed auth, relational
//! storage, object storage).
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - store: Hosted platform clients (data, objects, identity)
//! - repository: Owner-scoped data access
//! - collection: List state and reconciliation
//! - session: Process-wide session context
//! - commands: Operation handlers

pub mod collection;
pub mod commands;
pub mod config;
pub mod domain;
pub mod repository;
pub mod session;
pub mod store;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::collection::ScopedCollection;
use crate::config::PlatformConfig;
use crate::domain::{
    AuthUser, ContentRecord, DomainError, DomainResult, FoodReview, Note, PokemonReview,
    RatingBounds,
};
use crate::repository::TableRepository;
use crate::session::SessionContext;
use crate::store::{
    DataStore, IdentityStore, ObjectStore, RestDataStore, RestIdentityStore, RestObjectStore,
};

/// Application state shared across commands
pub struct AppState {
    pub data: Arc<dyn DataStore>,
    pub objects: Arc<dyn ObjectStore>,
    pub identity: Arc<dyn IdentityStore>,
    pub session: SessionContext,
    /// Rating range the add forms accept
    pub add_rating_bounds: RatingBounds,
    /// Rating range the edit forms accept
    pub edit_rating_bounds: RatingBounds,
    uploading: AtomicBool,
}

impl AppState {
    /// Wire the REST-backed stores against a hosted project.
    pub fn connect(config: &PlatformConfig) -> Self {
        let session = SessionContext::with_store(&config.credentials_path);
        let http = reqwest::Client::new();
        let data = Arc::new(RestDataStore::new(
            http.clone(),
            &config.platform_url,
            &config.anon_key,
            session.clone(),
        ));
        let objects = Arc::new(RestObjectStore::new(
            http.clone(),
            &config.platform_url,
            &config.anon_key,
            session.clone(),
        ));
        let identity = Arc::new(RestIdentityStore::new(
            http,
            &config.platform_url,
            &config.anon_key,
            config.service_role_key.clone(),
        ));
        Self::with_stores(data, objects, identity, session)
    }

    /// Assemble from explicit store implementations; tests use the
    /// in-memory backends.
    pub fn with_stores(
        data: Arc<dyn DataStore>,
        objects: Arc<dyn ObjectStore>,
        identity: Arc<dyn IdentityStore>,
        session: SessionContext,
    ) -> Self {
        Self {
            data,
            objects,
            identity,
            session,
            add_rating_bounds: RatingBounds::ADD,
            edit_rating_bounds: RatingBounds::EDIT,
            uploading: AtomicBool::new(false),
        }
    }

    /// Typed repository over the shared data store.
    pub fn repo<T: ContentRecord>(&self) -> TableRepository<T> {
        TableRepository::new(self.data.clone())
    }

    pub fn foods(&self) -> ScopedCollection<FoodReview> {
        ScopedCollection::new(Arc::new(self.repo::<FoodReview>()), self.session.clone())
    }

    pub fn pokemon(&self) -> ScopedCollection<PokemonReview> {
        ScopedCollection::new(Arc::new(self.repo::<PokemonReview>()), self.session.clone())
    }

    pub fn notes(&self) -> ScopedCollection<Note> {
        ScopedCollection::new(Arc::new(self.repo::<Note>()), self.session.clone())
    }

    /// The user behind the current session token; any miss is an
    /// authentication failure.
    pub async fn current_user(&self) -> DomainResult<AuthUser> {
        let token = self
            .session
            .access_token()
            .ok_or(DomainError::NotAuthenticated)?;
        match self.identity.current_user(&token).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(DomainError::NotAuthenticated),
            Err(e) => {
                log::warn!("identity check failed: {}", e);
                Err(DomainError::NotAuthenticated)
            }
        }
    }

    /// Claim the upload busy flag; `None` while another submission is
    /// in flight.
    pub(crate) fn begin_upload(&self) -> Option<UploadGuard<'_>> {
        if self
            .uploading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            Some(UploadGuard {
                flag: &self.uploading,
            })
        } else {
            None
        }
    }
}

/// Clears the busy flag when the submission finishes, success or not.
pub(crate) struct UploadGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for UploadGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
