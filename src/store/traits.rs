//! Store Layer - Core Traits
//!
//! Abstract interfaces over the hosted platform.
//! Implementations can be REST-backed, in-memory, etc.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{AuthSession, AuthUser, DomainResult, LoadOrder, UserId};

/// Column equality filter (`column = value`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: &'static str,
    pub value: String,
}

impl Filter {
    pub fn eq(column: &'static str, value: impl ToString) -> Self {
        Self {
            column,
            value: value.to_string(),
        }
    }
}

/// Relational store: one named table per content type.
///
/// Mutations return affected-row counts; a scoped update or delete that
/// matches nothing is a zero, not an error.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Read rows matching every filter, optionally ordered.
    async fn select(
        &self,
        table: &str,
        filters: &[Filter],
        order: Option<LoadOrder>,
    ) -> DomainResult<Vec<Value>>;

    /// Insert one row; returns the stored row including the assigned id.
    async fn insert(&self, table: &str, row: Value) -> DomainResult<Value>;

    /// Patch rows matching every filter.
    async fn update(&self, table: &str, filters: &[Filter], patch: Value) -> DomainResult<u64>;

    /// Delete rows matching every filter.
    async fn delete(&self, table: &str, filters: &[Filter]) -> DomainResult<u64>;
}

/// Upload failure modes. A key collision is recoverable: the caller
/// reuses the stored object's public URL instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    AlreadyExists,
    Other(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::AlreadyExists => write!(f, "The resource already exists"),
            StorageError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// Binary object storage, addressed by bucket + key.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// Public URL of the object at `key`. Derived, never a network call.
    fn public_url(&self, bucket: &str, key: &str) -> String;
}

/// Managed authentication.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// The user the given access token belongs to; `None` if the token
    /// is expired or revoked.
    async fn current_user(&self, access_token: &str) -> DomainResult<Option<AuthUser>>;

    /// Password sign-in; yields the token pair the session persists.
    async fn sign_in(&self, email: &str, password: &str) -> DomainResult<AuthSession>;

    /// Remove a platform user entirely. Admin surface; requires the
    /// service-role credential, never the anon key.
    async fn delete_user(&self, id: UserId) -> DomainResult<()>;
}
