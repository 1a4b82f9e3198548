//! Domain Layer - Core Entity Trait
//!
//! The basic contract for all domain entities: a unique ID and
//! thread-safety, nothing more.

use serde::{Deserialize, Serialize};

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
///
/// Storage collisions are not represented here: "resource already exists"
/// is handled inside the upload flow by reusing the stored object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomainError {
    /// No signed-in user where one is required
    NotAuthenticated,
    /// A read from the remote store failed
    Fetch(String),
    /// An insert, update or delete failed
    Write(String),
    /// A binary upload failed for a reason other than a key collision
    Upload(String),
    NotFound(String),
    InvalidInput(String),
    Internal(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::NotAuthenticated => write!(f, "Not authenticated"),
            DomainError::Fetch(msg) => write!(f, "Fetch failed: {}", msg),
            DomainError::Write(msg) => write!(f, "Write failed: {}", msg),
            DomainError::Upload(msg) => write!(f, "Upload failed: {}", msg),
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
