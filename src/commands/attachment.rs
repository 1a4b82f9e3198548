//! Attachment upload helpers
//!
//! Shared by the add and edit flows: derived storage keys, collision
//! handling, content types.

use chrono::Utc;

use crate::domain::{DomainError, DomainResult, UserId};
use crate::store::{ObjectStore, StorageError};

/// An image picked in a form: original file name plus bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Deterministic key: the same user uploading the same file name
/// collides by design, letting a re-submission reuse the stored object.
pub(super) fn derived_key(owner: UserId, file_name: &str) -> String {
    format!("{}/{}", owner, file_name)
}

/// Timestamped key for replacements, immune to the derived-key
/// collision.
pub(super) fn timestamped_key(owner: UserId, file_name: &str) -> String {
    let ext = file_name.rsplit_once('.').map(|(_, e)| e).unwrap_or("bin");
    format!("{}/{}.{}", owner, Utc::now().timestamp_millis(), ext)
}

pub(super) fn content_type_for(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .to_string()
}

/// Upload, treating "already exists" as success: the pre-existing
/// object's public URL is reused. Any other storage error is fatal and
/// no record referencing the object may be written.
pub(super) async fn upload_or_reuse(
    objects: &dyn ObjectStore,
    bucket: &str,
    key: &str,
    bytes: Vec<u8>,
    content_type: &str,
) -> DomainResult<String> {
    match objects.upload(bucket, key, bytes, content_type).await {
        Ok(()) => Ok(objects.public_url(bucket, key)),
        Err(StorageError::AlreadyExists) => {
            log::info!("object {}/{} already stored, reusing its URL", bucket, key);
            Ok(objects.public_url(bucket, key))
        }
        Err(StorageError::Other(msg)) => {
            log::error!("failed to upload {}/{}: {}", bucket, key, msg);
            Err(DomainError::Upload(msg))
        }
    }
}
