//! REST-backed object store
//!
//! Uploads go to `/storage/v1/object/{bucket}/{key}`; public URLs are
//! derived from the bucket + key, no call needed.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::session::SessionContext;

use super::traits::{ObjectStore, StorageError};

// Characters that cannot appear raw in a URL path segment. '/' is
// included because keys are encoded segment by segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'{')
    .add(b'}');

/// Encode a storage key for use in a URL path, keeping its `/` layout.
fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|seg| utf8_percent_encode(seg, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

pub struct RestObjectStore {
    http: reqwest::Client,
    base: String,
    anon_key: String,
    session: SessionContext,
}

impl RestObjectStore {
    pub fn new(
        http: reqwest::Client,
        platform_url: &str,
        anon_key: &str,
        session: SessionContext,
    ) -> Self {
        Self {
            http,
            base: format!("{}/storage/v1", platform_url.trim_end_matches('/')),
            anon_key: anon_key.to_string(),
            session,
        }
    }

    fn bearer(&self) -> String {
        self.session
            .access_token()
            .unwrap_or_else(|| self.anon_key.clone())
    }
}

#[async_trait]
impl ObjectStore for RestObjectStore {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let url = format!("{}/object/{}/{}", self.base, bucket, encode_key(key));
        let resp = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| StorageError::Other(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        // The platform reports a key collision as 409/"Duplicate"
        if status.as_u16() == 409
            || body.contains("already exists")
            || body.contains("Duplicate")
        {
            Err(StorageError::AlreadyExists)
        } else {
            Err(StorageError::Other(format!("{}: {}", status, body)))
        }
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/object/public/{}/{}", self.base, bucket, encode_key(key))
    }
}
