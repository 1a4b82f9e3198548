//! REST-backed data store
//!
//! Speaks the platform's PostgREST surface: equality filters as
//! `column=eq.value` query parameters, bearer auth, JSON rows in and out.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde_json::Value;

use crate::domain::{DomainError, DomainResult, LoadOrder};
use crate::session::SessionContext;

use super::traits::{DataStore, Filter};

pub struct RestDataStore {
    http: reqwest::Client,
    base: String,
    anon_key: String,
    session: SessionContext,
}

impl RestDataStore {
    pub fn new(
        http: reqwest::Client,
        platform_url: &str,
        anon_key: &str,
        session: SessionContext,
    ) -> Self {
        Self {
            http,
            base: format!("{}/rest/v1", platform_url.trim_end_matches('/')),
            anon_key: anon_key.to_string(),
            session,
        }
    }

    /// Signed-in users act under their own token; everything else falls
    /// back to the anon key.
    fn bearer(&self) -> String {
        self.session
            .access_token()
            .unwrap_or_else(|| self.anon_key.clone())
    }

    fn table_url(&self, table: &str, filters: &[Filter], order: Option<LoadOrder>) -> String {
        let mut params: Vec<String> = filters
            .iter()
            .map(|f| {
                format!(
                    "{}=eq.{}",
                    f.column,
                    utf8_percent_encode(&f.value, NON_ALPHANUMERIC)
                )
            })
            .collect();
        if let Some(o) = order {
            params.push(format!(
                "order={}.{}",
                o.column,
                if o.ascending { "asc" } else { "desc" }
            ));
        }
        if params.is_empty() {
            format!("{}/{}", self.base, table)
        } else {
            format!("{}/{}?{}", self.base, table, params.join("&"))
        }
    }
}

/// Map a non-success response to its status + body text.
pub(super) async fn expect_ok(resp: reqwest::Response) -> Result<reqwest::Response, String> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        let body = resp.text().await.unwrap_or_default();
        Err(format!("{}: {}", status, body))
    }
}

#[async_trait]
impl DataStore for RestDataStore {
    async fn select(
        &self,
        table: &str,
        filters: &[Filter],
        order: Option<LoadOrder>,
    ) -> DomainResult<Vec<Value>> {
        let url = self.table_url(table, filters, order);
        let resp = self
            .http
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
            .send()
            .await
            .map_err(|e| DomainError::Fetch(e.to_string()))?;
        let resp = expect_ok(resp).await.map_err(DomainError::Fetch)?;
        resp.json::<Vec<Value>>()
            .await
            .map_err(|e| DomainError::Fetch(e.to_string()))
    }

    async fn insert(&self, table: &str, row: Value) -> DomainResult<Value> {
        let url = format!("{}/{}", self.base, table);
        let resp = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
            // Ask for the stored row back so the caller gets the assigned id
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(|e| DomainError::Write(e.to_string()))?;
        let resp = expect_ok(resp).await.map_err(DomainError::Write)?;
        let rows: Vec<Value> = resp
            .json()
            .await
            .map_err(|e| DomainError::Write(e.to_string()))?;
        rows.into_iter()
            .next()
            .ok_or_else(|| DomainError::Write(format!("insert into {} returned no row", table)))
    }

    async fn update(&self, table: &str, filters: &[Filter], patch: Value) -> DomainResult<u64> {
        let url = self.table_url(table, filters, None);
        let resp = self
            .http
            .patch(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
            .header("Prefer", "return=representation")
            .json(&patch)
            .send()
            .await
            .map_err(|e| DomainError::Write(e.to_string()))?;
        let resp = expect_ok(resp).await.map_err(DomainError::Write)?;
        let rows: Vec<Value> = resp
            .json()
            .await
            .map_err(|e| DomainError::Write(e.to_string()))?;
        Ok(rows.len() as u64)
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> DomainResult<u64> {
        let url = self.table_url(table, filters, None);
        let resp = self
            .http
            .delete(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(|e| DomainError::Write(e.to_string()))?;
        let resp = expect_ok(resp).await.map_err(DomainError::Write)?;
        let rows: Vec<Value> = resp
            .json()
            .await
            .map_err(|e| DomainError::Write(e.to_string()))?;
        Ok(rows.len() as u64)
    }
}
