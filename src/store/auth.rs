//! REST-backed identity store

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{AuthSession, AuthUser, DomainError, DomainResult, UserId};

use super::rest::expect_ok;
use super::traits::IdentityStore;

pub struct RestIdentityStore {
    http: reqwest::Client,
    base: String,
    anon_key: String,
    /// Admin credential; only account deletion needs it
    service_role_key: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

impl RestIdentityStore {
    pub fn new(
        http: reqwest::Client,
        platform_url: &str,
        anon_key: &str,
        service_role_key: Option<String>,
    ) -> Self {
        Self {
            http,
            base: format!("{}/auth/v1", platform_url.trim_end_matches('/')),
            anon_key: anon_key.to_string(),
            service_role_key,
        }
    }
}

#[async_trait]
impl IdentityStore for RestIdentityStore {
    async fn current_user(&self, access_token: &str) -> DomainResult<Option<AuthUser>> {
        let url = format!("{}/user", self.base);
        let resp = self
            .http
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| DomainError::Fetch(e.to_string()))?;

        if resp.status().as_u16() == 401 || resp.status().as_u16() == 403 {
            return Ok(None);
        }
        let resp = expect_ok(resp).await.map_err(DomainError::Fetch)?;
        let user: AuthUser = resp
            .json()
            .await
            .map_err(|e| DomainError::Fetch(e.to_string()))?;
        Ok(Some(user))
    }

    async fn sign_in(&self, email: &str, password: &str) -> DomainResult<AuthSession> {
        let url = format!("{}/token?grant_type=password", self.base);
        let resp = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| DomainError::Fetch(e.to_string()))?;

        match expect_ok(resp).await {
            Ok(resp) => {
                let token: TokenResponse = resp
                    .json()
                    .await
                    .map_err(|e| DomainError::Fetch(e.to_string()))?;
                Ok(AuthSession {
                    user: token.user,
                    access_token: token.access_token,
                })
            }
            Err(body) => {
                log::warn!("sign-in rejected: {}", body);
                Err(DomainError::NotAuthenticated)
            }
        }
    }

    async fn delete_user(&self, id: UserId) -> DomainResult<()> {
        let service_key = self.service_role_key.as_deref().ok_or_else(|| {
            DomainError::Internal("service role key not configured".to_string())
        })?;
        let url = format!("{}/admin/users/{}", self.base, id);
        let resp = self
            .http
            .delete(&url)
            .header("apikey", service_key)
            .bearer_auth(service_key)
            .send()
            .await
            .map_err(|e| DomainError::Write(e.to_string()))?;
        expect_ok(resp).await.map_err(DomainError::Write)?;
        Ok(())
    }
}
