//! In-memory store backends
//!
//! Back the tests and local development without a hosted project. Ids
//! are assigned the same way the platform assigns them: on insert,
//! never client-side.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{AuthSession, AuthUser, DomainError, DomainResult, LoadOrder, UserId};

use super::traits::{DataStore, Filter, IdentityStore, ObjectStore, StorageError};

/// Stringify a JSON value the way filters are written (no quotes).
fn json_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn matches(row: &Value, filters: &[Filter]) -> bool {
    filters
        .iter()
        .all(|f| row.get(f.column).map(json_text).as_deref() == Some(f.value.as_str()))
}

#[derive(Default)]
pub struct MemoryDataStore {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    next_id: Mutex<i64>,
}

impl MemoryDataStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataStore for MemoryDataStore {
    async fn select(
        &self,
        table: &str,
        filters: &[Filter],
        order: Option<LoadOrder>,
    ) -> DomainResult<Vec<Value>> {
        let tables = self.tables.lock().await;
        let mut rows: Vec<Value> = tables
            .get(table)
            .map(|rows| rows.iter().filter(|r| matches(r, filters)).cloned().collect())
            .unwrap_or_default();
        if let Some(o) = order {
            rows.sort_by_key(|r| r.get(o.column).map(json_text).unwrap_or_default());
            if !o.ascending {
                rows.reverse();
            }
        }
        Ok(rows)
    }

    async fn insert(&self, table: &str, row: Value) -> DomainResult<Value> {
        let mut row = row;
        let obj = row
            .as_object_mut()
            .ok_or_else(|| DomainError::Write("row is not an object".to_string()))?;
        let id = {
            let mut next = self.next_id.lock().await;
            *next += 1;
            *next
        };
        obj.insert("id".to_string(), Value::from(id));

        let mut tables = self.tables.lock().await;
        tables.entry(table.to_string()).or_default().push(row.clone());
        Ok(row)
    }

    async fn update(&self, table: &str, filters: &[Filter], patch: Value) -> DomainResult<u64> {
        let patch = patch
            .as_object()
            .ok_or_else(|| DomainError::Write("patch is not an object".to_string()))?
            .clone();
        let mut tables = self.tables.lock().await;
        let mut touched = 0u64;
        if let Some(rows) = tables.get_mut(table) {
            for row in rows.iter_mut().filter(|r| matches(r, filters)) {
                if let Some(obj) = row.as_object_mut() {
                    for (k, v) in &patch {
                        obj.insert(k.clone(), v.clone());
                    }
                    touched += 1;
                }
            }
        }
        Ok(touched)
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> DomainResult<u64> {
        let mut tables = self.tables.lock().await;
        if let Some(rows) = tables.get_mut(table) {
            let before = rows.len();
            rows.retain(|r| !matches(r, filters));
            Ok((before - rows.len()) as u64)
        } else {
            Ok(0)
        }
    }
}

#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object, overwriting; lets tests stage a collision.
    pub async fn put(&self, bucket: &str, key: &str, bytes: Vec<u8>) {
        self.objects
            .lock()
            .await
            .insert(format!("{}/{}", bucket, key), bytes);
    }

    pub async fn contains(&self, bucket: &str, key: &str) -> bool {
        self.objects
            .lock()
            .await
            .contains_key(&format!("{}/{}", bucket, key))
    }

    pub async fn object_count(&self) -> usize {
        self.objects.lock().await.len()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), StorageError> {
        let mut objects = self.objects.lock().await;
        let path = format!("{}/{}", bucket, key);
        if objects.contains_key(&path) {
            return Err(StorageError::AlreadyExists);
        }
        objects.insert(path, bytes);
        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("memory://{}/{}", bucket, key)
    }
}

#[derive(Default)]
pub struct MemoryIdentityStore {
    users: Mutex<Vec<(String, String, AuthUser)>>,
    tokens: Mutex<HashMap<String, AuthUser>>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, email: &str, password: &str) -> AuthUser {
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
        };
        self.users
            .lock()
            .await
            .push((email.to_string(), password.to_string(), user.clone()));
        user
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn current_user(&self, access_token: &str) -> DomainResult<Option<AuthUser>> {
        Ok(self.tokens.lock().await.get(access_token).cloned())
    }

    async fn sign_in(&self, email: &str, password: &str) -> DomainResult<AuthSession> {
        let users = self.users.lock().await;
        let user = users
            .iter()
            .find(|(e, p, _)| e == email && p == password)
            .map(|(_, _, u)| u.clone())
            .ok_or(DomainError::NotAuthenticated)?;
        drop(users);

        let token = format!("tok-{}", Uuid::new_v4());
        self.tokens.lock().await.insert(token.clone(), user.clone());
        Ok(AuthSession {
            user,
            access_token: token,
        })
    }

    async fn delete_user(&self, id: UserId) -> DomainResult<()> {
        let mut users = self.users.lock().await;
        let before = users.len();
        users.retain(|(_, _, u)| u.id != id);
        if users.len() == before {
            return Err(DomainError::NotFound(format!("user {}", id)));
        }
        drop(users);
        self.tokens.lock().await.retain(|_, u| u.id != id);
        Ok(())
    }
}
