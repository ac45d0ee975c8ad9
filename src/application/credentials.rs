//! Credential Manager - the active API key and its status.
//!
//! A key pasted by the learner is stored durably and wins over the key
//! from configuration. Status changes are pushed to subscribers as they
//! happen.

use std::sync::{Arc, RwLock};

use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tokio::sync::{watch, Mutex};

use crate::domain::foundation::{DomainError, ValidationError};
use crate::ports::{CredentialSource, KeyValueStore, StorageError, API_KEY_KEY};

/// Where the active credential came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialOrigin {
    None,
    Environment,
    Stored,
}

/// Public view of the credential. Never carries the key itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialStatus {
    pub configured: bool,
    pub source: CredentialOrigin,
    /// First 8 hex digits of the key's SHA-256.
    pub fingerprint: Option<String>,
}

impl CredentialStatus {
    fn none() -> Self {
        Self {
            configured: false,
            source: CredentialOrigin::None,
            fingerprint: None,
        }
    }
}

/// Short, non-reversible identifier for logs and status responses.
pub fn fingerprint(key: &str) -> String {
    Sha256::digest(key.as_bytes())
        .iter()
        .take(4)
        .map(|b| format!("{:02x}", b))
        .collect()
}

pub struct CredentialManager {
    storage: Arc<dyn KeyValueStore>,
    environment: Option<Secret<String>>,
    stored: RwLock<Option<Secret<String>>>,
    status: watch::Sender<CredentialStatus>,
    /// Held across the durable write and the in-memory swap.
    write_lock: Mutex<()>,
}

impl CredentialManager {
    /// Restores a previously pasted key, if any.
    pub async fn load(
        storage: Arc<dyn KeyValueStore>,
        environment_key: Option<String>,
    ) -> Result<Self, StorageError> {
        let stored = storage
            .get(API_KEY_KEY)
            .await?
            .and_then(|k| non_blank(&k))
            .map(Secret::new);
        let environment = environment_key.and_then(|k| non_blank(&k)).map(Secret::new);

        let (status, _) = watch::channel(CredentialStatus::none());
        let manager = Self {
            storage,
            environment,
            stored: RwLock::new(stored),
            status,
            write_lock: Mutex::new(()),
        };
        manager.publish();
        Ok(manager)
    }

    pub fn status(&self) -> CredentialStatus {
        self.status.borrow().clone()
    }

    /// Receives the new status on every change.
    pub fn subscribe(&self) -> watch::Receiver<CredentialStatus> {
        self.status.subscribe()
    }

    /// Stores a pasted key and makes it the active credential.
    pub async fn set_credential(&self, key: &str) -> Result<CredentialStatus, DomainError> {
        let key = non_blank(key).ok_or_else(|| ValidationError::empty_field("api_key"))?;
        let _guard = self.write_lock.lock().await;
        self.storage.set(API_KEY_KEY, &key).await?;

        let print = fingerprint(&key);
        *self.stored.write().unwrap_or_else(|e| e.into_inner()) = Some(Secret::new(key));
        let status = self.publish();
        tracing::info!(fingerprint = %print, "API key updated");
        Ok(status)
    }

    /// Forgets the pasted key; the configured key (if any) applies again.
    pub async fn clear_credential(&self) -> Result<CredentialStatus, DomainError> {
        let _guard = self.write_lock.lock().await;
        self.storage.remove(API_KEY_KEY).await?;
        *self.stored.write().unwrap_or_else(|e| e.into_inner()) = None;
        let status = self.publish();
        tracing::info!(source = ?status.source, "stored API key cleared");
        Ok(status)
    }

    fn compute_status(&self) -> CredentialStatus {
        let stored = self.stored.read().unwrap_or_else(|e| e.into_inner());
        let (source, key) = match (stored.as_ref(), self.environment.as_ref()) {
            (Some(k), _) => (CredentialOrigin::Stored, k),
            (None, Some(k)) => (CredentialOrigin::Environment, k),
            (None, None) => return CredentialStatus::none(),
        };
        CredentialStatus {
            configured: true,
            source,
            fingerprint: Some(fingerprint(key.expose_secret())),
        }
    }

    fn publish(&self) -> CredentialStatus {
        let status = self.compute_status();
        self.status.send_replace(status.clone());
        status
    }
}

impl CredentialSource for CredentialManager {
    fn current(&self) -> Option<Secret<String>> {
        let stored = self.stored.read().unwrap_or_else(|e| e.into_inner());
        stored
            .as_ref()
            .or(self.environment.as_ref())
            .map(|k| Secret::new(k.expose_secret().clone()))
    }
}

fn non_blank(key: &str) -> Option<String> {
    let trimmed = key.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
