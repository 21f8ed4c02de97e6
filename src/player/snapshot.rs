//! Storage backed by a copy of the browser's stores sent with a request.
//!
//! The watch page posts what it can read from `document.cookie`, `localStorage`
//! and `sessionStorage`. The engine runs against that copy and every write is
//! journaled as a [`StorageOp`] for the page to replay locally. The server
//! itself keeps no visitor state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::storage::{Scope, StorageError, VisitorStorage};

/// The browser stores as read by the page.
///
/// A `null` scope means the page could not access it (disabled, throwing or
/// blocked by privacy settings). A missing scope reads as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSnapshot {
    pub cookie: Option<HashMap<String, String>>,
    pub durable: Option<HashMap<String, String>>,
    pub session: Option<HashMap<String, String>>,
}

impl Default for StorageSnapshot {
    fn default() -> Self {
        Self {
            cookie: Some(HashMap::new()),
            durable: Some(HashMap::new()),
            session: Some(HashMap::new()),
        }
    }
}

impl StorageSnapshot {
    /// A snapshot where no store is reachable.
    pub fn unavailable() -> Self {
        Self {
            cookie: None,
            durable: None,
            session: None,
        }
    }

    fn scope(&self, scope: Scope) -> Option<&HashMap<String, String>> {
        match scope {
            Scope::Cookie => self.cookie.as_ref(),
            Scope::Durable => self.durable.as_ref(),
            Scope::Session => self.session.as_ref(),
        }
    }

    fn scope_mut(&mut self, scope: Scope) -> Option<&mut HashMap<String, String>> {
        match scope {
            Scope::Cookie => self.cookie.as_mut(),
            Scope::Durable => self.durable.as_mut(),
            Scope::Session => self.session.as_mut(),
        }
    }
}

/// A write the page must apply to its own stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StorageOp {
    Set {
        scope: Scope,
        key: String,
        value: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        expires: Option<DateTime<Utc>>,
    },
    Remove {
        scope: Scope,
        key: String,
    },
}

/// [`VisitorStorage`] over a [`StorageSnapshot`] that records every write.
#[derive(Debug, Default)]
pub struct SnapshotStorage {
    snapshot: StorageSnapshot,
    journal: Vec<StorageOp>,
}

impl SnapshotStorage {
    pub fn new(snapshot: StorageSnapshot) -> Self {
        Self {
            snapshot,
            journal: Vec::new(),
        }
    }

    /// Writes performed so far, in order.
    pub fn journal(&self) -> &[StorageOp] {
        &self.journal
    }

    pub fn into_journal(self) -> Vec<StorageOp> {
        self.journal
    }
}

impl VisitorStorage for SnapshotStorage {
    fn get(&self, scope: Scope, key: &str) -> Result<Option<String>, StorageError> {
        self.snapshot
            .scope(scope)
            .map(|store| store.get(key).cloned())
            .ok_or(StorageError::Unavailable(scope))
    }

    fn set(
        &mut self,
        scope: Scope,
        key: &str,
        value: &str,
        expires: Option<DateTime<Utc>>,
    ) -> Result<(), StorageError> {
        let store = self
            .snapshot
            .scope_mut(scope)
            .ok_or(StorageError::Unavailable(scope))?;
        store.insert(key.to_string(), value.to_string());

        self.journal.push(StorageOp::Set {
            scope,
            key: key.to_string(),
            value: value.to_string(),
            expires: if scope == Scope::Cookie { expires } else { None },
        });
        Ok(())
    }

    fn remove(&mut self, scope: Scope, key: &str) -> Result<(), StorageError> {
        let store = self
            .snapshot
            .scope_mut(scope)
            .ok_or(StorageError::Unavailable(scope))?;
        store.remove(key);

        self.journal.push(StorageOp::Remove {
            scope,
            key: key.to_string(),
        });
        Ok(())
    }
}
