//! Visitor-local storage as seen by the player engine.
//!
//! A browser offers three stores with different lifetimes: cookies (expire on
//! their own), a durable key/value store and a per-tab session store. Any of them
//! may be disabled or throw. The engine talks to them through [`VisitorStorage`]
//! and treats every failure as "nothing stored".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use super::clock::Clock;

/// Cookie marking that the direct link was shown. Value is always `"true"`.
pub const MARKER_COOKIE: &str = "directLinkOpened";
/// Durable key holding the epoch-millisecond time the direct link was shown.
pub const TIMESTAMP_KEY: &str = "directLinkOpenedTimestamp";
/// Session key set before a `front` redirect. Value is always `"1"`.
pub const RETURN_TRIP_KEY: &str = "vt_return_play";

/// The store a key lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Cookie,
    Durable,
    Session,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Cookie => write!(f, "cookie"),
            Scope::Durable => write!(f, "durable"),
            Scope::Session => write!(f, "session"),
        }
    }
}

/// Errors raised by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("{0} storage is unavailable")]
    Unavailable(Scope),
    #[error("{scope} storage rejected key {key}")]
    Rejected { scope: Scope, key: String },
}

/// Key/value access to the visitor's browser-local stores.
///
/// `expires` is only meaningful for [`Scope::Cookie`]; other scopes ignore it.
pub trait VisitorStorage {
    fn get(&self, scope: Scope, key: &str) -> Result<Option<String>, StorageError>;

    fn set(
        &mut self,
        scope: Scope,
        key: &str,
        value: &str,
        expires: Option<DateTime<Utc>>,
    ) -> Result<(), StorageError>;

    fn remove(&mut self, scope: Scope, key: &str) -> Result<(), StorageError>;
}

impl<S: VisitorStorage + ?Sized> VisitorStorage for &mut S {
    fn get(&self, scope: Scope, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(scope, key)
    }

    fn set(
        &mut self,
        scope: Scope,
        key: &str,
        value: &str,
        expires: Option<DateTime<Utc>>,
    ) -> Result<(), StorageError> {
        (**self).set(scope, key, value, expires)
    }

    fn remove(&mut self, scope: Scope, key: &str) -> Result<(), StorageError> {
        (**self).remove(scope, key)
    }
}

#[derive(Debug, Clone)]
struct StoredValue {
    value: String,
    expires: Option<DateTime<Utc>>,
}

/// In-process storage emulating a browser profile.
///
/// Cookies past their expiry read as absent, like a browser that already reaped
/// them. Scopes can be denied to emulate disabled storage.
pub struct MemoryStorage {
    clock: Arc<dyn Clock>,
    stores: HashMap<Scope, HashMap<String, StoredValue>>,
    denied: HashSet<Scope>,
}

impl MemoryStorage {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            stores: HashMap::new(),
            denied: HashSet::new(),
        }
    }

    /// Makes every access to `scope` fail with [`StorageError::Unavailable`].
    pub fn deny(&mut self, scope: Scope) {
        self.denied.insert(scope);
    }

    /// Drops the session store, as closing the tab would.
    pub fn end_session(&mut self) {
        self.stores.remove(&Scope::Session);
    }

    /// Reads a value regardless of denial or cookie expiry.
    pub fn peek(&self, scope: Scope, key: &str) -> Option<&str> {
        self.stores
            .get(&scope)
            .and_then(|store| store.get(key))
            .map(|stored| stored.value.as_str())
    }

    fn check(&self, scope: Scope) -> Result<(), StorageError> {
        if self.denied.contains(&scope) {
            Err(StorageError::Unavailable(scope))
        } else {
            Ok(())
        }
    }
}

impl VisitorStorage for MemoryStorage {
    fn get(&self, scope: Scope, key: &str) -> Result<Option<String>, StorageError> {
        self.check(scope)?;
        let now = self.clock.now();

        Ok(self
            .stores
            .get(&scope)
            .and_then(|store| store.get(key))
            .filter(|stored| stored.expires.is_none_or(|at| at > now))
            .map(|stored| stored.value.clone()))
    }

    fn set(
        &mut self,
        scope: Scope,
        key: &str,
        value: &str,
        expires: Option<DateTime<Utc>>,
    ) -> Result<(), StorageError> {
        self.check(scope)?;
        let expires = if scope == Scope::Cookie { expires } else { None };

        self.stores.entry(scope).or_default().insert(
            key.to_string(),
            StoredValue {
                value: value.to_string(),
                expires,
            },
        );
        Ok(())
    }

    fn remove(&mut self, scope: Scope, key: &str) -> Result<(), StorageError> {
        self.check(scope)?;
        if let Some(store) = self.stores.get_mut(&scope) {
            store.remove(key);
        }
        Ok(())
    }
}
