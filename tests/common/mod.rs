//! Shared test doubles for integration tests
//!
//! `MockStore` is an in-memory stand-in for the hosted REST store with
//! scripted failures and a call log, so tests can assert both outcomes and
//! the order (or absence) of store calls. `MockIdentity` resolves a fixed
//! identity without a live session.

#![allow(dead_code)]

use async_trait::async_trait;
use medboard::adapters::identity::IdentityProvider;
use medboard::adapters::store::{DataStore, Filter, SelectQuery};
use medboard::domain::errors::{AuthError, StoreError};
use medboard::domain::{Identity, Result, Role, UserId};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

/// In-memory data store with scripted failures
#[derive(Default)]
pub struct MockStore {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    fail_selects: AtomicBool,
    fail_counts: AtomicBool,
    fail_updates_on: Mutex<HashSet<String>>,
    fail_deletes_on: Mutex<HashSet<String>>,
    calls: Mutex<Vec<String>>,
    next_id: AtomicU32,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection with rows
    pub fn with_rows(self, collection: &str, rows: Vec<Value>) -> Self {
        self.collections
            .lock()
            .unwrap()
            .insert(collection.to_string(), rows);
        self
    }

    /// Make every select fail
    pub fn fail_selects(&self) {
        self.fail_selects.store(true, Ordering::SeqCst);
    }

    /// Make every count fail
    pub fn fail_counts(&self) {
        self.fail_counts.store(true, Ordering::SeqCst);
    }

    /// Make updates against one collection fail
    pub fn fail_updates_on(&self, collection: &str) {
        self.fail_updates_on
            .lock()
            .unwrap()
            .insert(collection.to_string());
    }

    /// Make deletes against one collection fail
    pub fn fail_deletes_on(&self, collection: &str) {
        self.fail_deletes_on
            .lock()
            .unwrap()
            .insert(collection.to_string());
    }

    /// Every store call made so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Current rows of a collection
    pub fn rows(&self, collection: &str) -> Vec<Value> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

/// Field value as comparable text; non-strings render with their JSON
/// representation so booleans and numbers still match
fn field_text(row: &Value, column: &str) -> String {
    match row.get(column) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn matches(row: &Value, filters: &[Filter]) -> bool {
    filters.iter().all(|f| field_text(row, &f.column) == f.value)
}

#[async_trait]
impl DataStore for MockStore {
    async fn select(&self, collection: &str, query: &SelectQuery) -> Result<Vec<Value>> {
        self.log(format!("select {collection}"));
        if self.fail_selects.load(Ordering::SeqCst) {
            return Err(StoreError::QueryFailed {
                status: 500,
                message: "scripted select failure".to_string(),
            }
            .into());
        }

        let mut rows: Vec<Value> = self
            .rows(collection)
            .into_iter()
            .filter(|row| matches(row, &query.filters))
            .collect();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let a = field_text(a, &order.column);
                let b = field_text(b, &order.column);
                if order.descending {
                    b.cmp(&a)
                } else {
                    a.cmp(&b)
                }
            });
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn count(&self, collection: &str, filters: &[Filter]) -> Result<u64> {
        self.log(format!("count {collection}"));
        if self.fail_counts.load(Ordering::SeqCst) {
            return Err(StoreError::QueryFailed {
                status: 500,
                message: "scripted count failure".to_string(),
            }
            .into());
        }

        let total = self
            .rows(collection)
            .iter()
            .filter(|row| matches(row, filters))
            .count();
        Ok(total as u64)
    }

    async fn insert(&self, collection: &str, rows: Vec<Value>) -> Result<Vec<Value>> {
        self.log(format!("insert {collection}"));

        let mut inserted = Vec::with_capacity(rows.len());
        for mut row in rows {
            // The store stamps the primary key on insert.
            if row.get("id").is_none() || row["id"].is_null() {
                let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                row["id"] = Value::String(format!("00000000-0000-4000-8000-{n:012}"));
            }
            inserted.push(row);
        }

        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .extend(inserted.clone());
        Ok(inserted)
    }

    async fn update(&self, collection: &str, patch: Value, filters: &[Filter]) -> Result<u64> {
        self.log(format!("update {collection}"));
        if self.fail_updates_on.lock().unwrap().contains(collection) {
            return Err(StoreError::UpdateFailed("scripted update failure".to_string()).into());
        }

        let mut collections = self.collections.lock().unwrap();
        let rows = collections.entry(collection.to_string()).or_default();
        let mut affected = 0;
        for row in rows.iter_mut().filter(|row| matches(row, filters)) {
            if let (Some(target), Some(fields)) = (row.as_object_mut(), patch.as_object()) {
                for (key, value) in fields {
                    target.insert(key.clone(), value.clone());
                }
            }
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete(&self, collection: &str, filters: &[Filter]) -> Result<u64> {
        self.log(format!("delete {collection}"));
        if self.fail_deletes_on.lock().unwrap().contains(collection) {
            return Err(StoreError::DeleteFailed("scripted delete failure".to_string()).into());
        }

        let mut collections = self.collections.lock().unwrap();
        let rows = collections.entry(collection.to_string()).or_default();
        let before = rows.len();
        rows.retain(|row| !matches(row, filters));
        Ok((before - rows.len()) as u64)
    }
}

/// Identity provider resolving a fixed identity
pub struct MockIdentity {
    identity: Option<Identity>,
}

impl MockIdentity {
    pub fn signed_in(role: Option<Role>) -> Self {
        Self {
            identity: Some(Identity::new(UserId::new("user-1").unwrap(), role)),
        }
    }

    pub fn signed_out() -> Self {
        Self { identity: None }
    }
}

#[async_trait]
impl IdentityProvider for MockIdentity {
    async fn current_identity(&self) -> Result<Option<Identity>> {
        Ok(self.identity.clone())
    }

    async fn sign_out(&self) -> Result<()> {
        if self.identity.is_none() {
            return Err(AuthError::NotSignedIn.into());
        }
        Ok(())
    }
}
