//! Data-store abstraction traits
//!
//! This module defines the trait that store adapters must implement to work
//! with Medboard, plus the query types the trait speaks. Rows cross the
//! boundary as [`serde_json::Value`] objects; typed decoding happens on the
//! consuming side where the shape matters.

use crate::domain::Result;
use async_trait::async_trait;
use serde_json::Value;

/// An equality filter on a single column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// Column to match
    pub column: String,
    /// Value the column must equal, unencoded
    pub value: String,
}

impl Filter {
    /// Creates an equality filter
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// Sort order for a select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// Column to sort by
    pub column: String,
    /// Sort direction
    pub descending: bool,
}

impl OrderBy {
    /// Sorts descending by the given column (newest first for dates)
    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: true,
        }
    }

    /// Sorts ascending by the given column
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: false,
        }
    }
}

/// Parameters for a select against one collection
///
/// Built with the chained setters:
///
/// ```
/// use medboard::adapters::store::{Filter, OrderBy, SelectQuery};
///
/// let query = SelectQuery::new()
///     .columns("*, rooms(room_number)")
///     .filter(Filter::eq("status", "critical"))
///     .order(OrderBy::descending("admission_date"))
///     .limit(10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SelectQuery {
    /// Column list, including embedded resources (`rooms(room_number)`);
    /// `None` selects every column
    pub columns: Option<String>,
    /// Equality filters, all of which must match
    pub filters: Vec<Filter>,
    /// Sort order
    pub order: Option<OrderBy>,
    /// Maximum number of rows
    pub limit: Option<usize>,
}

impl SelectQuery {
    /// Creates an empty query (all columns, no filters, no order, no limit)
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the column list
    pub fn columns(mut self, columns: impl Into<String>) -> Self {
        self.columns = Some(columns.into());
        self
    }

    /// Adds an equality filter
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Sets the sort order
    pub fn order(mut self, order: OrderBy) -> Self {
        self.order = Some(order);
        self
    }

    /// Sets the row limit
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Data-store client trait
///
/// All calls are authenticated implicitly by the ambient session the adapter
/// was built with; the core never handles credentials directly.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Select rows from a collection
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or rejects the query.
    async fn select(&self, collection: &str, query: &SelectQuery) -> Result<Vec<Value>>;

    /// Count rows in a collection matching the filters
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or rejects the query.
    async fn count(&self, collection: &str, filters: &[Filter]) -> Result<u64>;

    /// Insert rows into a collection, returning the inserted rows
    ///
    /// # Errors
    ///
    /// Returns an error if the insert is rejected.
    async fn insert(&self, collection: &str, rows: Vec<Value>) -> Result<Vec<Value>>;

    /// Patch rows matching the filters, returning the affected row count
    ///
    /// # Errors
    ///
    /// Returns an error if the update is rejected.
    async fn update(&self, collection: &str, patch: Value, filters: &[Filter]) -> Result<u64>;

    /// Delete rows matching the filters, returning the removed row count
    ///
    /// Consumed only by the admission rollback; nothing else in the core
    /// deletes records.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete is rejected.
    async fn delete(&self, collection: &str, filters: &[Filter]) -> Result<u64>;
}
