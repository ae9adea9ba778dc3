//! Record gateway abstraction.
//!
//! This module defines the [`RecordGateway`] trait that abstracts over the
//! backends holding the `countries` table. It lets the store run unchanged
//! against the hosted REST endpoint, a local JSON file, or memory.
//!
//! # Design Philosophy
//!
//! The trait is the four calls the store needs, not a generic query builder.
//! Each method is a single round trip: no batching, no retries, no pagination.

use crate::domain::error::Result;
use crate::domain::{Country, CountryDraft, CountryPatch};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Abstraction over the backend that owns the country rows.
///
/// Implementations assign `id`, `created_at`, and `updated_at` on insert and
/// return complete rows so the store can reconcile with the authoritative copy.
///
/// # Implementations
///
/// - [`RestGateway`](crate::storage::RestGateway): hosted PostgREST-style table
/// - [`JsonGateway`](crate::storage::JsonGateway): JSON file with atomic writes
/// - [`MemoryGateway`](crate::storage::MemoryGateway): in-process rows
/// - [`DisconnectedGateway`](crate::storage::DisconnectedGateway): always fails
#[async_trait]
pub trait RecordGateway: Send + Sync {
    /// Retrieves every row, ordered by `created_at` ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached or rejects the query.
    async fn select_all(&self) -> Result<Vec<Country>>;

    /// Inserts one row and returns it with the server-assigned fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert is rejected (e.g. a constraint violation).
    async fn insert(&self, draft: &CountryDraft) -> Result<Country>;

    /// Applies `patch` and `updated_at` to the row with `id`, returning the updated row.
    ///
    /// # Errors
    ///
    /// Returns [`CountryDeckError::NotFound`](crate::domain::CountryDeckError::NotFound)
    /// if no row matches, or any backend error.
    async fn update(&self, id: &str, patch: &CountryPatch, updated_at: DateTime<Utc>) -> Result<Country>;

    /// Deletes the row with `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the delete.
    async fn delete(&self, id: &str) -> Result<()>;
}
