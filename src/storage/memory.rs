//! In-process record store.
//!
//! Behaves like the hosted table (server-assigned UUID ids and timestamps,
//! `created_at` ordering) without any I/O. Used for the `memory` backend and
//! as the gateway in store tests, where [`MemoryGateway::fail_next`] injects
//! a remote failure into the next call.

use crate::domain::error::{CountryDeckError, Result};
use crate::domain::{Country, CountryDraft, CountryPatch};
use crate::storage::backend::RecordGateway;
use crate::storage::models::order_by_created_at;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<Country>,
    fail_next: Option<String>,
    calls: usize,
}

/// Thread-safe in-memory gateway.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    inner: Mutex<Inner>,
}

impl MemoryGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gateway already holding `rows`.
    ///
    /// Rows without timestamps keep their given order, since they all sort
    /// equal under `created_at`.
    #[must_use]
    pub fn seeded(rows: Vec<Country>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                rows,
                ..Inner::default()
            }),
        }
    }

    /// Makes the next call fail with a remote error carrying `message`.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.lock().fail_next = Some(message.into());
    }

    /// Number of gateway calls served so far, failed ones included.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.lock().calls
    }

    /// Copy of the stored rows in insertion order.
    #[must_use]
    pub fn rows(&self) -> Vec<Country> {
        self.lock().rows.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A panic while holding the lock cannot leave rows half-written.
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn begin(&self) -> Result<std::sync::MutexGuard<'_, Inner>> {
        let mut inner = self.lock();
        inner.calls += 1;
        if let Some(message) = inner.fail_next.take() {
            return Err(CountryDeckError::Remote { status: 500, message });
        }
        Ok(inner)
    }
}

#[async_trait]
impl RecordGateway for MemoryGateway {
    async fn select_all(&self) -> Result<Vec<Country>> {
        let inner = self.begin()?;
        let mut rows = inner.rows.clone();
        order_by_created_at(&mut rows);
        tracing::debug!(count = rows.len(), "memory rows selected");
        Ok(rows)
    }

    async fn insert(&self, draft: &CountryDraft) -> Result<Country> {
        let mut inner = self.begin()?;
        let row = Country::from_draft(uuid::Uuid::new_v4().to_string(), draft, Utc::now());
        inner.rows.push(row.clone());
        tracing::debug!(id = %row.id, "memory row inserted");
        Ok(row)
    }

    async fn update(&self, id: &str, patch: &CountryPatch, updated_at: DateTime<Utc>) -> Result<Country> {
        let mut inner = self.begin()?;
        let row = inner
            .rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| CountryDeckError::NotFound(id.to_string()))?;
        patch.apply_to(row);
        row.updated_at = Some(updated_at);
        Ok(row.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut inner = self.begin()?;
        let before = inner.rows.len();
        inner.rows.retain(|row| row.id != id);
        tracing::debug!(id = %id, removed = before - inner.rows.len(), "memory row deleted");
        Ok(())
    }
}
