//! Gateway used when the remote endpoint is not configured.
//!
//! Every call fails with a configuration error. The store records it in its
//! error channel like any other remote failure, so a missing URL or key
//! degrades the app instead of stopping it.

use crate::domain::error::{CountryDeckError, Result};
use crate::domain::{Country, CountryDraft, CountryPatch};
use crate::storage::backend::RecordGateway;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct DisconnectedGateway {
    reason: String,
}

impl DisconnectedGateway {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    fn fail<T>(&self) -> Result<T> {
        Err(CountryDeckError::Config(self.reason.clone()))
    }
}

#[async_trait]
impl RecordGateway for DisconnectedGateway {
    async fn select_all(&self) -> Result<Vec<Country>> {
        self.fail()
    }

    async fn insert(&self, _draft: &CountryDraft) -> Result<Country> {
        self.fail()
    }

    async fn update(&self, _id: &str, _patch: &CountryPatch, _updated_at: DateTime<Utc>) -> Result<Country> {
        self.fail()
    }

    async fn delete(&self, _id: &str) -> Result<()> {
        self.fail()
    }
}
