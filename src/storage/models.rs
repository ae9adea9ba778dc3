//! Wire payloads for the record gateways.
//!
//! These types are the request and response shapes on the wire and in the
//! JSON data file, kept separate from the domain types so the store's model
//! does not change when a backend's format does.

use crate::domain::{Country, CountryPatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of a partial update: the caller's patch plus a fresh `updated_at`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateBody<'a> {
    #[serde(flatten)]
    pub patch: &'a CountryPatch,
    pub updated_at: DateTime<Utc>,
}

/// Error body returned by a PostgREST endpoint.
///
/// Only `message` is surfaced to the store; the rest is logged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

/// On-disk container for [`JsonGateway`](crate::storage::JsonGateway).
///
/// Rows are kept in insertion order; `select_all` sorts by `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryFile {
    /// Version of the file format for future migrations.
    pub version: u32,

    #[serde(default)]
    pub countries: Vec<Country>,
}

impl Default for CountryFile {
    fn default() -> Self {
        Self {
            version: 1,
            countries: Vec::new(),
        }
    }
}

/// Sorts rows by `created_at` ascending, keeping insertion order for ties.
///
/// Rows without a timestamp sort first, matching how a database orders NULLs
/// under `ASC NULLS FIRST`.
pub fn order_by_created_at(rows: &mut [Country]) {
    rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
}
