//! Record gateway layer: the store's only path to persisted country rows.
//!
//! This module provides the [`RecordGateway`] abstraction and its backends.
//! The store never talks to a backend directly; it awaits a gateway call and
//! applies the returned rows to local state.
//!
//! # Modules
//!
//! - `backend`: Gateway trait abstraction
//! - `rest`: HTTP client for a hosted PostgREST-style `countries` table
//! - `memory`: In-process record store
//! - `json`: JSON file-backed record store with atomic writes
//! - `disconnected`: Stand-in used when endpoint credentials are missing
//! - `models`: Wire payloads separate from domain models

pub mod backend;
pub mod disconnected;
pub mod json;
pub mod memory;
pub mod models;
pub mod rest;

pub use backend::RecordGateway;
pub use disconnected::DisconnectedGateway;
pub use json::JsonGateway;
pub use memory::MemoryGateway;
pub use rest::RestGateway;

use crate::{Backend, Config};
use std::sync::Arc;

/// Builds the gateway selected by `config.backend`.
///
/// A `rest` backend without both `api_url` and `api_key` logs a warning and
/// returns a [`DisconnectedGateway`], so the store still starts and every
/// remote call reports the missing configuration through its error channel.
///
/// # Errors
///
/// Returns an error if the JSON data file exists but cannot be read or parsed,
/// or if the HTTP client cannot be constructed.
pub fn connect(config: &Config) -> crate::Result<Arc<dyn RecordGateway>> {
    let _span = tracing::debug_span!("connect_gateway", backend = ?config.backend).entered();

    match config.backend {
        Backend::Rest => match (config.api_url.as_deref(), config.api_key.as_deref()) {
            (Some(url), Some(key)) if !url.is_empty() && !key.is_empty() => {
                let gateway = RestGateway::new(url, key, &config.table)?;
                tracing::debug!(url = %url, table = %config.table, "rest gateway ready");
                Ok(Arc::new(gateway))
            }
            _ => {
                tracing::warn!(
                    "remote credentials not found; set COUNTRYDECK_API_URL and COUNTRYDECK_API_KEY"
                );
                Ok(Arc::new(DisconnectedGateway::new(
                    "remote endpoint URL or access key is not configured",
                )))
            }
        },
        Backend::File => {
            let path = config
                .data_file
                .clone()
                .unwrap_or_else(|| crate::infrastructure::paths::get_data_dir().join("countries.json"));
            Ok(Arc::new(JsonGateway::open(path)?))
        }
        Backend::Memory => Ok(Arc::new(MemoryGateway::new())),
    }
}
