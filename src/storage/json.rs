//! JSON file-based record store.
//!
//! This module provides an offline backend that keeps the `countries` table
//! in a human-readable JSON file. Writes go to a temporary file which is then
//! renamed over the target, so a crash never leaves a half-written file.
//!
//! # Performance Characteristics
//!
//! - **Read**: served from memory; the file is loaded once on open
//! - **Write**: O(n), the whole table is rewritten on every mutation
//! - **Best for**: small tables and single-user offline use

use crate::domain::error::{CountryDeckError, Result};
use crate::domain::{Country, CountryDraft, CountryPatch};
use crate::storage::backend::RecordGateway;
use crate::storage::models::{order_by_created_at, CountryFile};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// JSON file gateway.
///
/// The whole table is cached in memory and persisted after each mutation.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "countries": [
///     {
///       "id": "0b6f…",
///       "name": "Indonesia",
///       "capital": "Jakarta",
///       "continent": "Asia",
///       "flag": "🇮🇩",
///       "created_at": "2024-05-01T10:00:00Z",
///       "updated_at": "2024-05-01T10:00:00Z"
///     }
///   ]
/// }
/// ```
#[derive(Debug)]
pub struct JsonGateway {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory copy of the file, loaded on open.
    data: Mutex<CountryFile>,
}

impl JsonGateway {
    /// Creates or opens a JSON record store.
    ///
    /// If the file exists, loads it. Otherwise starts empty; the file is
    /// created on the first write. Parent directories are created eagerly.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - The file exists but contains invalid JSON
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use countrydeck::storage::JsonGateway;
    /// use std::path::PathBuf;
    ///
    /// let gateway = JsonGateway::open(PathBuf::from("/tmp/countries.json"))?;
    /// # Ok::<(), countrydeck::CountryDeckError>(())
    /// ```
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON record store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no data file yet, starting empty");
            CountryFile::default()
        };

        tracing::debug!(count = data.countries.len(), "JSON record store ready");

        Ok(Self {
            file_path,
            data: Mutex::new(data),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<CountryFile> {
        let contents = std::fs::read_to_string(path)?;
        let data: CountryFile = serde_json::from_str(&contents)
            .map_err(|e| CountryDeckError::Storage(format!("failed to parse {}: {e}", path.display())))?;

        tracing::debug!(version = data.version, count = data.countries.len(), "loaded data file");
        Ok(data)
    }

    /// Writes `data` to a sibling temp file, then renames it into place.
    fn save_to_file(&self, data: &CountryFile) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| CountryDeckError::Storage(format!("failed to serialize rows: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::trace!(path = ?self.file_path, "data file saved");
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CountryFile> {
        self.data.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Applies `mutate` to a copy of the table and commits it only if the
    /// file write succeeds, so memory never runs ahead of disk.
    fn commit<T>(&self, mutate: impl FnOnce(&mut CountryFile) -> Result<T>) -> Result<T> {
        let mut data = self.lock();
        let mut next = data.clone();
        let value = mutate(&mut next)?;
        self.save_to_file(&next)?;
        *data = next;
        Ok(value)
    }
}

#[async_trait]
impl RecordGateway for JsonGateway {
    async fn select_all(&self) -> Result<Vec<Country>> {
        let _span = tracing::debug_span!("json_select_all").entered();

        let mut rows = self.lock().countries.clone();
        order_by_created_at(&mut rows);

        tracing::debug!(count = rows.len(), "retrieved rows");
        Ok(rows)
    }

    async fn insert(&self, draft: &CountryDraft) -> Result<Country> {
        let _span = tracing::debug_span!("json_insert", name = %draft.name).entered();

        let row = Country::from_draft(uuid::Uuid::new_v4().to_string(), draft, Utc::now());
        self.commit(|data| {
            data.countries.push(row.clone());
            Ok(())
        })?;

        tracing::debug!(id = %row.id, "row inserted");
        Ok(row)
    }

    async fn update(&self, id: &str, patch: &CountryPatch, updated_at: DateTime<Utc>) -> Result<Country> {
        let _span = tracing::debug_span!("json_update", id = %id).entered();

        self.commit(|data| {
            let row = data
                .countries
                .iter_mut()
                .find(|row| row.id == id)
                .ok_or_else(|| CountryDeckError::NotFound(id.to_string()))?;
            patch.apply_to(row);
            row.updated_at = Some(updated_at);
            Ok(row.clone())
        })
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_delete", id = %id).entered();

        let removed = self.commit(|data| {
            let before = data.countries.len();
            data.countries.retain(|row| row.id != id);
            Ok(before - data.countries.len())
        })?;

        tracing::debug!(removed = removed, "row delete applied");
        Ok(())
    }
}
