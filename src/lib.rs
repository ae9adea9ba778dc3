//! Countrydeck: a country catalogue backed by a hosted record store.
//!
//! Countrydeck keeps a working set of country records (name, capital,
//! continent, flag) in sync with a remote table and provides:
//! - Case-insensitive search over names and capitals
//! - A continent view grouped in order of first appearance
//! - Create, update, and delete actions that only apply after the remote
//!   store confirms them (or optimistically, with rollback)
//! - Loading and error bookkeeping for the UI
//! - A detail screen fed by navigation parameters

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal Shell (main.rs)                           │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - CountryStore and its actions                     │
//! │  - Event handling                                   │
//! │  - Derived views and view models                    │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────┐                     ┌───────────────┐
//! │ UI Layer      │                     │ Storage Layer │
//! │ (ui/)         │                     │ (storage/)    │
//! │ - View models │                     │ - REST client │
//! │ - Rendering   │                     │ - JSON file   │
//! └───────────────┘                     │ - In-memory   │
//!                                       └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Country model (domain/country)                   │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber + OpenTelemetry file export   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Store, state, event handling
//! - [`domain`]: Core domain types (Country, errors)
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`storage`]: Record gateways (REST, JSON file, memory)
//! - [`ui`]: View models and plain-text rendering
//! - [`observability`]: Tracing setup
//!
//! # Configuration
//!
//! Configuration is read from `<config_dir>/countrydeck/config.toml` (or a
//! path given on the command line), then overridden by the environment:
//!
//! ```toml
//! backend = "rest"
//! api_url = "https://example.supabase.co"
//! api_key = "public-anon-key"
//! table = "countries"
//! sync_policy = "confirm"
//! trace_level = "info"
//! ```
//!
//! | Variable | Field |
//! |----------|-------|
//! | `COUNTRYDECK_API_URL` | `api_url` |
//! | `COUNTRYDECK_API_KEY` | `api_key` |
//! | `COUNTRYDECK_BACKEND` | `backend` |
//! | `COUNTRYDECK_TRACE_LEVEL` | `trace_level` |
//!
//! # Example
//!
//! ```rust
//! use countrydeck::{initialize, Backend, Config};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let config = Config {
//!     backend: Backend::Memory,
//!     ..Default::default()
//! };
//! let store = initialize(&config)?;
//! store.fetch_countries().await?;
//! assert!(store.countries().is_empty());
//! # Ok::<(), countrydeck::CountryDeckError>(())
//! # }).unwrap();
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;

pub use app::{handle_event, Action, CountryStore, Event, StoreState, SyncPolicy, Toggle};
pub use domain::{Country, CountryDeckError, CountryDraft, CountryPatch, DetailParams, Result};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable overriding [`Config::api_url`].
pub const ENV_API_URL: &str = "COUNTRYDECK_API_URL";
/// Environment variable overriding [`Config::api_key`].
pub const ENV_API_KEY: &str = "COUNTRYDECK_API_KEY";
/// Environment variable overriding [`Config::backend`].
pub const ENV_BACKEND: &str = "COUNTRYDECK_BACKEND";
/// Environment variable overriding [`Config::trace_level`].
pub const ENV_TRACE_LEVEL: &str = "COUNTRYDECK_TRACE_LEVEL";

/// Which record gateway the store talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Hosted PostgREST-style table over HTTPS.
    #[default]
    Rest,
    /// Local JSON file.
    File,
    /// Process memory; nothing persists.
    Memory,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rest => "rest",
            Self::File => "file",
            Self::Memory => "memory",
        })
    }
}

impl FromStr for Backend {
    type Err = CountryDeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rest" => Ok(Self::Rest),
            "file" | "json" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(CountryDeckError::Config(format!("unknown backend: {other}"))),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Record gateway to use. Default: `rest`
    pub backend: Backend,

    /// Base URL of the hosted store, e.g. `https://<project>.supabase.co`.
    pub api_url: Option<String>,

    /// Public access key sent as `apikey` and bearer token.
    pub api_key: Option<String>,

    /// Remote table name. Default: `countries`
    pub table: String,

    /// JSON file for the `file` backend.
    ///
    /// Default: `<data_dir>/countrydeck/countries.json`
    pub data_file: Option<PathBuf>,

    /// When data actions touch local state. Default: `confirm`
    pub sync_policy: SyncPolicy,

    /// Tracing level: `trace`, `debug`, `info`, `warn`, `error`.
    ///
    /// `RUST_LOG` takes precedence when set.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            api_url: None,
            api_key: None,
            table: "countries".to_string(),
            data_file: None,
            sync_policy: SyncPolicy::default(),
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from TOML text. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CountryDeckError::Config`] if the text is not valid TOML or a
    /// field has the wrong type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use countrydeck::{Backend, Config, SyncPolicy};
    ///
    /// let config = Config::from_toml("backend = \"memory\"\nsync_policy = \"optimistic\"")?;
    /// assert_eq!(config.backend, Backend::Memory);
    /// assert_eq!(config.sync_policy, SyncPolicy::Optimistic);
    /// assert_eq!(config.table, "countries");
    /// # Ok::<(), countrydeck::CountryDeckError>(())
    /// ```
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CountryDeckError::Config(e.to_string()))
    }

    /// Loads configuration from `path`, or from the default location, then
    /// applies environment overrides.
    ///
    /// A missing file at the default location is not an error; a missing file
    /// at an explicit `path` is.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an
    /// environment override is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_toml(&std::fs::read_to_string(path)?)?,
            None => {
                let default_path = infrastructure::paths::default_config_file();
                match default_path {
                    Some(p) if p.is_file() => {
                        tracing::debug!(path = %p.display(), "loading config file");
                        Self::from_toml(&std::fs::read_to_string(&p)?)?
                    }
                    _ => Self::default(),
                }
            }
        };
        config.apply_env(std::env::vars())?;
        Ok(config)
    }

    /// Overrides fields from `COUNTRYDECK_*` variables in `vars`.
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CountryDeckError::Config`] if `COUNTRYDECK_BACKEND` names an
    /// unknown backend.
    pub fn apply_env<I>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            if value.trim().is_empty() {
                continue;
            }
            match key.as_str() {
                ENV_API_URL => self.api_url = Some(value),
                ENV_API_KEY => self.api_key = Some(value),
                ENV_BACKEND => self.backend = value.parse()?,
                ENV_TRACE_LEVEL => self.trace_level = Some(value),
                _ => {}
            }
        }
        Ok(())
    }
}

/// Builds a store for `config`.
///
/// Connects the configured gateway and applies the sync policy. The store
/// starts empty; call [`CountryStore::fetch_countries`] to load records.
///
/// # Errors
///
/// Returns an error if the gateway cannot be constructed (see
/// [`storage::connect`]).
pub fn initialize(config: &Config) -> Result<CountryStore> {
    tracing::debug!(backend = %config.backend, policy = %config.sync_policy, "initializing countrydeck");

    let gateway = storage::connect(config)?;
    Ok(CountryStore::with_policy(gateway, config.sync_policy))
}
