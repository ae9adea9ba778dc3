//! View and synchronization mode types for the store.
//!
//! [`Toggle`] controls which derived view the UI renders; [`SyncPolicy`]
//! controls when a data action touches local state relative to the remote call.
//!
//! # Example
//!
//! ```rust
//! use countrydeck::app::modes::{SyncPolicy, Toggle};
//!
//! let toggle: Toggle = "continent".parse().unwrap();
//! assert_eq!(toggle, Toggle::Continent);
//! assert_eq!(SyncPolicy::default(), SyncPolicy::ConfirmThenApply);
//! ```

use crate::domain::error::CountryDeckError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// View mode for the country list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toggle {
    /// Flat list, filtered by the search text.
    #[default]
    List,

    /// Sections per continent, in order of first appearance.
    ///
    /// The search text does not apply in this view.
    Continent,
}

impl Toggle {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Continent => "continent",
        }
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Toggle {
    type Err = CountryDeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "list" => Ok(Self::List),
            "continent" => Ok(Self::Continent),
            other => Err(CountryDeckError::Config(format!("unknown view mode: {other}"))),
        }
    }
}

/// When a data action mutates local state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncPolicy {
    /// Await the remote call, then apply the server's row.
    ///
    /// Local state never diverges from the last confirmed remote state.
    #[default]
    #[serde(alias = "confirm")]
    ConfirmThenApply,

    /// Apply locally first, then reconcile or roll back when the remote call resolves.
    Optimistic,
}

impl SyncPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfirmThenApply => "confirm",
            Self::Optimistic => "optimistic",
        }
    }
}

impl fmt::Display for SyncPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncPolicy {
    type Err = CountryDeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "confirm" | "confirmthenapply" | "confirm-then-apply" => Ok(Self::ConfirmThenApply),
            "optimistic" => Ok(Self::Optimistic),
            other => Err(CountryDeckError::Config(format!("unknown sync policy: {other}"))),
        }
    }
}
