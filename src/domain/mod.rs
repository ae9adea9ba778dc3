//! Domain layer for countrydeck.
//!
//! This module contains the record types the store works with, independent of
//! the gateway that persists them or the shell that renders them.
//!
//! # Organization
//!
//! - [`error`]: Error type and result alias
//! - [`country`]: Country record, insert draft, and partial-update patch
//! - [`detail`]: Navigation parameters handed to a detail view
//! - [`sample`]: The built-in eight-country sample set
//!
//! # Examples
//!
//! ```
//! use countrydeck::domain::{CountryPatch, Result};
//! use countrydeck::domain::sample::sample_countries;
//!
//! fn rename_first() -> Result<String> {
//!     let mut country = sample_countries().remove(0);
//!     CountryPatch::new().name("Republic of Indonesia").apply_to(&mut country);
//!     Ok(country.name)
//! }
//! # assert_eq!(rename_first().unwrap(), "Republic of Indonesia");
//! ```

pub mod country;
pub mod detail;
pub mod error;
pub mod sample;

pub use country::{Country, CountryDraft, CountryPatch};
pub use detail::DetailParams;
pub use error::{CountryDeckError, Result};
