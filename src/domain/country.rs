//! Country record model and its insert/update companions.
//!
//! [`Country`] is the row shape shared by the store and every gateway.
//! [`CountryDraft`] is what a caller sends to create a record (the store
//! assigns `id` and timestamps), and [`CountryPatch`] is an explicit partial
//! update whose fields are a subset of the record's.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single country record.
///
/// `created_at` and `updated_at` are assigned by the remote store and are
/// `None` for records that only ever lived in local state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: String,
    pub name: String,
    pub capital: String,
    /// Grouping key. Free-form; no canonical continent list is enforced.
    pub continent: String,
    pub flag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Country {
    /// Creates a local record with no server timestamps.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        capital: impl Into<String>,
        continent: impl Into<String>,
        flag: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capital: capital.into(),
            continent: continent.into(),
            flag: flag.into(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Builds a stored row from a draft and the server-assigned fields.
    #[must_use]
    pub fn from_draft(id: impl Into<String>, draft: &CountryDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: draft.name.clone(),
            capital: draft.capital.clone(),
            continent: draft.continent.clone(),
            flag: draft.flag.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Returns `true` when `name` or `capital` contains `needle`, ignoring case.
    ///
    /// `needle` must already be lowercased; an empty needle matches everything.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.capital.to_lowercase().contains(needle)
    }
}

/// Fields a caller supplies to create a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryDraft {
    pub name: String,
    pub capital: String,
    pub continent: String,
    pub flag: String,
}

impl CountryDraft {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        capital: impl Into<String>,
        continent: impl Into<String>,
        flag: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            capital: capital.into(),
            continent: continent.into(),
            flag: flag.into(),
        }
    }
}

impl From<&Country> for CountryDraft {
    fn from(country: &Country) -> Self {
        Self::new(
            country.name.clone(),
            country.capital.clone(),
            country.continent.clone(),
            country.flag.clone(),
        )
    }
}

/// Partial update of a [`Country`].
///
/// Shallow merge rules: a `Some` field overwrites the record's value, a `None`
/// field leaves it untouched. `id` and the timestamps are not patchable.
/// Serializes only the fields that are set, which is the body shape the
/// remote store expects for a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
}

impl CountryPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn capital(mut self, capital: impl Into<String>) -> Self {
        self.capital = Some(capital.into());
        self
    }

    #[must_use]
    pub fn continent(mut self, continent: impl Into<String>) -> Self {
        self.continent = Some(continent.into());
        self
    }

    #[must_use]
    pub fn flag(mut self, flag: impl Into<String>) -> Self {
        self.flag = Some(flag.into());
        self
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.capital.is_none() && self.continent.is_none() && self.flag.is_none()
    }

    /// The values `country` holds now for the fields this patch sets.
    ///
    /// Applying the result undoes applying `self`.
    #[must_use]
    pub fn inverse_for(&self, country: &Country) -> Self {
        Self {
            name: self.name.as_ref().map(|_| country.name.clone()),
            capital: self.capital.as_ref().map(|_| country.capital.clone()),
            continent: self.continent.as_ref().map(|_| country.continent.clone()),
            flag: self.flag.as_ref().map(|_| country.flag.clone()),
        }
    }

    /// Shallow-merges this patch into `country`.
    pub fn apply_to(&self, country: &mut Country) {
        if let Some(name) = &self.name {
            country.name.clone_from(name);
        }
        if let Some(capital) = &self.capital {
            country.capital.clone_from(capital);
        }
        if let Some(continent) = &self.continent {
            country.continent.clone_from(continent);
        }
        if let Some(flag) = &self.flag {
            country.flag.clone_from(flag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indonesia() -> Country {
        Country::new("1", "Indonesia", "Jakarta", "Asia", "🇮🇩")
    }

    #[test]
    fn patch_overwrites_only_set_fields() {
        let mut country = indonesia();
        CountryPatch::new().capital("Nusantara").apply_to(&mut country);

        assert_eq!(country.capital, "Nusantara");
        assert_eq!(country.name, "Indonesia");
        assert_eq!(country.continent, "Asia");
        assert_eq!(country.flag, "🇮🇩");
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut country = indonesia();
        let patch = CountryPatch::new();
        assert!(patch.is_empty());
        patch.apply_to(&mut country);
        assert_eq!(country, indonesia());
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = CountryPatch::new().name("Nippon");
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Nippon" }));
    }

    #[test]
    fn search_matches_name_or_capital_case_insensitively() {
        let country = indonesia();
        assert!(country.matches_lowercase("jakarta"));
        assert!(country.matches_lowercase("indo"));
        assert!(country.matches_lowercase(""));
        assert!(!country.matches_lowercase("asia"));
    }

    #[test]
    fn local_record_round_trips_without_timestamps() {
        let json = serde_json::to_value(indonesia()).unwrap();
        assert!(json.get("created_at").is_none());

        let row: Country = serde_json::from_value(serde_json::json!({
            "id": "7", "name": "Chile", "capital": "Santiago",
            "continent": "South America", "flag": "🇨🇱",
            "created_at": "2024-05-01T10:00:00+00:00",
            "updated_at": "2024-05-02T10:00:00Z"
        }))
        .unwrap();
        assert!(row.created_at.is_some());
        assert!(row.updated_at > row.created_at);
    }

    #[test]
    fn inverse_covers_only_patched_fields() {
        let mut country = indonesia();
        let patch = CountryPatch::new().capital("Nusantara");
        let inverse = patch.inverse_for(&country);
        assert_eq!(inverse, CountryPatch::new().capital("Jakarta"));

        patch.apply_to(&mut country);
        inverse.apply_to(&mut country);
        assert_eq!(country, indonesia());
    }
}
