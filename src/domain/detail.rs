//! Navigation parameters for the country detail view.
//!
//! Selecting a record hands the detail view its five display fields as opaque
//! string parameters. The detail view has no fetch path of its own and shows
//! the values exactly as passed.

use super::country::Country;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Display fields passed to the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailParams {
    pub id: String,
    pub name: String,
    pub capital: String,
    pub continent: String,
    pub flag: String,
}

impl DetailParams {
    const KEYS: [&'static str; 5] = ["id", "name", "capital", "continent", "flag"];

    /// Flattens the parameters into a route parameter map.
    #[must_use]
    pub fn to_params(&self) -> BTreeMap<String, String> {
        Self::KEYS
            .iter()
            .zip([&self.id, &self.name, &self.capital, &self.continent, &self.flag])
            .map(|(key, value)| ((*key).to_string(), value.clone()))
            .collect()
    }

    /// Rebuilds parameters from a route map.
    ///
    /// Missing keys become empty strings, mirroring a detail screen that
    /// renders whatever it was given.
    #[must_use]
    pub fn from_params(params: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| params.get(key).cloned().unwrap_or_default();
        Self {
            id: get("id"),
            name: get("name"),
            capital: get("capital"),
            continent: get("continent"),
            flag: get("flag"),
        }
    }
}

impl From<&Country> for DetailParams {
    fn from(country: &Country) -> Self {
        Self {
            id: country.id.clone(),
            name: country.name.clone(),
            capital: country.capital.clone(),
            continent: country.continent.clone(),
            flag: country.flag.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_carry_exactly_the_five_display_fields() {
        let country = Country::new("3", "Singapore", "Singapore", "Asia", "🇸🇬");
        let params = DetailParams::from(&country).to_params();

        assert_eq!(params.len(), 5);
        assert_eq!(params["id"], "3");
        assert_eq!(params["flag"], "🇸🇬");
        assert_eq!(DetailParams::from_params(&params), DetailParams::from(&country));
    }

    #[test]
    fn missing_params_render_as_empty() {
        let mut params = BTreeMap::new();
        params.insert("name".to_string(), "Atlantis".to_string());

        let detail = DetailParams::from_params(&params);
        assert_eq!(detail.name, "Atlantis");
        assert!(detail.id.is_empty());
        assert!(detail.capital.is_empty());
    }
}
