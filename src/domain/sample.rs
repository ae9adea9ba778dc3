//! Built-in eight-country sample set.
//!
//! Used to seed an empty backend (`countrydeck seed`) and as the fixture for
//! filtering and grouping tests. Continents appear in the order Asia, Europe,
//! South America, North America, Oceania.

use super::country::Country;

const SAMPLE: [(&str, &str, &str, &str, &str); 8] = [
    ("1", "Indonesia", "Jakarta", "Asia", "🇮🇩"),
    ("2", "Japan", "Tokyo", "Asia", "🇯🇵"),
    ("3", "Singapore", "Singapore", "Asia", "🇸🇬"),
    ("4", "Germany", "Berlin", "Europe", "🇩🇪"),
    ("5", "France", "Paris", "Europe", "🇫🇷"),
    ("6", "Brazil", "Brasília", "South America", "🇧🇷"),
    ("7", "United States", "Washington, D.C.", "North America", "🇺🇸"),
    ("8", "Australia", "Canberra", "Oceania", "🇦🇺"),
];

/// Returns the sample records with ids `"1"` through `"8"`.
#[must_use]
pub fn sample_countries() -> Vec<Country> {
    SAMPLE
        .iter()
        .map(|(id, name, capital, continent, flag)| Country::new(*id, *name, *capital, *continent, *flag))
        .collect()
}
