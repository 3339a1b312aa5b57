use serde::{Serialize, Serializer};
use std::fmt;

/// Sentinel dropdown value meaning "no country filter".
pub const ALL_COUNTRIES: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegimeType {
    LiberalDemocracy,
    ElectoralDemocracy,
    ElectoralAutocracy,
    ClosedAutocracy,
    Unknown,
}

impl RegimeType {
    /// Coded values as they appear in the V-Dem column.
    pub const fn code(self) -> Option<&'static str> {
        match self {
            Self::LiberalDemocracy => Some("LD"),
            Self::ElectoralDemocracy => Some("ED"),
            Self::ElectoralAutocracy => Some("EA"),
            Self::ClosedAutocracy => Some("CA"),
            Self::Unknown => None,
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "LD" => Self::LiberalDemocracy,
            "ED" => Self::ElectoralDemocracy,
            "EA" => Self::ElectoralAutocracy,
            "CA" => Self::ClosedAutocracy,
            _ => Self::Unknown,
        }
    }

    /// Human-readable label, `None` when the code was not recognised.
    pub const fn label(self) -> Option<&'static str> {
        match self {
            Self::LiberalDemocracy => Some("Liberal Democracy"),
            Self::ElectoralDemocracy => Some("Electoral Democracy"),
            Self::ElectoralAutocracy => Some("Electoral Autocracy"),
            Self::ClosedAutocracy => Some("Closed Autocracy"),
            Self::Unknown => None,
        }
    }

    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for RegimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().unwrap_or("Unknown"))
    }
}

// Unknown regimes go over the wire as null, never as a made-up label.
impl Serialize for RegimeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.label() {
            Some(label) => serializer.serialize_str(label),
            None => serializer.serialize_none(),
        }
    }
}

/// Country-level indicators, one per country.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRecord {
    pub country: String,
    pub repression_index: Option<f64>,
    pub democracy_index: Option<f64>,
    pub regime_type: RegimeType,
}

/// One reported deployment incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentRecord {
    pub country: String,
    pub technology_category: String,
    pub period_of_use: String,
    pub year_of_disclosure: String,
    pub commercial_entity: String,
    pub country_of_origin: String,
    pub description: String,
}

/// A country boundary keyed by its `name` property.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoFeature {
    pub name: String,
    pub geometry: Option<geojson::Geometry>,
}

/// Session-local dropdown selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FilterState {
    #[default]
    All,
    Country(String),
}

impl FilterState {
    /// Maps a dropdown value onto a filter; `"All"` and an empty value mean no
    /// filter. Anything else is kept byte for byte, since countries match exactly.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None | Some("" | ALL_COUNTRIES) => Self::All,
            Some(country) => Self::Country(country.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_COUNTRIES,
            Self::Country(country) => country,
        }
    }

    pub fn matches(&self, country: &str) -> bool {
        match self {
            Self::All => true,
            Self::Country(selected) => selected == country,
        }
    }
}

impl fmt::Display for FilterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FilterState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regime_codes_round_trip_through_labels() {
        assert_eq!(
            RegimeType::from_code("EA").to_string(),
            "Electoral Autocracy"
        );
        for regime in [
            RegimeType::LiberalDemocracy,
            RegimeType::ElectoralDemocracy,
            RegimeType::ElectoralAutocracy,
            RegimeType::ClosedAutocracy,
        ] {
            let code = regime.code().unwrap_or_default();
            assert_eq!(RegimeType::from_code(code), regime);
        }
    }

    #[test]
    fn unrecognised_codes_are_unknown() {
        assert_eq!(RegimeType::from_code("XX"), RegimeType::Unknown);
        assert_eq!(RegimeType::from_code(""), RegimeType::Unknown);
        assert_eq!(RegimeType::from_code("ea"), RegimeType::Unknown);
        assert_eq!(RegimeType::Unknown.label(), None);
        assert!(!RegimeType::Unknown.is_known());
    }

    #[test]
    fn unknown_regime_serializes_as_null() {
        let json = serde_json::to_value([RegimeType::ClosedAutocracy, RegimeType::Unknown])
            .unwrap_or_default();
        assert_eq!(json, serde_json::json!(["Closed Autocracy", null]));
    }

    #[test]
    fn filter_parsing_treats_all_and_empty_as_sentinel() {
        assert_eq!(FilterState::parse(None), FilterState::All);
        assert_eq!(FilterState::parse(Some("All")), FilterState::All);
        assert_eq!(FilterState::parse(Some("")), FilterState::All);
        assert_eq!(
            FilterState::parse(Some("Mexico")),
            FilterState::Country("Mexico".to_string())
        );
    }

    #[test]
    fn filter_parsing_keeps_surrounding_whitespace() {
        let filter = FilterState::parse(Some("Mexico "));
        assert_eq!(filter.as_str(), "Mexico ");
        assert!(filter.matches("Mexico "));
        assert!(!filter.matches("Mexico"));
        assert_eq!(
            FilterState::parse(Some(" All")),
            FilterState::Country(" All".to_string())
        );
    }

    #[test]
    fn country_filter_is_case_sensitive() {
        let filter = FilterState::Country("Mexico".to_string());
        assert!(filter.matches("Mexico"));
        assert!(!filter.matches("mexico"));
        assert!(FilterState::All.matches("anything"));
    }
}
