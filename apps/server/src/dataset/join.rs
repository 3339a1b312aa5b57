use crate::domain::{AttributeRecord, GeoFeature};
use std::collections::{HashMap, HashSet};

/// A geometry feature with the attributes of the same-named country, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedCountry {
    pub feature: GeoFeature,
    pub attributes: Option<AttributeRecord>,
}

impl JoinedCountry {
    pub fn repression_index(&self) -> Option<f64> {
        self.attributes.as_ref()?.repression_index
    }
}

/// What the join could not match. Neither side is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinReport {
    /// Geometry features that kept null attributes.
    pub features_without_attributes: usize,
    /// Attribute countries that no feature is named after, in first-seen order.
    pub unmatched_countries: Vec<String>,
}

/// Left-joins attributes onto features by exact, case-sensitive country name.
///
/// One output row per feature, in feature order. When several attribute
/// records share a country the first one wins. Names are compared verbatim,
/// so "United States" never matches "United States of America".
pub fn join_attributes(
    features: Vec<GeoFeature>,
    attributes: &[AttributeRecord],
) -> (Vec<JoinedCountry>, JoinReport) {
    let mut by_country: HashMap<&str, &AttributeRecord> = HashMap::new();
    for record in attributes {
        by_country.entry(record.country.as_str()).or_insert(record);
    }

    let feature_names: HashSet<&str> = features.iter().map(|f| f.name.as_str()).collect();
    let mut report = JoinReport::default();
    let mut reported = HashSet::new();
    for record in attributes {
        let country = record.country.as_str();
        if !feature_names.contains(country) && reported.insert(country) {
            tracing::warn!(country, "attribute country has no matching geometry");
            report.unmatched_countries.push(country.to_string());
        }
    }

    let joined = features
        .into_iter()
        .map(|feature| {
            let attributes = by_country.get(feature.name.as_str()).map(|r| (*r).clone());
            if attributes.is_none() {
                report.features_without_attributes += 1;
            }
            JoinedCountry {
                feature,
                attributes,
            }
        })
        .collect();

    tracing::info!(
        without_attributes = report.features_without_attributes,
        unmatched = report.unmatched_countries.len(),
        "joined country attributes onto geometry"
    );

    (joined, report)
}
