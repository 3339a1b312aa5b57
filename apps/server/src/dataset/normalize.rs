use super::loader::SpywareRow;
use crate::domain::{AttributeRecord, DeploymentRecord, RegimeType};

/// Maps a coded V-Dem regime value onto its label. Missing or unrecognised
/// codes become [`RegimeType::Unknown`].
pub fn normalize_regime(code: Option<&str>) -> RegimeType {
    code.map_or(RegimeType::Unknown, RegimeType::from_code)
}

/// Splits each raw row into its country indicators and its incident fields,
/// decoding the regime label on the way.
pub fn normalize_rows(rows: Vec<SpywareRow>) -> (Vec<AttributeRecord>, Vec<DeploymentRecord>) {
    rows.into_iter().map(split_row).unzip()
}

// A literal `NaN` cell parses as a float but carries no value.
fn finite_or_missing(value: Option<f64>) -> Option<f64> {
    value.filter(|value| !value.is_nan())
}

fn split_row(row: SpywareRow) -> (AttributeRecord, DeploymentRecord) {
    let attributes = AttributeRecord {
        country: row.country.clone(),
        repression_index: finite_or_missing(row.repression_index),
        democracy_index: finite_or_missing(row.democracy_index),
        regime_type: normalize_regime(row.regime_code.as_deref()),
    };

    let deployment = DeploymentRecord {
        country: row.country,
        technology_category: row.technology_category,
        period_of_use: row.period_of_use,
        year_of_disclosure: row.year_of_disclosure,
        commercial_entity: row.commercial_entity,
        country_of_origin: row.country_of_origin,
        description: row.description,
    };

    (attributes, deployment)
}
