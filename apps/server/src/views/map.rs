use super::colour::ColourScale;
use crate::dataset::{Dataset, JoinedCountry};
use crate::domain::RegimeType;
use serde::Serialize;

pub const MAP_TITLE: &str = "Digital Repression Index 2021";

/// Choropleth over every joined country. Independent of the active filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSpec<'a> {
    pub title: &'static str,
    pub colour_scale: ColourScale,
    pub domain: Option<[f64; 2]>,
    pub regions: Vec<MapRegion<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapRegion<'a> {
    pub country: &'a str,
    pub geometry: Option<&'a geojson::Geometry>,
    pub repression_index: Option<f64>,
    pub democracy_index: Option<f64>,
    pub regime_type: Option<RegimeType>,
    /// Hex colour for the repression index; absent when the index is missing.
    pub fill: Option<String>,
}

pub fn build_map_spec(dataset: &Dataset) -> MapSpec<'_> {
    let scale = ColourScale::YL_OR_RD;
    let domain = dataset.repression_domain();

    let regions = dataset
        .joined()
        .iter()
        .map(|row| region(row, scale, domain))
        .collect();

    MapSpec {
        title: MAP_TITLE,
        colour_scale: scale,
        domain: domain.map(|(min, max)| [min, max]),
        regions,
    }
}

fn region(row: &JoinedCountry, scale: ColourScale, domain: Option<(f64, f64)>) -> MapRegion<'_> {
    let attributes = row.attributes.as_ref();
    let repression_index = row.repression_index();

    let fill = match (repression_index, domain) {
        (Some(value), Some(domain)) => Some(scale.hex_at(value, domain)),
        _ => None,
    };

    MapRegion {
        country: &row.feature.name,
        geometry: row.feature.geometry.as_ref(),
        repression_index,
        democracy_index: attributes.and_then(|a| a.democracy_index),
        regime_type: attributes.map(|a| a.regime_type),
        fill,
    }
}
