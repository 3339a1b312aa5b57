use crate::domain::GeoFeature;
use crate::error::DatasetError;
use geojson::GeoJson;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// One row of the deployments CSV exactly as it is stored on disk.
///
/// Header names are literal. Columns not listed here are ignored; a missing
/// column is a malformed file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpywareRow {
    #[serde(rename = "Country of deployment")]
    pub country: String,
    #[serde(rename = "Category of technology")]
    pub technology_category: String,
    #[serde(rename = "Period of use")]
    pub period_of_use: String,
    #[serde(rename = "Year of disclosure")]
    pub year_of_disclosure: String,
    #[serde(rename = "Commercial Entity")]
    pub commercial_entity: String,
    #[serde(rename = "Country of origin")]
    pub country_of_origin: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Digital Repression Index 2021")]
    pub repression_index: Option<f64>,
    #[serde(rename = "V-Dem Electoral Democracy Index 2021")]
    pub democracy_index: Option<f64>,
    #[serde(rename = "V-Dem Regime Type 2021")]
    pub regime_code: Option<String>,
}

pub fn read_spyware_csv<R: io::Read>(reader: R) -> Result<Vec<SpywareRow>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    reader
        .deserialize()
        .collect::<Result<Vec<SpywareRow>, csv::Error>>()
        .map_err(Into::into)
}

pub fn load_spyware_csv(path: &Path) -> Result<Vec<SpywareRow>, DatasetError> {
    read_spyware_csv(open(path)?)
}

/// Reads a GeoJSON FeatureCollection whose features carry a `name` property.
pub fn read_world_geojson<R: io::Read>(reader: R) -> Result<Vec<GeoFeature>, DatasetError> {
    let document = GeoJson::from_reader(reader).map_err(geojson::Error::from)?;
    let GeoJson::FeatureCollection(collection) = document else {
        return Err(DatasetError::NotAFeatureCollection);
    };

    collection
        .features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| -> Result<GeoFeature, DatasetError> {
            let name = feature
                .property("name")
                .and_then(serde_json::Value::as_str)
                .ok_or(DatasetError::MissingFeatureName { index })?
                .to_string();

            Ok(GeoFeature {
                name,
                geometry: feature.geometry,
            })
        })
        .collect()
}

pub fn load_world_geojson(path: &Path) -> Result<Vec<GeoFeature>, DatasetError> {
    read_world_geojson(open(path)?)
}

fn open(path: &Path) -> Result<BufReader<File>, DatasetError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Country of deployment,Category of technology,Period of use,Year of disclosure,Commercial Entity,Country of origin,Description,Digital Repression Index 2021,V-Dem Electoral Democracy Index 2021,V-Dem Regime Type 2021\n";

    #[test]
    fn reads_rows_with_literal_headers() -> Result<(), DatasetError> {
        let csv = format!(
            "{HEADER}Mexico,Spyware,2016-2017,2017,NSO Group,Israel,\"Targeted journalists, activists\",1.2,0.4,EA\n\
             Spain,Spyware,2019,2022,NSO Group,Israel,Catalan officials,,0.8,\n"
        );

        let rows = read_spyware_csv(csv.as_bytes())?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].country, "Mexico");
        assert_eq!(rows[0].description, "Targeted journalists, activists");
        assert_eq!(rows[0].repression_index, Some(1.2));
        assert_eq!(rows[0].regime_code.as_deref(), Some("EA"));
        assert_eq!(rows[1].repression_index, None);
        assert_eq!(rows[1].democracy_index, Some(0.8));
        assert_eq!(rows[1].regime_code, None);
        Ok(())
    }

    #[test]
    fn missing_column_is_an_error() {
        let csv = "Country of deployment,Category of technology\nMexico,Spyware\n";
        assert!(matches!(
            read_spyware_csv(csv.as_bytes()),
            Err(DatasetError::Csv(_))
        ));
    }

    #[test]
    fn non_numeric_index_is_an_error() {
        let csv = format!("{HEADER}Mexico,Spyware,2016,2017,NSO,Israel,x,high,0.4,EA\n");
        assert!(read_spyware_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn reads_named_features() -> Result<(), DatasetError> {
        let geojson = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"name": "Mexico"},
                 "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]]}},
                {"type": "Feature", "properties": {"name": "Atlantis"}, "geometry": null}
            ]
        }"#;

        let features = read_world_geojson(geojson.as_bytes())?;
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].name, "Mexico");
        assert!(features[0].geometry.is_some());
        assert_eq!(features[1].name, "Atlantis");
        assert!(features[1].geometry.is_none());
        Ok(())
    }

    #[test]
    fn feature_without_name_is_an_error() {
        let geojson = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"iso": "MEX"}, "geometry": null}
        ]}"#;
        assert!(matches!(
            read_world_geojson(geojson.as_bytes()),
            Err(DatasetError::MissingFeatureName { index: 0 })
        ));
    }

    #[test]
    fn truncated_geometry_json_is_an_error() {
        let geojson = r#"{"type": "FeatureCollection", "features": ["#;
        assert!(matches!(
            read_world_geojson(geojson.as_bytes()),
            Err(DatasetError::GeoJson(_))
        ));
    }

    #[test]
    fn bare_geometry_is_rejected() {
        let geojson = r#"{"type": "Point", "coordinates": [0, 0]}"#;
        assert!(matches!(
            read_world_geojson(geojson.as_bytes()),
            Err(DatasetError::NotAFeatureCollection)
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_spyware_csv(Path::new("definitely/not/here.csv"));
        assert!(matches!(err, Err(DatasetError::Io { path, .. }) if path.ends_with("here.csv")));
    }
}
