use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading the source datasets. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed deployment CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed geometry source: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("geometry source must be a FeatureCollection")]
    NotAFeatureCollection,

    #[error("geometry feature #{index} has no string `name` property")]
    MissingFeatureName { index: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got {0:?}")]
    InvalidPort(String),
}
