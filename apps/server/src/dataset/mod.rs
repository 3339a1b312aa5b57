//! Startup data pipeline: load, normalise, join.
//!
//! The resulting [`Dataset`] is built once and never mutated; request
//! handlers share it behind an `Arc`.

pub mod join;
pub mod loader;
pub mod normalize;

pub use join::{join_attributes, JoinReport, JoinedCountry};
pub use loader::{
    load_spyware_csv, load_world_geojson, read_spyware_csv, read_world_geojson, SpywareRow,
};
pub use normalize::{normalize_regime, normalize_rows};

use crate::domain::{DeploymentRecord, GeoFeature, ALL_COUNTRIES};
use crate::error::DatasetError;
use std::collections::HashSet;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    joined: Vec<JoinedCountry>,
    deployments: Vec<DeploymentRecord>,
    countries: Vec<String>,
    repression_domain: Option<(f64, f64)>,
    join_report: JoinReport,
}

impl Dataset {
    pub fn build(rows: Vec<SpywareRow>, features: Vec<GeoFeature>) -> Self {
        let (attributes, deployments) = normalize_rows(rows);
        let (joined, join_report) = join_attributes(features, &attributes);

        let mut seen = HashSet::new();
        let countries = deployments
            .iter()
            .filter(|record| seen.insert(record.country.as_str()))
            .map(|record| record.country.clone())
            .collect();

        let repression_domain = value_range(joined.iter().filter_map(JoinedCountry::repression_index));

        Self {
            joined,
            deployments,
            countries,
            repression_domain,
            join_report,
        }
    }

    pub fn from_readers<C: io::Read, G: io::Read>(
        deployments_csv: C,
        world_geojson: G,
    ) -> Result<Self, DatasetError> {
        let rows = read_spyware_csv(deployments_csv)?;
        let features = read_world_geojson(world_geojson)?;
        Ok(Self::build(rows, features))
    }

    pub fn load(deployments_csv: &Path, world_geojson: &Path) -> Result<Self, DatasetError> {
        let rows = load_spyware_csv(deployments_csv)?;
        let features = load_world_geojson(world_geojson)?;
        Ok(Self::build(rows, features))
    }

    pub fn joined(&self) -> &[JoinedCountry] {
        &self.joined
    }

    pub fn deployments(&self) -> &[DeploymentRecord] {
        &self.deployments
    }

    /// Distinct deployment countries in first-appearance order.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Dropdown options: the "All" sentinel followed by every country.
    pub fn filter_options(&self) -> Vec<&str> {
        std::iter::once(ALL_COUNTRIES)
            .chain(self.countries.iter().map(String::as_str))
            .collect()
    }

    /// `[min, max]` of the repression index over the joined table, fixed at load.
    pub const fn repression_domain(&self) -> Option<(f64, f64)> {
        self.repression_domain
    }

    pub const fn join_report(&self) -> &JoinReport {
        &self.join_report
    }
}

fn value_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|value| !value.is_nan())
        .fold(None, |range, value| match range {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}
