//! View-state controller.
//!
//! [`recompute`] turns the shared [`Dataset`] and one [`FilterState`] into the
//! three panel descriptions. It holds no state of its own: the same inputs
//! always give the same views.

pub mod bar;
pub mod colour;
pub mod map;
pub mod table;

pub use bar::{build_bar_spec, top_categories, BarSpec, CategoryCount, TOP_CATEGORIES};
pub use colour::ColourScale;
pub use map::{build_map_spec, MapRegion, MapSpec};
pub use table::{build_table_spec, TableSpec, TABLE_COLUMNS};

use crate::dataset::Dataset;
use crate::domain::{DeploymentRecord, FilterState};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardViews<'a> {
    pub filter: FilterState,
    pub map: MapSpec<'a>,
    pub bar: BarSpec<'a>,
    pub table: TableSpec<'a>,
}

pub fn recompute<'a>(dataset: &'a Dataset, filter: &FilterState) -> DashboardViews<'a> {
    let selected = filter_deployments(dataset.deployments(), filter);

    DashboardViews {
        filter: filter.clone(),
        // The map is a global reference view and ignores the filter.
        map: build_map_spec(dataset),
        bar: build_bar_spec(&selected, filter),
        table: build_table_spec(&selected),
    }
}

/// Deployments for the selected country, or all of them for the sentinel.
pub fn filter_deployments<'a>(
    deployments: &'a [DeploymentRecord],
    filter: &FilterState,
) -> Vec<&'a DeploymentRecord> {
    deployments
        .iter()
        .filter(|record| filter.matches(&record.country))
        .collect()
}
