use crate::domain::DeploymentRecord;
use serde::Serialize;

pub const TABLE_COLUMNS: [&str; 7] = [
    "Country of deployment",
    "Category of technology",
    "Period of use",
    "Year of disclosure",
    "Commercial Entity",
    "Country of origin",
    "Description",
];

/// Every filtered deployment, projected onto [`TABLE_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSpec<'a> {
    pub columns: [&'static str; 7],
    pub rows: Vec<[&'a str; 7]>,
}

pub fn build_table_spec<'a>(records: &[&'a DeploymentRecord]) -> TableSpec<'a> {
    TableSpec {
        columns: TABLE_COLUMNS,
        rows: records.iter().copied().map(project).collect(),
    }
}

fn project(record: &DeploymentRecord) -> [&str; 7] {
    [
        &record.country,
        &record.technology_category,
        &record.period_of_use,
        &record.year_of_disclosure,
        &record.commercial_entity,
        &record.country_of_origin,
        &record.description,
    ]
}
