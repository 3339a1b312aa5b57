// Export our modules for use in binaries and tests
pub mod config;
pub mod dataset;
pub mod domain;
pub mod error;
pub mod search;
pub mod server;
pub mod views;

pub use dataset::Dataset;
pub use domain::{FilterState, RegimeType};
pub use views::{recompute, DashboardViews};
