use color_eyre::Result;
use spyware_dashboard::config::DashboardConfig;
use spyware_dashboard::{server, Dataset};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let config = DashboardConfig::from_env()?;
    init_tracing(config.debug);

    tracing::info!(
        csv = %config.deployments_csv.display(),
        geometry = %config.world_geojson.display(),
        "loading datasets"
    );

    // Built once; handlers only ever read it
    let dataset = Dataset::load(&config.deployments_csv, &config.world_geojson)?;
    tracing::info!(
        deployments = dataset.deployments().len(),
        countries = dataset.countries().len(),
        regions = dataset.joined().len(),
        "dataset ready"
    );

    let app = server::app(Arc::new(dataset), &config.web_dist);

    let addr = config.listen_addr();
    tracing::info!("spyware dashboard listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}
