use crate::error::ConfigError;
use dotenv::dotenv;
use std::env;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 10000;

/// Runtime settings for the dashboard server, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub port: u16,
    pub deployments_csv: PathBuf,
    pub world_geojson: PathBuf,
    pub web_dist: PathBuf,
    pub debug: bool,
}

impl DashboardConfig {
    /// Loads `.env` (if present) and then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        Ok(Self {
            port: parse_port(env::var("PORT").ok().as_deref())?,
            deployments_csv: get_deployments_csv(),
            world_geojson: get_world_geojson(),
            web_dist: get_web_dist(),
            debug: env::var_os("DEBUG").is_some(),
        })
    }

    /// The server always listens on every interface.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

/// Parses the `PORT` value; unset means the default port.
pub fn parse_port(value: Option<&str>) -> Result<u16, ConfigError> {
    match value {
        None => Ok(DEFAULT_PORT),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidPort(raw.to_string())),
    }
}

/// Gets the path of the deployments CSV
pub fn get_deployments_csv() -> PathBuf {
    env::var("SPYWARE_CSV").map_or_else(|_| PathBuf::from("spy3.csv"), PathBuf::from)
}

/// Gets the path of the country boundary GeoJSON
pub fn get_world_geojson() -> PathBuf {
    env::var("WORLD_GEOJSON").map_or_else(
        |_| PathBuf::from("naturalearth_lowres.geojson"),
        PathBuf::from,
    )
}

/// Gets the directory holding the built web renderer
pub fn get_web_dist() -> PathBuf {
    env::var("WEB_DIST").map_or_else(|_| PathBuf::from("apps/web/dist"), PathBuf::from)
}
