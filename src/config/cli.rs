use crate::config::DEFAULT_STATION_COLOR;
use crate::core::fetcher::{DEFAULT_PAGE_LIMIT, DEFAULT_PAGE_TIMEOUT};
use crate::domain::model::LatLng;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "hazard-map")]
#[command(about = "Fetch stations and buildings and export seismic-hazard map layers")]
pub struct CliConfig {
    #[arg(long, help = "Paginated buildings collection endpoint")]
    pub buildings_endpoint: Option<String>,

    #[arg(long, help = "Paginated seismic stations collection endpoint")]
    pub stations_endpoint: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT)]
    pub page_limit: usize,

    #[arg(long, default_value_t = DEFAULT_PAGE_TIMEOUT.as_secs())]
    pub page_timeout_secs: u64,

    #[arg(long, help = "Earthquake epicenter as 'lat,lon'")]
    pub epicenter: Option<LatLng>,

    #[arg(long, help = "Export the stations layer as hidden")]
    pub hide_stations: bool,

    #[arg(long, help = "Read settings from a TOML file instead of flags")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(skip)]
    pub station_colors: HashMap<String, String>,
}

impl ConfigProvider for CliConfig {
    fn buildings_endpoint(&self) -> Option<&str> {
        self.buildings_endpoint.as_deref()
    }

    fn stations_endpoint(&self) -> Option<&str> {
        self.stations_endpoint.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn page_limit(&self) -> usize {
        self.page_limit
    }

    fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    fn show_stations(&self) -> bool {
        !self.hide_stations
    }

    fn epicenter(&self) -> Option<LatLng> {
        self.epicenter
    }

    fn station_colors(&self) -> &HashMap<String, String> {
        &self.station_colors
    }

    fn default_station_color(&self) -> &str {
        DEFAULT_STATION_COLOR
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_any_endpoint(
            self.buildings_endpoint.as_deref(),
            self.stations_endpoint.as_deref(),
        )?;
        validation::validate_optional_url("buildings_endpoint", self.buildings_endpoint.as_deref())?;
        validation::validate_optional_url("stations_endpoint", self.stations_endpoint.as_deref())?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_range("page_limit", self.page_limit, 1, 10_000)?;
        validation::validate_range("page_timeout_secs", self.page_timeout_secs, 1, 3_600)?;
        if let Some(epicenter) = self.epicenter {
            validation::validate_lat_lon("epicenter", epicenter.lat, epicenter.lon)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let config = CliConfig::parse_from([
            "hazard-map",
            "--buildings-endpoint",
            "https://api.example.com/buildings",
            "--epicenter",
            "46.95,142.73",
            "--hide-stations",
        ]);

        assert_eq!(
            config.buildings_endpoint(),
            Some("https://api.example.com/buildings")
        );
        assert_eq!(config.stations_endpoint(), None);
        assert_eq!(config.page_limit(), 1000);
        assert_eq!(config.page_timeout(), Duration::from_secs(30));
        assert_eq!(config.epicenter(), Some(LatLng::new(46.95, 142.73)));
        assert!(!config.show_stations());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_epicenter_is_rejected_by_parser() {
        let result = CliConfig::try_parse_from(["hazard-map", "--epicenter", "north"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_requires_an_endpoint() {
        let config = CliConfig::parse_from(["hazard-map"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_page_limit() {
        let config = CliConfig::parse_from([
            "hazard-map",
            "--stations-endpoint",
            "https://api.example.com/stations",
            "--page-limit",
            "0",
        ]);
        assert!(config.validate().is_err());
    }
}
