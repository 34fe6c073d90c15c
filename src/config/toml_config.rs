use crate::config::DEFAULT_STATION_COLOR;
use crate::core::fetcher::{DEFAULT_PAGE_LIMIT, DEFAULT_PAGE_TIMEOUT};
use crate::domain::model::LatLng;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{HazardMapError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub map: MapConfig,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub buildings_endpoint: Option<String>,
    pub stations_endpoint: Option<String>,
    pub page_limit: Option<usize>,
    pub page_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapConfig {
    pub show_stations: Option<bool>,
    pub epicenter: Option<LatLng>,
    pub default_station_color: Option<String>,
    #[serde(default)]
    pub station_colors: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HazardMapError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HazardMapError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_HOST})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HazardMapError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn buildings_endpoint(&self) -> Option<&str> {
        self.source.buildings_endpoint.as_deref()
    }

    fn stations_endpoint(&self) -> Option<&str> {
        self.source.stations_endpoint.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn page_limit(&self) -> usize {
        self.source.page_limit.unwrap_or(DEFAULT_PAGE_LIMIT)
    }

    fn page_timeout(&self) -> Duration {
        self.source
            .page_timeout_seconds
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_PAGE_TIMEOUT)
    }

    fn show_stations(&self) -> bool {
        self.map.show_stations.unwrap_or(true)
    }

    fn epicenter(&self) -> Option<LatLng> {
        self.map.epicenter
    }

    fn station_colors(&self) -> &HashMap<String, String> {
        &self.map.station_colors
    }

    fn default_station_color(&self) -> &str {
        self.map
            .default_station_color
            .as_deref()
            .unwrap_or(DEFAULT_STATION_COLOR)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_any_endpoint(
            self.source.buildings_endpoint.as_deref(),
            self.source.stations_endpoint.as_deref(),
        )?;
        validation::validate_optional_url(
            "source.buildings_endpoint",
            self.source.buildings_endpoint.as_deref(),
        )?;
        validation::validate_optional_url(
            "source.stations_endpoint",
            self.source.stations_endpoint.as_deref(),
        )?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_range("source.page_limit", self.page_limit(), 1, 10_000)?;
        validation::validate_range(
            "source.page_timeout_seconds",
            self.page_timeout().as_secs(),
            1,
            3_600,
        )?;
        if let Some(epicenter) = self.map.epicenter {
            validation::validate_lat_lon("map.epicenter", epicenter.lat, epicenter.lon)?;
        }
        Ok(())
    }
}
