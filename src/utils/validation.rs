use crate::utils::error::{HazardMapError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(HazardMapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(HazardMapError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(HazardMapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_optional_url(field_name: &str, url_str: Option<&str>) -> Result<()> {
    match url_str {
        Some(url) => validate_url(field_name, url),
        None => Ok(()),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(HazardMapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(HazardMapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(HazardMapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 至少要有一個資料來源
pub fn validate_any_endpoint(buildings: Option<&str>, stations: Option<&str>) -> Result<()> {
    if buildings.is_none() && stations.is_none() {
        return Err(HazardMapError::MissingConfigError {
            field: "buildings_endpoint or stations_endpoint".to_string(),
        });
    }
    Ok(())
}

pub fn validate_lat_lon(field_name: &str, lat: f64, lon: f64) -> Result<()> {
    validate_range(&format!("{}.lat", field_name), lat, -90.0, 90.0)?;
    validate_range(&format!("{}.lon", field_name), lon, -180.0, 180.0)
}
