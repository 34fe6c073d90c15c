#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

/// Used for stations whose network has no configured color.
pub const DEFAULT_STATION_COLOR: &str = "#0000ff";
