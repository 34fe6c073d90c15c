pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::storage::LocalStorage;
#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;
pub use crate::config::toml_config::TomlConfig;

pub use crate::core::damage::color_for_damage;
pub use crate::core::engine::MapEngine;
pub use crate::core::fetcher::{FetchSummary, PaginatedFetcher};
pub use crate::core::intensity::{classify_intensity, color_for_band, Color, Msk64Band};
pub use crate::core::pipeline::HazardMapPipeline;
pub use crate::utils::error::{HazardMapError, Result};
