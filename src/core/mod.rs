pub mod damage;
pub mod engine;
pub mod fetcher;
pub mod intensity;
pub mod markers;
pub mod pipeline;

pub use crate::domain::model::{Collections, MapLayers};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
