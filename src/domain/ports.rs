use crate::domain::model::{Collections, LatLng, MapLayers};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn buildings_endpoint(&self) -> Option<&str>;
    fn stations_endpoint(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn page_limit(&self) -> usize;
    fn page_timeout(&self) -> Duration;
    fn show_stations(&self) -> bool;
    fn epicenter(&self) -> Option<LatLng>;
    fn station_colors(&self) -> &HashMap<String, String>;
    fn default_station_color(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Collections>;
    async fn transform(&self, data: Collections) -> Result<MapLayers>;
    async fn load(&self, layers: MapLayers) -> Result<String>;
}
