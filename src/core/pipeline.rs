use crate::core::fetcher::PaginatedFetcher;
use crate::core::markers::StationPalette;
use crate::core::{Collections, ConfigProvider, MapLayers, Pipeline, Storage};
use crate::domain::model::{Building, MarkerKind, MarkerLayer, Station};
use crate::utils::error::{HazardMapError, Result};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

pub const LAYERS_FILE: &str = "layers.json";
pub const MARKERS_CSV_FILE: &str = "markers.csv";

/// Pulls stations and buildings from the backend and writes them out as map layers.
pub struct HazardMapPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    fetcher: PaginatedFetcher,
    cancel: CancellationToken,
}

impl<S: Storage, C: ConfigProvider> HazardMapPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let fetcher = PaginatedFetcher::new(config.page_limit(), config.page_timeout())?;
        Ok(Self {
            storage,
            config,
            fetcher,
            cancel: CancellationToken::new(),
        })
    }

    /// Cancelling the returned token (e.g. from a Ctrl-C handler) aborts the fetch.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

#[derive(Debug, Serialize)]
struct MarkerCsvRow<'a> {
    layer: &'a str,
    kind: MarkerKind,
    lat: f64,
    lon: f64,
    fill_color: &'a str,
    title: &'a str,
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for HazardMapPipeline<S, C> {
    async fn extract(&self) -> Result<Collections> {
        let mut collections = Collections::default();

        if let Some(endpoint) = self.config.stations_endpoint() {
            tracing::info!("Fetching stations from {}", endpoint);
            collections.stations = self
                .fetcher
                .fetch_all::<Station>(endpoint, &self.cancel)
                .await?;
        }

        if let Some(endpoint) = self.config.buildings_endpoint() {
            tracing::info!("Fetching buildings from {}", endpoint);
            let buildings = &mut collections.buildings;
            let summary = self
                .fetcher
                .fetch_all_pages(
                    endpoint,
                    |building: Building| buildings.push(building),
                    &self.cancel,
                )
                .await?;
            tracing::debug!("Buildings fetch summary: {:?}", summary);
        }

        Ok(collections)
    }

    async fn transform(&self, data: Collections) -> Result<MapLayers> {
        let mut layers = MapLayers::default();

        if let Some(epicenter) = self.config.epicenter() {
            layers.layers.push(MarkerLayer::epicenter(epicenter));
        }

        if self.config.stations_endpoint().is_some() {
            let palette = StationPalette::new(
                self.config.station_colors(),
                self.config.default_station_color(),
            );
            layers.layers.push(MarkerLayer::stations(
                &data.stations,
                &palette,
                self.config.show_stations(),
            ));
        }

        if self.config.buildings_endpoint().is_some() {
            let layer = MarkerLayer::buildings(&data.buildings);
            let uncolored = layer
                .markers
                .iter()
                .filter(|m| m.style.fill_color().is_none())
                .count();
            if uncolored > 0 {
                tracing::warn!(
                    "{} buildings have no damage level or classifiable design intensity",
                    uncolored
                );
            }
            layers.layers.push(layer);
        }

        Ok(layers)
    }

    async fn load(&self, layers: MapLayers) -> Result<String> {
        let output_path = format!("{}/{}", self.config.output_path(), LAYERS_FILE);

        let json_data = serde_json::to_vec_pretty(&layers)?;

        let csv_data = {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for layer in &layers.layers {
                for marker in &layer.markers {
                    writer.serialize(MarkerCsvRow {
                        layer: &layer.name,
                        kind: marker.kind,
                        lat: marker.position.lat,
                        lon: marker.position.lon,
                        fill_color: marker.style.fill_color().unwrap_or(""),
                        title: marker.popup.title.as_deref().unwrap_or(""),
                    })?;
                }
            }
            writer
                .into_inner()
                .map_err(|e| HazardMapError::ProcessingError {
                    message: format!("failed to flush CSV: {}", e),
                })?
        };

        tracing::debug!(
            "Writing {} ({} bytes) and {} ({} bytes)",
            LAYERS_FILE,
            json_data.len(),
            MARKERS_CSV_FILE,
            csv_data.len()
        );

        self.storage.write_file(LAYERS_FILE, &json_data).await?;
        self.storage.write_file(MARKERS_CSV_FILE, &csv_data).await?;

        Ok(output_path)
    }
}
