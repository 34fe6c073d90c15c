use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct MapEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> MapEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting hazard map export...");

        // Extract
        tracing::info!("Fetching map data...");
        let collections = self.pipeline.extract().await?;
        tracing::info!(
            "Fetched {} stations and {} buildings",
            collections.stations.len(),
            collections.buildings.len()
        );

        // Transform
        tracing::info!("Building marker layers...");
        let layers = self.pipeline.transform(collections).await?;
        tracing::info!(
            "Built {} layers with {} markers",
            layers.layers.len(),
            layers.marker_count()
        );

        // Load
        tracing::info!("Writing layers...");
        let output_path = self.pipeline.load(layers).await?;
        tracing::info!("Output saved to: {} ({:?})", output_path, started.elapsed());

        Ok(output_path)
    }
}
