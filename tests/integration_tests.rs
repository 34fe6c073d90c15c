use hazard_map::domain::model::{LatLng, MapLayers};
use hazard_map::{CliConfig, HazardMapError, HazardMapPipeline, LocalStorage, MapEngine};
use httpmock::prelude::*;
use std::collections::HashMap;
use tempfile::TempDir;

fn cli_config(output_path: String) -> CliConfig {
    CliConfig {
        buildings_endpoint: None,
        stations_endpoint: None,
        output_path,
        page_limit: 1000,
        page_timeout_secs: 5,
        epicenter: None,
        hide_stations: false,
        config: None,
        verbose: false,
        json_logs: false,
        station_colors: HashMap::new(),
    }
}

#[tokio::test]
async fn test_end_to_end_export() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let stations_mock = server.mock(|when, then| {
        when.method(GET).path("/stations");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "data": [
                    {"scnl_name": "YSS", "scnl_network": "SH", "sta_lat": 46.95, "sta_lon": 142.76,
                     "channel_num": 3, "instrument": "CMG-40T", "has_realtime": true}
                ],
                "meta": {"pagination": {"current_page": 1, "total_pages": 1, "links": []}}
            }));
    });
    let buildings_page1 = server.mock(|when, then| {
        when.method(GET).path("/buildings").query_param("page", "1");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "data": [
                    {"lat": 46.96, "lon": 142.74, "street": "Lenina", "street_number": "1", "max_msk64": 8.0}
                ],
                "meta": {"pagination": {"current_page": 1, "total_pages": 2,
                         "links": {"next": server.url("/buildings?page=2")}}}
            }));
    });
    let buildings_page2 = server.mock(|when, then| {
        when.method(GET).path("/buildings").query_param("page", "2");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "data": [
                    {"lat": 46.97, "lon": 142.75, "damage_level": 3}
                ],
                "meta": {"pagination": {"current_page": 2, "total_pages": 2, "links": []}}
            }));
    });

    let mut config = cli_config(output_path.clone());
    config.stations_endpoint = Some(server.url("/stations"));
    config.buildings_endpoint = Some(server.url("/buildings?page=1"));
    config.epicenter = Some(LatLng::new(46.9, 142.7));

    let storage = LocalStorage::new(output_path.clone());
    let pipeline = HazardMapPipeline::new(storage, config).unwrap();
    let engine = MapEngine::new(pipeline);

    let result = engine.run().await.unwrap();

    stations_mock.assert();
    buildings_page1.assert();
    buildings_page2.assert();
    assert!(result.ends_with("layers.json"));

    let layers_path = std::path::Path::new(&output_path).join("layers.json");
    let layers: MapLayers = serde_json::from_slice(&std::fs::read(layers_path).unwrap()).unwrap();
    assert_eq!(layers.layers.len(), 3);
    assert_eq!(layers.marker_count(), 4);

    let objects = layers.layer("Objects").unwrap();
    assert!(objects.clustered);
    assert_eq!(objects.markers[0].style.fill_color(), Some("#ff9100"));
    assert_eq!(objects.markers[1].style.fill_color(), Some("#ff0000"));

    let csv = std::fs::read_to_string(std::path::Path::new(&output_path).join("markers.csv")).unwrap();
    assert_eq!(csv.lines().count(), 5);
    assert!(csv.contains("Seismic stations,station,46.95,142.76,#0000ff,YSS.SH"));
}

#[tokio::test]
async fn test_end_to_end_failure_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/buildings");
        then.status(500);
    });

    let mut config = cli_config(output_path.clone());
    config.buildings_endpoint = Some(server.url("/buildings"));

    let storage = LocalStorage::new(output_path.clone());
    let pipeline = HazardMapPipeline::new(storage, config).unwrap();
    let result = MapEngine::new(pipeline).run().await;

    api_mock.assert();
    assert!(matches!(result, Err(HazardMapError::Transport { .. })));
    assert!(!std::path::Path::new(&output_path).join("layers.json").exists());
}

#[tokio::test]
async fn test_cancelled_export() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/stations");
        then.status(200);
    });

    let mut config = cli_config(output_path.clone());
    config.stations_endpoint = Some(server.url("/stations"));

    let storage = LocalStorage::new(output_path);
    let pipeline = HazardMapPipeline::new(storage, config).unwrap();
    pipeline.cancellation_token().cancel();

    let result = MapEngine::new(pipeline).run().await;

    api_mock.assert_hits(0);
    assert!(matches!(result, Err(HazardMapError::Cancelled { .. })));
}
