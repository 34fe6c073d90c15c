use crate::core::damage::color_for_damage;
use crate::core::intensity::color_for_intensity;
use crate::domain::model::{
    Building, LatLng, MarkerDescriptor, MarkerKind, MarkerLayer, MarkerStyle, Popup, PopupRow,
    Station,
};
use std::collections::HashMap;

pub const EPICENTER_LAYER: &str = "Earthquake epicenter";
pub const STATIONS_LAYER: &str = "Seismic stations";
pub const BUILDINGS_LAYER: &str = "Objects";

const EPICENTER_COLOR: &str = "#ff0a0a";

/// Network code → marker fill color for seismic stations.
#[derive(Debug, Clone)]
pub struct StationPalette<'a> {
    colors: &'a HashMap<String, String>,
    fallback: &'a str,
}

impl<'a> StationPalette<'a> {
    pub fn new(colors: &'a HashMap<String, String>, fallback: &'a str) -> Self {
        Self { colors, fallback }
    }

    pub fn color_for(&self, network: &str) -> &'a str {
        self.colors
            .get(network)
            .map(String::as_str)
            .unwrap_or(self.fallback)
    }
}

pub fn epicenter_marker(position: LatLng) -> MarkerDescriptor {
    MarkerDescriptor {
        kind: MarkerKind::Epicenter,
        position,
        style: MarkerStyle::Star {
            fill_color: EPICENTER_COLOR.to_string(),
            fill_opacity: 1.0,
            number_of_points: 5,
            radius: 12,
            weight: 2,
        },
        popup: Popup {
            title: Some("Earthquake epicenter".to_string()),
            rows: Vec::new(),
        },
    }
}

pub fn station_marker(station: &Station, palette: &StationPalette<'_>) -> MarkerDescriptor {
    MarkerDescriptor {
        kind: MarkerKind::Station,
        position: LatLng::new(station.sta_lat, station.sta_lon),
        style: MarkerStyle::RegularPolygon {
            fill_color: palette.color_for(&station.scnl_network).to_string(),
            fill_opacity: 1.0,
            number_of_sides: 3,
            rotation: 30.0,
            radius: 7,
        },
        popup: station_popup(station),
    }
}

pub fn station_popup(station: &Station) -> Popup {
    let rows = [
        ("channel_num", "Channels", display(&station.channel_num)),
        ("sta_elevation", "Elevation", display(&station.sta_elevation)),
        ("instrument", "Sensor type", display(&station.instrument)),
        ("datalogger", "Datalogger", display(&station.datalogger)),
        ("sample_rate", "Sample rate", display(&station.sample_rate)),
        ("has_realtime", "Telemetry", display(&station.has_realtime)),
        ("operator", "Operator", display(&station.operator)),
    ];

    Popup {
        title: Some(format!("{}.{}", station.scnl_name, station.scnl_network)),
        rows: rows
            .into_iter()
            .map(|(key, label, value)| PopupRow {
                key: key.to_string(),
                label: label.to_string(),
                value,
            })
            .collect(),
    }
}

/// Building marker colored by forecast damage, or by design intensity when no forecast is attached.
pub fn building_marker(building: &Building) -> MarkerDescriptor {
    let fill_color = match building.damage_level {
        Some(level) => Some(color_for_damage(level).as_str().to_string()),
        None => building
            .max_msk64
            .and_then(color_for_intensity)
            .map(|c| c.as_str().to_string()),
    };

    MarkerDescriptor {
        kind: MarkerKind::Building,
        position: LatLng::new(building.lat, building.lon),
        style: MarkerStyle::MapMarker {
            fill_color,
            drop_shadow: true,
            gradient: true,
            inner_radius: 0,
            radius: 7,
        },
        popup: building_popup(building, building.damage_level, building.pga),
    }
}

/// Popup rows for a building. Rows without a value are left out; a zero
/// damage level or zero PGA counts as no value.
pub fn building_popup(building: &Building, damage_level: Option<u32>, pga: Option<f64>) -> Popup {
    let damage_level = damage_level.filter(|level| *level != 0);
    let pga = pga.filter(|value| *value != 0.0);

    let address = match (&building.street, &building.street_number) {
        (Some(street), Some(number)) => format!("{}, bld. {}", street, number),
        (Some(street), None) => street.clone(),
        (None, Some(number)) => format!("bld. {}", number),
        (None, None) => String::new(),
    };

    let rows = [
        ("building_type", "Building type", display(&building.building_type)),
        (
            "building_base_type",
            "Foundation type",
            display(&building.building_base_type),
        ),
        ("fabric_type", "Material", display(&building.fabric_type)),
        ("built_year", "Year built", display(&building.built_year)),
        ("flats", "Floors", display(&building.flats)),
        ("address", "Address", address),
        ("residents", "Residents", display(&building.residents)),
        (
            "max_msk64",
            "Design seismic resistance",
            building
                .max_msk64
                .map(|v| format!("{} (MSK64)", v))
                .unwrap_or_default(),
        ),
        (
            "damage_level",
            "Damage forecast",
            damage_level.map(|d| format!("d-{}", d)).unwrap_or_default(),
        ),
        ("PGA", "PGA", display(&pga)),
        ("notes", "Notes", display(&building.notes)),
        (
            "data_source_reference",
            "Data source",
            display(&building.data_source_reference),
        ),
    ];

    Popup {
        title: None,
        rows: rows
            .into_iter()
            .filter(|(_, _, value)| !value.trim().is_empty())
            .map(|(key, label, value)| PopupRow {
                key: key.to_string(),
                label: label.to_string(),
                value,
            })
            .collect(),
    }
}

fn display<T: std::fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

impl MarkerLayer {
    pub fn epicenter(position: LatLng) -> Self {
        Self {
            name: EPICENTER_LAYER.to_string(),
            visible: true,
            clustered: false,
            markers: vec![epicenter_marker(position)],
        }
    }

    pub fn stations(stations: &[Station], palette: &StationPalette<'_>, visible: bool) -> Self {
        Self {
            name: STATIONS_LAYER.to_string(),
            visible,
            clustered: false,
            markers: stations.iter().map(|s| station_marker(s, palette)).collect(),
        }
    }

    pub fn buildings(buildings: &[Building]) -> Self {
        Self {
            name: BUILDINGS_LAYER.to_string(),
            visible: true,
            clustered: true,
            markers: buildings.iter().map(building_marker).collect(),
        }
    }
}
