use serde::{Deserialize, Deserializer, Serialize};

/// One page of a paginated collection: `{ data: [...], meta: { pagination: {...} } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    pub current_page: u64,
    pub total_pages: u64,
    #[serde(default, deserialize_with = "links_or_empty")]
    pub links: PageLinks,
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageLinks {
    pub next: Option<String>,
}

// 後端在沒有連結時會輸出 `"links": []`
fn links_or_empty<'de, D>(deserializer: D) -> std::result::Result<PageLinks, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(_) | serde_json::Value::Null => Ok(PageLinks::default()),
        other => PageLinks::deserialize(other).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::str::FromStr for LatLng {
    type Err = String;

    /// Parses `"lat,lon"`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| format!("expected 'lat,lon', got '{}'", s))?;
        let lat = lat
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid latitude '{}': {}", lat.trim(), e))?;
        let lon = lon
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid longitude '{}': {}", lon.trim(), e))?;
        Ok(Self { lat, lon })
    }
}

/// Seismic station as returned by the stations endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub scnl_name: String,
    pub scnl_network: String,
    pub sta_lat: f64,
    pub sta_lon: f64,
    #[serde(default)]
    pub channel_num: Option<u32>,
    #[serde(default)]
    pub sta_elevation: Option<f64>,
    #[serde(default)]
    pub instrument: Option<String>,
    #[serde(default)]
    pub datalogger: Option<String>,
    #[serde(default)]
    pub sample_rate: Option<f64>,
    #[serde(default)]
    pub has_realtime: Option<bool>,
    #[serde(default)]
    pub operator: Option<String>,
}

/// Building record from the buildings endpoint. Unknown fields are ignored,
/// coordinates are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub building_type: Option<String>,
    #[serde(default)]
    pub building_base_type: Option<String>,
    #[serde(default)]
    pub fabric_type: Option<String>,
    #[serde(default)]
    pub built_year: Option<i32>,
    #[serde(default)]
    pub flats: Option<u32>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub street_number: Option<String>,
    #[serde(default)]
    pub residents: Option<u32>,
    #[serde(default)]
    pub max_msk64: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub data_source_reference: Option<String>,
    #[serde(default)]
    pub damage_level: Option<u32>,
    #[serde(default)]
    pub pga: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Epicenter,
    Station,
    Building,
}

/// Shape and paint of a marker. The map widget picks the concrete marker type from `shape`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum MarkerStyle {
    Star {
        fill_color: String,
        fill_opacity: f64,
        number_of_points: u32,
        radius: u32,
        weight: u32,
    },
    RegularPolygon {
        fill_color: String,
        fill_opacity: f64,
        number_of_sides: u32,
        rotation: f64,
        radius: u32,
    },
    MapMarker {
        fill_color: Option<String>,
        drop_shadow: bool,
        gradient: bool,
        inner_radius: u32,
        radius: u32,
    },
}

impl MarkerStyle {
    pub fn fill_color(&self) -> Option<&str> {
        match self {
            Self::Star { fill_color, .. } | Self::RegularPolygon { fill_color, .. } => {
                Some(fill_color)
            }
            Self::MapMarker { fill_color, .. } => fill_color.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupRow {
    pub key: String,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Popup {
    pub title: Option<String>,
    pub rows: Vec<PopupRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerDescriptor {
    pub kind: MarkerKind,
    pub position: LatLng,
    pub style: MarkerStyle,
    pub popup: Popup,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerLayer {
    pub name: String,
    pub visible: bool,
    pub clustered: bool,
    pub markers: Vec<MarkerDescriptor>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapLayers {
    pub layers: Vec<MarkerLayer>,
}

impl MapLayers {
    pub fn marker_count(&self) -> usize {
        self.layers.iter().map(|l| l.markers.len()).sum()
    }

    pub fn layer(&self, name: &str) -> Option<&MarkerLayer> {
        self.layers.iter().find(|l| l.name == name)
    }
}

/// Raw collections pulled from the backend before they become markers.
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub stations: Vec<Station>,
    pub buildings: Vec<Building>,
}
