//! MSK-64 intensity bands and their map colors.

use std::fmt;
use std::str::FromStr;

/// A static CSS color (hex or named).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(&'static str);

impl Color {
    pub const fn new(value: &'static str) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Msk64Band {
    I,
    IToII,
    II,
    IIToIII,
    III,
    IIIToIV,
    IV,
    IVToV,
    V,
    VToVI,
    VI,
    VIToVII,
    VII,
    VIIToVIII,
    VIII,
    VIIIToIX,
    IX,
    IXToX,
    X,
    XToXI,
    XI,
    XIToXII,
    XII,
}

impl Msk64Band {
    pub const ALL: [Msk64Band; 23] = [
        Msk64Band::I,
        Msk64Band::IToII,
        Msk64Band::II,
        Msk64Band::IIToIII,
        Msk64Band::III,
        Msk64Band::IIIToIV,
        Msk64Band::IV,
        Msk64Band::IVToV,
        Msk64Band::V,
        Msk64Band::VToVI,
        Msk64Band::VI,
        Msk64Band::VIToVII,
        Msk64Band::VII,
        Msk64Band::VIIToVIII,
        Msk64Band::VIII,
        Msk64Band::VIIIToIX,
        Msk64Band::IX,
        Msk64Band::IXToX,
        Msk64Band::X,
        Msk64Band::XToXI,
        Msk64Band::XI,
        Msk64Band::XIToXII,
        Msk64Band::XII,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::I => "I",
            Self::IToII => "I-II",
            Self::II => "II",
            Self::IIToIII => "II-III",
            Self::III => "III",
            Self::IIIToIV => "III-IV",
            Self::IV => "IV",
            Self::IVToV => "IV-V",
            Self::V => "V",
            Self::VToVI => "V-VI",
            Self::VI => "VI",
            Self::VIToVII => "VI-VII",
            Self::VII => "VII",
            Self::VIIToVIII => "VII-VIII",
            Self::VIII => "VIII",
            Self::VIIIToIX => "VIII-IX",
            Self::IX => "IX",
            Self::IXToX => "IX-X",
            Self::X => "X",
            Self::XToXI => "X-XI",
            Self::XI => "XI",
            Self::XIToXII => "XI-XII",
            Self::XII => "XII",
        }
    }

    /// Each whole degree shares its color with the half-step above it.
    pub fn color(self) -> Color {
        let hex = match self {
            Self::I | Self::IToII => "#ffffff",
            Self::II | Self::IIToIII => "#bfccff",
            Self::III | Self::IIIToIV => "#9999ff",
            Self::IV | Self::IVToV => "#80ffff",
            Self::V | Self::VToVI => "#7df894",
            Self::VI | Self::VIToVII => "#ffff00",
            Self::VII | Self::VIIToVIII => "#ffc800",
            Self::VIII | Self::VIIIToIX => "#ff9100",
            Self::IX | Self::IXToX => "#ff0000",
            Self::X | Self::XToXI => "#c80000",
            Self::XI | Self::XIToXII => "#800000",
            Self::XII => "#400000",
        };
        Color(hex)
    }
}

impl fmt::Display for Msk64Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Msk64Band {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|band| band.label() == s)
            .ok_or_else(|| format!("unknown MSK-64 band '{}'", s))
    }
}

/// `[lower, upper)` per band. The first band is open below and the last open above.
///
/// XI-XII stops at 11.74, so `[11.74, 11.75)` has no band. Existing map
/// clients classify the same way; keep it until the scale definition is
/// confirmed.
const BAND_BOUNDS: [(f64, f64, Msk64Band); 23] = [
    (f64::NEG_INFINITY, 1.25, Msk64Band::I),
    (1.25, 1.75, Msk64Band::IToII),
    (1.75, 2.25, Msk64Band::II),
    (2.25, 2.75, Msk64Band::IIToIII),
    (2.75, 3.25, Msk64Band::III),
    (3.25, 3.75, Msk64Band::IIIToIV),
    (3.75, 4.25, Msk64Band::IV),
    (4.25, 4.75, Msk64Band::IVToV),
    (4.75, 5.25, Msk64Band::V),
    (5.25, 5.75, Msk64Band::VToVI),
    (5.75, 6.25, Msk64Band::VI),
    (6.25, 6.75, Msk64Band::VIToVII),
    (6.75, 7.25, Msk64Band::VII),
    (7.25, 7.75, Msk64Band::VIIToVIII),
    (7.75, 8.25, Msk64Band::VIII),
    (8.25, 8.75, Msk64Band::VIIIToIX),
    (8.75, 9.25, Msk64Band::IX),
    (9.25, 9.75, Msk64Band::IXToX),
    (9.75, 10.25, Msk64Band::X),
    (10.25, 10.75, Msk64Band::XToXI),
    (10.75, 11.25, Msk64Band::XI),
    (11.25, 11.74, Msk64Band::XIToXII),
    (11.75, f64::INFINITY, Msk64Band::XII),
];

/// Classifies an MSK-64 intensity reading. `None` for NaN and for the
/// unassigned `[11.74, 11.75)` interval.
pub fn classify_intensity(value: f64) -> Option<Msk64Band> {
    if value.is_nan() {
        return None;
    }

    BAND_BOUNDS
        .iter()
        .find(|(lower, upper, _)| {
            value >= *lower && (value < *upper || (upper.is_infinite() && value == *upper))
        })
        .map(|(_, _, band)| *band)
}

/// Color for a band label such as `"VII-VIII"`; `None` if the label is unknown.
pub fn color_for_band(label: &str) -> Option<Color> {
    label.parse::<Msk64Band>().ok().map(Msk64Band::color)
}

/// Convenience for markers: intensity straight to color.
pub fn color_for_intensity(value: f64) -> Option<Color> {
    classify_intensity(value).map(Msk64Band::color)
}
