//! Core data models for procedure scenes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{OverlayError, OverlayResult};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

impl Position {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Check the position lies on the globe.
    pub fn validate(&self) -> OverlayResult<()> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(OverlayError::geometry(format!(
                "latitude {} outside [-90, 90]",
                self.lat
            )));
        }
        if !self.lon.is_finite() || !(-180.0..=180.0).contains(&self.lon) {
            return Err(OverlayError::geometry(format!(
                "longitude {} outside [-180, 180]",
                self.lon
            )));
        }
        Ok(())
    }
}

/// 24-bit draw color, written as `#rrggbb` in scene files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    pub const BLUE: Rgb = Rgb::new(0x00, 0x00, 0xff);
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {0:?}, expected #rrggbb or #rgb")]
pub struct ParseColorError(String);

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        match hex.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
                Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
            }
            3 => {
                // #abc is shorthand for #aabbcc
                let channel = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| err())
                };
                Ok(Rgb::new(channel(0)?, channel(1)?, channel(2)?))
            }
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A named navigation fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: String,
    #[serde(flatten)]
    pub position: Position,
}

/// A named, colored sequence of fixes (an arrival or departure route).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Procedure {
    pub name: String,
    pub fixes: Vec<String>,
    pub color: Rgb,
}

/// Circular controlled-airspace boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirspaceRing {
    pub center: Position,
    pub radius_m: f64,
}

impl AirspaceRing {
    pub fn validate(&self) -> OverlayResult<()> {
        self.center.validate()?;
        if !self.radius_m.is_finite() || self.radius_m <= 0.0 {
            return Err(OverlayError::geometry(format!(
                "airspace ring radius must be positive, got {}",
                self.radius_m
            )));
        }
        Ok(())
    }
}

/// Axis-aligned lat/lon box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south_west: Position,
    pub north_east: Position,
}

impl BoundingBox {
    pub fn validate(&self) -> OverlayResult<()> {
        self.south_west.validate()?;
        self.north_east.validate()?;
        if self.south_west.lat > self.north_east.lat {
            return Err(OverlayError::geometry(format!(
                "bounding box south edge {} is north of its north edge {}",
                self.south_west.lat, self.north_east.lat
            )));
        }
        Ok(())
    }
}

/// A labelled point drawn by the point overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub label: String,
    #[serde(flatten)]
    pub position: Position,
}

/// Everything needed to draw one map scene.
///
/// Arrives fully materialized from a scene file; the composer only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub center: Position,
    pub zoom: u8,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
    #[serde(default)]
    pub legend_html: Option<String>,
    /// Inject legend markup verbatim instead of escaping it
    #[serde(default)]
    pub legend_trusted: bool,
    #[serde(default)]
    pub shaded_region: Option<BoundingBox>,
    #[serde(default)]
    pub procedures: Vec<Procedure>,
    #[serde(default)]
    pub airspace_rings: Vec<AirspaceRing>,
    #[serde(default)]
    pub point_overlay_enabled: bool,
    #[serde(default)]
    pub points: Vec<MapPoint>,
    #[serde(default)]
    pub vector_stream_spec: Option<String>,
}

impl SceneConfig {
    /// Minimal scene: a view and nothing on it.
    pub fn new(center: Position, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            waypoints: Vec::new(),
            legend_html: None,
            legend_trusted: false,
            shaded_region: None,
            procedures: Vec::new(),
            airspace_rings: Vec::new(),
            point_overlay_enabled: false,
            points: Vec::new(),
            vector_stream_spec: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
