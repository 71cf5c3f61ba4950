//! Output types of a sky computation.
//!
//! These are the natively structured values handed to the HTTP boundary. Their
//! serde shape is the one the map-rendering client reads.

use serde::{Deserialize, Serialize};

use super::coordinates::{EquatorialPosition, HorizontalPosition};

/// Object category as emitted in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Star,
    Sun,
    Moon,
    Planet,
}

/// A star or solar-system body placed on the observer's sky.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkyObject {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    pub alt_deg: f64,
    pub az_deg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
}

impl SkyObject {
    pub fn star(name: impl Into<String>, position: HorizontalPosition, magnitude: f64) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Star,
            alt_deg: position.alt_deg(),
            az_deg: position.az_deg(),
            magnitude: Some(magnitude),
        }
    }

    pub fn body(name: impl Into<String>, kind: ObjectKind, position: HorizontalPosition) -> Self {
        Self {
            name: name.into(),
            kind,
            alt_deg: position.alt_deg(),
            az_deg: position.az_deg(),
            magnitude: None,
        }
    }
}

/// A raw catalog star entry.
#[derive(Debug, Clone, PartialEq)]
pub struct StarRecord {
    /// Hipparcos number or other catalog identifier
    pub id: String,
    pub equatorial: EquatorialPosition,
    pub magnitude: f64,
}

impl StarRecord {
    pub fn new(id: impl Into<String>, ra_deg: f64, dec_deg: f64, magnitude: f64) -> Self {
        Self {
            id: id.into(),
            equatorial: EquatorialPosition::new(ra_deg, dec_deg),
            magnitude,
        }
    }

    /// Display name used in snapshots.
    pub fn display_name(&self) -> String {
        format!("HIP {}", self.id)
    }
}

/// A constellation stick figure as stored in the figure catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstellationFigure {
    pub id: String,
    pub name: String,
    /// Polylines in document order; vertex RA is kept exactly as published.
    pub segments: Vec<Vec<EquatorialPosition>>,
}

impl ConstellationFigure {
    pub fn vertex_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }
}

/// A projected line vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub alt: f64,
    pub az: f64,
}

impl From<HorizontalPosition> for LinePoint {
    fn from(position: HorizontalPosition) -> Self {
        Self {
            alt: position.alt_deg(),
            az: position.az_deg(),
        }
    }
}

/// Label anchor of a constellation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub alt: f64,
    pub az: f64,
    pub visible: bool,
}

impl From<HorizontalPosition> for Centroid {
    fn from(position: HorizontalPosition) -> Self {
        Self {
            alt: position.alt_deg(),
            az: position.az_deg(),
            visible: position.is_above_horizon(),
        }
    }
}

/// A constellation projected for one observer and instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstellationResult {
    pub id: String,
    pub name: String,
    pub centroid: Centroid,
    pub lines: Vec<Vec<LinePoint>>,
}

/// Echo of the request that produced a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub lat: f64,
    pub lon: f64,
    pub datetime_utc: String,
}

/// Everything visible from one place at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkySnapshot {
    pub metadata: SnapshotMetadata,
    pub stars: Vec<SkyObject>,
    pub solar_system: Vec<SkyObject>,
    pub constellations: Vec<ConstellationResult>,
}
