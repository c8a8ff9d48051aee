//! Core data model for the planting application.
//!
//! Field names serialize camelCase to stay wire-compatible with the map
//! front-end's TypeScript interfaces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic point, WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned bounding box of a polygon ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// Smallest box containing every vertex. Returns `None` for an empty ring.
    pub fn of_ring(ring: &[LatLng]) -> Option<Self> {
        let first = ring.first()?;
        let mut bbox = BoundingBox {
            north: first.lat,
            south: first.lat,
            east: first.lng,
            west: first.lng,
        };
        for p in &ring[1..] {
            bbox.north = bbox.north.max(p.lat);
            bbox.south = bbox.south.min(p.lat);
            bbox.east = bbox.east.max(p.lng);
            bbox.west = bbox.west.min(p.lng);
        }
        Some(bbox)
    }
}

/// Zone priority, also used as advice urgency on the mock API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Map the localized priority strings found in the zone seed file.
    /// Unknown strings fall through to `Low`.
    pub fn from_localized(s: &str) -> Self {
        match s {
            "yuqori" => Priority::High,
            "o'rtacha" | "o\u{2018}rtacha" => Priority::Medium,
            _ => Priority::Low,
        }
    }

    /// Priority of a user-drawn zone, by area alone.
    pub fn from_area(area_m2: f64) -> Self {
        if area_m2 > 10_000.0 {
            Priority::High
        } else if area_m2 > 5_000.0 {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A polygon drawn by the user on the map. Geometry arrives from the drawing
/// toolkit; `area` is supplied by the caller's geometry library. Immutable
/// once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawnPolygon {
    pub id: String,
    /// Ordered outer ring, first vertex not repeated.
    pub ring: Vec<LatLng>,
    /// Planar area in square meters.
    pub area: f64,
    pub centroid: LatLng,
    pub bounding_box: BoundingBox,
    pub created_at: DateTime<Utc>,
}

impl DrawnPolygon {
    /// Build a polygon record from a ring and a precomputed area.
    /// Centroid here is the vertex mean, which is what the map popup needs.
    /// Returns `None` for an empty ring.
    pub fn new(id: impl Into<String>, ring: Vec<LatLng>, area: f64) -> Option<Self> {
        let bounding_box = BoundingBox::of_ring(&ring)?;
        let n = ring.len() as f64;
        let centroid = LatLng::new(
            ring.iter().map(|p| p.lat).sum::<f64>() / n,
            ring.iter().map(|p| p.lng).sum::<f64>() / n,
        );
        Some(Self {
            id: id.into(),
            ring,
            area,
            centroid,
            bounding_box,
            created_at: Utc::now(),
        })
    }
}

/// Immutable recommendation snapshot derived once per drawn polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantingRecommendation {
    pub polygon_id: String,
    pub tree_count: u64,
    pub suggested_species: Vec<String>,
    #[serde(rename = "currentNDVI")]
    pub current_ndvi: f64,
    #[serde(rename = "projectedNDVI")]
    pub projected_ndvi: f64,
    pub estimated_cost: u64,
    pub maintenance_notes: Vec<String>,
    /// Exactly 12 entries, months 0..=11 in order.
    pub seasonal_growth: Vec<SeasonalGrowth>,
}

/// One month of the synthetic vegetation-growth trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalGrowth {
    /// Calendar month index, 0 = January.
    pub month: u32,
    pub ndvi_value: f64,
    pub coverage_percent: f64,
    pub description: String,
}

/// Static seed-zone attributes as they appear in the GeoJSON feature
/// properties. Read-only reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredefinedZone {
    pub id: String,
    pub name: String,
    pub priority: Priority,
    /// Vegetation fraction already on the ground, when surveyed.
    pub existing_vegetation: Option<f64>,
}

/// A planting zone ready for the map: seed zones after enrichment, or
/// user-drawn zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantingZone {
    pub id: String,
    pub ring: Vec<LatLng>,
    pub priority: Priority,
    /// Baseline vegetation index.
    pub ndvi: f64,
    /// Land-surface temperature baseline, °C.
    pub lst_baseline: f64,
    pub area: f64,
    pub tree_capacity: u64,
    /// Expected cooling in °C once planted, capped.
    pub temperature_reduction: f64,
    pub created_at: DateTime<Utc>,
    pub is_user_drawn: bool,
}
