//! Synthetic environmental fields backing the mock API.
//!
//! Nothing here touches real imagery. Temperature is a smooth positional
//! field so nearby requests agree; NDVI and the zone list are randomized per
//! request, as the front-end expects from the mock server.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{LatLng, Priority};

/// City-wide mean the temperature field oscillates around, °C.
const BASE_TEMPERATURE_C: f64 = 28.0;

/// Physical clamp for the mock field, °C.
const TEMPERATURE_RANGE_C: (f64, f64) = (15.0, 45.0);

/// Center of the synthetic zone cloud (Tashkent).
const ZONE_CENTER: LatLng = LatLng {
    lat: 41.2995,
    lng: 69.2401,
};

const SYNTHETIC_ZONE_COUNT: usize = 25;

/// Mock land-surface temperature at a point.
///
/// High-frequency trigonometric terms fake street-scale variation while
/// keeping the field deterministic in position.
pub fn mock_temperature(lat: f64, lng: f64) -> f64 {
    let variation = (lat * 100.0).sin() * (lng * 100.0).cos() * 10.0;
    (BASE_TEMPERATURE_C + variation).clamp(TEMPERATURE_RANGE_C.0, TEMPERATURE_RANGE_C.1)
}

/// Mock vegetation index sample in `[0, 0.8]`.
pub fn mock_ndvi(rng: &mut impl Rng) -> f64 {
    (rng.gen::<f64>() * 0.8).clamp(0.0, 1.0)
}

/// A randomized planting zone as served by `/api/planting-zones`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticZone {
    pub id: String,
    /// 4-point rectangle ring, `[lat, lng]` pairs.
    pub coordinates: [[f64; 2]; 4],
    /// Square meters, whole.
    pub area: u64,
    pub trees: u64,
    /// Expected cooling, °C, one decimal.
    pub reduction: f64,
    pub priority: Priority,
}

/// Generate the randomized mock zone list around the city center.
pub fn synthetic_zones(rng: &mut impl Rng) -> Vec<SyntheticZone> {
    (0..SYNTHETIC_ZONE_COUNT)
        .map(|i| {
            let lat = ZONE_CENTER.lat + (rng.gen::<f64>() - 0.5) * 0.1;
            let lng = ZONE_CENTER.lng + (rng.gen::<f64>() - 0.5) * 0.1;
            let area = (500.0 + rng.gen::<f64>() * 3000.0).round() as u64;
            let trees = (area as f64 / 120.0).round() as u64;
            let reduction = ((rng.gen::<f64>() * 3.0 + 1.0) * 10.0).round() / 10.0;

            SyntheticZone {
                id: format!("zone-{}", i + 1),
                coordinates: [
                    [lat - 0.002, lng - 0.002],
                    [lat - 0.002, lng + 0.002],
                    [lat + 0.002, lng + 0.002],
                    [lat + 0.002, lng - 0.002],
                ],
                area,
                trees,
                reduction,
                priority: if rng.gen::<f64>() > 0.5 {
                    Priority::High
                } else {
                    Priority::Medium
                },
            }
        })
        .collect()
}

/// Cooling advice for a temperature reading, as served by
/// `/api/recommendations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoolingAdvice {
    pub recommendations: Vec<String>,
    pub urgency: Priority,
    /// Expected cooling range, e.g. `"3-5°C"`.
    pub estimated_cooling: String,
}

/// Advice tier for a temperature, thresholds at 35/30/25 °C.
pub fn cooling_advice(temperature_c: f64) -> CoolingAdvice {
    let (recommendations, urgency, estimated_cooling): (&[&str], Priority, &str) =
        if temperature_c > 35.0 {
            (
                &[
                    "Plant large shade trees (Platanus orientalis, Populus nigra)",
                    "Install shade structures over public spaces",
                    "Switch to light-colored road surfacing",
                    "Create green corridors for air circulation",
                    "Install misting systems in pedestrian areas",
                ],
                Priority::High,
                "3-5°C",
            )
        } else if temperature_c > 30.0 {
            (
                &[
                    "Plant medium shade trees (Acer platanoides, Tilia cordata)",
                    "Expand green roof coverage",
                    "Add planting to parking areas",
                    "Establish pocket parks in dense blocks",
                ],
                Priority::Medium,
                "2-4°C",
            )
        } else if temperature_c > 25.0 {
            (
                &[
                    "Plant a mix of native species",
                    "Preserve existing tree shade",
                    "Add ornamental planting for amenity",
                    "Consider permeable paving",
                ],
                Priority::Low,
                "1-2°C",
            )
        } else {
            (
                &[
                    "Maintain current vegetation levels",
                    "Focus on increasing biodiversity",
                    "Plant flowering species for pollinators",
                ],
                Priority::Low,
                "1-2°C",
            )
        };

    CoolingAdvice {
        recommendations: recommendations.iter().map(|s| s.to_string()).collect(),
        urgency,
        estimated_cooling: estimated_cooling.to_string(),
    }
}

/// Fixed aggregate snapshot for `/api/stats`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityStats {
    pub average_temperature: f64,
    pub total_planting_zones: u64,
    pub recommended_trees: u64,
    pub potential_cooling: f64,
}

pub const CITY_STATS: CityStats = CityStats {
    average_temperature: 28.5,
    total_planting_zones: 142,
    recommended_trees: 1847,
    potential_cooling: 3.2,
};
