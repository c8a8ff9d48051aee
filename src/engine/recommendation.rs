//! Recommendation derivation: polygon area in, planting plan out.
//!
//! Everything downstream of the area is deterministic except the baseline
//! NDVI sample, which models unmeasured ground truth and comes from the
//! caller's RNG.

use rand::Rng;

use crate::engine::seasonal::generate_seasonal_growth;
use crate::error::{GreenmapError, Result};
use crate::models::PlantingRecommendation;

/// Optimal spacing: one tree per 25 m².
pub const TREE_SPACING_M2: f64 = 25.0;

/// Cost per tree including planting, in currency units.
pub const COST_PER_TREE: u64 = 45;

/// Dense urban canopy rarely pushes NDVI past this.
pub const NDVI_CEILING: f64 = 0.8;

/// NDVI gained from any planting intervention at all.
const BASE_NDVI_GAIN: f64 = 0.25;

/// Scales the trees-per-m² density into an NDVI bonus.
const DENSITY_GAIN: f64 = 1000.0;

/// Baseline NDVI sampling range: `0.10 + U(0, 0.15)`.
const BASELINE_NDVI_FLOOR: f64 = 0.10;
const BASELINE_NDVI_SPREAD: f64 = 0.15;

const LARGE_CANOPY_SPECIES: &[&str] = &[
    "Platanus orientalis",
    "Populus nigra",
    "Acer platanoides",
    "Tilia cordata",
];

const MEDIUM_SPECIES: &[&str] = &["Acer platanoides", "Tilia cordata", "Fraxinus excelsior"];

const SMALL_SPECIES: &[&str] = &["Tilia cordata", "Fraxinus excelsior", "Prunus cerasifera"];

const ORNAMENTAL_SPECIES: &[&str] = &["Prunus cerasifera", "Malus domestica", "Crataegus monogyna"];

const MAINTENANCE_NOTES: &[&str] = &[
    "Water regularly for the first 2 years",
    "Prune annually during dormant season",
    "Apply mulch around base to retain moisture",
    "Monitor for pests and diseases",
];

/// Species suited to a zone, by area tier.
///
/// Thresholds are strictly-greater-than, evaluated largest first, so exact
/// boundary values (1 000, 5 000, 10 000 m²) land in the smaller tier. Total
/// over all non-negative areas.
pub fn classify_species(area_m2: f64) -> &'static [&'static str] {
    if area_m2 > 10_000.0 {
        LARGE_CANOPY_SPECIES
    } else if area_m2 > 5_000.0 {
        MEDIUM_SPECIES
    } else if area_m2 > 1_000.0 {
        SMALL_SPECIES
    } else {
        ORNAMENTAL_SPECIES
    }
}

/// Derive the full planting recommendation for a polygon.
///
/// Rejects negative or non-finite areas. A zero area yields a degenerate
/// zero-tree recommendation with the density term guarded to 0.
pub fn derive_recommendation(
    polygon_id: &str,
    area_m2: f64,
    rng: &mut impl Rng,
) -> Result<PlantingRecommendation> {
    if !area_m2.is_finite() || area_m2 < 0.0 {
        return Err(GreenmapError::InvalidArea(area_m2));
    }

    let tree_count = (area_m2 / TREE_SPACING_M2).floor() as u64;
    let current_ndvi = BASELINE_NDVI_FLOOR + rng.gen_range(0.0..BASELINE_NDVI_SPREAD);
    let density = if area_m2 > 0.0 {
        tree_count as f64 / area_m2
    } else {
        0.0
    };
    let projected_ndvi = (current_ndvi + BASE_NDVI_GAIN + density * DENSITY_GAIN).min(NDVI_CEILING);

    Ok(PlantingRecommendation {
        polygon_id: polygon_id.to_string(),
        tree_count,
        suggested_species: classify_species(area_m2)
            .iter()
            .map(|s| s.to_string())
            .collect(),
        current_ndvi,
        projected_ndvi,
        // Saturate: a continental-scale area would otherwise overflow the
        // cost multiply once the tree-count cast has pegged at u64::MAX.
        estimated_cost: tree_count.saturating_mul(COST_PER_TREE),
        maintenance_notes: MAINTENANCE_NOTES.iter().map(|s| s.to_string()).collect(),
        seasonal_growth: generate_seasonal_growth(current_ndvi, projected_ndvi),
    })
}
