//! Predefined planting-zone seed data.
//!
//! Zones ship as a GeoJSON feature collection with localized priority
//! strings. Each feature is enriched into a [`PlantingZone`]: spherical area
//! from the ring, tree capacity at the standard spacing, and mock NDVI/LST
//! baselines where the seed file carries no survey value.

use std::fs;
use std::path::Path;

use chrono::Utc;
use geo::ChamberlainDuquetteArea;
use geojson::{Feature, FeatureCollection, GeoJson};
use rand::Rng;

use crate::engine::recommendation::TREE_SPACING_M2;
use crate::error::{GreenmapError, Result};
use crate::models::{LatLng, PlantingZone, PredefinedZone, Priority};

/// Expected cooling per planted tree, °C.
const REDUCTION_PER_TREE_C: f64 = 0.02;

/// Cooling claims above this are capped.
const MAX_REDUCTION_C: f64 = 5.0;

/// Land-surface temperature baseline sampling: `28 + U(0, 10)` °C.
const LST_FLOOR_C: f64 = 28.0;
const LST_SPREAD_C: f64 = 10.0;

/// Baseline NDVI sampling for unsurveyed seed zones: `0.10 + U(0, 0.15)`.
const SEED_NDVI_FLOOR: f64 = 0.10;
const SEED_NDVI_SPREAD: f64 = 0.15;

/// User-drawn zones sample a tighter baseline: `0.10 + U(0, 0.10)`.
const USER_NDVI_SPREAD: f64 = 0.10;

/// Load and enrich the seed zones from a GeoJSON file.
pub fn load_predefined_zones(path: &Path, rng: &mut impl Rng) -> Result<Vec<PlantingZone>> {
    let contents = fs::read_to_string(path)?;
    let zones = zones_from_geojson(&contents, rng)?;
    tracing::info!("Loaded {} predefined zones from {:?}", zones.len(), path);
    Ok(zones)
}

/// Parse and enrich seed zones from GeoJSON text.
pub fn zones_from_geojson(contents: &str, rng: &mut impl Rng) -> Result<Vec<PlantingZone>> {
    let geojson: GeoJson = contents.parse()?;
    let collection = FeatureCollection::try_from(geojson)?;
    collection
        .features
        .iter()
        .map(|feature| feature_to_zone(feature, rng))
        .collect()
}

/// Static attributes of one seed feature, before enrichment.
pub fn parse_attributes(feature: &Feature) -> Result<PredefinedZone> {
    let id = string_property(feature, "zone_id").ok_or_else(|| GreenmapError::InvalidZone {
        id: "<unknown>".to_string(),
        reason: "missing 'zone_id' property".to_string(),
    })?;
    let name = string_property(feature, "name").unwrap_or_else(|| id.clone());
    let priority = string_property(feature, "priority")
        .map(|s| Priority::from_localized(&s))
        .unwrap_or(Priority::Low);
    let existing_vegetation = feature
        .properties
        .as_ref()
        .and_then(|props| props.get("existing_vegetation"))
        .and_then(|v| v.as_f64());

    Ok(PredefinedZone {
        id,
        name,
        priority,
        existing_vegetation,
    })
}

fn feature_to_zone(feature: &Feature, rng: &mut impl Rng) -> Result<PlantingZone> {
    let attributes = parse_attributes(feature)?;

    let geometry = feature
        .geometry
        .as_ref()
        .ok_or_else(|| GreenmapError::InvalidZone {
            id: attributes.id.clone(),
            reason: "missing geometry".to_string(),
        })?;
    let polygon =
        geo::Polygon::<f64>::try_from(geometry.value.clone()).map_err(|e| {
            GreenmapError::InvalidZone {
                id: attributes.id.clone(),
                reason: e.to_string(),
            }
        })?;

    let area = polygon.chamberlain_duquette_unsigned_area();
    // GeoJSON positions are [lng, lat]; drop the closing vertex.
    let exterior = polygon.exterior();
    let open_len = exterior.0.len().saturating_sub(1);
    let ring: Vec<LatLng> = exterior.0[..open_len]
        .iter()
        .map(|c| LatLng::new(c.y, c.x))
        .collect();

    // Surveyed vegetation fraction doubles as the NDVI baseline; otherwise
    // sample one, as the front-end did.
    let ndvi = attributes
        .existing_vegetation
        .unwrap_or_else(|| SEED_NDVI_FLOOR + rng.gen_range(0.0..SEED_NDVI_SPREAD));

    Ok(enrich(
        attributes.id,
        ring,
        area,
        attributes.priority,
        ndvi,
        false,
        rng,
    ))
}

/// Build the zone record for a user-drawn ring with a precomputed area.
pub fn user_zone(
    id: impl Into<String>,
    ring: Vec<LatLng>,
    area: f64,
    rng: &mut impl Rng,
) -> Result<PlantingZone> {
    if !area.is_finite() || area < 0.0 {
        return Err(GreenmapError::InvalidArea(area));
    }
    let ndvi = SEED_NDVI_FLOOR + rng.gen_range(0.0..USER_NDVI_SPREAD);
    Ok(enrich(
        id.into(),
        ring,
        area,
        Priority::from_area(area),
        ndvi,
        true,
        rng,
    ))
}

fn enrich(
    id: String,
    ring: Vec<LatLng>,
    area: f64,
    priority: Priority,
    ndvi: f64,
    is_user_drawn: bool,
    rng: &mut impl Rng,
) -> PlantingZone {
    let tree_capacity = (area / TREE_SPACING_M2).floor() as u64;
    let temperature_reduction = (tree_capacity as f64 * REDUCTION_PER_TREE_C).min(MAX_REDUCTION_C);

    PlantingZone {
        id,
        ring,
        priority,
        ndvi,
        lst_baseline: LST_FLOOR_C + rng.gen_range(0.0..LST_SPREAD_C),
        area,
        tree_capacity,
        temperature_reduction,
        created_at: Utc::now(),
        is_user_drawn,
    }
}

fn string_property(feature: &Feature, key: &str) -> Option<String> {
    feature
        .properties
        .as_ref()
        .and_then(|props| props.get(key))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SEED_GEOJSON: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {
                    "zone_id": "zone-1",
                    "name": "Central Park Area",
                    "priority": "yuqori",
                    "existing_vegetation": 0.15
                },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [69.240, 41.315],
                        [69.245, 41.315],
                        [69.245, 41.320],
                        [69.240, 41.320],
                        [69.240, 41.315]
                    ]]
                }
            },
            {
                "type": "Feature",
                "properties": {
                    "zone_id": "zone-2",
                    "priority": "o'rtacha"
                },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [69.250, 41.305],
                        [69.252, 41.305],
                        [69.252, 41.307],
                        [69.250, 41.307],
                        [69.250, 41.305]
                    ]]
                }
            }
        ]
    }"#;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn seed_zones_parse_and_enrich() {
        let zones = zones_from_geojson(SEED_GEOJSON, &mut rng()).unwrap();
        assert_eq!(zones.len(), 2);

        let z = &zones[0];
        assert_eq!(z.id, "zone-1");
        assert_eq!(z.priority, Priority::High);
        assert_eq!(z.ndvi, 0.15);
        assert!(!z.is_user_drawn);
        assert_eq!(z.ring.len(), 4);
        // ~0.005° × 0.005° rectangle at 41.3°N is a few hundred meters a side.
        assert!(z.area > 100_000.0 && z.area < 400_000.0, "area {}", z.area);
        assert_eq!(z.tree_capacity, (z.area / 25.0).floor() as u64);
        assert_eq!(z.temperature_reduction, 5.0);
        assert!((28.0..38.0).contains(&z.lst_baseline));

        let z = &zones[1];
        assert_eq!(z.priority, Priority::Medium);
        // No survey value: baseline sampled in [0.10, 0.25).
        assert!((0.10..0.25).contains(&z.ndvi));
    }

    #[test]
    fn reduction_is_capped_for_small_zones_too() {
        let zones = zones_from_geojson(SEED_GEOJSON, &mut rng()).unwrap();
        let small = &zones[1];
        assert!(small.temperature_reduction <= 5.0);
        assert!((small.temperature_reduction - small.tree_capacity as f64 * 0.02).abs() < 1e-9
            || small.temperature_reduction == 5.0);
    }

    #[test]
    fn missing_zone_id_is_rejected() {
        let bad = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0,0],[1,0],[1,1],[0,1],[0,0]]]
                }
            }]
        }"#;
        assert!(matches!(
            zones_from_geojson(bad, &mut rng()),
            Err(GreenmapError::InvalidZone { .. })
        ));
    }

    #[test]
    fn missing_geometry_is_rejected() {
        let bad = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"zone_id": "zone-x"},
                "geometry": null
            }]
        }"#;
        let err = zones_from_geojson(bad, &mut rng()).unwrap_err();
        assert!(err.to_string().contains("zone-x"));
    }

    #[test]
    fn malformed_geojson_is_a_parse_error() {
        assert!(matches!(
            zones_from_geojson("{not geojson", &mut rng()),
            Err(GreenmapError::Geojson(_))
        ));
    }

    #[test]
    fn user_zone_priority_follows_area() {
        let ring = vec![LatLng::new(41.3, 69.2)];
        let mut r = rng();
        assert_eq!(
            user_zone("u-1", ring.clone(), 12_000.0, &mut r).unwrap().priority,
            Priority::High
        );
        assert_eq!(
            user_zone("u-2", ring.clone(), 6_000.0, &mut r).unwrap().priority,
            Priority::Medium
        );
        let z = user_zone("u-3", ring, 500.0, &mut r).unwrap();
        assert_eq!(z.priority, Priority::Low);
        assert!(z.is_user_drawn);
        assert!((0.10..0.20).contains(&z.ndvi));
    }

    #[test]
    fn user_zone_rejects_invalid_area() {
        let ring = vec![LatLng::new(41.3, 69.2)];
        assert!(user_zone("u", ring.clone(), -1.0, &mut rng()).is_err());
        assert!(user_zone("u", ring, f64::NAN, &mut rng()).is_err());
    }
}
