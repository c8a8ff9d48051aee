//! greenmap — urban heat-island planting toolkit.
//!
//! The core is the planting recommendation engine: pure functions deriving
//! tree capacity, species tier, cost, and a 12-month seasonal growth
//! trajectory from a polygon's area. Around it:
//! - `models`: typed records shared with the map front-end
//! - `zones`: predefined-zone seed loading from GeoJSON
//! - `mockdata`: synthetic environmental fields for the mock API
//! - `api_server`: the Axum endpoints the front-end talks to
//!
//! Randomness (baseline NDVI sampling) is injected as a [`rand::Rng`] so
//! every derivation is reproducible under a fixed seed.

pub mod api_server;
pub mod engine;
pub mod error;
pub mod mockdata;
pub mod models;
pub mod zones;

// Re-export commonly used items
pub use api_server::{create_router, AppState};
pub use engine::{classify_species, derive_recommendation, generate_seasonal_growth};
pub use error::{GreenmapError, Result};
pub use models::{
    BoundingBox, DrawnPolygon, LatLng, PlantingRecommendation, PlantingZone, PredefinedZone,
    Priority, SeasonalGrowth,
};
