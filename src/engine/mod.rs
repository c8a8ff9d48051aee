//! Planting recommendation engine.
//!
//! Pure functions, no I/O. The only non-determinism is the baseline NDVI
//! sample, taken from a caller-supplied [`rand::Rng`] so results are
//! reproducible under a fixed seed.

pub mod recommendation;
pub mod seasonal;

pub use recommendation::{classify_species, derive_recommendation};
pub use seasonal::{
    generate_seasonal_growth, growth_progress, seasonal_multiplier, zone_growth,
};
