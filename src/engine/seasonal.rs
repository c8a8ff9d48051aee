//! Seasonal growth primitives.
//!
//! Two callers share the oscillation formula: the per-polygon recommendation
//! trajectory ([`generate_seasonal_growth`]) and the per-zone live overlay
//! ([`zone_growth`]). Keeping both on the same [`seasonal_multiplier`]
//! prevents the two curves from drifting apart.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::models::SeasonalGrowth;

pub const MONTHS_PER_YEAR: usize = 12;

/// Zone overlays below this growth fraction are not worth rendering.
pub const GROWTH_VISIBLE_THRESHOLD: f64 = 0.1;

/// NDVI gained by a zone at full growth, on top of its baseline.
pub const ZONE_NDVI_GAIN: f64 = 0.3;

const MONTH_NAMES: [&str; MONTHS_PER_YEAR] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Sinusoidal growth-rate factor in `[0.4, 1.0]`.
///
/// The `+π/2` phase shift puts the maximum at month 0 and the minimum at
/// month 6, modeling slow mid-winter establishment against growing-season
/// spurts for a northern-hemisphere planting calendar.
pub fn seasonal_multiplier(month: usize) -> f64 {
    ((month as f64 / MONTHS_PER_YEAR as f64) * 2.0 * PI + FRAC_PI_2).sin() * 0.3 + 0.7
}

/// Linear ramp over the simulated span: 0 at the first month, 1 at the last.
pub fn growth_progress(month: usize, total_months: usize) -> f64 {
    debug_assert!(total_months > 1);
    month as f64 / (total_months - 1) as f64
}

/// Build the 12-month trajectory from a sampled baseline NDVI to a projected
/// target.
///
/// The seasonal multiplier can shrink the month's increment, so adjacent
/// entries may dip slightly. Values are clamped so `ndvi_value` never drops
/// below the baseline and coverage never exceeds 100%.
pub fn generate_seasonal_growth(base_ndvi: f64, target_ndvi: f64) -> Vec<SeasonalGrowth> {
    MONTH_NAMES
        .iter()
        .enumerate()
        .map(|(month, name)| {
            let progress = growth_progress(month, MONTHS_PER_YEAR);
            let multiplier = seasonal_multiplier(month);
            let ndvi_value =
                (base_ndvi + (target_ndvi - base_ndvi) * progress * multiplier).max(base_ndvi);
            let coverage_percent = (progress * 100.0 * multiplier).min(100.0);
            SeasonalGrowth {
                month: month as u32,
                ndvi_value,
                coverage_percent,
                description: format!("{}: {:.0}% vegetation coverage", name, coverage_percent),
            }
        })
        .collect()
}

/// Growth fraction of a predefined zone at a month cursor, in `[0, 1]`.
///
/// The live-overlay flavor: no stored recommendation, just the month index.
/// The ramp reaches 1 after a full year and the multiplier modulates it.
pub fn zone_growth(month: usize) -> f64 {
    ((month as f64 + 1.0) / MONTHS_PER_YEAR as f64).min(1.0) * seasonal_multiplier(month)
}

/// Whether a zone overlay has enough growth to render at this month.
pub fn zone_growth_visible(month: usize) -> bool {
    zone_growth(month) > GROWTH_VISIBLE_THRESHOLD
}

/// NDVI the overlay reports for a zone at a month cursor.
pub fn zone_display_ndvi(base_ndvi: f64, month: usize) -> f64 {
    base_ndvi + zone_growth(month) * ZONE_NDVI_GAIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn multiplier_bounds_and_phase() {
        // The trough evaluates a hair under 0.4 (sin(3π/2) rounding), so the
        // range check needs an epsilon.
        for m in 0..MONTHS_PER_YEAR {
            let v = seasonal_multiplier(m);
            assert!(
                (0.4 - 1e-9..=1.0 + 1e-9).contains(&v),
                "month {m}: {v}"
            );
        }
        // Peak at the cycle start, trough opposite.
        assert_relative_eq!(seasonal_multiplier(0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(seasonal_multiplier(3), 0.7, epsilon = 1e-12);
        assert_relative_eq!(seasonal_multiplier(6), 0.4, epsilon = 1e-12);
        // sin(11/12·2π + π/2) = cos(11π/6) = √3/2
        assert_relative_eq!(
            seasonal_multiplier(11),
            0.7 + 0.3 * 3f64.sqrt() / 2.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn trajectory_has_twelve_ordered_months() {
        let growth = generate_seasonal_growth(0.15, 0.55);
        assert_eq!(growth.len(), 12);
        for (i, entry) in growth.iter().enumerate() {
            assert_eq!(entry.month, i as u32);
        }
    }

    #[test]
    fn trajectory_first_month_is_all_baseline() {
        let growth = generate_seasonal_growth(0.15, 0.55);
        assert_relative_eq!(growth[0].ndvi_value, 0.15, epsilon = 1e-12);
        assert_relative_eq!(growth[0].coverage_percent, 0.0, epsilon = 1e-12);
        assert!(growth[0].description.starts_with("January: 0%"));
    }

    #[test]
    fn trajectory_last_month_carries_full_progress() {
        let growth = generate_seasonal_growth(0.15, 0.55);
        let multiplier = seasonal_multiplier(11);
        assert_relative_eq!(
            growth[11].ndvi_value,
            0.15 + 0.40 * multiplier,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            growth[11].coverage_percent,
            (100.0 * multiplier).min(100.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn trajectory_stays_within_bounds() {
        let growth = generate_seasonal_growth(0.12, 0.8);
        for entry in &growth {
            assert!(entry.ndvi_value >= 0.12, "month {}", entry.month);
            assert!(
                (0.0..=100.0).contains(&entry.coverage_percent),
                "month {}",
                entry.month
            );
        }
    }

    #[test]
    fn trajectory_is_mostly_rising() {
        // The multiplier may flatten or dip adjacent months; assert the broad
        // shape, not strict monotonicity.
        let growth = generate_seasonal_growth(0.1, 0.7);
        let rising = growth
            .windows(2)
            .filter(|w| w[1].ndvi_value >= w[0].ndvi_value);
        assert!(rising.count() >= 8);
        assert!(growth[11].ndvi_value > growth[0].ndvi_value);
    }

    #[test]
    fn zone_growth_ramps_and_clamps() {
        // Month 0: ramp 1/12, multiplier 1.0
        assert_relative_eq!(zone_growth(0), 1.0 / 12.0, epsilon = 1e-12);
        // Month 11: ramp saturated at 1.0
        assert_relative_eq!(zone_growth(11), seasonal_multiplier(11), epsilon = 1e-12);
        for m in 0..MONTHS_PER_YEAR {
            assert!((0.0..=1.0).contains(&zone_growth(m)));
        }
    }

    #[test]
    fn zone_visibility_threshold() {
        // 1/12 ≈ 0.083: nothing to draw in January.
        assert!(!zone_growth_visible(0));
        assert!(zone_growth_visible(11));
    }

    #[test]
    fn zone_display_ndvi_adds_scaled_growth() {
        let m = 11;
        assert_relative_eq!(
            zone_display_ndvi(0.2, m),
            0.2 + zone_growth(m) * ZONE_NDVI_GAIN,
            epsilon = 1e-12
        );
    }
}
