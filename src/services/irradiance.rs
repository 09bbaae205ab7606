/// ============================================================
///  Physics-based daily irradiance estimation
///
///  Algorithm pipeline:
///   1. Declination        – Cooper's formula from day of year
///   2. Hour angle         – sunset hour angle from latitude × declination
///   3. Daily irradiance   – solar constant × atmospheric transmittance ×
///                           geometric term, converted to kWh/m²/day via an
///                           8-hour-equivalent-sun factor
///   4. Solar zone         – coarse |latitude| band with a fixed average
///                           irradiance, the deepest fallback tier
/// ============================================================

use std::collections::BTreeMap;
use std::f64::consts::PI;

use crate::models::prediction::IrradianceEstimate;

// ─── Physical constants ──────────────────────────────────────
const SOLAR_CONSTANT: f64 = 1367.0; // W/m²
const ATMOSPHERIC_TRANSMITTANCE: f64 = 0.75;
const EQUIVALENT_SUN_HOURS: f64 = 8.0;
const DEG: f64 = PI / 180.0;

/// Estimated daily irradiance (kWh/m²/day) for a latitude and day of year.
/// Never negative; polar night yields 0.
pub fn daily_irradiance(latitude_deg: f64, day_of_year: u32) -> f64 {
    let lat = latitude_deg * DEG;

    // 1. Declination (Cooper 1969, degrees)
    let decl_deg = 23.45 * (2.0 * PI * (284 + day_of_year) as f64 / 365.0).sin();
    let decl = decl_deg * DEG;

    // 2. Sunset hour angle. The acos argument exceeds ±1 inside the polar
    //    circles: clamp, so polar day saturates and polar night gives ω = 0.
    let cos_omega = (-lat.tan() * decl.tan()).clamp(-1.0, 1.0);
    let omega = cos_omega.acos();
    if omega <= f64::EPSILON {
        return 0.0; // polar night, sun never rises
    }

    // 3. Daily-average geometric term and W→kWh/day conversion
    let geometric =
        lat.sin() * decl.sin() + lat.cos() * decl.cos() * omega.sin() / omega;
    let raw_w = SOLAR_CONSTANT * ATMOSPHERIC_TRANSMITTANCE * geometric;
    (raw_w / 1000.0 * EQUIVALENT_SUN_HOURS).max(0.0)
}

// ─── Solar zones ─────────────────────────────────────────────

/// Coarse |latitude| band classification. Each zone carries a fixed average
/// irradiance used whenever a detailed computation is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolarZone {
    High,
    Medium,
    Moderate,
    Low,
}

impl SolarZone {
    /// Average daily irradiance for the zone (kWh/m²/day).
    pub fn average_irradiance(self) -> f64 {
        match self {
            SolarZone::High => 6.0,
            SolarZone::Medium => 5.5,
            SolarZone::Moderate => 4.8,
            SolarZone::Low => 4.0,
        }
    }
}

pub fn solar_zone(latitude_deg: f64) -> SolarZone {
    let abs_lat = latitude_deg.abs();
    if abs_lat < 15.0 {
        SolarZone::High
    } else if abs_lat < 30.0 {
        SolarZone::Medium
    } else if abs_lat < 45.0 {
        SolarZone::Moderate
    } else {
        SolarZone::Low
    }
}

// ─── Monthly profile ─────────────────────────────────────────

/// Aggregate a daily irradiance series keyed by "YYYY-MM" into per-month
/// averages, with peak/low months derived from the sorted breakdown.
pub fn monthly_profile(daily_by_month: &BTreeMap<String, Vec<f64>>) -> IrradianceEstimate {
    let mut monthly_breakdown = BTreeMap::new();
    for (month, values) in daily_by_month {
        if values.is_empty() {
            continue;
        }
        let avg = values.iter().sum::<f64>() / values.len() as f64;
        monthly_breakdown.insert(month.clone(), avg);
    }

    let average_daily_kwh_per_m2 = if monthly_breakdown.is_empty() {
        0.0
    } else {
        monthly_breakdown.values().sum::<f64>() / monthly_breakdown.len() as f64
    };

    let peak_month = monthly_breakdown
        .iter()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(k, _)| k.clone());
    let low_month = monthly_breakdown
        .iter()
        .min_by(|a, b| a.1.total_cmp(b.1))
        .map(|(k, _)| k.clone());

    IrradianceEstimate {
        average_daily_kwh_per_m2,
        monthly_breakdown,
        peak_month,
        low_month,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn irradiance_never_negative_over_full_domain() {
        for lat in (-90..=90).step_by(5) {
            for day in (1..=365).step_by(7) {
                let v = daily_irradiance(lat as f64, day);
                assert!(
                    v >= 0.0 && v.is_finite(),
                    "irradiance {} at lat={} day={}",
                    v,
                    lat,
                    day
                );
            }
        }
    }

    #[test]
    fn equator_beats_high_latitude_at_equinox() {
        let equator = daily_irradiance(0.0, 80);
        let nordic = daily_irradiance(65.0, 80);
        assert!(equator > nordic, "equator {} vs nordic {}", equator, nordic);
    }

    #[test]
    fn polar_night_is_zero() {
        // Deep winter above the arctic circle
        assert_eq!(daily_irradiance(80.0, 355), 0.0);
    }

    #[test]
    fn zone_bands() {
        assert_eq!(solar_zone(0.0), SolarZone::High);
        assert_eq!(solar_zone(-10.0), SolarZone::High);
        assert_eq!(solar_zone(20.0), SolarZone::Medium);
        assert_eq!(solar_zone(-35.0), SolarZone::Moderate);
        assert_eq!(solar_zone(80.0), SolarZone::Low);
        assert_eq!(solar_zone(45.0), SolarZone::Low);
    }

    #[test]
    fn zone_fallback_constants() {
        assert_eq!(SolarZone::High.average_irradiance(), 6.0);
        assert_eq!(SolarZone::Medium.average_irradiance(), 5.5);
        assert_eq!(SolarZone::Moderate.average_irradiance(), 4.8);
        assert_eq!(SolarZone::Low.average_irradiance(), 4.0);
    }

    #[test]
    fn monthly_profile_orders_and_picks_extremes() {
        let mut daily = BTreeMap::new();
        daily.insert("2025-06".to_string(), vec![6.0, 6.4, 6.2]);
        daily.insert("2025-01".to_string(), vec![2.0, 2.2]);
        daily.insert("2025-03".to_string(), vec![4.0]);

        let estimate = monthly_profile(&daily);
        let keys: Vec<_> = estimate.monthly_breakdown.keys().cloned().collect();
        assert_eq!(keys, vec!["2025-01", "2025-03", "2025-06"]);
        assert_eq!(estimate.peak_month.as_deref(), Some("2025-06"));
        assert_eq!(estimate.low_month.as_deref(), Some("2025-01"));
        assert!((estimate.average_daily_kwh_per_m2 - (2.1 + 4.0 + 6.2) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn monthly_profile_of_nothing_is_empty() {
        let estimate = monthly_profile(&BTreeMap::new());
        assert!(estimate.monthly_breakdown.is_empty());
        assert_eq!(estimate.peak_month, None);
        assert_eq!(estimate.low_month, None);
        assert_eq!(estimate.average_daily_kwh_per_m2, 0.0);
    }
}
