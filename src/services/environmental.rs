//! CO₂ offset and everyday equivalences for a predicted yearly yield.

use crate::config::EngineConfig;
use crate::models::prediction::EnvironmentalResult;

/// Accounting horizon for the lifetime CO₂ figure (years)
const LIFETIME_YEARS: f64 = 25.0;
/// CO₂ absorbed by one tree per year (kg)
const CO2_PER_TREE_KG: f64 = 22.0;
/// Distance equivalent per kWh for an average vehicle (km)
const KM_PER_KWH: f64 = 3.4;

/// Pure function of the yearly yield and the configured grid CO₂ factor.
pub fn compute_environmental(yearly_kwh: f64, config: &EngineConfig) -> EnvironmentalResult {
    let factor = config.grid_co2_factor;
    let annual_co2 = yearly_kwh * factor;

    EnvironmentalResult {
        co2_monthly_kg: yearly_kwh / 12.0 * factor,
        co2_total_kg: annual_co2 * LIFETIME_YEARS,
        equivalent_trees: annual_co2 / CO2_PER_TREE_KG,
        distance_offset_km: yearly_kwh * KM_PER_KWH,
    }
}
