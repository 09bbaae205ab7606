use serde::Deserialize;

/// Engine-wide tuning constants. Every value has a canonical default; a JSON
/// file can override any subset of them.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EngineConfig {
    /// Surface of a single panel (m²)
    pub panel_area_m2: f64,
    /// Nominal panel power (W)
    pub panel_wattage_w: f64,
    /// Overall system efficiency applied to the fallback estimate
    pub system_efficiency: f64,
    /// Confidence attached to every fallback prediction
    pub fallback_confidence: f64,
    /// Largest installable area accepted by validation (m²)
    pub max_area_m2: f64,

    /// Cost of one panel before installation markup
    pub panel_unit_cost: f64,
    /// Installation cost as a multiplier on hardware cost
    pub installation_multiplier: f64,
    /// Discount rate used for the NPV column of FinancialResult
    pub discount_rate: f64,
    /// Horizon for the NPV/IRR cash-flow series (years)
    pub project_lifetime_years: usize,

    /// Grid CO₂ intensity (kg per kWh)
    pub grid_co2_factor: f64,

    /// Remote collaborator timeout (seconds)
    pub remote_timeout_s: u64,
    /// Automatic retries on transient remote failure before falling back
    pub remote_retries: u32,
    /// Version tag sent with every remote prediction request
    pub model_version: String,

    pub weather_history_cap: usize,
    pub prediction_history_cap: usize,

    /// Four hard-coded seasonal multipliers. Their flat average is applied
    /// regardless of the requested calendar month.
    pub seasonal_multipliers: [f64; 4],
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            panel_area_m2: 2.0,
            panel_wattage_w: 400.0,
            system_efficiency: 0.85,
            fallback_confidence: 0.75,
            max_area_m2: 100_000.0,
            panel_unit_cost: 250.0,
            installation_multiplier: 1.3,
            discount_rate: 0.08,
            project_lifetime_years: 25,
            grid_co2_factor: 0.82,
            remote_timeout_s: 30,
            remote_retries: 2,
            model_version: "1.0".to_string(),
            weather_history_cap: 100,
            prediction_history_cap: 50,
            seasonal_multipliers: [1.05, 1.20, 0.95, 0.80],
        }
    }
}

impl EngineConfig {
    pub fn load(path: &str) -> Result<Self, crate::error::EngineError> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Whole panels that fit on the given area.
    pub fn panel_count(&self, area_m2: f64) -> u32 {
        (area_m2 / self.panel_area_m2).floor() as u32
    }

    /// DC capacity (kW) of `panels` panels.
    pub fn capacity_kw(&self, panels: u32) -> f64 {
        panels as f64 * self.panel_wattage_w / 1000.0
    }

    /// Flat average of the four seasonal multipliers.
    pub fn seasonal_factor(&self) -> f64 {
        self.seasonal_multipliers.iter().sum::<f64>() / self.seasonal_multipliers.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_canonical() {
        let c = EngineConfig::default();
        assert_eq!(c.panel_count(200.0), 100);
        assert_eq!(c.capacity_kw(100), 40.0);
        assert!((c.seasonal_factor() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn partial_json_overrides_defaults() {
        let c: EngineConfig = serde_json::from_str(r#"{"panel_wattage_w": 450.0}"#).unwrap();
        assert_eq!(c.panel_wattage_w, 450.0);
        assert_eq!(c.panel_area_m2, 2.0);
    }
}
