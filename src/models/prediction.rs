use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

// ─── Request inputs ──────────────────────────────────────────────────────────

/// Geographic point of the candidate installation. Created per request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaUnit {
    SquareMeters,
    SquareFeet,
    Acres,
    Hectares,
}

impl AreaUnit {
    /// Fixed conversion factor to square meters.
    pub fn to_m2_factor(self) -> f64 {
        match self {
            AreaUnit::SquareMeters => 1.0,
            AreaUnit::SquareFeet => 0.092_903,
            AreaUnit::Acres => 4_046.86,
            AreaUnit::Hectares => 10_000.0,
        }
    }
}

/// Installable surface, convertible to square meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaSpec {
    pub value: f64,
    pub unit: AreaUnit,
}

impl AreaSpec {
    pub fn new(value: f64, unit: AreaUnit) -> Self {
        Self { value, unit }
    }

    pub fn square_meters(value: f64) -> Self {
        Self::new(value, AreaUnit::SquareMeters)
    }

    pub fn as_m2(&self) -> f64 {
        self.value * self.unit.to_m2_factor()
    }
}

// ─── Irradiance estimate ─────────────────────────────────────────────────────

/// Monthly irradiance profile derived from a daily series.
/// `monthly_breakdown` is keyed by "YYYY-MM" and stays chronologically
/// ordered, so peak/low derivation never depends on hash iteration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrradianceEstimate {
    pub average_daily_kwh_per_m2: f64,
    pub monthly_breakdown: BTreeMap<String, f64>,
    pub peak_month: Option<String>,
    pub low_month: Option<String>,
}

// ─── Generation prediction ───────────────────────────────────────────────────

/// Where a prediction came from. `Fallback` flags reduced certainty to
/// downstream consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionSource {
    Remote,
    Fallback,
}

/// Multiplicative factors that shaped a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorBreakdown {
    pub weather_adj: f64,
    pub seasonal_adj: f64,
    pub location_adj: f64,
    pub system_efficiency: f64,
}

impl FactorBreakdown {
    pub fn neutral(system_efficiency: f64) -> Self {
        Self {
            weather_adj: 1.0,
            seasonal_adj: 1.0,
            location_adj: 1.0,
            system_efficiency,
        }
    }
}

/// Immutable result of one orchestrator invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationPrediction {
    pub daily_kwh: f64,
    pub monthly_kwh: f64,
    pub yearly_kwh: f64,
    /// In [0, 1]
    pub confidence: f64,
    pub source: PredictionSource,
    pub factor_breakdown: FactorBreakdown,
}

// ─── Downstream results ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialResult {
    pub investment: f64,
    pub monthly_savings: f64,
    pub annual_savings: f64,
    /// None when annual savings are not positive (payback undefined)
    pub payback_years: Option<f64>,
    pub npv: f64,
    /// None when Newton-Raphson did not converge
    pub irr: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalResult {
    pub co2_monthly_kg: f64,
    pub co2_total_kg: f64,
    pub equivalent_trees: f64,
    pub distance_offset_km: f64,
}

// ─── History record ──────────────────────────────────────────────────────────

/// One completed prediction, remote or fallback. Never mutated; evicted from
/// the bounded store only by capacity pressure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub input: PredictionInput,
    pub prediction: GenerationPrediction,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    pub latitude: f64,
    pub longitude: f64,
    pub area_m2: f64,
}

// ─── Remote collaborator wire types ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RemotePredictionRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub area_m2: f64,
    pub model_version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemotePredictionResponse {
    pub daily_kwh: f64,
    pub monthly_kwh: f64,
    pub yearly_kwh: f64,
    pub confidence: f64,
    pub factors: RemoteFactors,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RemoteFactors {
    pub weather_adj: f64,
    pub seasonal_adj: f64,
    pub location_adj: f64,
    pub system_efficiency: f64,
}

impl From<RemoteFactors> for FactorBreakdown {
    fn from(f: RemoteFactors) -> Self {
        Self {
            weather_adj: f.weather_adj,
            seasonal_adj: f.seasonal_adj,
            location_adj: f.location_adj,
            system_efficiency: f.system_efficiency,
        }
    }
}
