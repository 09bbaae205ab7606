//! Solar generation estimation engine.
//!
//! Consumed as a library by a presentation layer: callers supply a
//! [`GeoPoint`] and [`AreaSpec`], the [`PredictionOrchestrator`] resolves a
//! [`GenerationPrediction`] (remote model or deterministic physics
//! fallback), and the financial/environmental services turn the yield into
//! [`FinancialResult`] and [`EnvironmentalResult`].

pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod persistence;
pub mod services;
pub mod validation;

pub use config::EngineConfig;
pub use error::{EngineError, InvalidInput, ValidationIssue};
pub use history::{BoundedHistory, SharedHistory};
pub use models::prediction::{
    AreaSpec, AreaUnit, EnvironmentalResult, FactorBreakdown, FinancialResult,
    GenerationPrediction, GeoPoint, IrradianceEstimate, PredictionRecord, PredictionSource,
};
pub use models::weather::{WeatherSample, WeatherSummary};
pub use services::environmental::compute_environmental;
pub use services::financial::{compute_financial, irr, npv};
pub use services::irradiance::{daily_irradiance, monthly_profile, solar_zone, SolarZone};
pub use services::orchestrator::PredictionOrchestrator;
pub use services::remote::{HttpPredictionClient, PredictionClient};
pub use services::weather_service::{
    collect_weather, seasonal_adjustment, HttpWeatherClient, WeatherClient,
};
