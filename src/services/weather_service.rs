//! Weather collaborator and seasonal-adjustment input.
//!
//! Samples come back in chronological order from the collaborator, land in
//! the bounded weather history, and are condensed into a [`WeatherSummary`]
//! that feeds the seasonal adjustment.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::RemoteError;
use crate::history::SharedHistory;
use crate::models::prediction::GeoPoint;
use crate::models::weather::{WeatherSample, WeatherSummary};

#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Ordered daily samples for the date range (inclusive).
    async fn fetch_range(
        &self,
        point: &GeoPoint,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<WeatherSample>, RemoteError>;
}

/// Fetches a range through the collaborator and appends every sample to the
/// weather history store. Returns the aggregate summary.
pub async fn collect_weather<C: WeatherClient + ?Sized>(
    client: &C,
    point: &GeoPoint,
    from: NaiveDate,
    to: NaiveDate,
    history: &SharedHistory<WeatherSample>,
) -> Result<WeatherSummary, RemoteError> {
    let samples = client.fetch_range(point, from, to).await?;
    for sample in &samples {
        history.append(*sample);
    }
    Ok(WeatherSummary::from_samples(&samples))
}

/// Seasonal adjustment multiplier from an aggregated weather window.
/// Cloudier windows pull the factor down, sunny-day share pushes it up; the
/// result is clamped to [0.6, 1.15]. An empty window is neutral.
pub fn seasonal_adjustment(summary: &WeatherSummary) -> f64 {
    if summary.sample_count == 0 {
        return 1.0;
    }
    let cloud_penalty = summary.avg_cloud_cover / 100.0 * 0.4;
    let sunny_share = summary.sunny_days as f64 / summary.sample_count as f64;
    (1.0 - cloud_penalty + sunny_share * 0.15).clamp(0.6, 1.15)
}

// ─── Open-Meteo archive wire types ───────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    daily: ArchiveDaily,
}

#[derive(Debug, Deserialize)]
struct ArchiveDaily {
    time: Vec<String>,
    temperature_2m_mean: Vec<Option<f64>>,
    relative_humidity_2m_mean: Vec<Option<f64>>,
    cloud_cover_mean: Vec<Option<f64>>,
    precipitation_sum: Vec<Option<f64>>,
    surface_pressure_mean: Vec<Option<f64>>,
}

/// Open-Meteo archive client, the default weather collaborator.
#[derive(Debug, Clone)]
pub struct HttpWeatherClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpWeatherClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl WeatherClient for HttpWeatherClient {
    async fn fetch_range(
        &self,
        point: &GeoPoint,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<WeatherSample>, RemoteError> {
        let url = format!(
            "{}/v1/archive?latitude={}&longitude={}&start_date={}&end_date={}&daily=temperature_2m_mean,relative_humidity_2m_mean,cloud_cover_mean,precipitation_sum,surface_pressure_mean",
            self.base_url.trim_end_matches('/'),
            point.latitude,
            point.longitude,
            from,
            to
        );
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }
        let archive = response
            .json::<ArchiveResponse>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))?;

        let daily = archive.daily;
        let mut samples = Vec::with_capacity(daily.time.len());
        for (i, day) in daily.time.iter().enumerate() {
            // Open-Meteo: "2025-06-21" → midnight UTC
            let date = NaiveDate::parse_from_str(day, "%Y-%m-%d")
                .map_err(|e| RemoteError::Decode(e.to_string()))?;
            let timestamp = date
                .and_hms_opt(0, 0, 0)
                .ok_or_else(|| RemoteError::Decode(format!("bad date {day}")))?
                .and_utc();
            samples.push(WeatherSample {
                timestamp,
                temperature: value_at(&daily.temperature_2m_mean, i),
                humidity: value_at(&daily.relative_humidity_2m_mean, i),
                cloud_cover: value_at(&daily.cloud_cover_mean, i),
                precipitation: value_at(&daily.precipitation_sum, i),
                pressure: value_at(&daily.surface_pressure_mean, i),
            });
        }
        Ok(samples)
    }
}

fn value_at(column: &[Option<f64>], i: usize) -> f64 {
    column.get(i).copied().flatten().unwrap_or(0.0)
}
