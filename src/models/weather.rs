use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observation from the weather collaborator. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub timestamp: DateTime<Utc>,
    /// Ambient temperature (°C)
    pub temperature: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Cloud cover (%)
    pub cloud_cover: f64,
    /// Precipitation (mm)
    pub precipitation: f64,
    /// Surface pressure (hPa)
    pub pressure: f64,
}

/// Aggregate view over a sample window, input to the seasonal adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub avg_temperature: f64,
    pub avg_humidity: f64,
    pub avg_cloud_cover: f64,
    /// Days with precipitation > 0 mm
    pub rainy_days: usize,
    /// Days with cloud cover < 30 %
    pub sunny_days: usize,
    pub sample_count: usize,
}

impl WeatherSummary {
    /// Aggregate a sample window. An empty window yields a neutral summary
    /// with zero counts.
    pub fn from_samples(samples: &[WeatherSample]) -> Self {
        if samples.is_empty() {
            return Self {
                avg_temperature: 0.0,
                avg_humidity: 0.0,
                avg_cloud_cover: 0.0,
                rainy_days: 0,
                sunny_days: 0,
                sample_count: 0,
            };
        }
        let n = samples.len() as f64;
        Self {
            avg_temperature: samples.iter().map(|s| s.temperature).sum::<f64>() / n,
            avg_humidity: samples.iter().map(|s| s.humidity).sum::<f64>() / n,
            avg_cloud_cover: samples.iter().map(|s| s.cloud_cover).sum::<f64>() / n,
            rainy_days: samples.iter().filter(|s| s.precipitation > 0.0).count(),
            sunny_days: samples.iter().filter(|s| s.cloud_cover < 30.0).count(),
            sample_count: samples.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(cloud: f64, rain: f64) -> WeatherSample {
        WeatherSample {
            timestamp: Utc::now(),
            temperature: 20.0,
            humidity: 55.0,
            cloud_cover: cloud,
            precipitation: rain,
            pressure: 1013.0,
        }
    }

    #[test]
    fn summary_counts_rainy_and_sunny_days() {
        let samples = vec![
            sample(10.0, 0.0),
            sample(25.0, 0.0),
            sample(80.0, 4.2),
            sample(95.0, 0.1),
        ];
        let summary = WeatherSummary::from_samples(&samples);
        assert_eq!(summary.sunny_days, 2);
        assert_eq!(summary.rainy_days, 2);
        assert_eq!(summary.sample_count, 4);
        assert!((summary.avg_cloud_cover - 52.5).abs() < 1e-9);
    }

    #[test]
    fn empty_window_is_neutral() {
        let summary = WeatherSummary::from_samples(&[]);
        assert_eq!(summary.sample_count, 0);
        assert_eq!(summary.rainy_days, 0);
    }
}
