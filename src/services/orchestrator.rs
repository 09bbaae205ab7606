//! Prediction orchestration: validate → remote attempt → deterministic
//! fallback → history record.
//!
//! The remote model is the only suspension point in the engine. Its failure
//! is never surfaced: any timeout, transport or decode problem (after the
//! configured retries) routes to the physics fallback, and the returned
//! prediction carries `source = Fallback` so consumers can flag reduced
//! certainty. Dropping the `predict()` future before it completes appends
//! nothing to history.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{InvalidInput, RemoteError};
use crate::history::SharedHistory;
use crate::models::prediction::{
    AreaSpec, FactorBreakdown, GenerationPrediction, GeoPoint, PredictionInput, PredictionRecord,
    PredictionSource, RemotePredictionRequest, RemotePredictionResponse,
};
use crate::services::irradiance::solar_zone;
use crate::services::remote::PredictionClient;
use crate::validation::validate_request;

const EVENT_CHANNEL_CAPACITY: usize = 32;

pub struct PredictionOrchestrator {
    client: Arc<dyn PredictionClient>,
    config: EngineConfig,
    history: SharedHistory<PredictionRecord>,
    events: broadcast::Sender<PredictionRecord>,
}

impl PredictionOrchestrator {
    pub fn new(client: Arc<dyn PredictionClient>, config: EngineConfig) -> Self {
        let history = SharedHistory::new(config.prediction_history_cap);
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            client,
            config,
            history,
            events,
        }
    }

    /// Bounded prediction history (cap from config). Records are appended on
    /// every completed prediction and evicted only by capacity pressure.
    pub fn history(&self) -> &SharedHistory<PredictionRecord> {
        &self.history
    }

    /// Subscribe to completed predictions. The presentation layer listens
    /// here instead of polling mutable state.
    pub fn subscribe(&self) -> broadcast::Receiver<PredictionRecord> {
        self.events.subscribe()
    }

    /// Predict generation for a point and area.
    ///
    /// Invalid input is the only error this returns; when the input is
    /// rejected there is no remote call and no history write. A completed
    /// call always yields a usable prediction, remote or fallback.
    pub async fn predict(
        &self,
        geo: GeoPoint,
        area: AreaSpec,
    ) -> Result<GenerationPrediction, InvalidInput> {
        validate_request(&geo, &area, &self.config)?;
        let area_m2 = area.as_m2();

        let prediction = match self.attempt_remote(&geo, area_m2).await {
            Ok(response) => {
                tracing::info!(
                    daily_kwh = response.daily_kwh,
                    confidence = response.confidence,
                    "remote prediction succeeded"
                );
                GenerationPrediction {
                    daily_kwh: response.daily_kwh,
                    monthly_kwh: response.monthly_kwh,
                    yearly_kwh: response.yearly_kwh,
                    confidence: response.confidence.clamp(0.0, 1.0),
                    source: PredictionSource::Remote,
                    factor_breakdown: response.factors.into(),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "remote prediction failed, using fallback");
                self.compute_fallback(&geo, area_m2)
            }
        };

        let record = PredictionRecord {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            input: PredictionInput {
                latitude: geo.latitude,
                longitude: geo.longitude,
                area_m2,
            },
            prediction: prediction.clone(),
        };
        self.history.append(record.clone());
        // No subscribers is fine; the event is simply dropped
        let _ = self.events.send(record);

        Ok(prediction)
    }

    /// Remote attempt with a bounded timeout. Transient failures (timeout,
    /// transport, server error) are retried; decode failures and client
    /// errors are permanent for a given request and fall straight through
    /// to the caller.
    async fn attempt_remote(
        &self,
        geo: &GeoPoint,
        area_m2: f64,
    ) -> Result<RemotePredictionResponse, RemoteError> {
        let request = RemotePredictionRequest {
            latitude: geo.latitude,
            longitude: geo.longitude,
            area_m2,
            model_version: self.config.model_version.clone(),
        };
        let timeout = Duration::from_secs(self.config.remote_timeout_s);

        let mut last_error = None;
        for attempt in 0..=self.config.remote_retries {
            match tokio::time::timeout(timeout, self.client.predict(&request)).await {
                Ok(Ok(response)) => return Ok(response),
                Ok(Err(e)) => {
                    if !e.is_transient() {
                        tracing::debug!(attempt, error = %e, "remote failure is permanent, skipping retries");
                        return Err(e);
                    }
                    tracing::debug!(attempt, error = %e, "remote attempt failed");
                    last_error = Some(e);
                }
                Err(_) => {
                    tracing::debug!(attempt, "remote attempt timed out");
                    last_error = Some(RemoteError::Timeout(self.config.remote_timeout_s));
                }
            }
        }
        Err(last_error.unwrap_or(RemoteError::Timeout(self.config.remote_timeout_s)))
    }

    /// Deterministic physics fallback: panel heuristic × solar-zone average
    /// irradiance × system efficiency. Confidence is a fixed constant.
    fn compute_fallback(&self, geo: &GeoPoint, area_m2: f64) -> GenerationPrediction {
        let panels = self.config.panel_count(area_m2);
        let capacity_kw = self.config.capacity_kw(panels);
        let zone = solar_zone(geo.latitude);

        let seasonal = self.config.seasonal_factor();
        let daily_kwh = capacity_kw
            * zone.average_irradiance()
            * self.config.system_efficiency
            * seasonal;

        GenerationPrediction {
            daily_kwh,
            monthly_kwh: daily_kwh * 30.0,
            yearly_kwh: daily_kwh * 365.0,
            confidence: self.config.fallback_confidence,
            source: PredictionSource::Fallback,
            factor_breakdown: FactorBreakdown {
                weather_adj: 1.0,
                seasonal_adj: seasonal,
                location_adj: 1.0,
                system_efficiency: self.config.system_efficiency,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FailingClient {
        calls: AtomicU32,
    }

    #[async_trait]
    impl PredictionClient for FailingClient {
        async fn predict(
            &self,
            _request: &RemotePredictionRequest,
        ) -> Result<RemotePredictionResponse, RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(RemoteError::Status(503))
        }
    }

    fn orchestrator_with_failing_remote() -> (PredictionOrchestrator, Arc<FailingClient>) {
        let client = Arc::new(FailingClient {
            calls: AtomicU32::new(0),
        });
        let orchestrator =
            PredictionOrchestrator::new(client.clone(), EngineConfig::default());
        (orchestrator, client)
    }

    #[tokio::test]
    async fn fallback_matches_worked_scenario() {
        // area 200 m², panel 2 m² / 400 W, Medium zone (5.5), efficiency 0.85
        let (orchestrator, client) = orchestrator_with_failing_remote();
        let prediction = orchestrator
            .predict(GeoPoint::new(25.0, 55.0), AreaSpec::square_meters(200.0))
            .await
            .unwrap();

        assert_eq!(prediction.source, PredictionSource::Fallback);
        assert_eq!(prediction.confidence, 0.75);
        assert!((prediction.daily_kwh - 187.0).abs() < 1e-9);
        assert!((prediction.monthly_kwh - 187.0 * 30.0).abs() < 1e-9);
        assert!((prediction.yearly_kwh - 187.0 * 365.0).abs() < 1e-9);
        // Initial attempt plus two retries
        assert_eq!(client.calls.load(Ordering::SeqCst), 3);
    }

    struct MalformedRemote {
        calls: AtomicU32,
    }

    #[async_trait]
    impl PredictionClient for MalformedRemote {
        async fn predict(
            &self,
            _request: &RemotePredictionRequest,
        ) -> Result<RemotePredictionResponse, RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(RemoteError::Decode("unexpected token".to_string()))
        }
    }

    #[tokio::test]
    async fn permanent_remote_failure_is_not_retried() {
        let client = Arc::new(MalformedRemote {
            calls: AtomicU32::new(0),
        });
        let orchestrator =
            PredictionOrchestrator::new(client.clone(), EngineConfig::default());

        let prediction = orchestrator
            .predict(GeoPoint::new(25.0, 55.0), AreaSpec::square_meters(200.0))
            .await
            .unwrap();

        // Decode failures cannot succeed on retry: one call, then fallback
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
        assert_eq!(prediction.source, PredictionSource::Fallback);
    }

    #[tokio::test]
    async fn invalid_input_skips_remote_and_history() {
        let (orchestrator, client) = orchestrator_with_failing_remote();
        let err = orchestrator
            .predict(GeoPoint::new(95.0, 0.0), AreaSpec::square_meters(-5.0))
            .await
            .unwrap_err();

        assert_eq!(err.issues.len(), 2);
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
        assert!(orchestrator.history().is_empty());
    }

    #[tokio::test]
    async fn completed_prediction_is_recorded_and_published() {
        let (orchestrator, _) = orchestrator_with_failing_remote();
        let mut events = orchestrator.subscribe();

        orchestrator
            .predict(GeoPoint::new(10.0, 10.0), AreaSpec::square_meters(50.0))
            .await
            .unwrap();

        assert_eq!(orchestrator.history().len(), 1);
        let record = events.recv().await.unwrap();
        assert_eq!(record.input.area_m2, 50.0);
        assert_eq!(record.prediction.source, PredictionSource::Fallback);
        let stored = orchestrator.history().all();
        assert_eq!(stored[0].id, record.id);
    }
}
