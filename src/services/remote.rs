//! Remote prediction collaborator.
//!
//! The orchestrator only sees the [`PredictionClient`] trait, so a
//! deterministic fake can stand in for the live service in tests. The
//! default implementation posts to an HTTP endpoint and treats every
//! transport, status or decode problem uniformly as a remote failure.

use async_trait::async_trait;

use crate::error::RemoteError;
use crate::models::prediction::{RemotePredictionRequest, RemotePredictionResponse};

#[async_trait]
pub trait PredictionClient: Send + Sync {
    async fn predict(
        &self,
        request: &RemotePredictionRequest,
    ) -> Result<RemotePredictionResponse, RemoteError>;
}

/// HTTP client for the remote prediction model.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPredictionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PredictionClient for HttpPredictionClient {
    async fn predict(
        &self,
        request: &RemotePredictionRequest,
    ) -> Result<RemotePredictionResponse, RemoteError> {
        let url = format!("{}/predict", self.base_url.trim_end_matches('/'));
        let response = self.client.post(&url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }

        response
            .json::<RemotePredictionResponse>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }
}
