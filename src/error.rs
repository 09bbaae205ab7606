use thiserror::Error;

/// A single violated input constraint. Validation collects every violation
/// instead of stopping at the first one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("latitude {0} out of range [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} out of range [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("area value {0} must be positive")]
    AreaNotPositive(f64),
    #[error("area {converted_m2} m² exceeds maximum {max_m2} m²")]
    AreaExceedsMaximum { converted_m2: f64, max_m2: f64 },
}

/// Input rejected before any computation. Nothing is recorded in history
/// when this is returned.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid input: {}", .issues.iter().map(|i| i.to_string()).collect::<Vec<_>>().join("; "))]
pub struct InvalidInput {
    pub issues: Vec<ValidationIssue>,
}

impl InvalidInput {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }
}

/// Failure of a remote collaborator call. Never surfaced through `predict()`;
/// the orchestrator recovers with the deterministic fallback and only logs it.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote call timed out after {0} s")]
    Timeout(u64),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("remote returned status {0}")]
    Status(u16),
}

impl RemoteError {
    /// Whether a retry could plausibly succeed. Decode failures and client
    /// errors are permanent for a given request; only timeouts, transport
    /// problems and server errors are worth another attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            RemoteError::Timeout(_) | RemoteError::Transport(_) => true,
            RemoteError::Status(code) => *code >= 500,
            RemoteError::Decode(_) => false,
        }
    }
}

/// Public error type of the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
