//! Optional persistence collaborator: the prediction history serialized as
//! an ordered JSON list of records.

use std::path::Path;

use crate::error::EngineError;
use crate::models::prediction::PredictionRecord;

pub fn save_predictions(path: &Path, records: &[PredictionRecord]) -> Result<(), EngineError> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_predictions(path: &Path) -> Result<Vec<PredictionRecord>, EngineError> {
    let content = std::fs::read_to_string(path)?;
    let records = serde_json::from_str(&content)?;
    Ok(records)
}
