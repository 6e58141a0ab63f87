//! Plain-record forms of risk models and scenario files.
//!
//! These types define stable serde payloads used to persist and transport scenario
//! definitions. Field names follow the flat key-value layout callers already exchange:
//! `tef`, `vulnerability`, `loss_magnitude`, each holding `min_value`, `max_value`,
//! `most_likely` (nullable) and `distribution`.
//!
//! # Examples
//! ```rust
//! use openfair::core::{DistributionKind, from_json, to_json_pretty};
//! use openfair::distributions::DistributionSpec;
//! use openfair::model::{RiskModel, RiskModelRecord};
//!
//! let mut model = RiskModel::new("DDoS", "Service disruption");
//! model.set_threat_event_frequency(
//!     DistributionSpec::threat_event_frequency(1.0, 10.0, None, DistributionKind::Uniform).unwrap(),
//! );
//!
//! let json = to_json_pretty(&model.to_record()).expect("json serialization");
//! let record: RiskModelRecord = from_json(&json).expect("json deserialization");
//! assert_eq!(RiskModel::from_record(record).unwrap(), model);
//! ```

use serde::de::DeserializeOwned;

use crate::core::RiskError;
use crate::mc::SimulationConfig;
use crate::model::RiskModelRecord;

/// Scenario file consumed by the command-line runner.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScenarioFile {
    pub model: RiskModelRecord,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl ScenarioFile {
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, RiskError> {
        let payload = std::fs::read_to_string(path)?;
        from_json(&payload)
    }
}

/// Serialize a value to pretty JSON.
pub fn to_json_pretty<T: serde::Serialize>(value: &T) -> Result<String, RiskError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Deserialize a value from JSON.
pub fn from_json<T: DeserializeOwned>(payload: &str) -> Result<T, RiskError> {
    Ok(serde_json::from_str(payload)?)
}
