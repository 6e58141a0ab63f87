use crate::core::RiskError;

/// Run settings shared by the engine, the command-line runner and scenario files.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Trials per run.
    pub num_simulations: usize,
    /// Base seed; `None` draws a fresh seed per run.
    pub seed: Option<u64>,
    /// Confidence level reported as VaR.
    pub confidence_level: f64,
    /// Bins of the loss histogram.
    pub histogram_bins: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_simulations: 10_000,
            seed: None,
            confidence_level: 0.95,
            histogram_bins: 50,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), RiskError> {
        if self.num_simulations == 0 {
            return Err(RiskError::InvalidParameter(
                "num_simulations must be >= 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.confidence_level) {
            return Err(RiskError::InvalidParameter(format!(
                "confidence_level must be in [0,1], got {}",
                self.confidence_level
            )));
        }
        if self.histogram_bins == 0 {
            return Err(RiskError::InvalidParameter(
                "histogram_bins must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}
