use std::fmt;

/// The three FAIR input factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    /// Threat actions per year.
    ThreatEventFrequency,
    /// Probability that a threat event becomes a loss event.
    Vulnerability,
    /// Monetary loss per loss event.
    LossMagnitude,
}

impl Factor {
    pub const ALL: [Factor; 3] = [
        Factor::ThreatEventFrequency,
        Factor::Vulnerability,
        Factor::LossMagnitude,
    ];

    /// Slot name used in error messages and model records.
    pub fn key(self) -> &'static str {
        match self {
            Self::ThreatEventFrequency => "threat_event_frequency",
            Self::Vulnerability => "vulnerability",
            Self::LossMagnitude => "loss_magnitude",
        }
    }

    /// Domain check for a `[min, max]` range of this factor.
    ///
    /// Vulnerability is a probability and must lie in `[0, 1]`; frequencies and losses only
    /// need a non-negative lower bound.
    pub fn check_bounds(self, min_value: f64, max_value: f64) -> Result<(), String> {
        match self {
            Self::Vulnerability => {
                if !(0.0..=1.0).contains(&min_value) {
                    return Err(format!(
                        "vulnerability minimum must be between 0 and 1, got {min_value}"
                    ));
                }
                if !(0.0..=1.0).contains(&max_value) {
                    return Err(format!(
                        "vulnerability maximum must be between 0 and 1, got {max_value}"
                    ));
                }
            }
            Self::ThreatEventFrequency | Self::LossMagnitude => {
                if min_value < 0.0 {
                    return Err(format!(
                        "{} minimum cannot be negative, got {min_value}",
                        self.key()
                    ));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Distribution family of one factor.
///
/// Serialized as a lowercase string. Unrecognized names are kept verbatim in
/// [`DistributionKind::Unknown`] and sampled as uniform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DistributionKind {
    Uniform,
    Triangular,
    Pert,
    /// `min`/`max` are read as the 5th/95th percentiles.
    Lognormal,
    Unknown(String),
}

impl DistributionKind {
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "uniform" => Self::Uniform,
            "triangular" => Self::Triangular,
            "pert" => Self::Pert,
            "lognormal" => Self::Lognormal,
            _ => Self::Unknown(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Uniform => "uniform",
            Self::Triangular => "triangular",
            Self::Pert => "pert",
            Self::Lognormal => "lognormal",
            Self::Unknown(name) => name,
        }
    }

    /// Whether the family needs a most-likely value.
    pub fn requires_mode(&self) -> bool {
        matches!(self, Self::Triangular | Self::Pert)
    }
}

impl Default for DistributionKind {
    fn default() -> Self {
        Self::Uniform
    }
}

impl From<String> for DistributionKind {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<DistributionKind> for String {
    fn from(kind: DistributionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Columns of a simulation results table, in export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ResultColumn {
    #[serde(rename = "TEF")]
    Tef,
    Vulnerability,
    #[serde(rename = "LEF")]
    Lef,
    LossMagnitude,
    #[serde(rename = "ALE")]
    Ale,
}

impl ResultColumn {
    pub const ALL: [ResultColumn; 5] = [
        ResultColumn::Tef,
        ResultColumn::Vulnerability,
        ResultColumn::Lef,
        ResultColumn::LossMagnitude,
        ResultColumn::Ale,
    ];

    /// Inputs ranked by sensitivity analysis.
    pub const INPUTS: [ResultColumn; 3] = [
        ResultColumn::Tef,
        ResultColumn::Vulnerability,
        ResultColumn::LossMagnitude,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Self::Tef => "TEF",
            Self::Vulnerability => "Vulnerability",
            Self::Lef => "LEF",
            Self::LossMagnitude => "LossMagnitude",
            Self::Ale => "ALE",
        }
    }
}

impl fmt::Display for ResultColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}
