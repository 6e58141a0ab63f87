//! Validated distribution inputs for the three FAIR factors.
//!
//! Construction is two-stage: a raw [`DistributionInput`] (nullable `most_likely`, exactly as a
//! caller or record supplies it) is resolved against a [`Factor`] into an immutable
//! [`DistributionSpec`]. Resolution enforces the factor's domain bounds and fills the
//! most-likely value with the range midpoint for triangular and PERT inputs that omit it.
//! Editing a spec means building a new input and resolving it again.

pub mod sampler;

pub use sampler::{LognormalFit, PertShape, Z_95, sample};

use crate::core::{DistributionKind, Factor, RiskError};

/// Raw, unvalidated parameters for one factor. This is also the record form of a spec.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DistributionInput {
    pub min_value: f64,
    pub max_value: f64,
    #[serde(default)]
    pub most_likely: Option<f64>,
    #[serde(rename = "distribution", default)]
    pub kind: DistributionKind,
}

impl DistributionInput {
    pub fn new(min_value: f64, max_value: f64, kind: DistributionKind) -> Self {
        Self {
            min_value,
            max_value,
            most_likely: None,
            kind,
        }
    }

    pub fn with_most_likely(mut self, most_likely: f64) -> Self {
        self.most_likely = Some(most_likely);
        self
    }

    /// Validates against `factor` and produces the immutable spec.
    pub fn resolve(self, factor: Factor) -> Result<DistributionSpec, RiskError> {
        let Self {
            min_value,
            max_value,
            most_likely,
            kind,
        } = self;

        if !min_value.is_finite() || !max_value.is_finite() {
            return Err(RiskError::InvalidParameter(format!(
                "{factor} bounds must be finite, got [{min_value}, {max_value}]"
            )));
        }
        factor
            .check_bounds(min_value, max_value)
            .map_err(RiskError::InvalidParameter)?;
        if max_value < min_value {
            return Err(RiskError::InvalidParameter(format!(
                "{factor} maximum ({max_value}) must not be below minimum ({min_value})"
            )));
        }

        let most_likely = match most_likely {
            Some(ml) if !ml.is_finite() => {
                return Err(RiskError::InvalidParameter(format!(
                    "{factor} most likely value must be finite, got {ml}"
                )));
            }
            None if kind.requires_mode() => Some(0.5 * (min_value + max_value)),
            other => other,
        };

        if let Some(ml) = most_likely.filter(|_| kind.requires_mode()) {
            if !(min_value..=max_value).contains(&ml) {
                return Err(RiskError::InvalidParameter(format!(
                    "{factor} most likely value {ml} must lie in [{min_value}, {max_value}] for {kind}"
                )));
            }
        }

        if kind == DistributionKind::Lognormal && min_value <= 0.0 {
            return Err(RiskError::InvalidParameter(format!(
                "{factor} lognormal percentiles must be positive, got minimum {min_value}"
            )));
        }

        Ok(DistributionSpec {
            factor,
            min_value,
            max_value,
            most_likely,
            kind,
        })
    }
}

/// Immutable, validated parameters of one factor.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionSpec {
    factor: Factor,
    min_value: f64,
    max_value: f64,
    most_likely: Option<f64>,
    kind: DistributionKind,
}

impl DistributionSpec {
    pub fn new(
        factor: Factor,
        min_value: f64,
        max_value: f64,
        most_likely: Option<f64>,
        kind: DistributionKind,
    ) -> Result<Self, RiskError> {
        DistributionInput {
            min_value,
            max_value,
            most_likely,
            kind,
        }
        .resolve(factor)
    }

    pub fn threat_event_frequency(
        min_value: f64,
        max_value: f64,
        most_likely: Option<f64>,
        kind: DistributionKind,
    ) -> Result<Self, RiskError> {
        Self::new(
            Factor::ThreatEventFrequency,
            min_value,
            max_value,
            most_likely,
            kind,
        )
    }

    pub fn vulnerability(
        min_value: f64,
        max_value: f64,
        most_likely: Option<f64>,
        kind: DistributionKind,
    ) -> Result<Self, RiskError> {
        Self::new(Factor::Vulnerability, min_value, max_value, most_likely, kind)
    }

    pub fn loss_magnitude(
        min_value: f64,
        max_value: f64,
        most_likely: Option<f64>,
        kind: DistributionKind,
    ) -> Result<Self, RiskError> {
        Self::new(Factor::LossMagnitude, min_value, max_value, most_likely, kind)
    }

    /// Factor the spec was validated for.
    pub fn factor(&self) -> Factor {
        self.factor
    }

    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// Most-likely value as stored (defaulted for triangular/PERT, as given otherwise).
    pub fn most_likely(&self) -> Option<f64> {
        self.most_likely
    }

    pub fn kind(&self) -> &DistributionKind {
        &self.kind
    }

    /// Mode used by shape-requiring families. Always the stored value for triangular and
    /// PERT specs; the midpoint for other families without one.
    pub fn mode(&self) -> f64 {
        self.most_likely
            .unwrap_or(0.5 * (self.min_value + self.max_value))
    }

    pub fn range(&self) -> f64 {
        self.max_value - self.min_value
    }

    /// Record form, preserving every field verbatim.
    pub fn to_input(&self) -> DistributionInput {
        DistributionInput {
            min_value: self.min_value,
            max_value: self.max_value,
            most_likely: self.most_likely,
            kind: self.kind.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangular_and_pert_default_mode_to_midpoint() {
        let tri = DistributionSpec::threat_event_frequency(1.0, 3.0, None, DistributionKind::Triangular)
            .unwrap();
        assert_eq!(tri.most_likely(), Some(2.0));

        let pert = DistributionSpec::loss_magnitude(100.0, 300.0, None, DistributionKind::Pert).unwrap();
        assert_eq!(pert.most_likely(), Some(200.0));
    }

    #[test]
    fn uniform_keeps_absent_mode_absent() {
        let spec = DistributionSpec::vulnerability(0.2, 0.6, None, DistributionKind::Uniform).unwrap();
        assert_eq!(spec.most_likely(), None);
        assert_eq!(spec.to_input().most_likely, None);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = DistributionSpec::threat_event_frequency(3.0, 1.0, None, DistributionKind::Uniform)
            .unwrap_err();
        assert!(matches!(err, RiskError::InvalidParameter(_)));
    }

    #[test]
    fn domain_bounds_are_enforced_per_factor() {
        assert!(DistributionSpec::vulnerability(0.5, 1.2, None, DistributionKind::Uniform).is_err());
        assert!(DistributionSpec::vulnerability(-0.1, 0.5, None, DistributionKind::Uniform).is_err());
        assert!(
            DistributionSpec::threat_event_frequency(-1.0, 2.0, None, DistributionKind::Uniform)
                .is_err()
        );
        assert!(DistributionSpec::loss_magnitude(-5.0, 10.0, None, DistributionKind::Uniform).is_err());
        // Frequencies above one per year are legitimate.
        assert!(
            DistributionSpec::threat_event_frequency(2.0, 50.0, None, DistributionKind::Uniform)
                .is_ok()
        );
    }

    #[test]
    fn mode_outside_range_is_rejected_for_shaped_kinds() {
        assert!(
            DistributionSpec::loss_magnitude(10.0, 20.0, Some(25.0), DistributionKind::Triangular)
                .is_err()
        );
        assert!(DistributionSpec::loss_magnitude(10.0, 20.0, Some(5.0), DistributionKind::Pert).is_err());
        // Uniform ignores the mode, so it is carried without a range check.
        assert!(
            DistributionSpec::loss_magnitude(10.0, 20.0, Some(25.0), DistributionKind::Uniform).is_ok()
        );
    }

    #[test]
    fn lognormal_requires_positive_percentiles() {
        assert!(DistributionSpec::loss_magnitude(0.0, 100.0, None, DistributionKind::Lognormal).is_err());
        assert!(DistributionSpec::loss_magnitude(1.0, 100.0, None, DistributionKind::Lognormal).is_ok());
    }

    #[test]
    fn non_finite_inputs_are_rejected() {
        assert!(
            DistributionSpec::loss_magnitude(0.0, f64::INFINITY, None, DistributionKind::Uniform)
                .is_err()
        );
        assert!(
            DistributionSpec::loss_magnitude(0.0, 1.0, Some(f64::NAN), DistributionKind::Uniform)
                .is_err()
        );
    }

    #[test]
    fn input_record_uses_distribution_key() {
        let input = DistributionInput::new(0.5, 3.0, DistributionKind::Triangular).with_most_likely(1.0);
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["distribution"], "triangular");
        assert_eq!(json["most_likely"], 1.0);

        let uniform = DistributionInput::new(0.5, 3.0, DistributionKind::Uniform);
        let json = serde_json::to_value(&uniform).unwrap();
        assert!(json["most_likely"].is_null());
    }
}
