//! FAIR parameterization of one named scenario.

use tracing::debug;

use crate::core::{Factor, RiskError};
use crate::distributions::{DistributionInput, DistributionSpec};

/// A named scenario with three optional factor slots.
///
/// Setters replace a slot wholesale. A simulation can only run once every slot is populated,
/// see [`RiskModel::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct RiskModel {
    pub name: String,
    pub description: String,
    threat_event_frequency: Option<DistributionSpec>,
    vulnerability: Option<DistributionSpec>,
    loss_magnitude: Option<DistributionSpec>,
}

/// Complete view of a validated model.
#[derive(Debug, Clone, Copy)]
pub struct ModelFactors<'a> {
    pub threat_event_frequency: &'a DistributionSpec,
    pub vulnerability: &'a DistributionSpec,
    pub loss_magnitude: &'a DistributionSpec,
}

impl RiskModel {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            threat_event_frequency: None,
            vulnerability: None,
            loss_magnitude: None,
        }
    }

    pub fn set_threat_event_frequency(&mut self, spec: DistributionSpec) -> &mut Self {
        self.threat_event_frequency = Some(spec);
        self
    }

    pub fn set_vulnerability(&mut self, spec: DistributionSpec) -> &mut Self {
        self.vulnerability = Some(spec);
        self
    }

    pub fn set_loss_magnitude(&mut self, spec: DistributionSpec) -> &mut Self {
        self.loss_magnitude = Some(spec);
        self
    }

    pub fn threat_event_frequency(&self) -> Option<&DistributionSpec> {
        self.threat_event_frequency.as_ref()
    }

    pub fn vulnerability(&self) -> Option<&DistributionSpec> {
        self.vulnerability.as_ref()
    }

    pub fn loss_magnitude(&self) -> Option<&DistributionSpec> {
        self.loss_magnitude.as_ref()
    }

    pub fn slot(&self, factor: Factor) -> Option<&DistributionSpec> {
        match factor {
            Factor::ThreatEventFrequency => self.threat_event_frequency(),
            Factor::Vulnerability => self.vulnerability(),
            Factor::LossMagnitude => self.loss_magnitude(),
        }
    }

    /// Factors whose slot is still empty, in FAIR order.
    pub fn missing_factors(&self) -> Vec<Factor> {
        Factor::ALL
            .into_iter()
            .filter(|&f| self.slot(f).is_none())
            .collect()
    }

    /// Succeeds only when all three slots hold a spec validated for that slot.
    pub fn validate(&self) -> Result<ModelFactors<'_>, RiskError> {
        let (Some(tef), Some(vuln), Some(lm)) = (
            &self.threat_event_frequency,
            &self.vulnerability,
            &self.loss_magnitude,
        ) else {
            let missing = self.missing_factors();
            debug!(model = %self.name, ?missing, "model validation failed");
            return Err(RiskError::MissingParameter(missing));
        };

        for (factor, spec) in Factor::ALL.into_iter().zip([tef, vuln, lm]) {
            if spec.factor() != factor {
                return Err(RiskError::InvalidParameter(format!(
                    "{factor} slot holds a spec validated for {}",
                    spec.factor()
                )));
            }
        }

        Ok(ModelFactors {
            threat_event_frequency: tef,
            vulnerability: vuln,
            loss_magnitude: lm,
        })
    }

    /// Record form, preserving every field including empty slots.
    pub fn to_record(&self) -> RiskModelRecord {
        RiskModelRecord {
            name: self.name.clone(),
            description: self.description.clone(),
            tef: self.threat_event_frequency.as_ref().map(DistributionSpec::to_input),
            vulnerability: self.vulnerability.as_ref().map(DistributionSpec::to_input),
            loss_magnitude: self.loss_magnitude.as_ref().map(DistributionSpec::to_input),
        }
    }

    /// Rebuilds a model, re-validating every populated slot.
    pub fn from_record(record: RiskModelRecord) -> Result<Self, RiskError> {
        let mut model = Self::new(record.name, record.description);
        if let Some(input) = record.tef {
            model.set_threat_event_frequency(input.resolve(Factor::ThreatEventFrequency)?);
        }
        if let Some(input) = record.vulnerability {
            model.set_vulnerability(input.resolve(Factor::Vulnerability)?);
        }
        if let Some(input) = record.loss_magnitude {
            model.set_loss_magnitude(input.resolve(Factor::LossMagnitude)?);
        }
        Ok(model)
    }
}

/// Plain key-value form of a [`RiskModel`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RiskModelRecord {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tef: Option<DistributionInput>,
    #[serde(default)]
    pub vulnerability: Option<DistributionInput>,
    #[serde(default)]
    pub loss_magnitude: Option<DistributionInput>,
}
