//! Module `mc::simulation`.
//!
//! Draws every factor of a [`RiskModel`] and combines the draws trial by trial:
//! `LEF[i] = TEF[i] * Vulnerability[i]`, `ALE[i] = LEF[i] * LossMagnitude[i]`.
//!
//! Factors are sampled independently; they are paired only by trial index. The model does not
//! encode dependence between frequency and magnitude.
//!
//! Numerical considerations: the run is sized by one integer. The random source is an explicit
//! generator, so a seeded [`SimulationEngine`] reproduces its output exactly and engines on
//! different threads never share state.
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::core::{ResultColumn, RiskError};
use crate::distributions::sample;
use crate::math::{SimulationRng, resolve_stream_seed};
use crate::model::RiskModel;

use super::SimulationConfig;

/// One simulated trial.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct SimulationRow {
    #[serde(rename = "TEF")]
    pub tef: f64,
    #[serde(rename = "Vulnerability")]
    pub vulnerability: f64,
    #[serde(rename = "LEF")]
    pub lef: f64,
    #[serde(rename = "LossMagnitude")]
    pub loss_magnitude: f64,
    #[serde(rename = "ALE")]
    pub ale: f64,
}

impl SimulationRow {
    pub fn value(&self, column: ResultColumn) -> f64 {
        match column {
            ResultColumn::Tef => self.tef,
            ResultColumn::Vulnerability => self.vulnerability,
            ResultColumn::Lef => self.lef,
            ResultColumn::LossMagnitude => self.loss_magnitude,
            ResultColumn::Ale => self.ale,
        }
    }
}

/// Column-oriented results table of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResults {
    tef: Vec<f64>,
    vulnerability: Vec<f64>,
    lef: Vec<f64>,
    loss_magnitude: Vec<f64>,
    ale: Vec<f64>,
}

impl SimulationResults {
    /// Builds a table from per-factor draws, deriving LEF and ALE.
    pub fn from_samples(
        tef: Vec<f64>,
        vulnerability: Vec<f64>,
        loss_magnitude: Vec<f64>,
    ) -> Result<Self, RiskError> {
        if tef.len() != vulnerability.len() || tef.len() != loss_magnitude.len() {
            return Err(RiskError::InvalidParameter(format!(
                "factor sample lengths differ: tef={}, vulnerability={}, loss_magnitude={}",
                tef.len(),
                vulnerability.len(),
                loss_magnitude.len()
            )));
        }

        let lef: Vec<f64> = tef
            .iter()
            .zip(&vulnerability)
            .map(|(t, v)| t * v)
            .collect();
        let ale: Vec<f64> = lef
            .iter()
            .zip(&loss_magnitude)
            .map(|(f, m)| f * m)
            .collect();

        Ok(Self {
            tef,
            vulnerability,
            lef,
            loss_magnitude,
            ale,
        })
    }

    pub fn len(&self) -> usize {
        self.ale.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ale.is_empty()
    }

    pub fn column(&self, column: ResultColumn) -> &[f64] {
        match column {
            ResultColumn::Tef => &self.tef,
            ResultColumn::Vulnerability => &self.vulnerability,
            ResultColumn::Lef => &self.lef,
            ResultColumn::LossMagnitude => &self.loss_magnitude,
            ResultColumn::Ale => &self.ale,
        }
    }

    pub fn tef(&self) -> &[f64] {
        &self.tef
    }

    pub fn vulnerability(&self) -> &[f64] {
        &self.vulnerability
    }

    pub fn lef(&self) -> &[f64] {
        &self.lef
    }

    pub fn loss_magnitude(&self) -> &[f64] {
        &self.loss_magnitude
    }

    pub fn ale(&self) -> &[f64] {
        &self.ale
    }

    pub fn row(&self, index: usize) -> Option<SimulationRow> {
        (index < self.len()).then(|| SimulationRow {
            tef: self.tef[index],
            vulnerability: self.vulnerability[index],
            lef: self.lef[index],
            loss_magnitude: self.loss_magnitude[index],
            ale: self.ale[index],
        })
    }

    /// Row-major iteration in trial order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = SimulationRow> + '_ {
        (0..self.len()).map(move |i| SimulationRow {
            tef: self.tef[i],
            vulnerability: self.vulnerability[i],
            lef: self.lef[i],
            loss_magnitude: self.loss_magnitude[i],
            ale: self.ale[i],
        })
    }
}

/// Runs `num_simulations` trials of `model` on `rng`.
///
/// Fails with [`RiskError::MissingParameter`] if any factor is unset; no partial table is
/// produced on failure.
pub fn run_simulation<R: Rng + ?Sized>(
    model: &RiskModel,
    num_simulations: usize,
    rng: &mut R,
) -> Result<SimulationResults, RiskError> {
    let factors = model.validate()?;
    if num_simulations == 0 {
        return Err(RiskError::InvalidParameter(
            "num_simulations must be >= 1".to_string(),
        ));
    }

    let tef = sample(factors.threat_event_frequency, num_simulations, rng)?;
    let vulnerability = sample(factors.vulnerability, num_simulations, rng)?;
    let loss_magnitude = sample(factors.loss_magnitude, num_simulations, rng)?;

    SimulationResults::from_samples(tef, vulnerability, loss_magnitude)
}

/// Seeded runner. Each run (or stream) gets its own generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationEngine {
    pub num_simulations: usize,
    pub seed: u64,
    pub reproducible: bool,
}

impl SimulationEngine {
    pub fn new(num_simulations: usize, seed: u64) -> Self {
        Self {
            num_simulations,
            seed,
            reproducible: true,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self, RiskError> {
        config.validate()?;
        Ok(match config.seed {
            Some(seed) => Self::new(config.num_simulations, seed),
            None => Self::new(config.num_simulations, 0).with_randomized_streams(),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.reproducible = true;
        self
    }

    pub fn with_randomized_streams(mut self) -> Self {
        self.reproducible = false;
        self
    }

    pub fn run(&self, model: &RiskModel) -> Result<SimulationResults, RiskError> {
        self.run_stream(model, 0)
    }

    /// Runs on stream `stream_index`; distinct indices give independent generators.
    pub fn run_stream(
        &self,
        model: &RiskModel,
        stream_index: usize,
    ) -> Result<SimulationResults, RiskError> {
        let stream_seed = resolve_stream_seed(self.seed, stream_index, self.reproducible);
        let mut rng = SimulationRng::seed_from_u64(stream_seed);
        debug!(
            model = %model.name,
            num_simulations = self.num_simulations,
            stream_seed,
            stream_index,
            reproducible = self.reproducible,
            "running simulation"
        );
        let results = run_simulation(model, self.num_simulations, &mut rng)?;
        debug!(model = %model.name, rows = results.len(), "simulation finished");
        Ok(results)
    }
}
