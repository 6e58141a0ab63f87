//! OpenFAIR is a Monte Carlo engine for quantifying cyber risk in monetary terms using the
//! FAIR (Factor Analysis of Information Risk) decomposition.
//!
//! A scenario is described by three uncertain factors:
//! - Threat Event Frequency (TEF): threat actions per year,
//! - Vulnerability: probability that a threat event becomes a loss event,
//! - Loss Magnitude: monetary loss per loss event.
//!
//! Each factor is a [`distributions::DistributionSpec`] (uniform, triangular, PERT or
//! lognormal). The engine samples all three, propagates them through
//! `LEF = TEF * Vulnerability` and `ALE = LEF * LossMagnitude`, and the `risk` module reduces the
//! resulting table to summary statistics, Value-at-Risk, sensitivities and loss-exceedance data.
//!
//! References:
//! - Freund and Jones, *Measuring and Managing Information Risk: A FAIR Approach* (2014).
//! - The Open Group, *Risk Taxonomy (O-RT)* and *Risk Analysis (O-RA)* standards.
//! - Vose, *Risk Analysis: A Quantitative Guide* (3rd ed.), Ch. 9 for PERT/Beta fitting.
//!
//! Numerical considerations:
//! - Runs are sized by one integer; empirical tail statistics (p99, VaR at high confidence)
//!   are sample-size sensitive.
//! - Random sources are explicit and seedable. A seeded engine is fully reproducible; an
//!   unseeded one draws a fresh seed from the thread RNG per run.
//!
//! # Feature Flags
//! - `parallel`: runs the scenarios of a comparison on the Rayon pool.
//!
//! # Quick Start
//! ```rust
//! use openfair::core::DistributionKind;
//! use openfair::distributions::DistributionSpec;
//! use openfair::mc::SimulationEngine;
//! use openfair::model::RiskModel;
//! use openfair::risk::{summary, value_at_risk};
//!
//! let mut model = RiskModel::new("Data Breach", "Unauthorized access to customer data");
//! model.set_threat_event_frequency(
//!     DistributionSpec::threat_event_frequency(0.5, 3.0, Some(1.0), DistributionKind::Triangular)
//!         .unwrap(),
//! );
//! model.set_vulnerability(
//!     DistributionSpec::vulnerability(0.2, 0.6, Some(0.3), DistributionKind::Triangular).unwrap(),
//! );
//! model.set_loss_magnitude(
//!     DistributionSpec::loss_magnitude(100_000.0, 2_000_000.0, Some(500_000.0), DistributionKind::Pert)
//!         .unwrap(),
//! );
//!
//! let results = SimulationEngine::new(10_000, 42).run(&model).unwrap();
//! let stats = summary(&results).unwrap();
//! let var_95 = value_at_risk(&results, 0.95).unwrap();
//! assert!(stats.ale.mean > 0.0);
//! assert!(var_95 >= stats.ale.median);
//! ```

pub mod core;
pub mod distributions;
pub mod math;
pub mod mc;
pub mod model;
pub mod risk;
