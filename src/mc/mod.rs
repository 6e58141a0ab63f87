//! Monte Carlo propagation of a risk model through the FAIR arithmetic.

pub mod config;
pub mod export;
pub mod simulation;

pub use config::SimulationConfig;
pub use export::write_delimited;
pub use simulation::{SimulationEngine, SimulationResults, SimulationRow, run_simulation};
