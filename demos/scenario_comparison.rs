//! Ranks the bundled sample scenarios by expected annual loss.
//!
//! Usage:
//!   cargo run --example scenario_comparison
//!   cargo run --example scenario_comparison --features parallel

use openfair::core::ScenarioFile;
use openfair::mc::SimulationEngine;
use openfair::model::RiskModel;
use openfair::risk::compare_scenarios;

const SCENARIOS: [&str; 5] = [
    "data_breach",
    "ransomware",
    "ddos",
    "insider_threat",
    "cloud_outage",
];

fn main() {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/data");
    let models: Vec<RiskModel> = SCENARIOS
        .iter()
        .map(|name| {
            let file = ScenarioFile::from_path(format!("{dir}/{name}.json")).unwrap();
            RiskModel::from_record(file.model).unwrap()
        })
        .collect();

    let engine = SimulationEngine::new(20_000, 2024);
    let comparison = compare_scenarios(&models, &engine).unwrap();

    println!(
        "{:<24} {:>14} {:>14} {:>14} {:>8} {:>14}",
        "Scenario", "mean ALE", "median ALE", "p95 ALE", "LEF", "mean LM"
    );
    for row in &comparison.rows {
        println!(
            "{:<24} {:>14.0} {:>14.0} {:>14.0} {:>8.3} {:>14.0}",
            row.name, row.mean_ale, row.median_ale, row.p95_ale, row.mean_lef, row.mean_loss_magnitude
        );
    }

    if let (Some(low), Some(high)) = (comparison.lowest_risk(), comparison.highest_risk()) {
        println!("\nLowest risk:  {}", low.name);
        println!("Highest risk: {}", high.name);
    }
}
