//! Single-scenario walkthrough: build a model, simulate, and read the loss distribution.

use openfair::core::DistributionKind;
use openfair::distributions::{DistributionSpec, LognormalFit};
use openfair::mc::SimulationEngine;
use openfair::model::RiskModel;
use openfair::risk::{
    LossExceedanceCurve, percentile_markers, sensitivity_analysis, summary, value_at_risk,
};

fn main() {
    let mut model = RiskModel::new(
        "Ransomware Attack",
        "A ransomware attack causing business disruption",
    );
    model
        .set_threat_event_frequency(
            DistributionSpec::threat_event_frequency(0.1, 1.0, Some(0.3), DistributionKind::Triangular)
                .unwrap(),
        )
        .set_vulnerability(
            DistributionSpec::vulnerability(0.3, 0.8, Some(0.5), DistributionKind::Triangular)
                .unwrap(),
        )
        .set_loss_magnitude(
            DistributionSpec::loss_magnitude(50_000.0, 5_000_000.0, None, DistributionKind::Lognormal)
                .unwrap(),
        );

    // 1. Lognormal loss fitted so that 50k / 5M are its 5th / 95th percentiles
    let fit = LognormalFit::from_percentiles(50_000.0, 5_000_000.0);
    println!(
        "Loss magnitude fit: mu = {:.4}, sigma = {:.4}, median = {:.0}",
        fit.mu,
        fit.sigma,
        fit.median()
    );

    // 2. Simulate ten thousand years
    let results = SimulationEngine::new(10_000, 42).run(&model).unwrap();
    let stats = summary(&results).unwrap();
    println!("\nALE mean   = {:>14.2}", stats.ale.mean);
    println!("ALE median = {:>14.2}", stats.ale.median);
    println!("VaR 95%    = {:>14.2}", value_at_risk(&results, 0.95).unwrap());

    // 3. Percentiles and exceedance
    for (p, loss) in percentile_markers(&results).unwrap() {
        println!("  p{:<3.0} {loss:>14.2}", p * 100.0);
    }
    let curve = LossExceedanceCurve::from_results(&results).unwrap();
    println!(
        "\nP(ALE > 1,000,000) = {:.1}%",
        curve.probability_of_exceeding(1_000_000.0) * 100.0
    );

    // 4. Which input drives the loss?
    println!("\nSensitivity:");
    for s in sensitivity_analysis(&results).unwrap() {
        println!("  {:<14} {:+.3}", s.input.header(), s.correlation);
    }
}
