//! Command-line runner for FAIR scenario files.
//!
//! Usage:
//!   fair_sim --scenario <FILE> [OPTIONS]
//!
//! Options:
//!   --simulations <N>   Override the trial count from the scenario file
//!   --seed <SEED>       Override the base seed
//!   --confidence <C>    Override the VaR confidence level
//!   --format <FMT>      Output format: text, json (default: text)
//!   --csv <FILE>        Write the results table as CSV
//!
//! Example:
//!   fair_sim --scenario demos/data/data_breach.json --seed 42 --csv breach.csv

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use openfair::core::ScenarioFile;
use openfair::mc::{SimulationEngine, write_delimited};
use openfair::model::RiskModel;
use openfair::risk::{
    LossExceedanceCurve, Sensitivity, SummaryStatistics, histogram, sensitivity_analysis, summary,
    value_at_risk,
};

type AppResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "fair_sim")]
#[command(version, about = "Run a FAIR Monte Carlo simulation from a scenario file")]
struct Cli {
    /// Scenario JSON file (`model` plus optional `simulation` section)
    #[arg(short, long)]
    scenario: PathBuf,

    /// Number of simulated years
    #[arg(short = 'n', long)]
    simulations: Option<usize>,

    /// Base seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// VaR confidence level in [0, 1]
    #[arg(short, long)]
    confidence: Option<f64>,

    /// Output format: text, json
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Export the results table as CSV
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(serde::Serialize)]
struct Report<'a> {
    scenario: &'a str,
    num_simulations: usize,
    confidence_level: f64,
    value_at_risk: f64,
    summary: SummaryStatistics,
    sensitivities: Vec<Sensitivity>,
    exceedance: Vec<(f64, f64)>,
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ScenarioFile {
        model: record,
        simulation: mut config,
    } = ScenarioFile::from_path(&cli.scenario)?;
    if let Some(n) = cli.simulations {
        config.num_simulations = n;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(c) = cli.confidence {
        config.confidence_level = c;
    }

    let model = RiskModel::from_record(record)?;
    let engine = SimulationEngine::from_config(&config)?;
    info!(scenario = %model.name, num_simulations = config.num_simulations, "simulating");
    let results = engine.run(&model)?;

    if let Some(path) = &cli.csv {
        write_delimited(&results, ',', BufWriter::new(File::create(path)?))?;
        info!(path = %path.display(), rows = results.len(), "results exported");
    }

    let report = Report {
        scenario: &model.name,
        num_simulations: results.len(),
        confidence_level: config.confidence_level,
        value_at_risk: value_at_risk(&results, config.confidence_level)?,
        summary: summary(&results)?,
        sensitivities: sensitivity_analysis(&results)?,
        exceedance: LossExceedanceCurve::from_results(&results)?.key_points(),
    };

    match cli.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "text" => {
            let bins = histogram(results.ale(), config.histogram_bins)?;
            let modal = bins.iter().max_by_key(|b| b.count);
            print_text(&report);
            if let Some(bin) = modal {
                println!(
                    "Most frequent ALE band: {:.0} .. {:.0} ({} of {} years)",
                    bin.lower,
                    bin.upper,
                    bin.count,
                    results.len()
                );
            }
        }
        other => return Err(format!("unknown format '{other}', expected text or json").into()),
    }
    Ok(())
}

fn print_text(report: &Report<'_>) {
    let ale = &report.summary.ale;
    println!("Scenario: {}", report.scenario);
    println!("Simulated years: {}", report.num_simulations);
    println!();
    println!("Annualized Loss Expectancy");
    println!("  mean     {:>16.2}", ale.mean);
    println!("  median   {:>16.2}", ale.median);
    println!("  std dev  {:>16.2}", ale.std_dev);
    println!("  min      {:>16.2}", ale.min);
    println!("  p10      {:>16.2}", ale.percentile_10);
    println!("  p90      {:>16.2}", ale.percentile_90);
    println!("  p99      {:>16.2}", ale.percentile_99);
    println!("  max      {:>16.2}", ale.max);
    println!(
        "  VaR {:>4.1}% {:>15.2}",
        report.confidence_level * 100.0,
        report.value_at_risk
    );
    println!();
    println!(
        "Loss Event Frequency: mean {:.3}, median {:.3}",
        report.summary.lef.mean, report.summary.lef.median
    );
    println!(
        "Loss Magnitude:       mean {:.2}, median {:.2}",
        report.summary.loss_magnitude.mean, report.summary.loss_magnitude.median
    );
    println!();
    println!("Sensitivity (correlation with ALE)");
    for s in &report.sensitivities {
        println!("  {:<14} {:>+.3}", s.input.header(), s.correlation);
    }
    println!();
    println!("Loss exceedance");
    for (p, loss) in &report.exceedance {
        println!("  P(ALE > {:.0}) ~ {:.0}%", loss, p * 100.0);
    }
}
