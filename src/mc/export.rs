//! Delimited-text export of a results table.

use std::io::Write;

use crate::core::{ResultColumn, RiskError};

use super::SimulationResults;

/// Writes a header line (`TEF,Vulnerability,LEF,LossMagnitude,ALE` for a comma) followed by
/// one line per trial.
pub fn write_delimited<W: Write>(
    results: &SimulationResults,
    delimiter: char,
    mut out: W,
) -> Result<(), RiskError> {
    let sep = delimiter.to_string();
    let header = ResultColumn::ALL
        .iter()
        .map(|c| c.header())
        .collect::<Vec<_>>()
        .join(&sep);
    writeln!(out, "{header}")?;

    for row in results.rows() {
        let line = ResultColumn::ALL
            .iter()
            .map(|&c| row.value(c).to_string())
            .collect::<Vec<_>>()
            .join(&sep);
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}
