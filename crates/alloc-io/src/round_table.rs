//! Round-constraint table loading.
//!
//! The table is row-indexed rather than row-per-record: one row per
//! metric (`单箱均价上限`, `单箱均价下限`, `总量`), with one column per
//! round label. The index column is named `指标`.

use alloc_core::facade::RoundConstraintRaw;
use alloc_core::{round::canonical_rounds, CigError, Round};
use anyhow::{Context, Result};
use polars::prelude::{CsvReader, DataFrame, DataType, SerReader};
use std::collections::HashMap;
use std::path::Path;

const INDEX_COLUMN: &str = "指标";
const ROW_PRICE_UPPER: &str = "单箱均价上限";
const ROW_PRICE_LOWER: &str = "单箱均价下限";
const ROW_VOLUME_TARGET: &str = "总量";

/// Load the round-constraint table, returning the rounds it covers (in
/// canonical order) and each round's table-sourced parameters.
pub fn load_round_constraints(
    path: &Path,
) -> Result<(Vec<Round>, HashMap<String, RoundConstraintRaw>), CigError> {
    let df = CsvReader::from_path(path)
        .map_err(|e| CigError::Config(format!("reading round-constraint table: {e}")))?
        .has_header(true)
        .finish()
        .map_err(|e| CigError::Config(format!("parsing round-constraint table: {e}")))?;

    parse_round_table(&df).map_err(|e| CigError::Config(e.to_string()))
}

fn parse_round_table(df: &DataFrame) -> Result<(Vec<Round>, HashMap<String, RoundConstraintRaw>)> {
    let index = df
        .column(INDEX_COLUMN)
        .with_context(|| format!("round-constraint table missing index column '{INDEX_COLUMN}'"))?
        .utf8()
        .context("index column is not text")?;
    let index: Vec<String> = index.into_iter().map(|v| v.unwrap_or("").to_string()).collect();

    let round_labels: Vec<String> = df
        .get_column_names()
        .into_iter()
        .filter(|c| *c != INDEX_COLUMN)
        .map(|c| c.to_string())
        .collect();
    let rounds = canonical_rounds(round_labels.iter())
        .map_err(|e| anyhow::anyhow!("round-constraint table: {e}"))?;

    let row_index_of = |label: &str| -> Result<usize> {
        index
            .iter()
            .position(|v| v == label)
            .with_context(|| format!("round-constraint table missing row '{label}'"))
    };
    let price_upper_row = row_index_of(ROW_PRICE_UPPER)?;
    let price_lower_row = row_index_of(ROW_PRICE_LOWER)?;
    let volume_target_row = row_index_of(ROW_VOLUME_TARGET)?;

    let mut out = HashMap::new();
    for round in &rounds {
        let column = numeric_column(df, round.label())?;
        out.insert(
            round.label().to_string(),
            RoundConstraintRaw {
                price_upper: column[price_upper_row],
                price_lower: column[price_lower_row],
                volume_target: column[volume_target_row],
            },
        );
    }
    Ok((rounds, out))
}

fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = df
        .column(name)
        .with_context(|| format!("column '{name}' missing"))?
        .cast(&DataType::Float64)
        .with_context(|| format!("column '{name}' is not numeric"))?;
    let ca = series.f64()?;
    Ok(ca
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()).unwrap_or(0.0))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_rounds_in_canonical_order_regardless_of_column_order() {
        let csv = "指标,第二轮,第一轮\n单箱均价上限,50100,50050\n单箱均价下限,49900,49950\n总量,200,100\n";
        let f = write_csv(csv);
        let (rounds, constraints) = load_round_constraints(f.path()).unwrap();
        let labels: Vec<_> = rounds.iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["第一轮", "第二轮"]);
        assert_eq!(constraints["第一轮"].volume_target, 100.0);
        assert_eq!(constraints["第二轮"].volume_target, 200.0);
    }

    #[test]
    fn missing_metric_row_is_config_error() {
        let csv = "指标,第一轮\n单箱均价上限,50050\n";
        let f = write_csv(csv);
        let err = load_round_constraints(f.path()).unwrap_err();
        assert!(matches!(err, CigError::Config(_)));
    }
}
