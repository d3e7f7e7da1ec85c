//! Product table loading.
//!
//! Required columns: `代码`, `批发价`, `卷烟名称`, `类`, `需求`, `可用货源`,
//! plus one column per round label. Optional: `条支比` (default 200),
//! `C`, `C类`, `按需`, `按价`, `品牌`. Numeric columns get NaN→0 coercion
//! (spec §6), matching the `gat-io::validate` pattern of reading a table
//! with `polars::prelude::CsvReader` and checking column presence before
//! handing rows to the domain layer.

use alloc_core::product::{ProductRecord, DEFAULT_STICKS_PER_BUNDLE};
use alloc_core::{CigError, Round};
use anyhow::{Context, Result};
use polars::prelude::{CsvReader, DataFrame, DataType, SerReader};
use std::collections::HashMap;
use std::path::Path;

const REQUIRED_COLUMNS: &[&str] = &["代码", "批发价", "卷烟名称", "类", "需求", "可用货源"];

/// Load the product table from a CSV file.
///
/// `rounds` supplies the set of round labels the caller expects to find as
/// existing-allocation columns; a round label missing from the table is
/// treated as "no fixed cells for that round", not an error — only the
/// round-constraint table is required to cover every round (spec §4.1).
pub fn load_product_table(path: &Path, rounds: &[Round]) -> Result<Vec<ProductRecord>, CigError> {
    let df = CsvReader::from_path(path)
        .map_err(|e| CigError::Config(format!("reading product table: {e}")))?
        .has_header(true)
        .finish()
        .map_err(|e| CigError::Config(format!("parsing product table: {e}")))?;

    for column in REQUIRED_COLUMNS {
        if df.column(column).is_err() {
            return Err(CigError::Config(format!(
                "product table missing required column '{column}'"
            )));
        }
    }

    parse_product_rows(&df, rounds).map_err(|e| CigError::Config(e.to_string()))
}

fn parse_product_rows(df: &DataFrame, rounds: &[Round]) -> Result<Vec<ProductRecord>> {
    let n = df.height();
    let code = string_column(df, "代码")?;
    let name = string_column(df, "卷烟名称")?;
    let category = string_column(df, "类")?;
    let brand = optional_string_column(df, "品牌", n)?;
    let wholesale_price = numeric_column(df, "批发价")?;
    let sticks_per_bundle = optional_numeric_column(df, "条支比", n, DEFAULT_STICKS_PER_BUNDLE)?;
    let demand = numeric_column(df, "需求")?;
    let available_supply = numeric_column(df, "可用货源")?;
    let c_flag = optional_string_column(df, "C", n)?;
    let c_subtype_raw = optional_string_column(df, "C类", n)?;
    let demand_tag = optional_string_column(df, "按需", n)?;
    let price_tag = optional_string_column(df, "按价", n)?;

    let mut round_columns: HashMap<&str, Vec<f64>> = HashMap::new();
    for round in rounds {
        if df.column(round.label()).is_ok() {
            round_columns.insert(round.label(), numeric_column(df, round.label())?);
        }
    }

    let mut records = Vec::with_capacity(n);
    for i in 0..n {
        let mut existing_allocations = HashMap::new();
        for round in rounds {
            if let Some(values) = round_columns.get(round.label()) {
                existing_allocations.insert(round.label().to_string(), values[i]);
            }
        }
        records.push(ProductRecord {
            code: code[i].clone(),
            name: name[i].clone(),
            category: category[i].clone(),
            brand: brand[i].clone(),
            wholesale_price: wholesale_price[i],
            sticks_per_bundle: sticks_per_bundle[i],
            demand: demand[i],
            available_supply: available_supply[i],
            c_flag: c_flag[i].clone(),
            c_subtype_raw: c_subtype_raw[i].clone(),
            demand_tag: demand_tag[i].clone(),
            price_tag: price_tag[i].clone(),
            existing_allocations,
        });
    }
    Ok(records)
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

fn optional_numeric_column(df: &DataFrame, name: &str, n: usize, default: f64) -> Result<Vec<f64>> {
    match df.column(name) {
        Ok(_) => Ok(numeric_column(df, name)?
            .into_iter()
            .map(|v| if v > 0.0 { v } else { default })
            .collect()),
        Err(_) => Ok(vec![default; n]),
    }
}

fn string_column(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let series = df
        .column(name)
        .with_context(|| format!("column '{name}' missing"))?;
    let ca = series.utf8().with_context(|| format!("column '{name}' is not text"))?;
    Ok(ca.into_iter().map(|v| v.unwrap_or("").to_string()).collect())
}

fn optional_string_column(df: &DataFrame, name: &str, n: usize) -> Result<Vec<String>> {
    match df.column(name) {
        Ok(_) => string_column(df, name),
        Err(_) => Ok(vec![String::new(); n]),
    }
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
    fn loads_minimal_product_row() {
        let csv = "代码,批发价,卷烟名称,类,需求,可用货源,第一轮\nA001,200,示例,一类,100,100,40\n";
        let f = write_csv(csv);
        let rounds = vec![Round::parse("第一轮").unwrap()];
        let products = load_product_table(f.path(), &rounds).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].code, "A001");
        assert_eq!(products[0].sticks_per_bundle, DEFAULT_STICKS_PER_BUNDLE);
        assert_eq!(
            products[0].existing_allocations.get("第一轮"),
            Some(&40.0)
        );
    }

    #[test]
    fn missing_required_column_is_config_error() {
        let csv = "代码,批发价\nA001,200\n";
        let f = write_csv(csv);
        let err = load_product_table(f.path(), &[]).unwrap_err();
        assert!(matches!(err, CigError::Config(_)));
    }

    #[test]
    fn round_missing_from_table_defaults_to_no_fixed_cells() {
        let csv = "代码,批发价,卷烟名称,类,需求,可用货源\nA001,200,示例,一类,100,100\n";
        let f = write_csv(csv);
        let rounds = vec![Round::parse("第一轮").unwrap()];
        let products = load_product_table(f.path(), &rounds).unwrap();
        assert_eq!(products[0].existing_allocations.get("第一轮"), None);
    }
}
