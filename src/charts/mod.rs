// Chart derivation for tabular content.
//
// Up to the first 3 columns of the first row are charted. A column is numeric
// when it has at least one non-null value and every one of them converts to a
// number; numeric columns get a histogram plus summary statistics, everything
// else gets a bar chart of value occurrence counts. A column with zero
// non-null values is categorical by definition, so the statistics never see
// an empty value set.

pub mod render;

use indexmap::IndexMap;
use serde_json::Value;

use crate::types::Row;

/// At most this many columns are charted, in first-row order.
pub const MAX_CHART_COLUMNS: usize = 3;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "chart", rename_all = "snake_case")]
pub enum ColumnChart {
    Histogram {
        column: String,
        values: Vec<f64>,
        stats: ColumnStats,
    },
    Bar {
        column: String,
        counts: IndexMap<String, u64>,
    },
}

impl ColumnChart {
    pub fn column(&self) -> &str {
        match self {
            ColumnChart::Histogram { column, .. } | ColumnChart::Bar { column, .. } => column,
        }
    }
}

/// Derive chart descriptors from tabular content. Pure: identical input rows
/// always produce identical descriptors.
pub fn derive_charts(rows: &[Row]) -> Vec<ColumnChart> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };

    first
        .keys()
        .take(MAX_CHART_COLUMNS)
        .map(|column| derive_column(column, rows))
        .collect()
}

fn derive_column(column: &str, rows: &[Row]) -> ColumnChart {
    let values: Vec<&Value> = rows
        .iter()
        .filter_map(|row| row.get(column))
        .filter(|v| !v.is_null())
        .collect();

    let numbers: Option<Vec<f64>> = values.iter().map(|v| numeric_value(v)).collect();
    match numbers {
        Some(numbers) if !numbers.is_empty() => ColumnChart::Histogram {
            column: column.to_string(),
            stats: compute_stats(&numbers),
            values: numbers,
        },
        _ => {
            let mut counts: IndexMap<String, u64> = IndexMap::new();
            for value in values {
                *counts.entry(value_label(value)).or_insert(0) += 1;
            }
            ColumnChart::Bar {
                column: column.to_string(),
                counts,
            }
        }
    }
}

/// Numeric interpretation of a cell: JSON numbers, numeric strings, and
/// booleans (1/0). Empty or whitespace-only strings are not numeric.
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

fn value_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// Statistics are reported at 2-decimal precision. Callers guarantee a
// non-empty slice.
fn compute_stats(values: &[f64]) -> ColumnStats {
    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    ColumnStats {
        count,
        mean: round2(mean),
        min: round2(min),
        max: round2(max),
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
