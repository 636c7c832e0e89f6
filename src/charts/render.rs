// PNG rendering for chart descriptors.
//
// The deriver produces descriptors regardless of rendering; this module is
// the optional last mile for callers that want files on disk.

use std::path::Path;

use anyhow::Result;
use indexmap::IndexMap;
use plotters::prelude::*;

use super::ColumnChart;

const HISTOGRAM_BINS: usize = 10;

/// Render one chart descriptor to a PNG file.
pub fn write_chart(output_path: &Path, chart: &ColumnChart) -> Result<()> {
    match chart {
        ColumnChart::Histogram { column, values, .. } => {
            write_histogram(output_path, column, values)
        }
        ColumnChart::Bar { column, counts } => write_bar(output_path, column, counts),
    }
}

fn write_histogram(output_path: &Path, column: &str, values: &[f64]) -> Result<()> {
    if values.is_empty() {
        return Ok(());
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = if max > min { max - min } else { 1.0 };
    let bin_width = span / HISTOGRAM_BINS as f64;

    let mut bins = vec![0usize; HISTOGRAM_BINS];
    for &v in values {
        let idx = (((v - min) / bin_width) as usize).min(HISTOGRAM_BINS - 1);
        bins[idx] += 1;
    }
    let tallest = bins.iter().copied().max().unwrap_or(1).max(1);

    let root = BitMapBackend::new(output_path, (800, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(format!("{column} Distribution"), ("sans-serif", 24))
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(0..HISTOGRAM_BINS, 0..tallest + 1)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(HISTOGRAM_BINS)
        .x_label_formatter(&|bin| format!("{:.1}", min + *bin as f64 * bin_width))
        .draw()?;

    for (idx, &count) in bins.iter().enumerate() {
        chart.draw_series(std::iter::once(Rectangle::new(
            [(idx, 0), (idx + 1, count)],
            BLUE.mix(0.5).filled(),
        )))?;
    }

    Ok(())
}

fn write_bar(output_path: &Path, column: &str, counts: &IndexMap<String, u64>) -> Result<()> {
    if counts.is_empty() {
        return Ok(());
    }

    let labels: Vec<&String> = counts.keys().collect();
    let tallest = counts.values().copied().max().unwrap_or(1).max(1);

    let root = BitMapBackend::new(output_path, (800, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(format!("{column} Counts"), ("sans-serif", 24))
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(0..counts.len(), 0..tallest + 1)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(counts.len())
        .x_label_formatter(&|idx| {
            labels
                .get(*idx)
                .map(|l| l.to_string())
                .unwrap_or_default()
        })
        .draw()?;

    for (idx, &count) in counts.values().enumerate() {
        chart.draw_series(std::iter::once(Rectangle::new(
            [(idx, 0), (idx + 1, count)],
            GREEN.mix(0.5).filled(),
        )))?;
    }

    Ok(())
}
