//! This module is responsible for generating all charts for a run.

use anyhow::Result;
use plotters::prelude::*;
use spillsim_core::logger::{read_time_series, LogEntry};
use spillsim_schemas::{dispersal::DispersalResult, impact::ImpactSummary};
use std::path::Path;

const EVAPORATED_COLOR: RGBColor = RGBColor(244, 209, 102);
const DISSOLVED_COLOR: RGBColor = RGBColor(95, 163, 219);
const SURFACE_COLOR: RGBColor = RGBColor(217, 59, 72);
const CLEANUP_COLOR: RGBColor = RGBColor(142, 124, 195);
const SLICK_COLOR: RGBColor = RGBColor(120, 45, 45);

/// The main function to generate and save all plots for a run.
pub fn generate_all_plots(
    output_dir: &Path,
    result: &DispersalResult,
    sweep_log: Option<&Path>,
    cleanup_days: f64,
) -> Result<()> {
    println!("[Plotting] Generating charts...");

    plot_oil_distribution(output_dir, result)?;
    plot_footprint(output_dir, result)?;

    if let Some(log_path) = sweep_log {
        let entries = read_time_series(log_path)?;
        if entries.is_empty() {
            println!("[Plotting] Warning: Time sweep log is empty, skipping timeline.");
        } else {
            plot_weathering_timeline(output_dir, &entries)?;
        }
    }

    plot_cleanup_timeline(output_dir, cleanup_days, result.surface_fraction)?;

    println!("[Plotting] Charts have been saved to '{}'.", output_dir.display());
    Ok(())
}

/// Bar chart of where the spilled volume has gone.
fn plot_oil_distribution(output_dir: &Path, result: &DispersalResult) -> Result<()> {
    let path = output_dir.join("1_oil_distribution.png");
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let bars = [
        ("Evaporated", result.evaporated_fraction, EVAPORATED_COLOR),
        ("Dissolved", result.dissolved_fraction, DISSOLVED_COLOR),
        ("Surface", result.surface_fraction, SURFACE_COLOR),
    ];

    let mut chart = ChartBuilder::on(&root)
        .caption("Oil Distribution", ("sans-serif", 50).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..bars.len() as f64, 0f64..110f64)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .x_desc("Weathering state")
        .y_desc("Share of spilled volume (%)")
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(i, (_, fraction, color))| {
        let x = i as f64;
        Rectangle::new([(x + 0.15, 0.0), (x + 0.85, fraction * 100.0)], color.filled())
    }))?;

    chart.draw_series(bars.iter().enumerate().map(|(i, (label, fraction, _))| {
        Text::new(
            format!("{} {:.1}%", label, fraction * 100.0),
            (i as f64 + 0.25, fraction * 100.0 + 4.0),
            ("sans-serif", 20).into_font(),
        )
    }))?;

    root.present()?;
    Ok(())
}

/// The slick outline on lon/lat axes with the spill origin marked.
fn plot_footprint(output_dir: &Path, result: &DispersalResult) -> Result<()> {
    let path = output_dir.join("2_spill_footprint.png");
    let root = BitMapBackend::new(&path, (1024, 1024)).into_drawing_area();
    root.fill(&WHITE)?;

    let (center_lat, center_lon) = result.center;
    let (mut min_lon, mut max_lon) = (center_lon, center_lon);
    let (mut min_lat, mut max_lat) = (center_lat, center_lat);
    for &(lat, lon) in &result.polygon {
        min_lon = min_lon.min(lon);
        max_lon = max_lon.max(lon);
        min_lat = min_lat.min(lat);
        max_lat = max_lat.max(lat);
    }
    let lon_pad = ((max_lon - min_lon) * 0.15).max(0.01);
    let lat_pad = ((max_lat - min_lat) * 0.15).max(0.01);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Spill Footprint ({:.2} km²)", result.area_km2),
            ("sans-serif", 40).into_font(),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (min_lon - lon_pad)..(max_lon + lon_pad),
            (min_lat - lat_pad)..(max_lat + lat_pad),
        )?;

    chart
        .configure_mesh()
        .x_desc("Longitude")
        .y_desc("Latitude")
        .draw()?;

    let ring: Vec<(f64, f64)> = result.polygon.iter().map(|&(lat, lon)| (lon, lat)).collect();
    if ring.len() >= 3 {
        chart.draw_series(std::iter::once(Polygon::new(
            ring.clone(),
            SLICK_COLOR.mix(0.5).filled(),
        )))?;

        let mut outline = ring;
        outline.push(outline[0]);
        chart
            .draw_series(std::iter::once(PathElement::new(outline, SLICK_COLOR.stroke_width(2))))?
            .label("Slick outline")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], SLICK_COLOR.filled()));
    }

    chart
        .draw_series(std::iter::once(Circle::new((center_lon, center_lat), 6, BLACK.filled())))?
        .label("Spill origin")
        .legend(|(x, y)| Circle::new((x + 10, y), 5, BLACK.filled()));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Weathering fractions (top) and slick area (bottom) across the time sweep.
fn plot_weathering_timeline(output_dir: &Path, entries: &[LogEntry]) -> Result<()> {
    let path = output_dir.join("3_weathering_timeline.png");
    let root = BitMapBackend::new(&path, (1024, 1024)).into_drawing_area();
    root.fill(&WHITE)?;
    let (upper, lower) = root.split_vertically(512);

    let max_hours = entries
        .iter()
        .map(|e| e.time_hours)
        .fold(1.0, f64::max);

    let mut chart = ChartBuilder::on(&upper)
        .caption("Weathering Over Time", ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..max_hours, 0f64..100f64)?;

    chart
        .configure_mesh()
        .x_desc("Time (hours)")
        .y_desc("Share of volume (%)")
        .draw()?;

    let series: [(&str, fn(&LogEntry) -> f64, RGBColor); 3] = [
        ("Evaporated", |e| e.evaporated, EVAPORATED_COLOR),
        ("Dissolved", |e| e.dissolved, DISSOLVED_COLOR),
        ("Surface", |e| e.surface, SURFACE_COLOR),
    ];
    for (label, value, color) in series {
        chart
            .draw_series(LineSeries::new(
                entries.iter().map(|e| (e.time_hours, value(e) * 100.0)),
                color.stroke_width(3),
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    let max_area = entries.iter().map(|e| e.area_km2).fold(0.0, f64::max);
    let mut area_chart = ChartBuilder::on(&lower)
        .caption("Slick Area", ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..max_hours, 0f64..(max_area * 1.1).max(1e-3))?;

    area_chart
        .configure_mesh()
        .x_desc("Time (hours)")
        .y_desc("Area (km²)")
        .draw()?;

    area_chart.draw_series(LineSeries::new(
        entries.iter().map(|e| (e.time_hours, e.area_km2)),
        SLICK_COLOR.stroke_width(3),
    ))?;
    area_chart.draw_series(
        entries
            .iter()
            .map(|e| Circle::new((e.time_hours, e.area_km2), 4, SLICK_COLOR.filled())),
    )?;

    root.present()?;
    Ok(())
}

/// Projected cleanup progress and remaining surface oil, with the estimate
/// marked by a dashed line.
fn plot_cleanup_timeline(output_dir: &Path, cleanup_days: f64, surface_fraction: f64) -> Result<()> {
    let path = output_dir.join("4_cleanup_timeline.png");
    let root = BitMapBackend::new(&path, (1024, 512)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_day = (cleanup_days * 1.2).ceil().max(2.0);
    let days: Vec<f64> = (0..=max_day as u64).map(|d| d as f64).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption("Cleanup Timeline", ("sans-serif", 40).into_font())
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..max_day, 0f64..100f64)?;

    chart
        .configure_mesh()
        .x_desc("Days since spill")
        .y_desc("Percent")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            days.iter()
                .map(|&d| (d, 100.0 * (1.0 - (-3.0 * d / cleanup_days).exp()))),
            CLEANUP_COLOR.stroke_width(3),
        ))?
        .label("Cleanup progress (%)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], CLEANUP_COLOR.filled()));

    chart
        .draw_series(LineSeries::new(
            days.iter()
                .map(|&d| (d, 100.0 * surface_fraction * (-4.0 * d / cleanup_days).exp())),
            SURFACE_COLOR.stroke_width(3),
        ))?
        .label("Surface oil remaining (%)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], SURFACE_COLOR.filled()));

    chart.draw_series(DashedLineSeries::new(
        vec![(cleanup_days, 0.0), (cleanup_days, 100.0)],
        5,
        5,
        (&BLACK).into(),
    ))?;
    chart.draw_series(std::iter::once(Text::new(
        format!("Estimated cleanup: {:.1} days", cleanup_days),
        (cleanup_days, 55.0),
        ("sans-serif", 16).into_font(),
    )))?;

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Side-by-side bars of area, CO₂ and cleanup time for a baseline (first
/// entry) and its alternative scenarios.
pub fn plot_scenario_comparison(output_dir: &Path, scenarios: &[(String, ImpactSummary)]) -> Result<()> {
    if scenarios.is_empty() {
        println!("[Plotting] Warning: No scenarios to compare.");
        return Ok(());
    }

    let path = output_dir.join("5_scenario_comparison.png");
    let root = BitMapBackend::new(&path, (1536, 640)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, 3));

    let metrics: [(&str, fn(&ImpactSummary) -> f64, RGBColor); 3] = [
        ("Surface Area (km²)", |s| s.surface_area_km2, DISSOLVED_COLOR),
        ("CO₂ Emissions (t)", |s| s.co2_emissions_tons, SURFACE_COLOR),
        ("Cleanup Time (days)", |s| s.cleanup_time_days, CLEANUP_COLOR),
    ];

    for (panel, (title, value, color)) in panels.iter().zip(metrics) {
        let values: Vec<f64> = scenarios.iter().map(|(_, summary)| value(summary)).collect();
        let max_value = values.iter().cloned().fold(0.0, f64::max).max(1e-3);

        let mut chart = ChartBuilder::on(panel)
            .caption(title, ("sans-serif", 28).into_font())
            .margin(10)
            .x_label_area_size(20)
            .y_label_area_size(60)
            .build_cartesian_2d(0f64..scenarios.len() as f64, 0f64..max_value * 1.25)?;

        chart.configure_mesh().disable_x_mesh().x_labels(0).draw()?;

        chart.draw_series(values.iter().enumerate().map(|(i, v)| {
            let x = i as f64;
            Rectangle::new([(x + 0.15, 0.0), (x + 0.85, *v)], color.mix(0.7).filled())
        }))?;

        chart.draw_series(scenarios.iter().zip(&values).enumerate().map(|(i, ((name, _), v))| {
            Text::new(
                format!("{} {:.1}", name, v),
                (i as f64 + 0.15, v + max_value * 0.05),
                ("sans-serif", 14).into_font(),
            )
        }))?;
    }

    root.present()?;
    println!("[Plotting] Scenario comparison saved to '{}'.", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_without_scenarios_draws_nothing() {
        let dir = tempfile::tempdir().unwrap();
        plot_scenario_comparison(dir.path(), &[]).unwrap();
        assert!(!dir.path().join("5_scenario_comparison.png").exists());
    }
}
