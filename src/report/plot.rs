use plotters::prelude::*;
use plotters::style::HSLColor;
use std::path::Path;

use crate::error::ReportError;
use crate::trainer::PerformanceTrace;

fn plot_error<E: std::fmt::Display>(e: E) -> ReportError {
    ReportError::Plot(e.to_string())
}

/// Draws the windowed reward averages of one or more runs into an SVG file.
pub fn plot_moving_average(
    traces: &[&PerformanceTrace],
    legends: &[&str],
    title: &str,
    path: &Path,
) -> Result<(), ReportError> {
    let series: Vec<Vec<(f64, f64)>> = traces.iter().map(|t| t.points()).collect();
    let mut x_max: f64 = f64::NEG_INFINITY;
    let mut y_min: f64 = f64::INFINITY;
    let mut y_max: f64 = f64::NEG_INFINITY;
    for (x, y) in series.iter().flatten() {
        x_max = x_max.max(*x);
        y_min = y_min.min(*y);
        y_max = y_max.max(*y);
    }
    if !x_max.is_finite() {
        return Err(ReportError::EmptyTrace);
    }
    let window = traces.iter().map(|t| t.window()).max().unwrap_or(1) as f64;
    let y_pad = ((y_max - y_min) * 0.05).max(1.0);

    let root = SVGBackend::new(path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max + window, (y_min - y_pad)..(y_max + y_pad))
        .map_err(plot_error)?;
    chart
        .configure_mesh()
        .x_desc("Episode Number")
        .y_desc(format!("Average Reward (Over Next {} Episodes)", window))
        .draw()
        .map_err(plot_error)?;

    for (i, points) in series.into_iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        let legend = legends.get(i).copied().unwrap_or("");
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))
            .map_err(plot_error)?
            .label(legend)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }
    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_error)?;
    root.present().map_err(plot_error)?;
    Ok(())
}

/// Draws state values as a heatmap laid out row-major in rows of `ncol`,
/// each cell annotated with its value.
pub fn plot_state_values(
    values: &[f64],
    ncol: usize,
    title: &str,
    path: &Path,
) -> Result<(), ReportError> {
    if values.is_empty() || ncol == 0 || values.len() % ncol != 0 {
        return Err(ReportError::GridShape {
            len: values.len(),
            ncol,
        });
    }
    let nrow: usize = values.len() / ncol;
    let (low, high) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let span: f64 = high - low;

    let size: (u32, u32) = (90 * ncol as u32, 90 * nrow as u32 + 60);
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30).into_font())
        .margin(10)
        .build_cartesian_2d(0..ncol as i32, 0..nrow as i32)
        .map_err(plot_error)?;

    // row 0 is drawn on top
    let cells = values.iter().enumerate().map(move |(i, v)| {
        let col = (i % ncol) as i32;
        let y = (nrow - 1 - i / ncol) as i32;
        (col, y, *v)
    });
    chart
        .draw_series(cells.clone().map(|(col, y, v)| {
            let t: f64 = if span > 0.0 { (v - low) / span } else { 1.0 };
            let color = HSLColor(0.33 * t, 0.7, 0.55);
            Rectangle::new([(col, y + 1), (col + 1, y)], color.filled())
        }))
        .map_err(plot_error)?;
    chart
        .draw_series(cells.map(|(col, y, v)| {
            EmptyElement::at((col, y + 1))
                + Text::new(format!("{:.1}", v), (20, 35), ("sans-serif", 18).into_font())
        }))
        .map_err(plot_error)?;
    root.present().map_err(plot_error)?;
    Ok(())
}
