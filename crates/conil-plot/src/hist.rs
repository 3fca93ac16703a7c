//! Value-distribution histogram panel.

use conil_traits::{PanelSummary, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use polars::prelude::*;

use conil_analytics::hist;

use crate::style;

const DEFAULT_BINS: usize = 50;

/// Render a histogram panel for one numeric column.
///
/// Nulls and NaNs are dropped before binning; the caption carries the
/// sample moments.
///
/// # Returns
///
/// Summary statistics of the finite sample: `mean`, `std`, `skew` and
/// `kurt`.
pub fn plot_hist<DB: DrawingBackend>(
    df: &DataFrame,
    col: &str,
    area: &DrawingArea<DB, Shift>,
) -> Result<PanelSummary> {
    let values = hist::finite_column_values(df, col)?;
    let histogram = hist::histogram(&values, DEFAULT_BINS)?;
    let m = hist::moments(&values);

    let mut summary = PanelSummary::new();
    summary.set("mean", m.mean);
    summary.set("std", m.std);
    summary.set("skew", m.skew);
    summary.set("kurt", m.kurt);

    let caption = format!(
        "{col} (mean {:.4}, std {:.4}, skew {:.2}, kurt {:.2})",
        m.mean, m.std, m.skew, m.kurt
    );
    let x_min = histogram.edges[0];
    let x_max = histogram.edges[histogram.edges.len() - 1];
    let y_max = histogram.max_count() as f64 * 1.05;

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 15))
        .margin(8)
        .x_label_area_size(28)
        .y_label_area_size(48)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max.max(1.0))
        .map_err(style::draw_err)?;

    chart
        .configure_mesh()
        .x_labels(8)
        .y_labels(5)
        .light_line_style(WHITE)
        .y_label_formatter(&|v| format!("{v:.0}"))
        .draw()
        .map_err(style::draw_err)?;

    let color = style::series_color(0);
    for (bin, count) in histogram.counts.iter().enumerate() {
        if *count == 0 {
            continue;
        }
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [
                    (histogram.edges[bin], 0.0),
                    (histogram.edges[bin + 1], *count as f64),
                ],
                color.mix(0.6).filled(),
            )))
            .map_err(style::draw_err)?;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use plotters::backend::SVGBackend;

    #[test]
    fn test_plot_hist_summary() {
        let df = df! {
            "alpha" => &[-2.0, -1.0, 0.0, 1.0, 2.0, f64::NAN],
        }
        .unwrap();

        let mut svg = String::new();
        let summary = {
            let area = SVGBackend::with_string(&mut svg, (640, 480)).into_drawing_area();
            plot_hist(&df, "alpha", &area).unwrap()
        };

        assert_relative_eq!(summary.get("mean").unwrap(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(summary.get("skew").unwrap(), 0.0, epsilon = 1e-12);
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_plot_hist_empty_column() {
        let df = df! { "alpha" => &[f64::NAN, f64::NAN] }.unwrap();
        let mut svg = String::new();
        let area = SVGBackend::with_string(&mut svg, (640, 480)).into_drawing_area();
        assert!(plot_hist(&df, "alpha", &area).is_err());
    }
}
