//! Shared chart styling and coordinate helpers.
//!
//! Panels plot against an f64 index axis (one unit per time bucket) with
//! a label formatter mapping positions back to calendar dates. This keeps
//! every panel on the plain `RangedCoordf64` coordinate system.

use std::ops::Range;

use conil_traits::{ConilError, Date, Result};
use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

/// Chart context every panel draws into.
pub(crate) type IndexChart<'a, DB> =
    ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Converts a backend drawing error into a [`ConilError::Draw`].
pub(crate) fn draw_err<E: std::fmt::Display>(e: E) -> ConilError {
    ConilError::Draw(e.to_string())
}

/// Series color for the i-th line of a panel.
pub(crate) fn series_color(i: usize) -> PaletteColor<Palette99> {
    Palette99::pick(i)
}

/// Formats an index-axis position as a calendar date label.
pub(crate) fn date_label(index: &[Date], x: f64) -> String {
    let i = x.round();
    if i < 0.0 || index.is_empty() {
        return String::new();
    }
    match index.get(i as usize) {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}

/// Value range of a sample with 5% padding on both sides.
///
/// Non-finite values are ignored; an empty or degenerate sample gets a
/// unit range so the chart still builds.
pub(crate) fn padded_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let pad = ((max - min) * 0.05).max(1e-9);
    (min - pad)..(max + pad)
}

/// Index-axis range for `n` time buckets.
pub(crate) fn index_range(n: usize) -> Range<f64> {
    0.0..(n.saturating_sub(1).max(1) as f64)
}

/// Builds the standard panel chart: caption, margins, mesh with date
/// labels on the x axis.
pub(crate) fn build_panel<'a, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    caption: &str,
    index: &[Date],
    y_range: Range<f64>,
) -> Result<IndexChart<'a, DB>> {
    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 15))
        .margin(8)
        .x_label_area_size(28)
        .y_label_area_size(48)
        .build_cartesian_2d(index_range(index.len()), y_range)
        .map_err(draw_err)?;

    let labels: Vec<Date> = index.to_vec();
    chart
        .configure_mesh()
        .x_labels(6)
        .y_labels(6)
        .light_line_style(WHITE)
        .x_label_formatter(&move |x| date_label(&labels, *x))
        .y_label_formatter(&|v| format!("{v:.2}"))
        .draw()
        .map_err(draw_err)?;

    Ok(chart)
}

/// Draws a horizontal guide at `y` across the index range.
pub(crate) fn draw_hline<DB: DrawingBackend>(
    chart: &mut IndexChart<'_, DB>,
    n: usize,
    y: f64,
) -> Result<()> {
    let range = index_range(n);
    chart
        .draw_series(LineSeries::new(
            vec![(range.start, y), (range.end, y)],
            BLACK.mix(0.4),
        ))
        .map_err(draw_err)?;
    Ok(())
}

/// Draws one vertical event marker per date found in the time index.
///
/// Dates without a matching time bucket are skipped without error, so a
/// marker list spanning several datasets can be reused as-is.
pub(crate) fn draw_axvlines<DB: DrawingBackend>(
    chart: &mut IndexChart<'_, DB>,
    index: &[Date],
    axvlines: &[Date],
    y_range: &Range<f64>,
) -> Result<()> {
    for date in axvlines {
        if let Ok(i) = index.binary_search(date) {
            let x = i as f64;
            chart
                .draw_series(LineSeries::new(
                    vec![(x, y_range.start), (x, y_range.end)],
                    BLACK.mix(0.5),
                ))
                .map_err(draw_err)?;
        }
    }
    Ok(())
}

/// Draws one named line series and registers its legend entry.
pub(crate) fn draw_line<DB: DrawingBackend>(
    chart: &mut IndexChart<'_, DB>,
    name: &str,
    values: &[f64],
    color_idx: usize,
) -> Result<()> {
    let color = series_color(color_idx);
    let points = values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, &v)| (i as f64, v));
    chart
        .draw_series(LineSeries::new(points, color.stroke_width(2)))
        .map_err(draw_err)?
        .label(name)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2)));
    Ok(())
}

/// Draws the legend box for the series registered so far.
pub(crate) fn draw_legend<'a, DB: DrawingBackend + 'a>(chart: &mut IndexChart<'a, DB>) -> Result<()> {
    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.5))
        .position(SeriesLabelPosition::UpperLeft)
        .draw()
        .map_err(draw_err)?;
    Ok(())
}

/// Trailing mean over a fixed window, NaN until a finite value is seen.
pub(crate) fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let start = (i + 1).saturating_sub(window);
            let usable: Vec<f64> = values[start..=i]
                .iter()
                .copied()
                .filter(|v| v.is_finite())
                .collect();
            if usable.is_empty() {
                f64::NAN
            } else {
                usable.iter().sum::<f64>() / usable.len() as f64
            }
        })
        .collect()
}

/// Diverging blue-white-red color for a value within `[lo, hi]`.
pub(crate) fn heat_color(value: f64, lo: f64, hi: f64) -> RGBColor {
    if !value.is_finite() || hi <= lo {
        return RGBColor(230, 230, 230);
    }
    let t = ((value - lo) / (hi - lo)).clamp(0.0, 1.0);
    let blend = |a: f64, b: f64, t: f64| (a + (b - a) * t) as u8;
    if t < 0.5 {
        let s = t * 2.0;
        RGBColor(blend(33.0, 255.0, s), blend(102.0, 255.0, s), blend(172.0, 255.0, s))
    } else {
        let s = (t - 0.5) * 2.0;
        RGBColor(blend(255.0, 178.0, s), blend(255.0, 24.0, s), blend(255.0, 43.0, s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_mean_window() {
        let out = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 2);
        assert_eq!(out, vec![1.0, 1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_rolling_mean_skips_nans() {
        let out = rolling_mean(&[f64::NAN, 2.0, f64::NAN], 2);
        assert!(out[0].is_nan());
        assert_eq!(out[1], 2.0);
        assert_eq!(out[2], 2.0);
    }

    #[test]
    fn test_padded_range_ignores_non_finite() {
        let range = padded_range([1.0, f64::NAN, 3.0]);
        assert!(range.start < 1.0 && range.end > 3.0);
    }

    #[test]
    fn test_padded_range_empty_sample() {
        let range = padded_range([]);
        assert_eq!(range, 0.0..1.0);
    }

    #[test]
    fn test_date_label_out_of_bounds() {
        let index = vec![Date::from_ymd_opt(2024, 1, 2).unwrap()];
        assert_eq!(date_label(&index, 0.0), "2024-01-02");
        assert_eq!(date_label(&index, 5.0), "");
        assert_eq!(date_label(&index, -1.0), "");
    }

    #[test]
    fn test_heat_color_endpoints() {
        assert_eq!(heat_color(0.0, 0.0, 1.0), RGBColor(33, 102, 172));
        assert_eq!(heat_color(0.5, 0.0, 1.0), RGBColor(255, 255, 255));
        assert_eq!(heat_color(1.0, 0.0, 1.0), RGBColor(178, 24, 43));
        // Degenerate range falls back to neutral gray.
        assert_eq!(heat_color(0.5, 1.0, 1.0), RGBColor(230, 230, 230));
    }
}
