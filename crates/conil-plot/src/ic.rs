//! IC series and monthly IC heatmap panels.

use std::collections::BTreeMap;

use chrono::Datelike;
use conil_traits::{Date, PanelSummary, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use polars::prelude::*;

use conil_analytics::frame;

use crate::style;

const ROLLING_WINDOW: usize = 20;

/// Render an IC time-series panel for one `{factor}__{forward_return}`
/// column of an IC DataFrame.
///
/// Draws the raw per-date IC as a faint line, a trailing 20-bucket mean
/// on top, a zero guide, and one vertical marker per `axvlines` date that
/// falls inside the time index.
///
/// # Returns
///
/// Summary statistics of the finite IC values: `ic_mean`, `ic_std`, `ir`
/// (mean over standard deviation) and `ic_positive_ratio`.
pub fn plot_ic_ts<DB: DrawingBackend>(
    df_ic: &DataFrame,
    col: &str,
    area: &DrawingArea<DB, Shift>,
    axvlines: &[Date],
) -> Result<PanelSummary> {
    let index = frame::date_rows(df_ic)?;
    let ics: Vec<f64> = frame::f64_col(df_ic, col)?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect();

    let finite: Vec<f64> = ics.iter().copied().filter(|v| v.is_finite()).collect();
    let m = conil_analytics::moments(&finite);
    let ir = m.mean / m.std;
    let positive_ratio = if finite.is_empty() {
        f64::NAN
    } else {
        finite.iter().filter(|v| **v > 0.0).count() as f64 / finite.len() as f64
    };

    let mut summary = PanelSummary::new();
    summary.set("ic_mean", m.mean);
    summary.set("ic_std", m.std);
    summary.set("ir", ir);
    summary.set("ic_positive_ratio", positive_ratio);

    let caption = format!("IC {col} (mean {:.4}, IR {:.2})", m.mean, ir);
    let y_range = style::padded_range(ics.iter().copied().chain([0.0]));
    let mut chart = style::build_panel(area, &caption, &index, y_range.clone())?;

    style::draw_hline(&mut chart, index.len(), 0.0)?;
    style::draw_axvlines(&mut chart, &index, axvlines, &y_range)?;

    chart
        .draw_series(LineSeries::new(
            ics.iter()
                .enumerate()
                .filter(|(_, v)| v.is_finite())
                .map(|(i, &v)| (i as f64, v)),
            style::series_color(0).mix(0.35),
        ))
        .map_err(style::draw_err)?;

    let rolling = style::rolling_mean(&ics, ROLLING_WINDOW);
    chart
        .draw_series(LineSeries::new(
            rolling
                .iter()
                .enumerate()
                .filter(|(_, v)| v.is_finite())
                .map(|(i, &v)| (i as f64, v)),
            style::series_color(0).stroke_width(2),
        ))
        .map_err(style::draw_err)?;

    Ok(summary)
}

/// Render a calendar heatmap of monthly mean IC for one column of an IC
/// DataFrame.
///
/// Rows are years, columns are months, cell color is the mean of the
/// finite IC values in that month on a diverging scale symmetric around
/// zero. Months without data stay gray.
pub fn plot_ic_heatmap_monthly<DB: DrawingBackend>(
    df_ic: &DataFrame,
    col: &str,
    area: &DrawingArea<DB, Shift>,
) -> Result<()> {
    let dates = frame::date_rows(df_ic)?;
    let ics = frame::f64_col(df_ic, col)?;

    let mut cells: BTreeMap<(i32, u32), Vec<f64>> = BTreeMap::new();
    for (date, ic) in dates.iter().zip(ics.iter()) {
        if let Some(v) = ic
            && v.is_finite()
        {
            cells.entry((date.year(), date.month())).or_default().push(*v);
        }
    }

    let years: Vec<i32> = {
        let mut ys: Vec<i32> = cells.keys().map(|(y, _)| *y).collect();
        ys.sort_unstable();
        ys.dedup();
        ys
    };
    let n_years = years.len().max(1);

    let means: BTreeMap<(i32, u32), f64> = cells
        .into_iter()
        .map(|(key, vs)| (key, vs.iter().sum::<f64>() / vs.len() as f64))
        .collect();
    let scale = means
        .values()
        .fold(0.0_f64, |acc, v| acc.max(v.abs()))
        .max(1e-9);

    let mut chart = ChartBuilder::on(area)
        .caption(format!("Monthly mean IC {col}"), ("sans-serif", 15))
        .margin(8)
        .x_label_area_size(28)
        .y_label_area_size(48)
        .build_cartesian_2d(0.0..12.0_f64, 0.0..n_years as f64)
        .map_err(style::draw_err)?;

    let year_labels = years.clone();
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(12)
        .y_labels(n_years)
        .x_label_formatter(&|x| {
            let month = x.floor() as u32 + 1;
            if *x == x.floor() && month <= 12 {
                format!("{month:02}")
            } else {
                String::new()
            }
        })
        .y_label_formatter(&move |y| {
            let row = y.floor() as usize;
            if *y == y.floor() && row < year_labels.len() {
                year_labels[row].to_string()
            } else {
                String::new()
            }
        })
        .draw()
        .map_err(style::draw_err)?;

    for (row, year) in years.iter().enumerate() {
        for month in 1..=12u32 {
            let color = match means.get(&(*year, month)) {
                Some(v) => style::heat_color(*v, -scale, scale),
                None => RGBColor(230, 230, 230),
            };
            let x0 = (month - 1) as f64;
            let y0 = row as f64;
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x0, y0), (x0 + 1.0, y0 + 1.0)],
                    color.filled(),
                )))
                .map_err(style::draw_err)?;
        }
    }

    Ok(())
}
