//! Turnover and autocorrelation panels.

use conil_traits::{Date, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use polars::prelude::*;

use conil_analytics::frame;

use crate::style;

/// Render the factor rank autocorrelation series, one line per `AC{p}`
/// column of an autocorrelation DataFrame.
pub fn plot_factor_auto_correlation<DB: DrawingBackend>(
    df_ac: &DataFrame,
    area: &DrawingArea<DB, Shift>,
    axvlines: &[Date],
) -> Result<()> {
    let index = frame::date_rows(df_ac)?;

    let series: Vec<(String, Vec<f64>)> = df_ac
        .get_column_names()
        .iter()
        .filter(|name| name.starts_with("AC"))
        .map(|name| {
            frame::f64_col(df_ac, name.as_str()).map(|vs| {
                (
                    name.to_string(),
                    vs.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect(),
                )
            })
        })
        .collect::<Result<_>>()?;

    let y_range = style::padded_range(
        series
            .iter()
            .flat_map(|(_, vs)| vs.iter().copied())
            .chain([0.0]),
    );
    let mut chart = style::build_panel(area, "Factor autocorrelation", &index, y_range.clone())?;

    style::draw_hline(&mut chart, index.len(), 0.0)?;
    style::draw_axvlines(&mut chart, &index, axvlines, &y_range)?;

    for (i, (name, values)) in series.iter().enumerate() {
        style::draw_line(&mut chart, name, values, i)?;
    }
    style::draw_legend(&mut chart)?;

    Ok(())
}

/// Render the turnover series of one quantile bucket, one line per
/// `P{period}` column of a turnover DataFrame.
///
/// The turnover frame holds one row per (date, bucket); only the rows of
/// the requested bucket are drawn.
pub fn plot_turnover_quantile<DB: DrawingBackend>(
    df_turnover: &DataFrame,
    quantile: i32,
    quantile_col: &str,
    area: &DrawingArea<DB, Shift>,
    axvlines: &[Date],
) -> Result<()> {
    let dates = frame::date_rows(df_turnover)?;
    let buckets = frame::i32_col(df_turnover, quantile_col)?;
    let rows: Vec<usize> = buckets
        .iter()
        .enumerate()
        .filter(|(_, q)| **q == Some(quantile))
        .map(|(row, _)| row)
        .collect();

    let index: Vec<Date> = rows.iter().map(|&r| dates[r]).collect();

    let series: Vec<(String, Vec<f64>)> = df_turnover
        .get_column_names()
        .iter()
        .filter(|name| name.starts_with('P'))
        .map(|name| {
            frame::f64_col(df_turnover, name.as_str()).map(|vs| {
                let values = rows
                    .iter()
                    .map(|&r| vs[r].unwrap_or(f64::NAN))
                    .collect::<Vec<f64>>();
                (name.to_string(), values)
            })
        })
        .collect::<Result<_>>()?;

    let y_range = style::padded_range(
        series
            .iter()
            .flat_map(|(_, vs)| vs.iter().copied())
            .chain([0.0]),
    );
    let caption = format!("Turnover quantile {quantile}");
    let mut chart = style::build_panel(area, &caption, &index, y_range.clone())?;

    style::draw_axvlines(&mut chart, &index, axvlines, &y_range)?;

    for (i, (name, values)) in series.iter().enumerate() {
        style::draw_line(&mut chart, name, values, i)?;
    }
    style::draw_legend(&mut chart)?;

    Ok(())
}
