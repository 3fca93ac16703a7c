//! Quantile portfolio cumulative-return panel.

use conil_traits::{DATE_COL, Date, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use polars::prelude::*;

use conil_analytics::frame;

use crate::style;

/// Render one line per quantile bucket from a cumulative-return
/// DataFrame.
///
/// Every non-date column is treated as one bucket curve; the legend uses
/// the column names, so the `q{bucket}` naming of the cumulative-return
/// transform carries through. A unit guide marks the starting capital.
pub fn plot_quantile_portfolio<DB: DrawingBackend>(
    df_cum: &DataFrame,
    caption: &str,
    area: &DrawingArea<DB, Shift>,
    axvlines: &[Date],
) -> Result<()> {
    let index = frame::date_rows(df_cum)?;

    let curves: Vec<(String, Vec<f64>)> = df_cum
        .get_column_names()
        .iter()
        .filter(|name| name.as_str() != DATE_COL)
        .map(|name| {
            frame::f64_col(df_cum, name.as_str()).map(|vs| {
                (
                    name.to_string(),
                    vs.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect(),
                )
            })
        })
        .collect::<Result<_>>()?;

    let y_range = style::padded_range(
        curves
            .iter()
            .flat_map(|(_, vs)| vs.iter().copied())
            .chain([1.0]),
    );
    let mut chart = style::build_panel(area, caption, &index, y_range.clone())?;

    style::draw_hline(&mut chart, index.len(), 1.0)?;
    style::draw_axvlines(&mut chart, &index, axvlines, &y_range)?;

    for (i, (name, values)) in curves.iter().enumerate() {
        style::draw_line(&mut chart, name, values, i)?;
    }
    style::draw_legend(&mut chart)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotters::backend::SVGBackend;

    fn cum_frame() -> DataFrame {
        let dates: Vec<Date> = (2..6)
            .map(|day| Date::from_ymd_opt(2024, 1, day).unwrap())
            .collect();
        DataFrame::new(vec![
            frame::date_column(DATE_COL, &dates).unwrap(),
            Column::new("q1".into(), &[1.0, 0.99, 0.98, 0.97]),
            Column::new("q2".into(), &[1.0, 1.01, 1.02, 1.03]),
        ])
        .unwrap()
    }

    #[test]
    fn test_plot_quantile_portfolio_renders_legend() {
        let mut svg = String::new();
        {
            let area = SVGBackend::with_string(&mut svg, (640, 480)).into_drawing_area();
            plot_quantile_portfolio(&cum_frame(), "Cumulative returns", &area, &[]).unwrap();
        }
        assert!(svg.contains("q1"));
        assert!(svg.contains("q2"));
    }

    #[test]
    fn test_plot_quantile_portfolio_missing_date_column() {
        let df = df! { "q1" => &[1.0, 1.1] }.unwrap();
        let mut svg = String::new();
        let area = SVGBackend::with_string(&mut svg, (640, 480)).into_drawing_area();
        assert!(plot_quantile_portfolio(&df, "Cumulative returns", &area, &[]).is_err());
    }
}
