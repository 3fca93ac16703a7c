//! Multi-panel report sheet orchestrators.
//!
//! Each builder derives every analytic series exactly once from the
//! input dataset, splits an in-memory SVG surface into a fixed grid, and
//! dispatches panels to slots in a fixed order. Slots beyond the last
//! panel stay blank.

use conil_traits::{ConilError, Date, FACTOR_QUANTILE, PanelSummary, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use polars::prelude::*;

use conil_analytics::{
    calc_auto_correlation, calc_cum_return_by_quantile, calc_ic, calc_quantile_turnover,
    max_quantile,
};
use conil_plot::{
    plot_factor_auto_correlation, plot_hist, plot_ic_heatmap_monthly, plot_ic_ts,
    plot_quantile_portfolio, plot_turnover_quantile,
};

/// One rendered report figure.
#[derive(Debug, Clone)]
pub struct Sheet {
    /// The SVG document.
    pub svg: String,
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
}

/// Shared knobs of the sheet builders.
#[derive(Debug, Clone)]
pub struct SheetOptions {
    /// Name of the factor-quantile column.
    pub factor_quantile: String,
    /// Figure size in pixels.
    pub figsize: (u32, u32),
    /// Dates to mark with a vertical guide on every time-series panel.
    /// Dates outside a panel's time index are skipped silently.
    pub axvlines: Vec<Date>,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            factor_quantile: FACTOR_QUANTILE.to_string(),
            figsize: (1200, 800),
            axvlines: Vec::new(),
        }
    }
}

/// Grid shape for a two-row layout holding `panels` panels.
pub fn grid_shape(panels: usize) -> (usize, usize) {
    (2, panels.div_ceil(2))
}

fn draw_err<E: std::fmt::Display>(e: E) -> ConilError {
    ConilError::Draw(e.to_string())
}

/// Splits a fresh SVG surface into a grid of panel areas.
fn grid_areas<'a>(
    svg: &'a mut String,
    figsize: (u32, u32),
    rows: usize,
    cols: usize,
) -> Result<Vec<DrawingArea<SVGBackend<'a>, Shift>>> {
    let root = SVGBackend::with_string(svg, figsize).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;
    Ok(root.split_evenly((rows, cols)))
}

/// Flushes the shared backend so the backing SVG string is complete.
fn present_areas<DB: DrawingBackend>(areas: &[DrawingArea<DB, Shift>]) -> Result<()> {
    if let Some(area) = areas.first() {
        area.present().map_err(draw_err)?;
    }
    Ok(())
}

fn ic_pair_column(factor: &str, forward_return: &str) -> String {
    format!("{factor}__{forward_return}")
}

/// Build the 2x2 overview sheet.
///
/// Panels in order: IC time series, monthly IC heatmap, factor value
/// histogram, quantile cumulative returns for `period`.
pub fn create_2x2_sheet(
    df: &DataFrame,
    factor: &str,
    forward_return: &str,
    fwd_ret_1: &str,
    period: usize,
    opts: &SheetOptions,
) -> Result<Sheet> {
    let df_ic = calc_ic(df, &[factor], &[forward_return])?;
    let ic_col = ic_pair_column(factor, forward_return);
    let df_cum = calc_cum_return_by_quantile(df, fwd_ret_1, period, &opts.factor_quantile)?;

    let mut svg = String::new();
    {
        let areas = grid_areas(&mut svg, opts.figsize, 2, 2)?;
        plot_ic_ts(&df_ic, &ic_col, &areas[0], &opts.axvlines)?;
        plot_ic_heatmap_monthly(&df_ic, &ic_col, &areas[1])?;
        plot_hist(df, factor, &areas[2])?;
        plot_quantile_portfolio(
            &df_cum,
            &format!("Cumulative returns P{period}"),
            &areas[3],
            &opts.axvlines,
        )?;
        present_areas(&areas)?;
    }

    Ok(Sheet {
        svg,
        width: opts.figsize.0,
        height: opts.figsize.1,
    })
}

/// Build the compact 1x3 sheet.
///
/// Panels in order: IC time series, quantile cumulative returns for
/// `period`, factor value histogram.
///
/// # Returns
///
/// The figure, the IC panel summary, the histogram panel summary, and
/// the cumulative-return curves the middle panel was drawn from.
pub fn create_1x3_sheet(
    df: &DataFrame,
    factor: &str,
    forward_return: &str,
    fwd_ret_1: &str,
    period: usize,
    opts: &SheetOptions,
) -> Result<(Sheet, PanelSummary, PanelSummary, DataFrame)> {
    let df_ic = calc_ic(df, &[factor], &[forward_return])?;
    let ic_col = ic_pair_column(factor, forward_return);
    let df_cum = calc_cum_return_by_quantile(df, fwd_ret_1, period, &opts.factor_quantile)?;

    let mut svg = String::new();
    let (ic_summary, hist_summary) = {
        let areas = grid_areas(&mut svg, opts.figsize, 1, 3)?;
        let ic_summary = plot_ic_ts(&df_ic, &ic_col, &areas[0], &opts.axvlines)?;
        plot_quantile_portfolio(
            &df_cum,
            &format!("Cumulative returns P{period}"),
            &areas[1],
            &opts.axvlines,
        )?;
        let hist_summary = plot_hist(df, factor, &areas[2])?;
        present_areas(&areas)?;
        (ic_summary, hist_summary)
    };

    let sheet = Sheet {
        svg,
        width: opts.figsize.0,
        height: opts.figsize.1,
    };
    Ok((sheet, ic_summary, hist_summary, df_cum))
}

/// Build the 2xN horizon-comparison sheet.
///
/// Panels in order: IC time series, IC distribution histogram, monthly
/// IC heatmap, then one cumulative-return panel per entry of `periods`.
/// The grid has 2 rows and `ceil((3 + len(periods)) / 2)` columns; an odd
/// panel count leaves the last slot blank.
pub fn create_2x3_sheet(
    df: &DataFrame,
    factor: &str,
    forward_return: &str,
    fwd_ret_1: &str,
    periods: &[usize],
    opts: &SheetOptions,
) -> Result<Sheet> {
    let df_ic = calc_ic(df, &[factor], &[forward_return])?;
    let ic_col = ic_pair_column(factor, forward_return);
    let curves: Vec<(usize, DataFrame)> = periods
        .iter()
        .map(|&p| {
            calc_cum_return_by_quantile(df, fwd_ret_1, p, &opts.factor_quantile)
                .map(|c| (p, c))
        })
        .collect::<Result<_>>()?;

    let (rows, cols) = grid_shape(3 + periods.len());
    let mut svg = String::new();
    {
        let areas = grid_areas(&mut svg, opts.figsize, rows, cols)?;
        plot_ic_ts(&df_ic, &ic_col, &areas[0], &opts.axvlines)?;
        plot_hist(&df_ic, &ic_col, &areas[1])?;
        plot_ic_heatmap_monthly(&df_ic, &ic_col, &areas[2])?;
        for (slot, (period, df_cum)) in curves.iter().enumerate() {
            plot_quantile_portfolio(
                df_cum,
                &format!("Cumulative returns P{period}"),
                &areas[3 + slot],
                &opts.axvlines,
            )?;
        }
        present_areas(&areas)?;
    }

    Ok(Sheet {
        svg,
        width: opts.figsize.0,
        height: opts.figsize.1,
    })
}

/// Build the 3x2 stability sheet.
///
/// Panels in order: IC time series, IC distribution histogram, monthly
/// IC heatmap, quantile cumulative returns for `period`, factor
/// autocorrelation over `periods`, and turnover of the maximum quantile
/// bucket present in the data over `periods`.
pub fn create_3x2_sheet(
    df: &DataFrame,
    factor: &str,
    forward_return: &str,
    fwd_ret_1: &str,
    period: usize,
    periods: &[usize],
    opts: &SheetOptions,
) -> Result<Sheet> {
    let df_ic = calc_ic(df, &[factor], &[forward_return])?;
    let ic_col = ic_pair_column(factor, forward_return);
    let df_cum = calc_cum_return_by_quantile(df, fwd_ret_1, period, &opts.factor_quantile)?;
    let df_ac = calc_auto_correlation(df, factor, periods)?;
    let df_turnover = calc_quantile_turnover(df, periods, &opts.factor_quantile)?;
    let q_max = max_quantile(&df_turnover, &opts.factor_quantile)?;

    let mut svg = String::new();
    {
        let areas = grid_areas(&mut svg, opts.figsize, 3, 2)?;
        plot_ic_ts(&df_ic, &ic_col, &areas[0], &opts.axvlines)?;
        plot_hist(&df_ic, &ic_col, &areas[1])?;
        plot_ic_heatmap_monthly(&df_ic, &ic_col, &areas[2])?;
        plot_quantile_portfolio(
            &df_cum,
            &format!("Cumulative returns P{period}"),
            &areas[3],
            &opts.axvlines,
        )?;
        plot_factor_auto_correlation(&df_ac, &areas[4], &opts.axvlines)?;
        plot_turnover_quantile(
            &df_turnover,
            q_max,
            &opts.factor_quantile,
            &areas[5],
            &opts.axvlines,
        )?;
        present_areas(&areas)?;
    }

    Ok(Sheet {
        svg,
        width: opts.figsize.0,
        height: opts.figsize.1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_shape_arithmetic() {
        // 3 fixed panels + one per period.
        assert_eq!(grid_shape(3 + 3), (2, 3));
        assert_eq!(grid_shape(3 + 1), (2, 2));
        assert_eq!(grid_shape(3 + 4), (2, 4));
        assert_eq!(grid_shape(5), (2, 3));
    }

    #[test]
    fn test_sheet_options_default() {
        let opts = SheetOptions::default();
        assert_eq!(opts.factor_quantile, FACTOR_QUANTILE);
        assert!(opts.axvlines.is_empty());
    }

    #[test]
    fn test_ic_pair_column() {
        assert_eq!(ic_pair_column("alpha", "fwd_ret_5"), "alpha__fwd_ret_5");
    }
}
