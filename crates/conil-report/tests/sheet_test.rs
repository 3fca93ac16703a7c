//! End-to-end sheet building on a synthetic factor dataset.

use chrono::Duration;
use conil_analytics::frame;
use conil_report::{
    NotebookOptions, SheetOptions, create_1x3_sheet, create_2x2_sheet, create_2x3_sheet,
    create_3x2_sheet, fig_to_img, ipynb_to_html, render_html,
};
use conil_traits::{ASSET_COL, ConilError, DATE_COL, Date, FACTOR_QUANTILE};
use polars::prelude::*;

const ASSETS: [&str; 9] = ["A", "B", "C", "D", "E", "F", "G", "H", "I"];

/// Deterministic noise in [-0.5, 0.5).
fn noise(seed: usize) -> f64 {
    ((seed as f64 * 12.9898).sin() * 43758.5453).fract() - 0.5
}

/// Synthetic dataset where the factor genuinely predicts returns: asset
/// i carries factor ~i and earns roughly (i - 4) * 10 bps per day, so
/// high buckets outperform and the IC is positive on average.
fn synthetic_df(days: i64) -> DataFrame {
    let start = Date::from_ymd_opt(2024, 1, 2).unwrap();
    let mut dates = Vec::new();
    let mut assets = Vec::new();
    let mut factors = Vec::new();
    let mut ret1 = Vec::new();
    let mut ret5 = Vec::new();
    let mut quants = Vec::new();
    for day in 0..days {
        for (i, asset) in ASSETS.iter().enumerate() {
            let seed = (day as usize) * ASSETS.len() + i;
            let factor = i as f64 + 0.3 * noise(seed);
            let edge = (i as f64 - 4.0) * 0.001;
            dates.push(start + Duration::days(day));
            assets.push(*asset);
            factors.push(factor);
            ret1.push(edge + 0.0005 * noise(seed + 1));
            ret5.push(5.0 * edge + 0.001 * noise(seed + 2));
            quants.push((i / 3) as i32 + 1);
        }
    }
    DataFrame::new(vec![
        frame::date_column(DATE_COL, &dates).unwrap(),
        Column::new(ASSET_COL.into(), assets),
        Column::new("alpha".into(), factors),
        Column::new("fwd_ret_1".into(), ret1),
        Column::new("fwd_ret_5".into(), ret5),
        Column::new(FACTOR_QUANTILE.into(), quants),
    ])
    .unwrap()
}

fn curve(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name)
        .unwrap()
        .as_materialized_series()
        .f64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect()
}

#[test]
fn test_1x3_sheet_end_to_end() {
    let df = synthetic_df(60);
    let opts = SheetOptions::default();
    let (sheet, ic_summary, hist_summary, df_cum) =
        create_1x3_sheet(&df, "alpha", "fwd_ret_5", "fwd_ret_1", 5, &opts).unwrap();

    assert!(sheet.svg.contains("<svg"));
    assert_eq!((sheet.width, sheet.height), opts.figsize);

    // The factor predicts returns, so the mean IC is positive.
    assert!(ic_summary.get("ic_mean").unwrap() > 0.0);
    assert!(ic_summary.get("ic_positive_ratio").unwrap() > 0.5);
    assert!(hist_summary.get("std").unwrap() > 0.0);

    // Curves start at 1.0 and the top bucket ends above the bottom one.
    let low = curve(&df_cum, "q1");
    let high = curve(&df_cum, "q3");
    assert!((low[0] - 1.0).abs() < 1e-12);
    assert!((high[0] - 1.0).abs() < 1e-12);
    assert!(high[high.len() - 1] > low[low.len() - 1]);
}

#[test]
fn test_axvlines_are_cosmetic_only() {
    let df = synthetic_df(40);
    let plain = SheetOptions::default();
    let marked = SheetOptions {
        axvlines: vec![
            Date::from_ymd_opt(2024, 1, 15).unwrap(),
            // Not in the dataset; must be skipped silently.
            Date::from_ymd_opt(1999, 12, 31).unwrap(),
        ],
        ..SheetOptions::default()
    };

    let (_, ic_a, hist_a, cum_a) =
        create_1x3_sheet(&df, "alpha", "fwd_ret_5", "fwd_ret_1", 5, &plain).unwrap();
    let (_, ic_b, hist_b, cum_b) =
        create_1x3_sheet(&df, "alpha", "fwd_ret_5", "fwd_ret_1", 5, &marked).unwrap();

    assert_eq!(ic_a.get("ic_mean"), ic_b.get("ic_mean"));
    assert_eq!(hist_a.get("mean"), hist_b.get("mean"));
    assert_eq!(curve(&cum_a, "q3"), curve(&cum_b, "q3"));
}

#[test]
fn test_2x2_sheet_renders() {
    let df = synthetic_df(60);
    let sheet =
        create_2x2_sheet(&df, "alpha", "fwd_ret_5", "fwd_ret_1", 5, &SheetOptions::default())
            .unwrap();
    assert!(sheet.svg.contains("<svg"));
    assert!(sheet.svg.contains("Cumulative returns P5"));
}

#[test]
fn test_2x3_sheet_one_panel_per_period() {
    let df = synthetic_df(60);
    let sheet = create_2x3_sheet(
        &df,
        "alpha",
        "fwd_ret_5",
        "fwd_ret_1",
        &[2, 5, 10],
        &SheetOptions::default(),
    )
    .unwrap();
    for period in [2, 5, 10] {
        assert!(sheet.svg.contains(&format!("Cumulative returns P{period}")));
    }
}

#[test]
fn test_3x2_sheet_uses_max_bucket_turnover() {
    let df = synthetic_df(60);
    let sheet = create_3x2_sheet(
        &df,
        "alpha",
        "fwd_ret_5",
        "fwd_ret_1",
        5,
        &[1, 5, 10],
        &SheetOptions::default(),
    )
    .unwrap();
    // Three buckets in the synthetic data; the turnover panel shows the top one.
    assert!(sheet.svg.contains("Turnover quantile 3"));
    assert!(sheet.svg.contains("Factor autocorrelation"));
}

#[test]
fn test_3x2_max_bucket_independent_of_row_order() {
    let df = synthetic_df(30)
        .lazy()
        .sort([ASSET_COL], SortMultipleOptions::default().with_order_descending(true))
        .collect()
        .unwrap();
    let sheet = create_3x2_sheet(
        &df,
        "alpha",
        "fwd_ret_5",
        "fwd_ret_1",
        5,
        &[1, 5],
        &SheetOptions::default(),
    )
    .unwrap();
    assert!(sheet.svg.contains("Turnover quantile 3"));
}

#[test]
fn test_html_report_embeds_sheet() {
    let df = synthetic_df(40);
    let sheet =
        create_2x2_sheet(&df, "alpha", "fwd_ret_5", "fwd_ret_1", 5, &SheetOptions::default())
            .unwrap();
    let html = render_html(&fig_to_img(&sheet, None));
    assert!(html.contains("data:image/svg+xml;base64,"));
    assert!(!html.contains("{{body}}"));
}

#[test]
fn test_notebook_template_extension_checked() {
    let err = ipynb_to_html(std::path::Path::new("template.html"), &NotebookOptions::default())
        .unwrap_err();
    assert!(matches!(err, ConilError::InvalidTemplate(_)));
}
