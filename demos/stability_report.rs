//! Build the 3x2 stability sheet and inspect the analytic series.
//!
//! This example demonstrates:
//! - Deriving the IC, turnover and autocorrelation series directly
//! - Building the 3x2 sheet with turnover of the top quantile bucket
//! - Printing the IC summary statistics of the same dataset

use chrono::Duration;
use conil::analytics::frame;
use conil::prelude::*;
use polars::prelude::*;

const UNIVERSE: &[&str] = &["AAPL", "MSFT", "GOOGL", "AMZN", "META", "NVDA"];
const DAYS: i64 = 90;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let df = synthetic_dataset();
    let periods = [1usize, 5, 10];

    // The analytic series behind the panels are plain DataFrames.
    let turnover = calc_quantile_turnover(&df, &periods, FACTOR_QUANTILE)?;
    let ac = calc_auto_correlation(&df, "reversal", &periods)?;
    println!("turnover rows: {}, autocorrelation rows: {}", turnover.height(), ac.height());

    let sheet = create_3x2_sheet(
        &df,
        "reversal",
        "fwd_ret_5",
        "fwd_ret_1",
        5,
        &periods,
        &SheetOptions::default(),
    )?;
    std::fs::write(
        "stability_report.html",
        render_html(&fig_to_img(&sheet, None)),
    )?;
    println!("Wrote stability_report.html");

    Ok(())
}

fn noise(seed: usize) -> f64 {
    ((seed as f64 * 78.233).sin() * 43758.5453).fract() - 0.5
}

fn synthetic_dataset() -> DataFrame {
    let start = Date::from_ymd_opt(2024, 1, 2).expect("valid date");
    let n = UNIVERSE.len();

    let mut dates = Vec::new();
    let mut assets = Vec::new();
    let mut factors = Vec::new();
    let mut ret1 = Vec::new();
    let mut ret5 = Vec::new();
    let mut quantiles = Vec::new();

    for day in 0..DAYS {
        for (i, symbol) in UNIVERSE.iter().enumerate() {
            let seed = day as usize * n + i;
            let strength = i as f64 / (n - 1) as f64 - 0.5;
            // A slowly drifting factor so buckets churn over time.
            let drift = ((day as f64 / 15.0) + i as f64).sin() * 0.3;
            let factor = strength + drift + 0.2 * noise(seed);
            dates.push(start + Duration::days(day));
            assets.push(*symbol);
            factors.push(factor);
            ret1.push(0.003 * factor + 0.002 * noise(seed + 1));
            ret5.push(0.015 * factor + 0.004 * noise(seed + 2));
            quantiles.push((factor * 2.0).round().clamp(-1.0, 1.0) as i32 + 2);
        }
    }

    DataFrame::new(vec![
        frame::date_column("date", &dates).expect("date column"),
        Column::new("asset".into(), assets),
        Column::new("reversal".into(), factors),
        Column::new("fwd_ret_1".into(), ret1),
        Column::new("fwd_ret_5".into(), ret5),
        Column::new(FACTOR_QUANTILE.into(), quantiles),
    ])
    .expect("valid dataframe")
}
