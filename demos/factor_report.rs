//! Build a 2x2 factor report sheet from synthetic data.
//!
//! This example demonstrates:
//! - Assembling a factor dataset (date, asset, factor, forward returns,
//!   quantile buckets) as a polars DataFrame
//! - Building the 2x2 overview sheet
//! - Writing a standalone HTML report with the figure embedded inline

use chrono::Duration;
use conil::prelude::*;
use polars::prelude::*;

/// Asset universe of the synthetic dataset.
const UNIVERSE: &[&str] = &["AAPL", "MSFT", "GOOGL", "AMZN", "META", "NVDA", "TSLA", "JPM"];

/// Trading days to simulate.
const DAYS: i64 = 120;

/// Quantile bucket count.
const BUCKETS: usize = 4;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let df = synthetic_dataset();
    println!("Dataset: {} rows", df.height());

    let opts = SheetOptions {
        axvlines: vec![Date::from_ymd_opt(2024, 3, 1).ok_or("bad date")?],
        ..SheetOptions::default()
    };
    let sheet = create_2x2_sheet(&df, "momentum", "fwd_ret_5", "fwd_ret_1", 5, &opts)?;

    let html = render_html(&fig_to_img(&sheet, None));
    std::fs::write("factor_report.html", html)?;
    println!("Wrote factor_report.html ({}x{})", sheet.width, sheet.height);

    Ok(())
}

/// Deterministic pseudo-noise in [-0.5, 0.5).
fn noise(seed: usize) -> f64 {
    ((seed as f64 * 12.9898).sin() * 43758.5453).fract() - 0.5
}

/// A dataset where the momentum factor weakly predicts forward returns.
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
            dates.push(start + Duration::days(day));
            assets.push(*symbol);
            factors.push(strength + 0.4 * noise(seed));
            ret1.push(0.004 * strength + 0.002 * noise(seed + 1));
            ret5.push(0.02 * strength + 0.004 * noise(seed + 2));
            quantiles.push((i * BUCKETS / n) as i32 + 1);
        }
    }

    DataFrame::new(vec![
        conil::analytics::frame::date_column("date", &dates).expect("date column"),
        Column::new("asset".into(), assets),
        Column::new("momentum".into(), factors),
        Column::new("fwd_ret_1".into(), ret1),
        Column::new("fwd_ret_5".into(), ret5),
        Column::new(FACTOR_QUANTILE.into(), quantiles),
    ])
    .expect("valid dataframe")
}
