//! Conil CLI binary.
//!
//! Builds factor report sheets from on-disk datasets and drives the
//! notebook-to-HTML converter.

mod data;

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use conil_report::{
    NotebookOptions, SheetOptions, create_1x3_sheet, create_2x2_sheet, create_2x3_sheet,
    create_3x2_sheet, fig_to_img, ipynb_to_html, render_html,
};
use conil_traits::{ASSET_COL, DATE_COL, FACTOR_QUANTILE, FactorDataset};

#[derive(Parser)]
#[command(name = "conil")]
#[command(about = "Factor report composition for equity signal research", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a report sheet from a factor dataset
    Sheet {
        /// Factor dataset (.parquet or .csv) with date/asset key columns
        data: PathBuf,

        /// Factor column name
        factor: String,

        /// Grid layout (2x2, 1x3, 2x3, 3x2)
        #[arg(short, long, default_value = "2x2")]
        layout: String,

        /// Forward-return column used for the IC panels
        #[arg(long, default_value = "fwd_ret_5")]
        fwd_ret: String,

        /// One-period forward-return column used for cumulative returns
        #[arg(long, default_value = "fwd_ret_1")]
        fwd_ret_1: String,

        /// Holding period for single-curve layouts
        #[arg(short, long, default_value = "5")]
        period: usize,

        /// Holding periods for multi-curve layouts
        #[arg(long, value_delimiter = ',', default_value = "1,5,10,20")]
        periods: Vec<usize>,

        /// Factor-quantile column name
        #[arg(short, long, default_value = FACTOR_QUANTILE)]
        quantile_col: String,

        /// Dates (YYYY-MM-DD) to mark with a vertical guide
        #[arg(long, value_delimiter = ',')]
        axvlines: Vec<String>,

        /// Output HTML file
        #[arg(short, long, default_value = "report.html")]
        output: PathBuf,
    },

    /// Render a notebook template to HTML via jupyter nbconvert
    Notebook {
        /// Notebook template (.ipynb)
        template: PathBuf,

        /// Output HTML file (defaults to the template with .html)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Strip code cells from the rendered document
        #[arg(long)]
        no_input: bool,

        /// Strip cell prompts from the rendered document
        #[arg(long)]
        no_prompt: bool,

        /// Render without executing the notebook
        #[arg(long)]
        no_execute: bool,

        /// Per-cell execution timeout in seconds
        #[arg(short, long, default_value = "120")]
        timeout: u64,

        /// Do not open the rendered document
        #[arg(long)]
        no_browser: bool,

        /// KEY=VALUE environment for the notebook process (repeatable)
        #[arg(short, long)]
        env: Vec<String>,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Sheet {
            data,
            factor,
            layout,
            fwd_ret,
            fwd_ret_1,
            period,
            periods,
            quantile_col,
            axvlines,
            output,
        } => {
            build_sheet(
                &data,
                &factor,
                &layout,
                &fwd_ret,
                &fwd_ret_1,
                period,
                &periods,
                &quantile_col,
                &axvlines,
                &output,
            )?;
        }
        Commands::Notebook {
            template,
            output,
            no_input,
            no_prompt,
            no_execute,
            timeout,
            no_browser,
            env,
        } => {
            convert_notebook(
                &template, output, no_input, no_prompt, no_execute, timeout, no_browser, &env,
            )?;
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn build_sheet(
    data: &PathBuf,
    factor: &str,
    layout: &str,
    fwd_ret: &str,
    fwd_ret_1: &str,
    period: usize,
    periods: &[usize],
    quantile_col: &str,
    axvlines: &[String],
    output: &PathBuf,
) -> Result<()> {
    let dataset = FactorDataset::new(data::load_frame(data)?);
    for col in [DATE_COL, ASSET_COL, factor, quantile_col] {
        if !dataset.has_column(col) {
            bail!("dataset {} has no column '{col}'", data.display());
        }
    }
    let df = dataset.data();

    let opts = SheetOptions {
        factor_quantile: quantile_col.to_string(),
        axvlines: parse_dates(axvlines)?,
        ..SheetOptions::default()
    };

    let sheet = match layout {
        "2x2" => create_2x2_sheet(df, factor, fwd_ret, fwd_ret_1, period, &opts)?,
        "1x3" => {
            let (sheet, ic_summary, hist_summary, _) =
                create_1x3_sheet(df, factor, fwd_ret, fwd_ret_1, period, &opts)?;
            for (name, value) in ic_summary.iter().chain(hist_summary.iter()) {
                println!("{name}: {value:.4}");
            }
            sheet
        }
        "2x3" => create_2x3_sheet(df, factor, fwd_ret, fwd_ret_1, periods, &opts)?,
        "3x2" => create_3x2_sheet(df, factor, fwd_ret, fwd_ret_1, period, periods, &opts)?,
        other => bail!("unknown layout '{other}': expected 2x2, 1x3, 2x3 or 3x2"),
    };

    let html = render_html(&fig_to_img(&sheet, None));
    std::fs::write(output, html).with_context(|| format!("writing {}", output.display()))?;
    println!("Wrote {}", output.display());

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn convert_notebook(
    template: &PathBuf,
    output: Option<PathBuf>,
    no_input: bool,
    no_prompt: bool,
    no_execute: bool,
    timeout: u64,
    no_browser: bool,
    env: &[String],
) -> Result<()> {
    let opts = NotebookOptions {
        output,
        no_input,
        no_prompt,
        execute: !no_execute,
        timeout_secs: timeout,
        open_browser: !no_browser,
        env: parse_env(env)?,
    };

    let code = ipynb_to_html(template, &opts)?;
    if code != 0 {
        eprintln!("nbconvert exited with code {code}");
    }

    Ok(())
}

fn parse_dates(raw: &[String]) -> Result<Vec<NaiveDate>> {
    raw.iter()
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .with_context(|| format!("invalid date '{s}': expected YYYY-MM-DD"))
        })
        .collect()
}

fn parse_env(raw: &[String]) -> Result<Vec<(String, String)>> {
    raw.iter()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
            _ => bail!("invalid env pair '{pair}': expected KEY=VALUE"),
        })
        .collect()
}
