//! Factor dataset loading for the Conil CLI.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};
use polars::prelude::*;

/// Load a factor dataset from a parquet or CSV file.
///
/// The format is picked by extension. CSV files get date parsing enabled
/// so the `date` column comes back with the Date dtype.
pub(crate) fn load_frame(path: &Path) -> Result<DataFrame> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();

    let df = match ext.as_str() {
        "parquet" => {
            let file =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            ParquetReader::new(file).finish()?
        }
        "csv" => CsvReadOptions::default()
            .with_parse_options(CsvParseOptions::default().with_try_parse_dates(true))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?,
        other => bail!("unsupported data format '{other}': expected .parquet or .csv"),
    };

    Ok(df)
}
