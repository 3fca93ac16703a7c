//! Report sheet composition and export for the Conil factor report
//! framework.
//!
//! The sheet builders compose the panel renderers of `conil-plot` into
//! fixed multi-panel grid layouts rendered to in-memory SVG; the export
//! adapters embed rendered sheets into an HTML document or drive
//! `jupyter nbconvert` for notebook-based reports.
//!
//! # Example
//!
//! ```rust,ignore
//! use conil_report::{SheetOptions, create_2x2_sheet, fig_to_img, render_html};
//!
//! let opts = SheetOptions::default();
//! let sheet = create_2x2_sheet(&df, "alpha", "fwd_ret_5", "fwd_ret_1", 5, &opts)?;
//! let html = render_html(&fig_to_img(&sheet, None));
//! std::fs::write("report.html", html)?;
//! ```

pub mod export;
pub mod notebook;
pub mod sheets;

// Re-export main entry points
pub use export::{HTML_TEMPLATE, fig_to_img, render_html};
pub use notebook::{NotebookOptions, ipynb_to_html};
pub use sheets::{
    Sheet, SheetOptions, create_1x3_sheet, create_2x2_sheet, create_2x3_sheet, create_3x2_sheet,
    grid_shape,
};
