//! Notebook-to-HTML export via `jupyter nbconvert`.

use std::path::{Path, PathBuf};
use std::process::Command;

use conil_traits::{ConilError, Result};

/// Options of [`ipynb_to_html`].
#[derive(Debug, Clone)]
pub struct NotebookOptions {
    /// Output path; `None` replaces the template extension with `.html`.
    pub output: Option<PathBuf>,
    /// Strip code cells from the rendered document.
    pub no_input: bool,
    /// Strip cell prompts from the rendered document.
    pub no_prompt: bool,
    /// Execute the notebook before rendering.
    pub execute: bool,
    /// Per-cell execution timeout in seconds.
    pub timeout_secs: u64,
    /// Open the rendered document on success.
    pub open_browser: bool,
    /// Extra environment for the notebook process. Keys are upper-cased
    /// and scoped to the child; the parent environment is never touched.
    pub env: Vec<(String, String)>,
}

impl Default for NotebookOptions {
    fn default() -> Self {
        Self {
            output: None,
            no_input: false,
            no_prompt: false,
            execute: true,
            timeout_secs: 120,
            open_browser: true,
            env: Vec::new(),
        }
    }
}

/// Render a parameterized notebook template to HTML.
///
/// Runs `jupyter nbconvert --to=html` on `template` and returns the raw
/// exit code of the converter; a non-zero code is reported, not turned
/// into an error, since `--allow-errors` renders partial output. On exit
/// code 0 with `open_browser` set, the rendered document is opened with
/// the platform opener on a best-effort basis.
///
/// # Errors
///
/// Fails with [`ConilError::InvalidTemplate`] before any process is
/// spawned when `template` does not end in `.ipynb`, and with
/// [`ConilError::Io`] when the converter cannot be launched.
pub fn ipynb_to_html(template: &Path, opts: &NotebookOptions) -> Result<i32> {
    if template.extension().and_then(|e| e.to_str()) != Some("ipynb") {
        return Err(ConilError::InvalidTemplate(format!(
            "notebook template must end in .ipynb: {}",
            template.display()
        )));
    }

    let output = match &opts.output {
        Some(path) => path.clone(),
        None => template.with_extension("html"),
    };

    let mut cmd = Command::new("jupyter");
    cmd.arg("nbconvert")
        .arg(template)
        .arg("--to=html")
        .arg(format!("--output={}", output.display()));
    if opts.no_input {
        cmd.arg("--no-input");
    }
    if opts.no_prompt {
        cmd.arg("--no-prompt");
    }
    if opts.execute {
        cmd.arg("--execute");
    }
    cmd.arg("--allow-errors")
        .arg(format!("--ExecutePreprocessor.timeout={}", opts.timeout_secs));
    cmd.envs(opts.env.iter().map(|(k, v)| (k.to_uppercase(), v.clone())));

    let status = cmd.status()?;
    let code = status.code().unwrap_or(-1);

    if code == 0 && opts.open_browser {
        open_in_browser(&output);
    }

    Ok(code)
}

/// Best-effort platform opener; failures are ignored.
fn open_in_browser(path: &Path) {
    #[cfg(target_os = "linux")]
    let _ = Command::new("xdg-open").arg(path).spawn();
    #[cfg(target_os = "macos")]
    let _ = Command::new("open").arg(path).spawn();
    #[cfg(target_os = "windows")]
    let _ = Command::new("cmd").args(["/C", "start", ""]).arg(path).spawn();
}
