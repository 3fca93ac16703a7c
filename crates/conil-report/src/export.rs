//! HTML report assembly.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::sheets::Sheet;

/// Minimal report document wrapping a caller-supplied body.
pub const HTML_TEMPLATE: &str = r#"<html>
<head>
<style>
table { border-collapse: collapse; }
img { border: 1px solid #ccc; }
</style>
</head>
<body>
{{body}}
</body>
</html>
"#;

/// Substitute `body` into [`HTML_TEMPLATE`].
pub fn render_html(body: &str) -> String {
    HTML_TEMPLATE.replace("{{body}}", body)
}

/// Encode a sheet as an inline `<img>` tag with a base64 data URI.
///
/// `format` is the image subtype of the data URI; `None` uses `svg+xml`,
/// which is what the sheet builders produce. Callers embedding an
/// externally produced raster must pass its subtype (for example
/// `Some("png")`) explicitly. No file is written.
pub fn fig_to_img(sheet: &Sheet, format: Option<&str>) -> String {
    let format = format.unwrap_or("svg+xml");
    let payload = STANDARD.encode(sheet.svg.as_bytes());
    format!("<img src=\"data:image/{format};base64,{payload}\" />")
}
