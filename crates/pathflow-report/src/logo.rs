//! Inline-logo encoding.
use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::ReportError;

/// Read an image file and encode it as a base64 `data:` URI usable as an
/// HTML `img` source. The MIME subtype is taken from the file extension,
/// defaulting to PNG.
pub fn logo_data_uri<P: AsRef<Path>>(path: P) -> Result<String, ReportError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| ReportError::io(path, source))?;
    Ok(format!(
        "data:{};base64,{}",
        mime_for(path),
        STANDARD.encode(&bytes)
    ))
}

fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .unwrap_or("");
    if extension.eq_ignore_ascii_case("jpg") || extension.eq_ignore_ascii_case("jpeg") {
        "image/jpeg"
    } else if extension.eq_ignore_ascii_case("gif") {
        "image/gif"
    } else if extension.eq_ignore_ascii_case("svg") {
        "image/svg+xml"
    } else {
        "image/png"
    }
}
