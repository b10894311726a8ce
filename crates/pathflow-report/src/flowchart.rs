//! Static HTML pages hosting a mermaid flowchart.
use std::fs;
use std::path::Path;

use maud::{html, PreEscaped, DOCTYPE};

use crate::error::ReportError;

const NODE_CSS: &str = "\
.node rect {
    fill: #edae49 !important;
    stroke: #edae49 !important;
}
";

const MERMAID_BOOT: &str = "\
import mermaid from 'https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.esm.min.mjs';
mermaid.initialize({ startOnLoad: true });
";

/// Wrap an already-formatted mermaid source string (including its
/// `graph TD` header line) in a self-contained HTML page.
pub fn mermaid_page(diagram: &str) -> String {
    let page = html! {
        (DOCTYPE)
        html {
            body {
                style { (PreEscaped(NODE_CSS)) }
                pre class="mermaid" { (diagram) }
                script type="module" { (PreEscaped(MERMAID_BOOT)) }
            }
        }
    };
    page.into_string()
}

/// Render `diagram` as a mermaid page and write it to `path`.
pub fn write_mermaid_page<P: AsRef<Path>>(path: P, diagram: &str) -> Result<(), ReportError> {
    let path = path.as_ref();
    fs::write(path, mermaid_page(diagram)).map_err(|source| ReportError::io(path, source))?;
    log::debug!("wrote mermaid flowchart to {}", path.display());
    Ok(())
}
