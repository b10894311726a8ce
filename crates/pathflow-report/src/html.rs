//! Combine figures into one HTML file and splice a logo header in front.
//!
//! The combiner delegates per-figure serialization to Plotly's own HTML
//! export: the first figure is written as a complete document, every later
//! figure as a fragment, with an optional separator string between adjacent
//! parts. The header injector performs a read-modify-write of the same file
//! to prepend a static shell with an inline-encoded logo.
use std::fs;
use std::path::Path;

use maud::{html, PreEscaped, DOCTYPE};
use plotly::Plot;

use crate::error::ReportError;

const HEADER_CSS: &str = "\
body { font-family: 'Segoe UI', Arial, sans-serif; margin: 0; }
.report-header { display: flex; align-items: center; gap: 16px; padding: 12px 24px; border-bottom: 2px solid #edae49; }
.report-header h1 { font-size: 1.4em; margin: 0; }
.report-logo { height: 64px; }
";

/// Write `figures` to a single HTML file at `path`.
///
/// The first figure is exported as a full HTML document and subsequent
/// figures as embeddable fragments. When `separator` is given it is placed
/// between adjacent parts. `heights` optionally overrides each figure's
/// pixel height and must then contain one entry per figure.
pub fn write_figures_html<P: AsRef<Path>>(
    figures: &[Plot],
    path: P,
    separator: Option<&str>,
    heights: Option<&[usize]>,
) -> Result<(), ReportError> {
    let path = path.as_ref();
    if figures.is_empty() {
        return Err(ReportError::NoFigures);
    }
    if let Some(heights) = heights {
        if heights.len() != figures.len() {
            return Err(ReportError::HeightCountMismatch {
                figures: figures.len(),
                heights: heights.len(),
            });
        }
    }

    let mut parts = Vec::with_capacity(figures.len());
    for (idx, figure) in figures.iter().enumerate() {
        let part = match heights.map(|heights| heights[idx]) {
            Some(height) => {
                let mut sized = figure.clone();
                let layout = sized.layout().clone().height(height);
                sized.set_layout(layout);
                export_figure(&sized, idx == 0)
            }
            None => export_figure(figure, idx == 0),
        };
        parts.push(part);
    }

    let document = parts.join(separator.unwrap_or(""));
    fs::write(path, document).map_err(|source| ReportError::io(path, source))?;
    log::debug!("wrote {} figure(s) to {}", figures.len(), path.display());
    Ok(())
}

fn export_figure(figure: &Plot, full_document: bool) -> String {
    if full_document {
        figure.to_html()
    } else {
        figure.to_inline_html(None)
    }
}

/// Prepend a static header (inline CSS, inlined logo, title) to an HTML
/// file previously written by [`write_figures_html`].
///
/// The existing file content is preserved verbatim after the header.
pub fn prepend_logo_header<P: AsRef<Path>>(
    path: P,
    logo_data_uri: &str,
    title: &str,
) -> Result<(), ReportError> {
    let path = path.as_ref();
    let body = fs::read_to_string(path).map_err(|source| ReportError::io(path, source))?;

    let header = html! {
        (DOCTYPE)
        head {
            meta charset="utf-8";
            title { (title) }
            style { (PreEscaped(HEADER_CSS)) }
        }
        div class="report-header" {
            img class="report-logo" src=(logo_data_uri) alt="logo";
            h1 { (title) }
        }
    };

    let mut document = header.into_string();
    document.push('\n');
    document.push_str(&body);
    fs::write(path, document).map_err(|source| ReportError::io(path, source))?;
    log::debug!("prepended logo header to {}", path.display());
    Ok(())
}
