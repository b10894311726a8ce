//! pathflow-report: HTML assembly for patient-flow figures.
//!
//! This crate turns in-memory Plotly figures into a single HTML artifact:
//! the combiner writes one file holding every figure (the first as a full
//! document, the rest as fragments), the logo helpers inline an image as a
//! base64 data URI, and the header injector splices a static document shell
//! in front of a previously written report. Two figure sources used by the
//! simulation tooling live here as well: sankey diagrams built from labelled
//! flows, and mermaid flowchart pages.
//!
//! Everything is synchronous and file-handle-per-call; there is no report
//! framework or templating layer behind these functions.
pub mod error;
pub mod flowchart;
pub mod html;
pub mod logo;
pub mod sankey;
