//! Sankey figure generation from labelled flows.
use plotly::sankey::{Line as SankeyLine, Link, Node};
use plotly::{Plot, Sankey};

use crate::error::ReportError;

const NODE_COLOR: &str = "#edae49";
const LINK_COLOR: &str = "rgba(70, 130, 180, 0.5)";

/// A weighted flow between two labelled nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct SankeyLinkDef {
    pub source: String,
    pub target: String,
    pub value: f64,
}

impl SankeyLinkDef {
    pub fn new(source: impl Into<String>, target: impl Into<String>, value: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value,
        }
    }
}

/// Build a sankey figure from node labels and weighted links.
///
/// Link endpoints are resolved against `labels`; a link naming a label that
/// is not present is an error. The figure is returned for the caller to
/// pass to the HTML combiner, nothing is written here.
pub fn sankey_figure(labels: &[String], links: &[SankeyLinkDef]) -> Result<Plot, ReportError> {
    let mut sources = Vec::with_capacity(links.len());
    let mut targets = Vec::with_capacity(links.len());
    let mut values: Vec<f64> = Vec::with_capacity(links.len());
    for link in links {
        sources.push(index_of(labels, &link.source)?);
        targets.push(index_of(labels, &link.target)?);
        values.push(link.value);
    }

    let node = Node::new()
        .pad(15)
        .thickness(10)
        .line(SankeyLine::new().color("black").width(0.5))
        .label(labels.iter().map(String::as_str).collect())
        .color(NODE_COLOR);
    let link = Link::new()
        .source(sources)
        .target(targets)
        .value(values)
        .color(LINK_COLOR);

    let mut plot = Plot::new();
    plot.add_trace(Sankey::new().node(node).link(link));
    Ok(plot)
}

fn index_of(labels: &[String], label: &str) -> Result<usize, ReportError> {
    labels
        .iter()
        .position(|candidate| candidate == label)
        .ok_or_else(|| ReportError::UnknownNodeLabel(label.to_string()))
}
