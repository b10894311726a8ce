//! Integration tests for the sankey and mermaid figure sources.

use pathflow_report::error::ReportError;
use pathflow_report::flowchart::{mermaid_page, write_mermaid_page};
use pathflow_report::sankey::{sankey_figure, SankeyLinkDef};

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[test]
fn sankey_embeds_labels_and_values() {
    let labels = labels(&["Arrive", "Ward", "Home"]);
    let links = vec![
        SankeyLinkDef::new("Arrive", "Ward", 10.0),
        SankeyLinkDef::new("Ward", "Home", 7.0),
    ];

    let figure = sankey_figure(&labels, &links).unwrap();
    let fragment = figure.to_inline_html(Some("sankey-test"));
    assert!(fragment.contains("Arrive"));
    assert!(fragment.contains("Ward"));
    assert!(fragment.contains("Home"));
    assert!(fragment.contains("sankey"));
}

#[test]
fn sankey_rejects_unknown_link_endpoint() {
    let labels = labels(&["Arrive", "Ward"]);
    let links = vec![SankeyLinkDef::new("Arrive", "Hom", 1.0)];
    let result = sankey_figure(&labels, &links);
    assert!(matches!(
        result.err(),
        Some(ReportError::UnknownNodeLabel(label)) if label == "Hom"
    ));
}

#[test]
fn sankey_with_no_links_still_renders_nodes() {
    let labels = labels(&["Arrive"]);
    let links: Vec<SankeyLinkDef> = Vec::new();
    let figure = sankey_figure(&labels, &links).unwrap();
    assert!(figure.to_inline_html(Some("empty-sankey")).contains("Arrive"));
}

#[test]
fn mermaid_page_carries_diagram_and_boot_script() {
    let page = mermaid_page("graph TD\n    0[\"Arrive\"] --> 1[\"Ward\"]");
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("<pre class=\"mermaid\">"));
    assert!(page.contains("graph TD"));
    // Text content is HTML-escaped inside the pre block.
    assert!(page.contains("--&gt;"));
    assert!(page.contains("mermaid@10"));
}

#[test]
fn mermaid_page_is_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flow.html");
    write_mermaid_page(&path, "graph TD\n    0[\"A\"] --> 1[\"B\"]").unwrap();
    let page = std::fs::read_to_string(&path).unwrap();
    assert!(page.contains("startOnLoad"));
}
