//! Simulate a small emergency-department pathway and render its outputs:
//! a mermaid flowchart of the stage graph and a sankey diagram of the
//! pathways discharged patients actually took.
use anyhow::Result;
use chrono::Weekday;

use pathflow_report::html::write_figures_html;
use pathflow_report::sankey::sankey_figure;
use pathflow_sim::capacity::SlotCapacity;
use pathflow_sim::config::SimConfig;
use pathflow_sim::graph::{FlowGraph, Transition};
use pathflow_sim::simulation::Simulation;
use pathflow_sim::source::SteadyArrivals;

fn main() -> Result<()> {
    env_logger::init();

    let mut graph = FlowGraph::new();
    graph.add_transition("Patient arrives", "Triage", Transition::unconditional());
    graph.add_transition("Triage", "Discharged", Transition::with_probability(0.2));
    graph.add_transition("Triage", "Ward", Transition::with_probability(0.8));
    graph.add_transition("Ward", "Treated", Transition::unconditional());
    graph.add_transition("Ward", "Transferred out", Transition::overflow());
    graph.set_capacity("Ward", Box::new(SlotCapacity::new(12, 3)))?;

    let source = SteadyArrivals::new(
        5,
        vec![Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri],
    );
    let config = SimConfig {
        days: 90,
        seed: Some(2024),
    };

    let mut sim = Simulation::new(graph, source, config)?;
    sim.write_flowchart("ed_pathway_graph.html")?;
    sim.run()?;

    let (labels, links) = sim.pathway_links();
    let sankey = sankey_figure(&labels, &links)?;
    write_figures_html(&[sankey], "ed_pathway_sankey.html", None, Some(&[600]))?;

    println!(
        "{} patients discharged; wrote ed_pathway_graph.html and ed_pathway_sankey.html",
        sim.discharged().len()
    );
    Ok(())
}
