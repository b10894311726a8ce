//! The day-by-day simulation loop.
use std::path::Path;

use chrono::Weekday;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pathflow_report::flowchart;
use pathflow_report::sankey::SankeyLinkDef;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::graph::FlowGraph;
use crate::patient::Patient;
use crate::source::PatientSource;

/// Runs patients from a source through a validated stage graph.
pub struct Simulation<S: PatientSource> {
    graph: FlowGraph,
    source: S,
    config: SimConfig,
    rng: StdRng,
    start: usize,
    discharged: Vec<Patient>,
}

impl<S: PatientSource> Simulation<S> {
    /// Validate the graph and set up a run. The RNG is seeded from
    /// `config.seed` when given, making runs reproducible.
    pub fn new(graph: FlowGraph, source: S, config: SimConfig) -> Result<Self, SimError> {
        graph.validate()?;
        let start = graph.start_stage()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            graph,
            source,
            config,
            rng,
            start,
            discharged: Vec::new(),
        })
    }

    /// Advance the configured number of days, starting on a Monday.
    pub fn run(&mut self) -> Result<(), SimError> {
        let mut day = Weekday::Mon;
        for day_num in 0..self.config.days {
            self.step(day_num, day)?;
            day = day.succ();
        }
        log::info!(
            "simulation finished after {} days, {} patients discharged",
            self.config.days,
            self.discharged.len()
        );
        Ok(())
    }

    /// Patients that reached a terminal stage so far.
    pub fn discharged(&self) -> &[Patient] {
        &self.discharged
    }

    fn step(&mut self, day_num: usize, day: Weekday) -> Result<(), SimError> {
        log::debug!("day {} ({})", day_num, day);

        // Capacities release before the day's arrivals are generated.
        let mut released = Vec::new();
        for idx in 0..self.graph.stage_count() {
            if let Some(capacity) = self.graph.capacity_mut(idx) {
                for patient in capacity.release(day_num, day) {
                    released.push((idx, patient));
                }
            }
        }
        for (stage, patient) in released {
            log::debug!("patient {} released from {}", patient.id, self.graph.label(stage));
            if let Some(done) = self.traverse(day_num, stage, patient, false)? {
                self.discharged.push(done);
            }
        }

        for patient in self.source.generate(day_num, day) {
            log::debug!("patient {} arrives", patient.id);
            if let Some(done) = self.traverse(day_num, self.start, patient, true)? {
                self.discharged.push(done);
            }
        }
        Ok(())
    }

    /// Walk one patient through the graph until a terminal stage discharges
    /// them or a capacity takes them in. `check_capacity` is false only for
    /// the stage a released patient re-enters at.
    fn traverse(
        &mut self,
        day_num: usize,
        entry: usize,
        mut patient: Patient,
        mut check_capacity: bool,
    ) -> Result<Option<Patient>, SimError> {
        let mut current = entry;
        loop {
            let mut via_overflow = false;
            if check_capacity {
                if let Some(capacity) = self.graph.capacity_mut(current) {
                    match capacity.admit(day_num, patient) {
                        None => {
                            log::debug!("patient held at {}", self.graph.label(current));
                            return Ok(None);
                        }
                        Some(rejected) => {
                            patient = rejected;
                            via_overflow = true;
                        }
                    }
                }
            }

            let next = if via_overflow {
                self.graph
                    .overflow_target(current)
                    .ok_or_else(|| SimError::MissingOverflow {
                        stage: self.graph.label(current).to_string(),
                    })?
            } else {
                patient.pathway.push(self.graph.label(current).to_string());
                self.select_transition(current, &patient)?
            };

            if self.graph.outgoing(next).is_empty() {
                patient.pathway.push(self.graph.label(next).to_string());
                return Ok(Some(patient));
            }
            current = next;
            check_capacity = true;
        }
    }

    fn select_transition(&mut self, stage: usize, patient: &Patient) -> Result<usize, SimError> {
        let choices: Vec<(usize, f64)> = self
            .graph
            .outgoing(stage)
            .iter()
            .filter(|(_, transition)| !transition.is_overflow())
            .map(|(target, transition)| (*target, transition.probability().unwrap_or(0.0)))
            .collect();

        match choices.as_slice() {
            [] => Err(SimError::NoEligibleTransition {
                stage: self.graph.label(stage).to_string(),
            }),
            [(only, _)] => Ok(*only),
            _ => {
                let sample = match self.graph.sampler_mut(stage) {
                    Some(sampler) => sampler(patient),
                    None => self.rng.gen::<f64>(),
                };
                let mut cumulative = 0.0;
                let mut selected = choices[0].0;
                for (target, probability) in &choices {
                    selected = *target;
                    cumulative += probability;
                    if sample < cumulative {
                        break;
                    }
                }
                Ok(selected)
            }
        }
    }

    /// Aggregate discharged pathways into sankey input: the node labels in
    /// first-seen order and one link per consecutive stage pair, weighted
    /// by traversal count.
    pub fn pathway_links(&self) -> (Vec<String>, Vec<SankeyLinkDef>) {
        let mut labels: Vec<String> = Vec::new();
        let mut links: Vec<SankeyLinkDef> = Vec::new();
        for patient in &self.discharged {
            for pair in patient.pathway.windows(2) {
                for label in pair {
                    if !labels.contains(label) {
                        labels.push(label.clone());
                    }
                }
                match links
                    .iter_mut()
                    .find(|link| link.source == pair[0] && link.target == pair[1])
                {
                    Some(link) => link.value += 1.0,
                    None => links.push(SankeyLinkDef::new(pair[0].clone(), pair[1].clone(), 1.0)),
                }
            }
        }
        (labels, links)
    }

    /// Render the stage graph as a mermaid flowchart page at `path`.
    pub fn write_flowchart<P: AsRef<Path>>(&self, path: P) -> Result<(), SimError> {
        flowchart::write_mermaid_page(path, &self.mermaid_diagram())?;
        Ok(())
    }

    fn mermaid_diagram(&self) -> String {
        let mut lines = vec!["graph TD".to_string()];
        for (from, to, transition) in self.graph.transitions() {
            let edge_label = match (transition.probability(), transition.is_overflow()) {
                (Some(probability), _) => format!("|p={:.2}|", probability),
                (None, true) => "|overflow|".to_string(),
                (None, false) => String::new(),
            };
            lines.push(format!(
                "    {}[\"{}\"] -->{} {}[\"{}\"]",
                from,
                self.graph.label(from),
                edge_label,
                to,
                self.graph.label(to)
            ));
        }
        lines.join("\n")
    }
}
