//! Directed graph of named stages with typed transition attributes.
//!
//! The container is a Vec of stages plus a label-to-index map; adjacency is
//! stored per stage. Stage labels are the public handle, indices stay an
//! internal detail of the simulation loop.
use std::collections::HashMap;

use crate::capacity::Capacity;
use crate::error::SimError;
use crate::patient::Patient;

/// Unit-interval sample used to pick among probabilistic transitions.
///
/// The default is the simulation's own RNG; a stage-level sampler overrides
/// it, e.g. to make routing depend on patient attributes or to pin routing
/// in tests.
pub type Sampler = Box<dyn FnMut(&Patient) -> f64>;

/// An edge between two stages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub(crate) probability: Option<f64>,
    pub(crate) overflow: bool,
}

impl Transition {
    /// The only way out of a stage, or one of the exits of a capacity
    /// stage's normal route.
    pub fn unconditional() -> Self {
        Self {
            probability: None,
            overflow: false,
        }
    }

    /// A probabilistic exit; a stage's probabilities must sum to one.
    pub fn with_probability(probability: f64) -> Self {
        Self {
            probability: Some(probability),
            overflow: false,
        }
    }

    /// The exit taken when the stage's capacity rejects a patient.
    pub fn overflow() -> Self {
        Self {
            probability: None,
            overflow: true,
        }
    }

    pub fn probability(&self) -> Option<f64> {
        self.probability
    }

    pub fn is_overflow(&self) -> bool {
        self.overflow
    }
}

struct Stage {
    label: String,
    capacity: Option<Box<dyn Capacity>>,
    sampler: Option<Sampler>,
}

/// The stage graph a simulation runs over.
#[derive(Default)]
pub struct FlowGraph {
    stages: Vec<Stage>,
    index: HashMap<String, usize>,
    outgoing: Vec<Vec<(usize, Transition)>>,
    in_degree: Vec<usize>,
}

impl FlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stage if it does not exist yet; returns its index either way.
    pub fn add_stage(&mut self, label: impl Into<String>) -> usize {
        let label = label.into();
        if let Some(&existing) = self.index.get(&label) {
            return existing;
        }
        let idx = self.stages.len();
        self.index.insert(label.clone(), idx);
        self.stages.push(Stage {
            label,
            capacity: None,
            sampler: None,
        });
        self.outgoing.push(Vec::new());
        self.in_degree.push(0);
        idx
    }

    /// Add a transition, creating either endpoint as needed.
    pub fn add_transition(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        transition: Transition,
    ) {
        let from = self.add_stage(from);
        let to = self.add_stage(to);
        self.outgoing[from].push((to, transition));
        self.in_degree[to] += 1;
    }

    /// Attach a capacity to an existing stage.
    pub fn set_capacity(
        &mut self,
        stage: &str,
        capacity: Box<dyn Capacity>,
    ) -> Result<(), SimError> {
        let idx = self.lookup(stage)?;
        self.stages[idx].capacity = Some(capacity);
        Ok(())
    }

    /// Attach a routing sampler to an existing stage.
    pub fn set_sampler(&mut self, stage: &str, sampler: Sampler) -> Result<(), SimError> {
        let idx = self.lookup(stage)?;
        self.stages[idx].sampler = Some(sampler);
        Ok(())
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn label(&self, idx: usize) -> &str {
        &self.stages[idx].label
    }

    /// Every transition as `(from, to, attributes)` index triples, in
    /// insertion order per stage.
    pub fn transitions(&self) -> impl Iterator<Item = (usize, usize, Transition)> + '_ {
        self.outgoing
            .iter()
            .enumerate()
            .flat_map(|(from, edges)| edges.iter().map(move |(to, transition)| (from, *to, *transition)))
    }

    /// The stage new arrivals enter at: the first stage with in-degree
    /// zero. Errors when no such stage exists (e.g. a fully cyclic graph).
    pub fn start_stage(&self) -> Result<usize, SimError> {
        let mut starts = self
            .in_degree
            .iter()
            .enumerate()
            .filter(|(_, &degree)| degree == 0)
            .map(|(idx, _)| idx);
        let first = starts.next().ok_or(SimError::NoStartStage)?;
        if starts.next().is_some() {
            log::warn!(
                "graph has several entry stages; arrivals start at {:?}",
                self.stages[first].label
            );
        }
        Ok(first)
    }

    /// Check the structural invariants the simulation relies on:
    /// probabilities of multi-exit stages sum to one, capacity stages have
    /// exactly one overflow transition plus a normal route, overflow
    /// transitions appear nowhere else, and a start stage exists with at
    /// least one exit.
    pub fn validate(&self) -> Result<(), SimError> {
        const EPSILON: f64 = 1e-6;
        for (idx, stage) in self.stages.iter().enumerate() {
            let outgoing = &self.outgoing[idx];
            let overflow_count = outgoing
                .iter()
                .filter(|(_, transition)| transition.overflow)
                .count();
            if stage.capacity.is_some() {
                if overflow_count != 1 {
                    return Err(SimError::MissingOverflow {
                        stage: stage.label.clone(),
                    });
                }
            } else if overflow_count > 0 {
                return Err(SimError::UnexpectedOverflow {
                    stage: stage.label.clone(),
                });
            }

            let routed: Vec<&Transition> = outgoing
                .iter()
                .filter(|(_, transition)| !transition.overflow)
                .map(|(_, transition)| transition)
                .collect();
            if stage.capacity.is_some() && routed.is_empty() {
                return Err(SimError::NoEligibleTransition {
                    stage: stage.label.clone(),
                });
            }
            if routed.len() > 1 {
                let sum: f64 = routed
                    .iter()
                    .map(|transition| transition.probability.unwrap_or(0.0))
                    .sum();
                if (sum - 1.0).abs() > EPSILON {
                    return Err(SimError::InvalidProbabilities {
                        stage: stage.label.clone(),
                        sum,
                    });
                }
            }
        }

        let start = self.start_stage()?;
        if self.outgoing[start].is_empty() {
            return Err(SimError::NoEligibleTransition {
                stage: self.stages[start].label.clone(),
            });
        }
        Ok(())
    }

    pub(crate) fn outgoing(&self, idx: usize) -> &[(usize, Transition)] {
        &self.outgoing[idx]
    }

    pub(crate) fn capacity_mut(&mut self, idx: usize) -> Option<&mut Box<dyn Capacity>> {
        self.stages[idx].capacity.as_mut()
    }

    pub(crate) fn has_capacity(&self, idx: usize) -> bool {
        self.stages[idx].capacity.is_some()
    }

    pub(crate) fn sampler_mut(&mut self, idx: usize) -> Option<&mut Sampler> {
        self.stages[idx].sampler.as_mut()
    }

    pub(crate) fn overflow_target(&self, idx: usize) -> Option<usize> {
        self.outgoing[idx]
            .iter()
            .find(|(_, transition)| transition.overflow)
            .map(|(target, _)| *target)
    }

    fn lookup(&self, label: &str) -> Result<usize, SimError> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| SimError::UnknownStage(label.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capacity::SlotCapacity;

    #[test]
    fn add_stage_is_idempotent() {
        let mut graph = FlowGraph::new();
        let a = graph.add_stage("Triage");
        let b = graph.add_stage("Triage");
        assert_eq!(a, b);
        assert_eq!(graph.stage_count(), 1);
    }

    #[test]
    fn start_stage_is_the_unfed_one() {
        let mut graph = FlowGraph::new();
        graph.add_transition("Arrive", "Triage", Transition::unconditional());
        graph.add_transition("Triage", "Home", Transition::unconditional());
        assert_eq!(graph.start_stage().unwrap(), 0);
        assert_eq!(graph.label(0), "Arrive");
    }

    #[test]
    fn validate_rejects_bad_probability_sum() {
        let mut graph = FlowGraph::new();
        graph.add_transition("Triage", "Home", Transition::with_probability(0.2));
        graph.add_transition("Triage", "Clinic", Transition::with_probability(0.7));
        assert!(matches!(
            graph.validate(),
            Err(SimError::InvalidProbabilities { .. })
        ));
    }

    #[test]
    fn validate_requires_overflow_on_capacity_stage() {
        let mut graph = FlowGraph::new();
        graph.add_transition("Arrive", "Ward", Transition::unconditional());
        graph.add_transition("Ward", "Home", Transition::unconditional());
        graph
            .set_capacity("Ward", Box::new(SlotCapacity::new(4, 2)))
            .unwrap();
        assert!(matches!(
            graph.validate(),
            Err(SimError::MissingOverflow { .. })
        ));
    }

    #[test]
    fn validate_rejects_stray_overflow() {
        let mut graph = FlowGraph::new();
        graph.add_transition("Arrive", "Home", Transition::overflow());
        assert!(matches!(
            graph.validate(),
            Err(SimError::UnexpectedOverflow { .. })
        ));
    }
}
