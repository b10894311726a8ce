use std::fmt;

use pathflow_report::error::ReportError;

/// Errors raised while building or running a simulation.
#[derive(Debug)]
pub enum SimError {
    /// The graph has no stage with in-degree zero.
    NoStartStage,
    /// A stage label was not found in the graph.
    UnknownStage(String),
    /// Routing probabilities of a multi-exit stage do not sum to one.
    InvalidProbabilities { stage: String, sum: f64 },
    /// A capacity stage does not have exactly one overflow transition.
    MissingOverflow { stage: String },
    /// An overflow transition was declared on a stage without a capacity.
    UnexpectedOverflow { stage: String },
    /// A non-terminal stage has no transition a patient could follow.
    NoEligibleTransition { stage: String },
    /// Rendering a report artifact failed.
    Report(ReportError),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimError::NoStartStage => write!(f, "graph has no start stage (in-degree zero)"),
            SimError::UnknownStage(label) => write!(f, "unknown stage {:?}", label),
            SimError::InvalidProbabilities { stage, sum } => write!(
                f,
                "transition probabilities out of {:?} sum to {}, expected 1",
                stage, sum
            ),
            SimError::MissingOverflow { stage } => write!(
                f,
                "capacity stage {:?} must have exactly one overflow transition",
                stage
            ),
            SimError::UnexpectedOverflow { stage } => write!(
                f,
                "overflow transition declared on {:?}, which has no capacity",
                stage
            ),
            SimError::NoEligibleTransition { stage } => {
                write!(f, "no transition to follow out of stage {:?}", stage)
            }
            SimError::Report(source) => write!(f, "report rendering failed: {}", source),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Report(source) => Some(source),
            _ => None,
        }
    }
}

impl From<ReportError> for SimError {
    fn from(source: ReportError) -> Self {
        SimError::Report(source)
    }
}
