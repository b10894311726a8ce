use serde::{Deserialize, Serialize};

/// Run parameters for a simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of simulated days.
    pub days: usize,
    /// RNG seed for reproducible runs; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            days: 300,
            seed: None,
        }
    }
}
