//! Configuration and training diagnostics for the CFR solver.

use serde::{Deserialize, Serialize};

/// How the game tree is traversed on each iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SamplingScheme {
    /// Full enumeration at every decision node.
    Vanilla,
    /// Full enumeration at the traverser's nodes, one sampled action at
    /// opponent nodes. Unbiased without importance weighting.
    ExternalSampling,
    /// One sampled action at every node, traverser included, with
    /// importance-weighted regret updates. Cheapest per iteration,
    /// highest variance.
    OutcomeSampling,
}

impl SamplingScheme {
    /// Short name for reports and CLI flags.
    pub fn name(&self) -> &'static str {
        match self {
            SamplingScheme::Vanilla => "vanilla",
            SamplingScheme::ExternalSampling => "external",
            SamplingScheme::OutcomeSampling => "outcome",
        }
    }

    /// Parse a CLI flag value.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "vanilla" => Some(SamplingScheme::Vanilla),
            "external" => Some(SamplingScheme::ExternalSampling),
            "outcome" => Some(SamplingScheme::OutcomeSampling),
            _ => None,
        }
    }
}

/// Configuration for the CFR solver.
///
/// # Example
/// ```
/// use toy_cfr_solver::cfr::{SamplingScheme, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_scheme(SamplingScheme::ExternalSampling)
///     .with_seed(42);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Traversal scheme to use for training.
    pub scheme: SamplingScheme,

    /// Random seed for reproducibility.
    ///
    /// If set, dealing and action sampling are deterministic and two runs
    /// with the same seed and iteration count produce identical stores.
    /// If `None`, a seed is drawn from entropy.
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            scheme: SamplingScheme::Vanilla,
            seed: None,
        }
    }
}

impl SolverConfig {
    /// Create a configuration with default settings (vanilla CFR).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the traversal scheme.
    pub fn with_scheme(mut self, scheme: SamplingScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Builder method: set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Diagnostics tracked during training. Carries no strategic output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Total number of iterations completed.
    pub iterations: u64,

    /// Number of unique information sets discovered.
    pub info_sets: usize,

    /// Total time spent training, in seconds.
    pub elapsed_seconds: f64,

    /// Iterations per second.
    pub iterations_per_second: f64,
}

impl TrainingStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update iterations per second from elapsed time.
    pub fn update_rate(&mut self) {
        if self.elapsed_seconds > 0.0 {
            self.iterations_per_second = self.iterations as f64 / self.elapsed_seconds;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_names_round_trip() {
        for scheme in [
            SamplingScheme::Vanilla,
            SamplingScheme::ExternalSampling,
            SamplingScheme::OutcomeSampling,
        ] {
            assert_eq!(SamplingScheme::from_name(scheme.name()), Some(scheme));
        }
        assert_eq!(SamplingScheme::from_name("chance"), None);
    }
}
