//! Analysis phases and solver options

use serde::{Deserialize, Serialize};

/// Phase of the two-stage moment-curvature analysis
///
/// The rig moves `Idle → AxialLoad → CurvatureSweep → Done`; `Failed` is
/// absorbing and reachable from either working phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisPhase {
    /// No analysis started yet
    Idle,
    /// Load-controlled axial step at zero curvature
    AxialLoad,
    /// Displacement-controlled curvature ramp under constant axial load
    CurvatureSweep,
    /// All curvature steps converged
    Done,
    /// A step failed to converge; no further steps are produced
    Failed,
}

impl Default for AnalysisPhase {
    fn default() -> Self {
        Self::Idle
    }
}

/// Options for the equilibrium iteration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Absolute tolerance on the unbalanced axial force
    pub tolerance: f64,
    /// Iteration cap per analysis step
    pub max_iterations: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        // Tighter than typical defaults so the fine quadrature comparisons
        // are resolved rather than drowned in convergence slack.
        Self {
            tolerance: 1e-4,
            max_iterations: 10,
        }
    }
}

impl AnalysisOptions {
    /// Set the unbalance tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the per-step iteration cap
    pub fn with_max_iter(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}
