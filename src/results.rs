//! Result types for moment-curvature analysis

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::SectionResult;

/// One converged analysis step
///
/// Immutable once recorded; step 0 is the axial-load-only step at zero
/// curvature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisStep {
    /// Step index (0 = axial load step)
    pub step: usize,
    /// Prescribed curvature at this step
    pub curvature: f64,
    /// Converged bending moment
    pub moment: f64,
    /// Converged axial strain
    pub axial_strain: f64,
}

/// Ordered, append-only record of converged steps
///
/// The in-memory stand-in for a time-history recorder: the analysis appends,
/// an external plotter/comparator reads columns. Nothing is ever removed or
/// rewritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    steps: Vec<AnalysisStep>,
}

impl Response {
    /// Create an empty response record
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a converged step
    pub fn append(&mut self, step: AnalysisStep) {
        self.steps.push(step);
    }

    /// All recorded steps, in analysis order
    pub fn steps(&self) -> &[AnalysisStep] {
        &self.steps
    }

    /// Number of recorded steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The most recent converged step
    pub fn last(&self) -> Option<&AnalysisStep> {
        self.steps.last()
    }

    /// Curvature column
    pub fn curvatures(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.curvature).collect()
    }

    /// Moment column
    pub fn moments(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.moment).collect()
    }

    /// Largest absolute moment reached over the run
    pub fn ultimate_moment(&self) -> Option<f64> {
        self.steps
            .iter()
            .map(|s| s.moment.abs())
            .fold(None, |max, m| Some(max.map_or(m, |v| f64::max(v, m))))
    }

    /// Write the record as CSV, one row per step
    pub fn write_csv<W: Write>(&self, writer: &mut W) -> SectionResult<()> {
        writeln!(writer, "step,curvature,moment,axial_strain")?;
        for s in &self.steps {
            writeln!(
                writer,
                "{},{:e},{:e},{:e}",
                s.step, s.curvature, s.moment, s.axial_strain
            )?;
        }
        Ok(())
    }

    /// Serialize the record to a JSON string
    pub fn to_json(&self) -> SectionResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
