//! Section rig - a fixed two-DOF test bed driving one fiber section

use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisOptions, AnalysisPhase};
use crate::elements::{FiberSection, GeneralizedStrain, LayoutScheme, Steel};
use crate::error::{SectionError, SectionResult};
use crate::results::{AnalysisStep, Response};

/// The moment-curvature test rig: one fiber section, its current committed
/// generalized strain, the analysis phase, and the recorded response
///
/// The rig is a plain caller-owned value; nothing is registered in any
/// global model. It drives a two-phase analysis: a load-controlled axial
/// step at zero curvature, then a displacement-controlled curvature ramp
/// with the axial load held constant. Each step is solved by full
/// Newton-Raphson on the axial strain, with the section tangent recomputed
/// every iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionRig {
    section: FiberSection,
    strain: GeneralizedStrain,
    phase: AnalysisPhase,
    response: Response,
}

impl SectionRig {
    /// Create a rig around a freshly discretized section
    pub fn new(section: FiberSection) -> Self {
        Self {
            section,
            strain: GeneralizedStrain::default(),
            phase: AnalysisPhase::Idle,
            response: Response::new(),
        }
    }

    /// The section under test
    pub fn section(&self) -> &FiberSection {
        &self.section
    }

    /// Current committed generalized strain
    pub fn strain(&self) -> GeneralizedStrain {
        self.strain
    }

    /// Current analysis phase
    pub fn phase(&self) -> AnalysisPhase {
        self.phase
    }

    /// Recorded response so far
    ///
    /// On failure this still holds every step up to the last committed one.
    pub fn response(&self) -> &Response {
        &self.response
    }

    /// Consume the rig, keeping only the recorded response
    pub fn into_response(self) -> Response {
        self.response
    }

    /// Run the two-phase analysis
    ///
    /// Phase 1 solves the axial strain so the section carries `axial_load`
    /// at zero curvature and records it as step 0. Phase 2 ramps the
    /// curvature to `target_curvature` in `increments` equal steps, re-solving
    /// the axial strain at each, and records one step per increment.
    ///
    /// # Errors
    ///
    /// `NonConvergence` if any step exhausts the iteration cap or the axial
    /// tangent degenerates; the rig enters `Failed` and stops. No step-size
    /// bisection is attempted.
    pub fn run(
        &mut self,
        axial_load: f64,
        target_curvature: f64,
        increments: usize,
        options: &AnalysisOptions,
    ) -> SectionResult<&Response> {
        if self.phase != AnalysisPhase::Idle {
            return Err(SectionError::InvalidInput(
                "analysis already run on this rig".to_string(),
            ));
        }
        if increments == 0 {
            return Err(SectionError::InvalidInput(
                "at least one curvature increment is required".to_string(),
            ));
        }
        if !axial_load.is_finite() || !target_curvature.is_finite() {
            return Err(SectionError::InvalidInput(
                "axial load and target curvature must be finite".to_string(),
            ));
        }

        self.phase = AnalysisPhase::AxialLoad;
        self.solve_step(axial_load, 0.0, 0, options)?;

        self.phase = AnalysisPhase::CurvatureSweep;
        let delta = target_curvature / increments as f64;
        for step in 1..=increments {
            let curvature = delta * step as f64;
            self.solve_step(axial_load, curvature, step, options)?;
        }

        self.phase = AnalysisPhase::Done;
        Ok(&self.response)
    }

    /// Newton-Raphson on the axial strain at a prescribed curvature
    fn solve_step(
        &mut self,
        target_force: f64,
        curvature: f64,
        step: usize,
        options: &AnalysisOptions,
    ) -> SectionResult<()> {
        let mut axial = self.strain.axial;
        let mut unbalance = f64::INFINITY;
        let mut iterations = 0;

        while iterations < options.max_iterations {
            iterations += 1;
            let trial = GeneralizedStrain { axial, curvature };
            let (force, stiffness) = self.section.response(&trial);
            unbalance = target_force - force.axial;

            if unbalance.abs() < options.tolerance {
                self.section.commit_all();
                self.strain = trial;
                self.response.append(AnalysisStep {
                    step,
                    curvature,
                    moment: force.moment,
                    axial_strain: axial,
                });
                log::debug!(
                    "step {step} converged in {iterations} iterations \
                     (curvature = {curvature:e}, moment = {:e})",
                    force.moment
                );
                return Ok(());
            }

            // Zero, subnormal or non-finite EA leaves the Newton update
            // undefined; surfaces as non-convergence like the rest.
            if !stiffness.ea.is_normal() {
                log::warn!(
                    "degenerate axial stiffness (EA = {:e}) at step {step}",
                    stiffness.ea
                );
                break;
            }

            axial += unbalance / stiffness.ea;
        }

        self.section.revert_all();
        self.phase = AnalysisPhase::Failed;
        log::warn!(
            "step {step} failed to converge after {iterations} iterations \
             (unbalance = {unbalance:e})"
        );
        Err(SectionError::NonConvergence {
            step,
            iterations,
            unbalance,
        })
    }
}

/// One-call moment-curvature analysis with default options
///
/// Discretizes a `width` × `depth` rectangle with `scheme`, holds
/// `axial_load`, ramps the curvature to `target_curvature` in `increments`
/// steps and returns the recorded response.
pub fn moment_curvature(
    width: f64,
    depth: f64,
    steel: Steel,
    scheme: LayoutScheme,
    axial_load: f64,
    target_curvature: f64,
    increments: usize,
) -> SectionResult<Response> {
    let section = FiberSection::new(width, depth, steel, scheme)?;
    let mut rig = SectionRig::new(section);
    rig.run(
        axial_load,
        target_curvature,
        increments,
        &AnalysisOptions::default(),
    )?;
    Ok(rig.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rig(scheme: LayoutScheme, steel: Steel) -> SectionRig {
        SectionRig::new(FiberSection::new(300.0, 500.0, steel, scheme).unwrap())
    }

    #[test]
    fn test_axial_phase_solves_strain() {
        let steel = Steel::s355();
        let mut rig = rig(LayoutScheme::Gauss, steel);
        let load = 1.0e6;

        rig.run(load, 0.0, 1, &AnalysisOptions::default()).unwrap();

        let ea = steel.e * 300.0 * 500.0;
        assert_eq!(rig.phase(), AnalysisPhase::Done);
        assert_relative_eq!(rig.strain().axial, load / ea, max_relative = 1e-9);
        assert_eq!(rig.response().len(), 2);
        assert_eq!(rig.response().steps()[0].step, 0);
        assert_eq!(rig.response().steps()[0].curvature, 0.0);
    }

    #[test]
    fn test_elastic_sweep_is_proportional_and_monotonic() {
        let steel = Steel::s355();
        let mut rig = rig(LayoutScheme::Gauss, steel);

        // Extreme-fiber strain stays below yield: κ·d/2 < εy.
        let target = 5.0e-6;
        rig.run(0.0, target, 10, &AnalysisOptions::default()).unwrap();

        let ei = steel.e * 300.0 * 500.0_f64.powi(3) / 12.0;
        let steps = rig.response().steps();
        assert_eq!(steps.len(), 11);
        for pair in steps.windows(2) {
            assert!(pair[1].moment > pair[0].moment);
        }
        for s in steps {
            assert_relative_eq!(s.moment, ei * s.curvature, max_relative = 1e-9);
            assert_relative_eq!(s.axial_strain, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_plastic_sweep_reaches_plastic_moment() {
        let steel = Steel::s355();
        let mut rig = rig(LayoutScheme::Midpoint, steel);

        rig.run(0.0, 6.4e-5, 200, &AnalysisOptions::default()).unwrap();

        // Midpoint's two fibers carry exactly the rectangle's plastic
        // moment; the tiny hardening slope nudges it above.
        let plastic = rig.section().plastic_moment();
        let ultimate = rig.response().ultimate_moment().unwrap();
        assert!(ultimate > plastic);
        assert!(ultimate < 1.01 * plastic);
    }

    #[test]
    fn test_over_capacity_axial_load_fails_with_empty_response() {
        // Zero hardening: past yield every fiber has a flat branch and EA
        // collapses, so a load above fy·A can never be equilibrated.
        let steel = Steel::new(355.0, 200_000.0, 0.0);
        let mut rig = rig(LayoutScheme::Gauss, steel);
        let squash = steel.fy * 300.0 * 500.0;

        let result = rig.run(1.1 * squash, 6.4e-5, 10, &AnalysisOptions::default());

        assert!(matches!(
            result,
            Err(SectionError::NonConvergence { step: 0, .. })
        ));
        assert_eq!(rig.phase(), AnalysisPhase::Failed);
        assert!(rig.response().is_empty());
    }

    #[test]
    fn test_partial_response_is_kept_on_late_failure() {
        // Radau is the one asymmetric layout: the moment its edge fiber
        // yields, the fiber stresses stop cancelling and one iteration can
        // no longer rebalance the axial force. A cap of 1 therefore carries
        // the elastic steps and fails at the first yielding step.
        let steel = Steel::s355();
        let mut rig = rig(LayoutScheme::Radau, steel);
        let options = AnalysisOptions::default().with_max_iter(1);

        let result = rig.run(0.0, 6.4e-5, 100, &options);

        let failed_step = match result {
            Err(SectionError::NonConvergence { step, .. }) => step,
            other => panic!("expected non-convergence, got {other:?}"),
        };
        assert_eq!(rig.phase(), AnalysisPhase::Failed);
        let recorded = rig.response().len();
        assert!(recorded > 1 && recorded < 101);
        assert_eq!(recorded, failed_step);
    }

    #[test]
    fn test_rig_rejects_rerun_and_bad_inputs() {
        let steel = Steel::s355();
        let mut fresh = rig(LayoutScheme::Gauss, steel);
        assert!(matches!(
            fresh.run(0.0, 1e-5, 0, &AnalysisOptions::default()),
            Err(SectionError::InvalidInput(_))
        ));

        let mut done = rig(LayoutScheme::Gauss, steel);
        done.run(0.0, 1e-5, 2, &AnalysisOptions::default()).unwrap();
        assert!(matches!(
            done.run(0.0, 1e-5, 2, &AnalysisOptions::default()),
            Err(SectionError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_one_call_helper_matches_rig() {
        let steel = Steel::s355();
        let response =
            moment_curvature(300.0, 500.0, steel, LayoutScheme::Lobatto, 0.0, 1e-5, 5).unwrap();

        let mut rig = rig(LayoutScheme::Lobatto, steel);
        rig.run(0.0, 1e-5, 5, &AnalysisOptions::default()).unwrap();

        assert_eq!(response, *rig.response());
    }
}
