//! Uniaxial bilinear steel with kinematic hardening

use serde::{Deserialize, Serialize};

/// Parameters of a bilinear elasto-plastic steel, shared by every fiber of a
/// section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Steel {
    /// Yield stress (same stress unit as `e`)
    pub fy: f64,
    /// Modulus of elasticity
    pub e: f64,
    /// Strain-hardening ratio b, so the post-yield slope is b·E
    pub hardening_ratio: f64,
}

impl Steel {
    /// Create a new steel with given properties
    pub fn new(fy: f64, e: f64, hardening_ratio: f64) -> Self {
        Self {
            fy,
            e,
            hardening_ratio,
        }
    }

    /// S355 structural steel in N/mm² with a small hardening slope
    pub fn s355() -> Self {
        Self {
            fy: 355.0,
            e: 200_000.0,
            hardening_ratio: 0.001,
        }
    }

    /// Yield strain fy/E
    pub fn yield_strain(&self) -> f64 {
        self.fy / self.e
    }

    /// Post-yield (hardening branch) tangent b·E
    pub fn hardening_tangent(&self) -> f64 {
        self.hardening_ratio * self.e
    }

    /// Plastic hardening modulus H = b·E / (1 − b)
    ///
    /// H is the kinematic back-stress rate; the consistent tangent
    /// E·H/(E + H) works out to exactly b·E.
    pub fn hardening_modulus(&self) -> f64 {
        self.hardening_ratio * self.e / (1.0 - self.hardening_ratio)
    }
}

impl Default for Steel {
    fn default() -> Self {
        Self::s355()
    }
}

/// History-dependent state of one fiber's material point
///
/// Committed fields reflect converged analysis steps only. The trial fields
/// are scratch for the current equilibrium iteration: every `evaluate`
/// overwrites them starting from the committed anchor, so a failed iteration
/// never contaminates the next one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialState {
    /// Committed strain
    pub strain: f64,
    /// Committed stress
    pub stress: f64,
    /// Committed tangent modulus
    pub tangent: f64,
    /// Committed center of the yield surface (kinematic back stress)
    pub back_stress: f64,
    /// Whether the committed state has ever yielded
    pub yielded: bool,

    trial_strain: f64,
    trial_stress: f64,
    trial_tangent: f64,
    trial_back_stress: f64,
    trial_yielded: bool,
}

impl MaterialState {
    /// Virgin state at zero strain for the given steel
    pub fn new(steel: &Steel) -> Self {
        Self {
            strain: 0.0,
            stress: 0.0,
            tangent: steel.e,
            back_stress: 0.0,
            yielded: false,
            trial_strain: 0.0,
            trial_stress: 0.0,
            trial_tangent: steel.e,
            trial_back_stress: 0.0,
            trial_yielded: false,
        }
    }

    /// Evaluate the trial response at `trial_strain`, measured from the
    /// committed anchor
    ///
    /// Elastic predictor / plastic corrector for the bilinear kinematic rule:
    /// the predictor stress is tested against the yield surface centered at
    /// the committed back stress; past the surface the state returns to the
    /// hardening branch and the tangent drops to b·E. Pure with respect to
    /// committed state: only the trial fields are written.
    pub fn evaluate(&mut self, steel: &Steel, trial_strain: f64) -> (f64, f64) {
        let d_strain = trial_strain - self.strain;
        let stress_predictor = self.stress + steel.e * d_strain;
        let xi = stress_predictor - self.back_stress;

        self.trial_strain = trial_strain;
        if xi.abs() <= steel.fy {
            // Elastic branch (also unloading/reloading inside the surface)
            self.trial_stress = stress_predictor;
            self.trial_tangent = steel.e;
            self.trial_back_stress = self.back_stress;
            self.trial_yielded = self.yielded;
        } else {
            let h = steel.hardening_modulus();
            let sign = xi.signum();
            let d_gamma = (xi.abs() - steel.fy) / (steel.e + h);

            self.trial_stress = stress_predictor - sign * steel.e * d_gamma;
            self.trial_tangent = steel.hardening_tangent();
            self.trial_back_stress = self.back_stress + sign * h * d_gamma;
            self.trial_yielded = true;
        }

        (self.trial_stress, self.trial_tangent)
    }

    /// Accept the trial state as converged
    pub fn commit(&mut self) {
        self.strain = self.trial_strain;
        self.stress = self.trial_stress;
        self.tangent = self.trial_tangent;
        self.back_stress = self.trial_back_stress;
        self.yielded = self.trial_yielded;
    }

    /// Discard the trial state, restoring the last committed values
    pub fn revert(&mut self) {
        self.trial_strain = self.strain;
        self.trial_stress = self.stress;
        self.trial_tangent = self.tangent;
        self.trial_back_stress = self.back_stress;
        self.trial_yielded = self.yielded;
    }

    /// Trial stress from the most recent `evaluate`
    pub fn trial_stress(&self) -> f64 {
        self.trial_stress
    }

    /// Trial tangent from the most recent `evaluate`
    pub fn trial_tangent(&self) -> f64 {
        self.trial_tangent
    }
}
