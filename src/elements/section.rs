//! Fiber section - discretized cross-section and its generalized response

use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};

use crate::elements::{LayoutScheme, MaterialState, Steel};
use crate::error::{SectionError, SectionResult};

/// Generalized deformation of a plane section: axial strain at the centroid
/// and curvature about the bending axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralizedStrain {
    /// Axial strain at the centroid
    pub axial: f64,
    /// Curvature
    pub curvature: f64,
}

impl GeneralizedStrain {
    /// Strain at a fiber a signed distance `y` from the centroid
    ///
    /// Plane sections: ε(y) = ε₀ − y·κ, so positive curvature shortens the
    /// positive-y half of the section.
    pub fn fiber_strain(&self, y: f64) -> f64 {
        self.axial - y * self.curvature
    }
}

/// Generalized section resultant: axial force and bending moment
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralizedForce {
    /// Axial force (positive = tension)
    pub axial: f64,
    /// Bending moment (positive for positive curvature)
    pub moment: f64,
}

impl GeneralizedForce {
    /// The resultant as a 2-vector (N, M)
    pub fn vector(&self) -> Vector2<f64> {
        Vector2::new(self.axial, self.moment)
    }
}

/// Tangent stiffness of the section with respect to its generalized strain
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionStiffness {
    /// Axial stiffness Σ Et·A
    pub ea: f64,
    /// Axial/flexural coupling −Σ Et·A·y (zero while the response stays
    /// symmetric about the centroid)
    pub eq: f64,
    /// Flexural stiffness Σ Et·A·y²
    pub ei: f64,
}

impl SectionStiffness {
    /// The 2×2 Jacobian [[EA, EQ], [EQ, EI]]
    pub fn matrix(&self) -> Matrix2<f64> {
        Matrix2::new(self.ea, self.eq, self.eq, self.ei)
    }
}

/// One longitudinal fiber: a point of area at a signed distance from the
/// centroid, carrying its own uniaxial state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fiber {
    /// Signed distance from the section centroid along the bending axis
    pub position: f64,
    /// Tributary area
    pub area: f64,
    /// Uniaxial material state
    pub state: MaterialState,
}

/// A rectangular cross-section discretized into fibers by a layout scheme
///
/// The section owns its fibers exclusively; their material states advance
/// only through [`commit_all`](Self::commit_all) after a converged step, and
/// roll back through [`revert_all`](Self::revert_all).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiberSection {
    width: f64,
    depth: f64,
    scheme: LayoutScheme,
    steel: Steel,
    fibers: Vec<Fiber>,
}

impl FiberSection {
    /// Discretize a `width` × `depth` rectangle with the given steel and
    /// layout scheme
    pub fn new(
        width: f64,
        depth: f64,
        steel: Steel,
        scheme: LayoutScheme,
    ) -> SectionResult<Self> {
        if !(width > 0.0 && width.is_finite()) || !(depth > 0.0 && depth.is_finite()) {
            return Err(SectionError::InvalidLayout(format!(
                "section dimensions must be positive, got {width} x {depth}"
            )));
        }
        if let LayoutScheme::ExactGrid { resolution: 0 } = scheme {
            return Err(SectionError::InvalidLayout(
                "reference grid needs a resolution of at least 1".to_string(),
            ));
        }

        let fibers = scheme
            .fibers(width, depth)
            .into_iter()
            .map(|(position, area)| Fiber {
                position,
                area,
                state: MaterialState::new(&steel),
            })
            .collect();

        Ok(Self {
            width,
            depth,
            scheme,
            steel,
            fibers,
        })
    }

    /// Section width
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Section depth
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// The layout scheme this section was discretized with
    pub fn scheme(&self) -> LayoutScheme {
        self.scheme
    }

    /// The shared steel law
    pub fn steel(&self) -> &Steel {
        &self.steel
    }

    /// The fibers, in layout order
    pub fn fibers(&self) -> &[Fiber] {
        &self.fibers
    }

    /// Gross area b·d
    pub fn gross_area(&self) -> f64 {
        self.width * self.depth
    }

    /// Analytic plastic moment capacity fy·b·d²/4 of the underlying
    /// rectangle, the reference value scheme comparisons aim for
    pub fn plastic_moment(&self) -> f64 {
        self.steel.fy * self.width * self.depth * self.depth / 4.0
    }

    /// Evaluate the trial section response at a generalized strain
    ///
    /// Each fiber is evaluated as a trial from its committed anchor; nothing
    /// is committed here. Resultants and the tangent follow the fiber-strain
    /// convention ε(y) = ε₀ − y·κ, which puts the minus sign on the moment
    /// and coupling sums.
    pub fn response(
        &mut self,
        strain: &GeneralizedStrain,
    ) -> (GeneralizedForce, SectionStiffness) {
        let mut force = GeneralizedForce::default();
        let mut stiffness = SectionStiffness::default();

        for fiber in &mut self.fibers {
            let (stress, tangent) = fiber
                .state
                .evaluate(&self.steel, strain.fiber_strain(fiber.position));

            let y = fiber.position;
            let a = fiber.area;
            force.axial += stress * a;
            force.moment -= stress * a * y;
            stiffness.ea += tangent * a;
            stiffness.eq -= tangent * a * y;
            stiffness.ei += tangent * a * y * y;
        }

        (force, stiffness)
    }

    /// Accept the trial state of every fiber as converged
    pub fn commit_all(&mut self) {
        for fiber in &mut self.fibers {
            fiber.state.commit();
        }
    }

    /// Discard the trial state of every fiber
    pub fn revert_all(&mut self) {
        for fiber in &mut self.fibers {
            fiber.state.revert();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn section(scheme: LayoutScheme) -> FiberSection {
        FiberSection::new(300.0, 500.0, Steel::s355(), scheme).unwrap()
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let err = FiberSection::new(0.0, 500.0, Steel::s355(), LayoutScheme::Gauss);
        assert!(matches!(err, Err(SectionError::InvalidLayout(_))));

        let err = FiberSection::new(300.0, -1.0, Steel::s355(), LayoutScheme::Gauss);
        assert!(matches!(err, Err(SectionError::InvalidLayout(_))));

        let err = FiberSection::new(
            300.0,
            500.0,
            Steel::s355(),
            LayoutScheme::ExactGrid { resolution: 0 },
        );
        assert!(matches!(err, Err(SectionError::InvalidLayout(_))));
    }

    #[test]
    fn test_elastic_axial_response() {
        let mut section = section(LayoutScheme::Gauss);
        let steel = *section.steel();
        let strain = GeneralizedStrain {
            axial: 0.5 * steel.yield_strain(),
            curvature: 0.0,
        };

        let (force, stiffness) = section.response(&strain);
        assert_relative_eq!(
            force.axial,
            steel.e * section.gross_area() * strain.axial,
            max_relative = 1e-12
        );
        assert_relative_eq!(force.moment, 0.0, epsilon = 1e-6);
        assert_relative_eq!(stiffness.ea, steel.e * section.gross_area(), max_relative = 1e-12);
        assert_relative_eq!(stiffness.eq, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_elastic_moment_proportional_to_curvature() {
        // Gauss matches the exact inertia, so M = E·(b·d³/12)·κ.
        let mut section = section(LayoutScheme::Gauss);
        let steel = *section.steel();
        let ei = steel.e * 300.0 * 500.0_f64.powi(3) / 12.0;

        let curvature = 1e-7;
        let strain = GeneralizedStrain {
            axial: 0.0,
            curvature,
        };
        let (force, stiffness) = section.response(&strain);
        assert_relative_eq!(force.moment, ei * curvature, max_relative = 1e-12);
        assert_relative_eq!(force.axial, 0.0, epsilon = 1e-6);
        assert_relative_eq!(stiffness.ei, ei, max_relative = 1e-12);
    }

    #[test]
    fn test_stiffness_matrix_layout() {
        let mut section = section(LayoutScheme::Radau);
        let (_, stiffness) = section.response(&GeneralizedStrain::default());
        let k = stiffness.matrix();
        assert_eq!(k[(0, 0)], stiffness.ea);
        assert_eq!(k[(0, 1)], stiffness.eq);
        assert_eq!(k[(1, 0)], stiffness.eq);
        assert_eq!(k[(1, 1)], stiffness.ei);
    }

    #[test]
    fn test_commit_and_revert_fan_out() {
        let mut section = section(LayoutScheme::Lobatto);
        let steel = *section.steel();
        let yielding = GeneralizedStrain {
            axial: 0.0,
            curvature: 8.0 * steel.yield_strain() / section.depth(),
        };

        // Trial only: committed fiber state is untouched until commit_all.
        section.response(&yielding);
        assert!(section.fibers().iter().all(|f| !f.state.yielded));

        section.response(&yielding);
        section.commit_all();
        assert!(section.fibers().iter().all(|f| f.state.yielded));

        // Further trials roll back to the committed state.
        let committed: Vec<_> = section.fibers().to_vec();
        section.response(&GeneralizedStrain::default());
        section.revert_all();
        assert_eq!(section.fibers(), committed.as_slice());
    }

    #[test]
    fn test_plastic_moment_reference() {
        let section = section(LayoutScheme::Midpoint);
        assert_relative_eq!(section.plastic_moment(), 355.0 * 300.0 * 500.0 * 500.0 / 4.0);
    }
}
