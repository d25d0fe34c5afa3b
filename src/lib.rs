//! Fiber Section - a native Rust moment-curvature solver
//!
//! This library computes the moment-curvature response of a rectangular
//! cross-section discretized into longitudinal fibers, without any external
//! finite-element framework:
//! - Bilinear elasto-plastic steel with kinematic hardening
//! - Five two-fiber layout (quadrature) schemes plus a fine reference grid
//! - Two-phase solve: load-controlled axial step, then a
//!   displacement-controlled curvature sweep under constant axial load
//! - Full Newton-Raphson equilibrium iteration per step
//!
//! ## Example
//! ```rust
//! use fiber_section::prelude::*;
//!
//! let steel = Steel::s355();
//!
//! // 300 x 500 rectangle, two Gauss fibers, no axial load, curvature
//! // ramped to 6.4e-5 in 100 steps.
//! let response =
//!     moment_curvature(300.0, 500.0, steel, LayoutScheme::Gauss, 0.0, 6.4e-5, 100).unwrap();
//!
//! assert_eq!(response.len(), 101);
//! let ultimate = response.ultimate_moment().unwrap();
//! assert!(ultimate > 0.0);
//! ```

pub mod analysis;
pub mod elements;
pub mod error;
pub mod model;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{AnalysisOptions, AnalysisPhase};
    pub use crate::elements::{
        Fiber, FiberSection, GeneralizedForce, GeneralizedStrain, LayoutScheme, MaterialState,
        SectionStiffness, Steel,
    };
    pub use crate::error::{SectionError, SectionResult};
    pub use crate::model::{moment_curvature, SectionRig};
    pub use crate::results::{AnalysisStep, Response};
}
