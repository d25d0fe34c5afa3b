//! Fiber layout (quadrature) schemes for rectangular sections

use serde::{Deserialize, Serialize};

/// Rule for placing point fibers over a rectangle of width `b` and depth `d`
///
/// The five named schemes use exactly two fibers whose positions and areas
/// are the abscissae and weights of the corresponding quadrature rule over
/// the depth; `ExactGrid` tiles the rectangle into an N×N grid and serves as
/// the reference discretization. Every scheme preserves the gross area b·d,
/// but the first and second area moments differ by scheme; that difference
/// is what a moment-curvature comparison against the reference exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutScheme {
    /// Two fibers at ±d/4, each carrying half the area
    Midpoint,
    /// Two fibers at ±d/(2√3), each carrying half the area
    Gauss,
    /// Two fibers at the extreme edges ±d/2, each carrying half the area
    Lobatto,
    /// Two fibers at {+d/2, −d/6} with areas {b·d/4, 3·b·d/4}
    ///
    /// Asymmetric on purpose: these are the right-Radau abscissae/weights,
    /// kept exactly as published even though the other schemes are symmetric.
    Radau,
    /// Two fibers at ±d/6, each carrying half the area
    NewtonCotes,
    /// N×N tiling of the rectangle, used as the fine reference
    ExactGrid {
        /// Cells per side
        resolution: usize,
    },
}

impl LayoutScheme {
    /// Reference grid at the resolution used by the classic comparison
    pub fn reference() -> Self {
        Self::ExactGrid { resolution: 10 }
    }

    /// Short display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Midpoint => "Midpoint",
            Self::Gauss => "Gauss",
            Self::Lobatto => "Lobatto",
            Self::Radau => "Radau",
            Self::NewtonCotes => "Newton-Cotes",
            Self::ExactGrid { .. } => "Exact",
        }
    }

    /// Generate the (position, area) pairs for a `width` × `depth` rectangle
    ///
    /// Positions are signed distances from the centroid along the bending
    /// axis. Pure function of the dimensions; validation of the inputs
    /// happens at section construction.
    pub fn fibers(&self, width: f64, depth: f64) -> Vec<(f64, f64)> {
        let half_area = width * depth / 2.0;
        match *self {
            Self::Midpoint => vec![(depth / 4.0, half_area), (-depth / 4.0, half_area)],
            Self::Gauss => {
                let y = depth / (2.0 * 3.0_f64.sqrt());
                vec![(y, half_area), (-y, half_area)]
            }
            Self::Lobatto => vec![(depth / 2.0, half_area), (-depth / 2.0, half_area)],
            Self::Radau => vec![
                (depth / 2.0, width * depth / 4.0),
                (-depth / 6.0, 3.0 * width * depth / 4.0),
            ],
            Self::NewtonCotes => vec![(depth / 6.0, half_area), (-depth / 6.0, half_area)],
            Self::ExactGrid { resolution } => {
                let n = resolution;
                let cell_area = width * depth / (n * n) as f64;
                let cell_depth = depth / n as f64;
                let mut fibers = Vec::with_capacity(n * n);
                for row in 0..n {
                    // Row center measured from the centroid
                    let y = -depth / 2.0 + (row as f64 + 0.5) * cell_depth;
                    for _ in 0..n {
                        fibers.push((y, cell_area));
                    }
                }
                fibers
            }
        }
    }
}
