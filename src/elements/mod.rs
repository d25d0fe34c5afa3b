//! Section building blocks: material law, fiber layouts, fiber section

pub mod layout;
pub mod material;
pub mod section;

pub use layout::LayoutScheme;
pub use material::{MaterialState, Steel};
pub use section::{Fiber, FiberSection, GeneralizedForce, GeneralizedStrain, SectionStiffness};
