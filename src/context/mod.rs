//! Drivers that wire grids, stencils, solvers and integrators together.
//!
//! Modules:
//! - [`stepping`]: `RadialStepper`, time stepping of the radial problem with layer-aware assembly.
//! - [`plane`]: `PlaneSolver`, direct solve of the planar problem.

pub mod plane;
pub mod stepping;

pub use plane::PlaneSolver;
pub use stepping::RadialStepper;
