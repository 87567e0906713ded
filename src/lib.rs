//! fdstep: stencils, odd-even reduction and time integrators for structured-grid diffusion
//!
//! This crate discretizes a radial diffusion equation (Dirichlet inner boundary, Robin outer
//! boundary) and a planar elliptic problem (Dirichlet/Robin edges) on regular, possibly
//! non-uniform grids, assembles the resulting linear systems over Faer storage, and solves or
//! advances them with odd-even reduction, dense LU, explicit/implicit Euler or classical RK4.

pub mod assembly;
pub mod config;
pub mod context;
pub mod core;
pub mod error;
pub mod grid;
pub mod integrator;
pub mod matrix;
pub mod solver;
pub mod stencil;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use context::{PlaneSolver, RadialStepper};
pub use self::core::*;
pub use error::*;
pub use grid::Grid;
pub use integrator::{
    ExplicitEuler, ImplicitBackend, ImplicitEuler, IntegratorKind, RungeKutta4, TimeIntegrator, TimeLayer,
};
pub use matrix::*;
pub use solver::*;
pub use stencil::{Index2, LineStencil, PlaneScheme, PlaneStencil, RadialStencil, Region, Sides, StencilRow};
pub use utils::*;

// Re-export SolveStats at the crate root for convenience
pub use utils::convergence::SolveStats;
