//! Stencil-coefficient calculators.
//!
//! A stencil turns the continuous coefficients and boundary functions of a problem into the
//! entries of one row of the discrete linear system. Both calculators refuse to produce a
//! neighbour coefficient toward a side that does not exist; such couplings are folded into the
//! diagonal and the forcing term instead.

pub mod plane;
pub mod radial;

pub use plane::{Index2, PlaneScheme, PlaneStencil, Region, Sides};
pub use radial::RadialStencil;

use crate::error::Result;

/// Coefficients of one row of the discrete system.
///
/// In one dimension only `a` (left), `b` (right), `c` and `g` are used. In two dimensions
/// `a`/`b` are the west/east and `d`/`e` the south/north neighbours.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StencilRow {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub g: f64,
}

/// Row coefficients of a three-point stencil at a given time layer.
///
/// Unknowns are numbered `1..=unknowns()`; the system row for unknown `r` is `r - 1`.
pub trait LineStencil {
    /// Number of unknowns (rows of the assembled system).
    fn unknowns(&self) -> usize;
    /// Coefficient of the left neighbour.
    fn a(&self, index: usize, t: f64) -> Result<f64>;
    /// Coefficient of the right neighbour.
    fn b(&self, index: usize, t: f64) -> Result<f64>;
    /// Diagonal coefficient.
    fn c(&self, index: usize, t: f64) -> Result<f64>;
    /// Forcing term.
    fn g(&self, index: usize, t: f64) -> Result<f64>;
}
