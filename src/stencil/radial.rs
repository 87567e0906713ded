//! Conservative three-point stencil for radial diffusion.
//!
//! The control volume of node `r` is `V_r = r_r * hbar_r`. The face between nodes `r - 1` and `r`
//! sits at the grid midpoint and carries the harmonic mean of the two nodal conductivities:
//!
//! ```text
//! w_r  = midpoint(r) * kappa_r / h_r
//! a(r) = w_r / V_r
//! b(r) = w_{r+1} / V_r
//! c(r) = -(w_r + w_{r+1}) / V_r - q_r        (r < N)
//! c(N) = -(w_N + r_N hi2) / V_N - q_N
//! g(r) = f_r + [r == 1] w_1 v1 / V_1 + [r == N] r_N v2 / V_N
//! ```

use std::sync::Arc;

use crate::config::RadialParams;
use crate::error::{FdError, Result};
use crate::grid::Grid;
use crate::stencil::{LineStencil, StencilRow};

/// Stencil over the unknowns `1..=N` of an `N`-interval radial grid.
#[derive(Debug, Clone)]
pub struct RadialStencil {
    params: Arc<RadialParams>,
    grid: Grid,
}

fn harmonic_mean(k0: f64, k1: f64) -> f64 {
    let sum = k0 + k1;
    if sum == 0.0 { 0.0 } else { 2.0 * k0 * k1 / sum }
}

impl RadialStencil {
    pub fn new(params: Arc<RadialParams>, grid: Grid) -> Self {
        Self { params, grid }
    }

    pub fn params(&self) -> &Arc<RadialParams> {
        &self.params
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    fn last(&self) -> usize {
        self.grid.last_index()
    }

    fn check(&self, index: usize) -> Result<()> {
        if index == 0 || index > self.last() {
            return Err(FdError::IndexOutOfRange { index, len: self.grid.len() });
        }
        Ok(())
    }

    /// Flux weight through the face between `index - 1` and `index`.
    fn face_weight(&self, index: usize, t: f64) -> Result<f64> {
        let k = &self.params.k;
        let pts = self.grid.points();
        let kappa = harmonic_mean(k(pts[index - 1], t), k(pts[index], t));
        Ok(self.grid.midpoint(index)? * kappa / self.grid.spacing(index)?)
    }

    fn volume(&self, index: usize) -> Result<f64> {
        Ok(self.grid.point(index)? * self.grid.cross_spacing(index)?)
    }

    /// All four coefficients at once; neighbours that do not exist are reported as zero.
    pub fn row(&self, index: usize, t: f64) -> Result<StencilRow> {
        self.check(index)?;
        Ok(StencilRow {
            a: if index > 1 { self.a(index, t)? } else { 0.0 },
            b: if index < self.last() { self.b(index, t)? } else { 0.0 },
            c: self.c(index, t)?,
            g: self.g(index, t)?,
            ..StencilRow::default()
        })
    }
}

impl LineStencil for RadialStencil {
    fn unknowns(&self) -> usize {
        self.grid.intervals()
    }

    fn a(&self, index: usize, t: f64) -> Result<f64> {
        self.check(index)?;
        if index == 1 {
            return Err(FdError::MissingNeighbor { side: "left", index: index.to_string() });
        }
        Ok(self.face_weight(index, t)? / self.volume(index)?)
    }

    fn b(&self, index: usize, t: f64) -> Result<f64> {
        self.check(index)?;
        if index == self.last() {
            return Err(FdError::MissingNeighbor { side: "right", index: index.to_string() });
        }
        Ok(self.face_weight(index + 1, t)? / self.volume(index)?)
    }

    fn c(&self, index: usize, t: f64) -> Result<f64> {
        self.check(index)?;
        let r = self.grid.point(index)?;
        let q = (self.params.q)(r, t);
        let inflow = self.face_weight(index, t)?;
        let outflow = if index == self.last() {
            r * self.params.hi2
        } else {
            self.face_weight(index + 1, t)?
        };
        Ok(-(inflow + outflow) / self.volume(index)? - q)
    }

    fn g(&self, index: usize, t: f64) -> Result<f64> {
        self.check(index)?;
        let r = self.grid.point(index)?;
        let volume = self.volume(index)?;
        let mut g = (self.params.f)(r, t);
        if index == 1 {
            g += self.face_weight(1, t)? * (self.params.v1)(t) / volume;
        }
        if index == self.last() {
            g += r * (self.params.v2)(t) / volume;
        }
        Ok(g)
    }
}
