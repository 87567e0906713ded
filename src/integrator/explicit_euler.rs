//! Forward Euler: `u1 = u0 + h (A u0 + g)` with `A`, `g` taken at the start of the step.

use faer::Mat;

use crate::core::traits::MatVec;
use crate::error::Result;
use crate::integrator::{TimeIntegrator, TimeLayer, check_step, rate};
use crate::matrix::Tridiagonal;

#[derive(Debug, Default, Clone, Copy)]
pub struct ExplicitEuler;

fn forward<M: MatVec<Vec<f64>>>(current: &[f64], a: &M, g: &[f64], h: f64) -> Vec<f64> {
    let du = rate(a, current, g);
    current.iter().zip(du).map(|(u, d)| u + h * d).collect()
}

impl TimeIntegrator for ExplicitEuler {
    fn name(&self) -> &'static str {
        "Euler Explicit"
    }

    fn time_layer(&self) -> TimeLayer {
        TimeLayer::Start
    }

    fn advance(&self, current: &[f64], a: &Mat<f64>, g: &[f64], t0: f64, t1: f64) -> Result<Vec<f64>> {
        let h = check_step(current, (a.nrows(), a.ncols()), g, t0, t1)?;
        Ok(forward(current, a, g, h))
    }

    fn advance_banded(&self, current: &[f64], a: &Tridiagonal<f64>, g: &[f64], t0: f64, t1: f64) -> Result<Vec<f64>> {
        let h = check_step(current, (a.len(), a.len()), g, t0, t1)?;
        Ok(forward(current, a, g, h))
    }
}
