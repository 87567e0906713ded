//! Classical four-stage Runge-Kutta with a fixed step.
//!
//! ```text
//! k1 = h (A u + g)
//! k2 = h (A (u + k1/2) + g)
//! k3 = h (A (u + k2/2) + g)
//! k4 = h (A (u + k3) + g)
//! u1 = u + (k1 + 2 k2 + 2 k3 + k4) / 6
//! ```
//!
//! The operator and forcing are frozen over the step at its start. There is no embedded error
//! estimate and no step-size control.

use faer::Mat;

use crate::core::traits::MatVec;
use crate::error::Result;
use crate::integrator::{TimeIntegrator, TimeLayer, check_step, rate};
use crate::matrix::Tridiagonal;

#[derive(Debug, Default, Clone, Copy)]
pub struct RungeKutta4;

fn axpy(u: &[f64], s: f64, k: &[f64]) -> Vec<f64> {
    u.iter().zip(k).map(|(ui, ki)| ui + s * ki).collect()
}

fn scaled(h: f64, v: Vec<f64>) -> Vec<f64> {
    v.into_iter().map(|x| h * x).collect()
}

fn classical<M: MatVec<Vec<f64>>>(current: &[f64], a: &M, g: &[f64], h: f64) -> Vec<f64> {
    let k1 = scaled(h, rate(a, current, g));
    let k2 = scaled(h, rate(a, &axpy(current, 0.5, &k1), g));
    let k3 = scaled(h, rate(a, &axpy(current, 0.5, &k2), g));
    let k4 = scaled(h, rate(a, &axpy(current, 1.0, &k3), g));
    (0..current.len())
        .map(|i| current[i] + (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]) / 6.0)
        .collect()
}

impl TimeIntegrator for RungeKutta4 {
    fn name(&self) -> &'static str {
        "Runge-Kutta 4"
    }

    fn time_layer(&self) -> TimeLayer {
        TimeLayer::Start
    }

    fn advance(&self, current: &[f64], a: &Mat<f64>, g: &[f64], t0: f64, t1: f64) -> Result<Vec<f64>> {
        let h = check_step(current, (a.nrows(), a.ncols()), g, t0, t1)?;
        Ok(classical(current, a, g, h))
    }

    fn advance_banded(&self, current: &[f64], a: &Tridiagonal<f64>, g: &[f64], t0: f64, t1: f64) -> Result<Vec<f64>> {
        let h = check_step(current, (a.len(), a.len()), g, t0, t1)?;
        Ok(classical(current, a, g, h))
    }
}
