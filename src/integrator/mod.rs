//! Time integrators for the semi-discrete system `du/dt = A u + g`.
//!
//! Every integrator is a pure function of its inputs: the operator `A` and the forcing `g` are
//! assembled by the caller at the time layer the integrator asks for through
//! [`TimeIntegrator::time_layer`] (the start of the sub-interval for explicit schemes, its end
//! for implicit ones). Results depend only on the inputs; implicit Euler may keep its last
//! factorization, but only to skip work when the same `(h, A)` comes back.

pub mod explicit_euler;
pub mod implicit_euler;
pub mod runge_kutta;

pub use explicit_euler::ExplicitEuler;
pub use implicit_euler::{ImplicitBackend, ImplicitEuler};
pub use runge_kutta::RungeKutta4;

use std::fmt;
use std::str::FromStr;

use faer::Mat;

use crate::core::traits::MatVec;
use crate::error::{FdError, Result};
use crate::matrix::Tridiagonal;

/// Time layer at which the operator and forcing of a step must be assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeLayer {
    Start,
    End,
}

impl TimeLayer {
    pub fn pick(self, t0: f64, t1: f64) -> f64 {
        match self {
            TimeLayer::Start => t0,
            TimeLayer::End => t1,
        }
    }
}

/// One-step integrator over a linear operator.
pub trait TimeIntegrator {
    fn name(&self) -> &'static str;

    /// Where the caller must evaluate `A` and `g` for a step `[t0, t1]`.
    fn time_layer(&self) -> TimeLayer;

    /// Advance `current` from `t0` to `t1`.
    fn advance(&self, current: &[f64], a: &Mat<f64>, g: &[f64], t0: f64, t1: f64) -> Result<Vec<f64>>;

    /// Advance with a tridiagonal operator held in band form.
    ///
    /// Falls back to [`advance`](Self::advance) on the densified operator.
    fn advance_banded(&self, current: &[f64], a: &Tridiagonal<f64>, g: &[f64], t0: f64, t1: f64) -> Result<Vec<f64>> {
        self.advance(current, &a.to_dense(), g, t0, t1)
    }

    /// Advance through every point of `points` with one constant operator.
    ///
    /// Column `i` of the result is the state at `points[i]`; column 0 is `start`.
    fn integrate(&self, start: &[f64], a: &Mat<f64>, g: &[f64], points: &[f64]) -> Result<Mat<f64>> {
        check_time_points(points)?;
        let mut columns = vec![start.to_vec()];
        for w in points.windows(2) {
            let next = self.advance(&columns[columns.len() - 1], a, g, w[0], w[1])?;
            columns.push(next);
        }
        Ok(columns_to_mat(&columns))
    }
}

/// Available integrators, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegratorKind {
    ExplicitEuler,
    ImplicitEuler,
    /// Implicit Euler solved by odd-even reduction; needs a tridiagonal operator.
    ImplicitEulerTridiagonal,
    RungeKutta4,
}

impl IntegratorKind {
    pub const ALL: [IntegratorKind; 4] = [
        IntegratorKind::ExplicitEuler,
        IntegratorKind::ImplicitEuler,
        IntegratorKind::ImplicitEulerTridiagonal,
        IntegratorKind::RungeKutta4,
    ];

    pub fn build(self) -> Box<dyn TimeIntegrator> {
        match self {
            IntegratorKind::ExplicitEuler => Box::new(ExplicitEuler),
            IntegratorKind::ImplicitEuler => Box::new(ImplicitEuler::new()),
            IntegratorKind::ImplicitEulerTridiagonal => {
                Box::new(ImplicitEuler::with_backend(ImplicitBackend::OddEven))
            }
            IntegratorKind::RungeKutta4 => Box::new(RungeKutta4),
        }
    }
}

impl fmt::Display for IntegratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IntegratorKind::ExplicitEuler => "explicit-euler",
            IntegratorKind::ImplicitEuler => "implicit-euler",
            IntegratorKind::ImplicitEulerTridiagonal => "implicit-euler-tridiagonal",
            IntegratorKind::RungeKutta4 => "rk4",
        };
        f.write_str(name)
    }
}

impl FromStr for IntegratorKind {
    type Err = FdError;

    fn from_str(s: &str) -> Result<Self> {
        IntegratorKind::ALL
            .into_iter()
            .find(|k| k.to_string() == s)
            .ok_or(FdError::Unsupported("unknown integrator name"))
    }
}

pub(crate) fn check_time_points(points: &[f64]) -> Result<()> {
    if points.is_empty() || points.windows(2).any(|w| !(w[1] > w[0])) {
        return Err(FdError::InvalidTimePoints);
    }
    Ok(())
}

/// Checks shapes for one step and returns `h = t1 - t0`; `shape` is the operator's `(rows, cols)`.
pub(crate) fn check_step(current: &[f64], shape: (usize, usize), g: &[f64], t0: f64, t1: f64) -> Result<f64> {
    let n = current.len();
    let (rows, cols) = shape;
    if rows != n || cols != n || g.len() != n {
        return Err(FdError::DimensionMismatch(format!(
            "state {} with a {}x{} operator and forcing {}",
            n,
            rows,
            cols,
            g.len()
        )));
    }
    if !(t1 > t0) {
        return Err(FdError::InvalidTimePoints);
    }
    Ok(t1 - t0)
}

/// `A u + g`
pub(crate) fn rate<M: MatVec<Vec<f64>>>(a: &M, u: &[f64], g: &[f64]) -> Vec<f64> {
    let mut y = vec![0.0; u.len()];
    a.matvec(&u.to_vec(), &mut y);
    for (yi, gi) in y.iter_mut().zip(g) {
        *yi += gi;
    }
    y
}

pub(crate) fn columns_to_mat(columns: &[Vec<f64>]) -> Mat<f64> {
    let n = columns.first().map_or(0, Vec::len);
    Mat::from_fn(n, columns.len(), |i, j| columns[j][i])
}
