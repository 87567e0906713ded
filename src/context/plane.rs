//! Direct solve of the stationary planar problem.
//!
//! The five-point system is factorized in sparse form; nothing is densified.

use std::sync::Arc;

use faer::Mat;

use crate::assembly::plane_system;
use crate::config::PlaneParams;
use crate::error::Result;
use crate::grid::Grid;
use crate::solver::{LinearSolver, SparseLuSolver};
use crate::stencil::{Index2, PlaneScheme, PlaneStencil};
use crate::utils::convergence::SolveStats;

pub struct PlaneSolver {
    stencil: PlaneStencil,
}

impl PlaneSolver {
    /// Uniform `nx x ny`-interval grid over the rectangle of `params`.
    pub fn new(params: Arc<PlaneParams>, nx: usize, ny: usize, scheme: PlaneScheme) -> Result<Self> {
        let x = Grid::uniform(params.xl, params.xr, nx)?;
        let y = Grid::uniform(params.yl, params.yr, ny)?;
        Ok(Self { stencil: PlaneStencil::new(params, x, y).with_scheme(scheme) })
    }

    pub fn stencil(&self) -> &PlaneStencil {
        &self.stencil
    }

    /// Nodal solution as an `(Nx + 1) x (Ny + 1)` matrix: column `j` is grid row `y_j`.
    pub fn solve(&self) -> Result<(Mat<f64>, SolveStats<f64>)> {
        let (system, rhs) = plane_system(&self.stencil)?;
        let mut flat = vec![0.0; rhs.len()];
        let stats = SparseLuSolver::new().solve(&system, &rhs, &mut flat)?;
        let nodes = Mat::from_fn(self.stencil.x_grid().len(), self.stencil.y_grid().len(), |i, j| {
            flat[self.stencil.flat(Index2::new(i, j))]
        });
        Ok((nodes, stats))
    }

    /// `u` sampled on the same layout as [`PlaneSolver::solve`].
    pub fn sample(&self, u: impl Fn(f64, f64) -> f64) -> Mat<f64> {
        let (x, y) = (self.stencil.x_grid().points(), self.stencil.y_grid().points());
        Mat::from_fn(x.len(), y.len(), |i, j| u(x[i], y[j]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linear_solution_is_reproduced() {
        // u = x + y with k1 = 1: no source, u2 = 1 + hi2 (1 + y)
        let params = Arc::new(PlaneParams {
            xl: 0.0,
            xr: 1.0,
            yl: 0.0,
            yr: 1.0,
            k1: Arc::new(|_| 1.0),
            hi2: 2.0,
            f: Arc::new(|_, _| 0.0),
            u1: Arc::new(|y| y),
            u2: Arc::new(|y| 1.0 + 2.0 * (1.0 + y)),
            u3: Arc::new(|x| x),
            u4: Arc::new(|x| x + 1.0),
        });
        let solver = PlaneSolver::new(params, 6, 4, PlaneScheme::FivePoint).unwrap();
        let (u, stats) = solver.solve().unwrap();
        assert!(stats.converged);
        let exact = solver.sample(|x, y| x + y);
        for i in 0..u.nrows() {
            for j in 0..u.ncols() {
                assert_relative_eq!(u[(i, j)], exact[(i, j)], epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn fine_grid_solve_is_finite() {
        let params = Arc::new(PlaneParams {
            xl: 0.0,
            xr: 2.0,
            yl: 0.0,
            yr: 1.0,
            k1: Arc::new(|x| 1.0 + x),
            hi2: 1.0,
            f: Arc::new(|x, y| x * y),
            u1: Arc::new(|y| y),
            u2: Arc::new(|_| 1.0),
            u3: Arc::new(|_| 0.0),
            u4: Arc::new(|x| 1.0 - x / 4.0),
        });
        let (u, stats) = PlaneSolver::new(params, 40, 30, PlaneScheme::FivePoint).unwrap().solve().unwrap();
        assert_eq!((u.nrows(), u.ncols()), (41, 31));
        assert!(stats.final_residual < 1e-8, "{}", stats.final_residual);
        for j in 0..u.ncols() {
            for i in 0..u.nrows() {
                assert!(u[(i, j)].is_finite());
            }
        }
    }
}
