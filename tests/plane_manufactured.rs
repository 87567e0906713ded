//! Manufactured-solution tests for the planar stationary problem.
//!
//! `u = 3x^3 + 2y^3` on `[1, 10] x [1, 5]` with `k1 = 2`, `hi2 = 5`. The interior rows reproduce a
//! cubic exactly up to the `O(h^2)` truncation of the second differences, and the half-cell Robin
//! row is first order locally, so the nodal error must fall under refinement.

use std::sync::Arc;

use approx::assert_relative_eq;
use faer::Mat;
use fdstep::config::PlaneParams;
use fdstep::error::FdError;
use fdstep::stencil::{Index2, PlaneScheme, Region};
use fdstep::{Grid, PlaneSolver, PlaneStencil};

fn exact(x: f64, y: f64) -> f64 {
    3.0 * x.powi(3) + 2.0 * y.powi(3)
}

fn cubic() -> Arc<PlaneParams> {
    Arc::new(PlaneParams {
        xl: 1.0,
        xr: 10.0,
        yl: 1.0,
        yr: 5.0,
        k1: Arc::new(|_| 2.0),
        hi2: 5.0,
        f: Arc::new(|x, y| -36.0 * x - 12.0 * y),
        u1: Arc::new(|y| 3.0 + 2.0 * y.powi(3)),
        // k1 u_x + hi2 u at x = 10
        u2: Arc::new(|y| 2.0 * 900.0 + 5.0 * (3000.0 + 2.0 * y.powi(3))),
        u3: Arc::new(|x| 3.0 * x.powi(3) + 2.0),
        u4: Arc::new(|x| 3.0 * x.powi(3) + 250.0),
    })
}

fn max_abs_diff(a: &Mat<f64>, b: &Mat<f64>) -> f64 {
    let mut m: f64 = 0.0;
    for j in 0..a.ncols() {
        for i in 0..a.nrows() {
            m = m.max((a[(i, j)] - b[(i, j)]).abs());
        }
    }
    m
}

fn nodal_error(nx: usize, ny: usize, scheme: PlaneScheme) -> f64 {
    let solver = PlaneSolver::new(cubic(), nx, ny, scheme).unwrap();
    let (u, stats) = solver.solve().unwrap();
    assert!(stats.converged);
    max_abs_diff(&u, &solver.sample(exact))
}

#[test]
fn error_falls_under_refinement() {
    let errors: Vec<f64> =
        [(9, 4), (18, 8), (36, 16)].into_iter().map(|(nx, ny)| nodal_error(nx, ny, PlaneScheme::FivePoint)).collect();
    for w in errors.windows(2) {
        assert!(w[1] < w[0] / 2.0, "errors {errors:?}");
    }
    // max |u| on the rectangle is 3250
    assert!(errors[2] < 32.5, "errors {errors:?}");
}

#[test]
fn scaled_rows_give_the_same_solution() {
    let plain = PlaneSolver::new(cubic(), 12, 6, PlaneScheme::FivePoint).unwrap().solve().unwrap().0;
    let scaled = PlaneSolver::new(cubic(), 12, 6, PlaneScheme::FivePointScaled).unwrap().solve().unwrap().0;
    for j in 0..plain.ncols() {
        for i in 0..plain.nrows() {
            assert_relative_eq!(plain[(i, j)], scaled[(i, j)], max_relative = 1e-9, epsilon = 1e-9);
        }
    }
}

#[test]
fn dirichlet_sides_are_imposed_exactly() {
    let solver = PlaneSolver::new(cubic(), 9, 4, PlaneScheme::FivePoint).unwrap();
    let (u, _) = solver.solve().unwrap();
    let x = solver.stencil().x_grid().points().to_vec();
    let y = solver.stencil().y_grid().points().to_vec();
    for (j, &yj) in y.iter().enumerate() {
        assert_relative_eq!(u[(0, j)], exact(1.0, yj), max_relative = 1e-9);
    }
    for (i, &xi) in x.iter().enumerate() {
        assert_relative_eq!(u[(i, 0)], exact(xi, 1.0), max_relative = 1e-9);
        assert_relative_eq!(u[(i, 4)], exact(xi, 5.0), max_relative = 1e-9);
    }
}

#[test]
fn lower_left_corner_takes_the_west_value() {
    // inconsistent data at (xl, yl): west says 7, south says 11
    let base = cubic();
    let params = Arc::new(PlaneParams {
        u1: Arc::new(|_| 7.0),
        u3: Arc::new(|_| 11.0),
        ..(*base).clone()
    });
    let solver = PlaneSolver::new(params, 4, 4, PlaneScheme::FivePoint).unwrap();
    let (u, _) = solver.solve().unwrap();
    assert_relative_eq!(u[(0, 0)], 7.0, max_relative = 1e-9);
    assert_eq!(solver.stencil().region(Index2::new(0, 0)).unwrap(), Region::LowerLeftCorner);
}

#[test]
fn missing_neighbours_are_refused() {
    let x = Grid::uniform(1.0, 10.0, 3).unwrap();
    let y = Grid::uniform(1.0, 5.0, 3).unwrap();
    let stencil = PlaneStencil::new(cubic(), x, y);
    // east boundary has no right neighbour, north boundary no upper one
    assert!(matches!(stencil.b(Index2::new(3, 1)), Err(FdError::MissingNeighbor { .. })));
    assert!(stencil.a(Index2::new(3, 1)).is_ok());
    assert!(matches!(stencil.a(Index2::new(4, 1)), Err(FdError::IndexOutOfRange { .. })));
    assert!(matches!(stencil.d(Index2::new(1, 0)), Err(FdError::MissingNeighbor { side: "south", .. })));
    assert!(matches!(stencil.e(Index2::new(1, 3)), Err(FdError::MissingNeighbor { side: "north", .. })));
    assert!(stencil.d(Index2::new(1, 1)).is_ok());
    assert!(stencil.e(Index2::new(1, 2)).is_ok());
}
