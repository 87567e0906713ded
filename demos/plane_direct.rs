//! Direct solve of the planar problem with `u = 3x^3 + 2y^3` on `[1, 10] x [1, 5]`.
//!
//! Prints the nodal error for both row normalisations on a sequence of grids.

use std::sync::Arc;
use std::time::Instant;

use fdstep::{PlaneParams, PlaneScheme, PlaneSolver, RunOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let (k1, hi2, xr) = (2.0, 5.0, 10.0);
    let params = Arc::new(PlaneParams {
        xl: 1.0,
        xr,
        yl: 1.0,
        yr: 5.0,
        k1: Arc::new(move |_| k1),
        hi2,
        f: Arc::new(|x, y| -36.0 * x - 12.0 * y),
        u1: Arc::new(|y| 3.0 + 2.0 * y.powi(3)),
        u2: Arc::new(move |y| k1 * 9.0 * xr * xr + hi2 * (3.0 * xr.powi(3) + 2.0 * y.powi(3))),
        u3: Arc::new(|x| 3.0 * x.powi(3) + 2.0),
        u4: Arc::new(|x| 3.0 * x.powi(3) + 250.0),
    });
    let exact = |x: f64, y: f64| 3.0 * x.powi(3) + 2.0 * y.powi(3);

    for scheme in [PlaneScheme::FivePoint, PlaneScheme::FivePointScaled] {
        println!("{scheme:?}");
        println!("{:>10} {:>14} {:>12} {:>10}", "grid", "max error", "residual", "time");
        for (nx, ny) in [(9, 4), (18, 8), (36, 16), (72, 32)] {
            let opts = RunOptions { intervals: nx, y_intervals: ny, scheme, ..RunOptions::default() };
            let solver = PlaneSolver::new(params.clone(), opts.intervals, opts.y_intervals, opts.scheme)?;
            let start = Instant::now();
            let (u, stats) = solver.solve()?;
            let elapsed = start.elapsed();
            let reference = solver.sample(exact);
            let mut err: f64 = 0.0;
            for j in 0..u.ncols() {
                for i in 0..u.nrows() {
                    err = err.max((u[(i, j)] - reference[(i, j)]).abs());
                }
            }
            let grid = format!("{nx}x{ny}");
            println!("{grid:>10} {err:>14.3e} {:>12.3e} {elapsed:>10.2?}", stats.final_residual);
        }
        println!();
    }
    Ok(())
}
