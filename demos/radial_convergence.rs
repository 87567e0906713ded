//! Temporal convergence of every integrator on the radial problem.
//!
//! Uses the manufactured solution `u = exp(-t) + 2r` (k = 1, q = 3), which the spatial scheme
//! reproduces exactly, so the printed error is the time-stepping error alone.
//!
//! Run with `RUST_LOG=debug cargo run --example radial_convergence` to see assembly logs.

use std::sync::Arc;
use std::time::Instant;

use fdstep::{IntegratorKind, RadialParams, RadialStepper, RunOptions, max_abs_error, observed_order};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let (rl, rr, hi2) = (1.0, 2.0, 1.5);
    let params = Arc::new(RadialParams {
        rl,
        rr,
        t_end: 1.0,
        v1: Arc::new(move |t| (-t).exp() + 2.0 * rl),
        hi2,
        phi: Arc::new(|r| 1.0 + 2.0 * r),
        v2: Arc::new(move |t| hi2 * ((-t).exp() + 2.0 * rr) + 2.0),
        k: Arc::new(|_, _| 1.0),
        q: Arc::new(|_, _| 3.0),
        f: Arc::new(|r, t| 2.0 * (-t).exp() - 2.0 / r + 6.0 * r),
        stationary_operator: true,
    });
    let exact = |r: f64, t: f64| (-t).exp() + 2.0 * r;

    for kind in IntegratorKind::ALL {
        println!("{kind}");
        println!("{:>8} {:>14} {:>8} {:>10}", "steps", "max error", "order", "time");
        let mut previous: Option<f64> = None;
        for steps in [400, 800, 1600, 3200] {
            let opts = RunOptions { intervals: 8, time_steps: steps, integrator: kind, ..RunOptions::default() };
            let times = opts.time_points(params.t_end);
            let mut stepper = RadialStepper::new(params.clone(), opts.intervals)?;
            let integrator = opts.integrator.build();

            let start = Instant::now();
            let states = stepper.run(integrator.as_ref(), &times)?;
            let elapsed = start.elapsed();

            let last = states.ncols() - 1;
            let computed: Vec<f64> = (0..states.nrows()).map(|i| states[(i, last)]).collect();
            let err = max_abs_error(&computed, &stepper.sample(exact, params.t_end));
            let order = previous.map(|e| format!("{:.2}", observed_order(e, err, 2.0))).unwrap_or_default();
            println!("{steps:>8} {err:>14.3e} {order:>8} {elapsed:>10.2?}");
            previous = Some(err);
        }
        println!();
    }
    Ok(())
}
