//! Time stepping of the radial problem.
//!
//! `RadialStepper` ties a [`RadialStencil`] to a [`TimeIntegrator`]: for every sub-interval
//! `[t0, t1]` it assembles the operator and forcing at the layer the integrator asks for, then
//! advances the state. Stationary operators come out of an [`OperatorCache`].
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut stepper = RadialStepper::new(params, 50)?;
//! let states = stepper.run(&ImplicitEuler::new(), &times)?;
//! ```

use std::sync::Arc;

use faer::Mat;

use crate::assembly::{OperatorCache, line_forcing};
use crate::config::RadialParams;
use crate::error::{FdError, Result};
use crate::grid::Grid;
use crate::integrator::{TimeIntegrator, check_time_points, columns_to_mat};
use crate::stencil::RadialStencil;

pub struct RadialStepper {
    stencil: RadialStencil,
    cache: OperatorCache,
}

impl RadialStepper {
    /// Uniform grid of `intervals` intervals over `[rl, rr]`.
    pub fn new(params: Arc<RadialParams>, intervals: usize) -> Result<Self> {
        let grid = Grid::uniform(params.rl, params.rr, intervals)?;
        Self::with_grid(params, grid)
    }

    /// Caller-supplied grid; it must span `[rl, rr]` exactly.
    pub fn with_grid(params: Arc<RadialParams>, grid: Grid) -> Result<Self> {
        if grid.left() != params.rl || grid.right() != params.rr {
            return Err(FdError::InvalidDomain { left: grid.left(), right: grid.right() });
        }
        Ok(Self { stencil: RadialStencil::new(params, grid), cache: OperatorCache::new() })
    }

    pub fn stencil(&self) -> &RadialStencil {
        &self.stencil
    }

    pub fn cache(&self) -> &OperatorCache {
        &self.cache
    }

    /// Unknown nodes `1..=N`.
    fn nodes(&self) -> &[f64] {
        &self.stencil.grid().points()[1..]
    }

    /// `phi` sampled at the unknown nodes.
    pub fn initial_state(&self) -> Vec<f64> {
        let phi = &self.stencil.params().phi;
        self.nodes().iter().map(|&r| phi(r)).collect()
    }

    /// Any function of `(r, t)` sampled at the unknown nodes.
    pub fn sample(&self, u: impl Fn(f64, f64) -> f64, t: f64) -> Vec<f64> {
        self.nodes().iter().map(|&r| u(r, t)).collect()
    }

    /// Full profile over the grid: the Dirichlet value followed by `state`.
    pub fn profile(&self, state: &[f64], t: f64) -> Vec<f64> {
        let mut out = Vec::with_capacity(state.len() + 1);
        out.push((self.stencil.params().v1)(t));
        out.extend_from_slice(state);
        out
    }

    /// One step from `t0` to `t1`.
    pub fn step(&mut self, integrator: &dyn TimeIntegrator, current: &[f64], t0: f64, t1: f64) -> Result<Vec<f64>> {
        let t = integrator.time_layer().pick(t0, t1);
        let a = self.cache.operator(&self.stencil, t)?;
        let g = line_forcing(&self.stencil, t)?;
        log::trace!("{}: [{t0}, {t1}] assembled at t = {t}", integrator.name());
        integrator.advance_banded(current, &a, &g, t0, t1)
    }

    /// States at every point of `times`, one column each; column 0 is the initial profile.
    pub fn run(&mut self, integrator: &dyn TimeIntegrator, times: &[f64]) -> Result<Mat<f64>> {
        check_time_points(times)?;
        let mut columns = vec![self.initial_state()];
        for w in times.windows(2) {
            let next = self.step(integrator, &columns[columns.len() - 1], w[0], w[1])?;
            columns.push(next);
        }
        log::debug!(
            "{}: {} steps over {} unknowns (operator cache hits {}, misses {})",
            integrator.name(),
            times.len() - 1,
            self.stencil.grid().intervals(),
            self.cache.hits(),
            self.cache.misses()
        );
        Ok(columns_to_mat(&columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrator::{ExplicitEuler, ImplicitEuler, TimeLayer};
    use std::sync::Mutex;

    fn params() -> Arc<RadialParams> {
        Arc::new(RadialParams {
            rl: 1.0,
            rr: 2.0,
            t_end: 1.0,
            v1: Arc::new(|t| t),
            hi2: 1.0,
            phi: Arc::new(|r| r * r),
            v2: Arc::new(|_| 0.0),
            k: Arc::new(|_, _| 1.0),
            q: Arc::new(|_, _| 0.0),
            f: Arc::new(|_, _| 0.0),
            stationary_operator: true,
        })
    }

    /// Records the layer each step was asked to assemble at.
    struct Recorder {
        layer: TimeLayer,
        seen: Mutex<Vec<(f64, f64)>>,
    }

    impl TimeIntegrator for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }
        fn time_layer(&self) -> TimeLayer {
            self.layer
        }
        fn advance(&self, current: &[f64], _a: &Mat<f64>, _g: &[f64], t0: f64, t1: f64) -> Result<Vec<f64>> {
            self.seen.lock().unwrap().push((t0, t1));
            Ok(current.to_vec())
        }
    }

    #[test]
    fn initial_state_skips_dirichlet_node() {
        let stepper = RadialStepper::new(params(), 4).unwrap();
        assert_eq!(stepper.initial_state(), vec![1.5625, 2.25, 3.0625, 4.0]);
        assert_eq!(stepper.profile(&[7.0], 3.0), vec![3.0, 7.0]);
    }

    #[test]
    fn run_returns_one_column_per_time() {
        let mut stepper = RadialStepper::new(params(), 4).unwrap();
        let out = stepper.run(&ImplicitEuler::new(), &[0.0, 0.1, 0.2]).unwrap();
        assert_eq!((out.nrows(), out.ncols()), (4, 3));
        assert_eq!(out[(3, 0)], 4.0);
        assert_eq!(stepper.cache().misses(), 1);
        assert_eq!(stepper.cache().hits(), 1);
    }

    #[test]
    fn recorder_sees_every_interval_in_order() {
        let recorder = Recorder { layer: TimeLayer::End, seen: Mutex::new(Vec::new()) };
        let mut stepper = RadialStepper::new(params(), 2).unwrap();
        stepper.run(&recorder, &[0.0, 0.5, 1.0]).unwrap();
        assert_eq!(*recorder.seen.lock().unwrap(), vec![(0.0, 0.5), (0.5, 1.0)]);
    }

    #[test]
    fn grid_must_span_the_domain() {
        let grid = Grid::uniform(0.0, 2.0, 4).unwrap();
        assert!(RadialStepper::with_grid(params(), grid).is_err());
    }

    #[test]
    fn invalid_times_rejected() {
        let mut stepper = RadialStepper::new(params(), 2).unwrap();
        assert_eq!(stepper.run(&ExplicitEuler, &[1.0, 0.5]).unwrap_err(), FdError::InvalidTimePoints);
    }
}
