//! Driver-level options.
//!
//! This module provides the `RunOptions` struct used by the demonstration drivers to pick the
//! grid resolution, the number of time steps, the integrator and the planar stencil scheme.

use crate::integrator::IntegratorKind;
use crate::stencil::PlaneScheme;

/// Resolution and method selection for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Intervals along r (radial) or x (planar).
    pub intervals: usize,
    /// Intervals along y (planar only).
    pub y_intervals: usize,
    /// Number of time steps over `[0, t_end]`.
    pub time_steps: usize,
    pub integrator: IntegratorKind,
    pub scheme: PlaneScheme,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            intervals: 10,
            y_intervals: 10,
            time_steps: 100,
            integrator: IntegratorKind::ImplicitEuler,
            scheme: PlaneScheme::FivePoint,
        }
    }
}

impl RunOptions {
    /// Uniformly spaced time points `0, t_end/steps, ..., t_end`.
    pub fn time_points(&self, t_end: f64) -> Vec<f64> {
        let steps = self.time_steps.max(1);
        let dt = t_end / steps as f64;
        let mut points: Vec<f64> = (0..steps).map(|i| dt * i as f64).collect();
        points.push(t_end);
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_points_end_exactly() {
        let opts = RunOptions { time_steps: 3, ..RunOptions::default() };
        let pts = opts.time_points(1.0);
        assert_eq!(pts.len(), 4);
        assert_eq!(pts[0], 0.0);
        assert_eq!(pts[3], 1.0);
    }
}
