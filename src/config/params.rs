//! Closure-valued parameter bundles for the two problem families.
//!
//! The radial problem is
//!
//! ```text
//! du/dt = (1/r) d/dr ( r k(r,t) du/dr ) - q(r,t) u + f(r,t),   r in [rl, rr], t in [0, t_end]
//! u(rl, t)         = v1(t)
//! -k du/dr (rr, t) = hi2 u(rr, t) - v2(t)
//! u(r, 0)          = phi(r)
//! ```
//!
//! and the planar problem is
//!
//! ```text
//! -d/dx( k1(x) du/dx ) - d2u/dy2 = f(x, y)    on [xl, xr] x [yl, yr]
//! u(xl, y) = u1(y)
//! k1 du/dx (xr, y) + hi2 u(xr, y) = u2(y)
//! u(x, yl) = u3(x)
//! u(x, yr) = u4(x)
//! ```
//!
//! Bundles are shared read-only behind an `Arc` by the stencils, the assembly cache and the
//! drivers.

use std::fmt;
use std::sync::Arc;

/// Function of a single coordinate (or of time).
pub type ScalarFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;
/// Function of `(r, t)`.
pub type SpaceTimeFn = Arc<dyn Fn(f64, f64) -> f64 + Send + Sync>;
/// Function of `(x, y)`.
pub type PlaneFn = Arc<dyn Fn(f64, f64) -> f64 + Send + Sync>;

/// Radial diffusion with a Dirichlet inner boundary and a Robin outer boundary.
#[derive(Clone)]
pub struct RadialParams {
    pub rl: f64,
    pub rr: f64,
    pub t_end: f64,
    /// `u(rl, t) = v1(t)`
    pub v1: ScalarFn,
    /// Robin coefficient: `-k du/dr = hi2 u(rr) - v2(t)`
    pub hi2: f64,
    /// Initial profile `u(r, 0)`.
    pub phi: ScalarFn,
    pub v2: ScalarFn,
    pub k: SpaceTimeFn,
    pub q: SpaceTimeFn,
    pub f: SpaceTimeFn,
    /// `k` and `q` do not depend on time, so one assembled operator serves every time layer.
    pub stationary_operator: bool,
}

impl fmt::Debug for RadialParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadialParams")
            .field("rl", &self.rl)
            .field("rr", &self.rr)
            .field("t_end", &self.t_end)
            .field("hi2", &self.hi2)
            .field("stationary_operator", &self.stationary_operator)
            .finish_non_exhaustive()
    }
}

/// Planar elliptic problem with Dirichlet west/south/north edges and a Robin east edge.
#[derive(Clone)]
pub struct PlaneParams {
    pub xl: f64,
    pub xr: f64,
    pub yl: f64,
    pub yr: f64,
    /// Conductivity along x.
    pub k1: ScalarFn,
    pub hi2: f64,
    pub f: PlaneFn,
    /// `u(xl, y)`
    pub u1: ScalarFn,
    /// `k1 du/dx + hi2 u` at `x = xr`
    pub u2: ScalarFn,
    /// `u(x, yl)`
    pub u3: ScalarFn,
    /// `u(x, yr)`
    pub u4: ScalarFn,
}

impl fmt::Debug for PlaneParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaneParams")
            .field("x", &(self.xl, self.xr))
            .field("y", &(self.yl, self.yr))
            .field("hi2", &self.hi2)
            .finish_non_exhaustive()
    }
}
