//! Problem configuration: coefficient/boundary function bundles and driver options.

pub mod options;
pub mod params;

pub use options::RunOptions;
pub use params::{PlaneParams, RadialParams, ScalarFn, SpaceTimeFn, PlaneFn};
