//! Structured one-dimensional grids and the spacing queries every stencil is built from.
//!
//! A [`Grid`] is an immutable, strictly increasing sequence of coordinates. The free functions
//! [`spacing`], [`cross_spacing`] and [`midpoint`] work on plain coordinate slices so that the
//! stencil formulas can be written against either a `Grid` or a borrowed slice.

use std::hash::{DefaultHasher, Hash, Hasher};

use crate::error::{FdError, Result};

/// Ordered, strictly increasing grid coordinates spanning `[left, right]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    points: Vec<f64>,
}

impl Grid {
    /// Uniform subdivision of `[left, right]` into `count` intervals (`count + 1` points).
    ///
    /// The last point is set to `right` exactly rather than accumulated.
    pub fn uniform(left: f64, right: f64, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(FdError::InvalidIntervalCount(count));
        }
        if !(left.is_finite() && right.is_finite() && left < right) {
            return Err(FdError::InvalidDomain { left, right });
        }
        let step = (right - left) / count as f64;
        let mut points: Vec<f64> = (0..count).map(|i| left + step * i as f64).collect();
        points.push(right);
        check_increasing(&points)?;
        Ok(Self { points })
    }

    /// Wrap caller-supplied (possibly non-uniform) coordinates.
    pub fn from_points(points: Vec<f64>) -> Result<Self> {
        if points.len() < 2 {
            return Err(FdError::InvalidIntervalCount(points.len().saturating_sub(1)));
        }
        if let Some(bad) = points.iter().position(|p| !p.is_finite()) {
            return Err(FdError::NonMonotonicGrid(bad));
        }
        check_increasing(&points)?;
        Ok(Self { points })
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of intervals (`len() - 1`).
    pub fn intervals(&self) -> usize {
        self.points.len() - 1
    }

    /// Index of the last point.
    pub fn last_index(&self) -> usize {
        self.points.len() - 1
    }

    pub fn left(&self) -> f64 {
        self.points[0]
    }

    pub fn right(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    pub fn point(&self, index: usize) -> Result<f64> {
        self.points
            .get(index)
            .copied()
            .ok_or(FdError::IndexOutOfRange { index, len: self.points.len() })
    }

    pub fn spacing(&self, index: usize) -> Result<f64> {
        spacing(&self.points, index)
    }

    pub fn cross_spacing(&self, index: usize) -> Result<f64> {
        cross_spacing(&self.points, index)
    }

    pub fn midpoint(&self, index: usize) -> Result<f64> {
        midpoint(&self.points, index)
    }

    /// Hash of the coordinate bit patterns; equal grids give equal fingerprints.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.points.len().hash(&mut hasher);
        for p in &self.points {
            p.to_bits().hash(&mut hasher);
        }
        hasher.finish()
    }
}

/// Spacing below the f64 resolution of the bounds collapses neighbouring points.
fn check_increasing(points: &[f64]) -> Result<()> {
    match points.windows(2).position(|w| w[1] <= w[0]) {
        Some(w) => Err(FdError::NonMonotonicGrid(w + 1)),
        None => Ok(()),
    }
}

fn check_index(points: &[f64], index: usize) -> Result<()> {
    if points.len() < 2 || index >= points.len() {
        return Err(FdError::IndexOutOfRange { index, len: points.len() });
    }
    Ok(())
}

/// Length of the interval ending at `index`; for `index == 0` the first interval.
pub fn spacing(points: &[f64], index: usize) -> Result<f64> {
    check_index(points, index)?;
    if index == 0 {
        return Ok(points[1] - points[0]);
    }
    Ok(points[index] - points[index - 1])
}

/// Control-volume width around `index`: half of each adjacent interval.
pub fn cross_spacing(points: &[f64], index: usize) -> Result<f64> {
    check_index(points, index)?;
    let last = points.len() - 1;
    if index == 0 {
        Ok(spacing(points, 1)? / 2.0)
    } else if index == last {
        Ok(spacing(points, index)? / 2.0)
    } else {
        Ok((spacing(points, index)? + spacing(points, index + 1)?) / 2.0)
    }
}

/// Midpoint between `points[index - 1]` and `points[index]`.
pub fn midpoint(points: &[f64], index: usize) -> Result<f64> {
    check_index(points, index)?;
    if index == 0 {
        return Err(FdError::MissingNeighbor { side: "left", index: index.to_string() });
    }
    Ok((points[index] + points[index - 1]) / 2.0)
}
