//! Memoized radial operators keyed on the grid and the parameter bundle they were built from.
//!
//! Only stationary operators (`RadialParams::stationary_operator`) are stored; a time-dependent
//! operator is assembled on every request. Entries hold a clone of the parameter `Arc`, so the
//! address used as identity stays valid for as long as the entry exists.

use std::collections::HashMap;
use std::sync::Arc;

use crate::assembly::line_operator;
use crate::config::RadialParams;
use crate::error::Result;
use crate::grid::Grid;
use crate::matrix::Tridiagonal;
use crate::stencil::RadialStencil;

/// Identity of an assembled operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperatorKey {
    pub grid: u64,
    pub params: usize,
}

impl OperatorKey {
    pub fn of(stencil: &RadialStencil) -> Self {
        OperatorKey {
            grid: stencil.grid().fingerprint(),
            params: Arc::as_ptr(stencil.params()) as usize,
        }
    }
}

struct Entry {
    _params: Arc<RadialParams>,
    grid: Grid,
    operator: Arc<Tridiagonal<f64>>,
}

#[derive(Default)]
pub struct OperatorCache {
    entries: HashMap<OperatorKey, Entry>,
    hits: usize,
    misses: usize,
}

impl OperatorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Band operator of `stencil` at time `t`, reused when the operator is stationary.
    pub fn operator(&mut self, stencil: &RadialStencil, t: f64) -> Result<Arc<Tridiagonal<f64>>> {
        if !stencil.params().stationary_operator {
            self.misses += 1;
            return Ok(Arc::new(line_operator(stencil, t)?));
        }

        let key = OperatorKey::of(stencil);
        if let Some(entry) = self.entries.get(&key) {
            if entry.grid == *stencil.grid() {
                self.hits += 1;
                return Ok(Arc::clone(&entry.operator));
            }
        }

        self.misses += 1;
        log::debug!("assembling radial operator for {} unknowns", stencil.grid().intervals());
        let operator = Arc::new(line_operator(stencil, t)?);
        self.entries.insert(
            key,
            Entry {
                _params: Arc::clone(stencil.params()),
                grid: stencil.grid().clone(),
                operator: Arc::clone(&operator),
            },
        );
        Ok(operator)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}
