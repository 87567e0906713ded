//! Solve statistics & discretization-error measures.

/// Outcome of one linear solve.
#[derive(Clone, Debug)]
pub struct SolveStats<T> {
    pub iterations: usize,
    pub final_residual: T,
    pub converged: bool,
}

impl<T: Copy + num_traits::Float> SolveStats<T> {
    /// Stats for a direct solve with a measured residual.
    pub fn direct(residual: T) -> Self {
        SolveStats { iterations: 1, final_residual: residual, converged: residual.is_finite() }
    }
}

/// `max_i |computed_i - exact_i|`.
pub fn max_abs_error(computed: &[f64], exact: &[f64]) -> f64 {
    assert_eq!(computed.len(), exact.len(), "Vectors must have the same length");
    computed
        .iter()
        .zip(exact)
        .map(|(c, e)| (c - e).abs())
        .fold(0.0, f64::max)
}

/// Observed order `log(e_coarse / e_fine) / log(refinement)`.
pub fn observed_order(e_coarse: f64, e_fine: f64, refinement: f64) -> f64 {
    (e_coarse / e_fine).ln() / refinement.ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn max_error_picks_largest_deviation() {
        assert_eq!(max_abs_error(&[1.0, 2.5, 3.0], &[1.0, 2.0, 3.25]), 0.5);
    }

    #[test]
    fn second_order_is_detected() {
        assert_relative_eq!(observed_order(4e-2, 1e-2, 2.0), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn direct_stats_flag_non_finite_residual() {
        assert!(SolveStats::direct(1e-14).converged);
        assert!(!SolveStats::direct(f64::NAN).converged);
    }
}
