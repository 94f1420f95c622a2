//! Integration request definition
//!
//! An `IntegrationRequest` describes where a solve should report its result:
//! the time span, the output times inside it, and the error tolerances for
//! adaptive methods.

use crate::solver::traits::SolverError;

/// Default relative tolerance for adaptive solves
pub const DEFAULT_RTOL: f64 = 1e-6;

/// Default absolute tolerance for adaptive solves
pub const DEFAULT_ATOL: f64 = 1e-9;

/// Time span, requested output times and tolerances for one solve
///
/// # Invariants (checked by [`validate`](Self::validate))
///
/// - `t0 < t1`, both finite
/// - `output_times` strictly increasing, every entry within `[t0, t1]`
/// - `rtol > 0`, `atol >= 0`, both finite
///
/// An empty `output_times` is valid: the solve still advances to `t1` and
/// reports the final state, it just records no intermediate samples.
///
/// # Examples
///
/// ```rust
/// use lotka_rs::solver::IntegrationRequest;
///
/// // Five evenly spaced output times across [0, 10]
/// let request = IntegrationRequest::uniform(0.0, 10.0, 5).unwrap();
/// assert_eq!(request.output_times, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
///
/// // Explicit output times with tighter tolerances
/// let request = IntegrationRequest::new(0.0, 10.0, vec![1.0, 9.0], 1e-9, 1e-12).unwrap();
/// assert_eq!(request.span(), 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct IntegrationRequest {
    /// Start of the time span
    pub t0: f64,

    /// End of the time span
    pub t1: f64,

    /// Strictly increasing output times within `[t0, t1]`
    pub output_times: Vec<f64>,

    /// Relative error tolerance (adaptive methods)
    pub rtol: f64,

    /// Absolute error tolerance (adaptive methods)
    pub atol: f64,
}

impl IntegrationRequest {
    /// Create and validate a request
    pub fn new(
        t0: f64,
        t1: f64,
        output_times: Vec<f64>,
        rtol: f64,
        atol: f64,
    ) -> Result<Self, SolverError> {
        let request = Self {
            t0,
            t1,
            output_times,
            rtol,
            atol,
        };
        request.validate()?;
        Ok(request)
    }

    /// Request `n` evenly spaced output times across `[t0, t1]`
    ///
    /// Endpoints are included: `n = 2` yields `{t0, t1}`. Tolerances default
    /// to `DEFAULT_RTOL` / `DEFAULT_ATOL`; use [`with_tolerances`](Self::with_tolerances)
    /// to override.
    pub fn uniform(t0: f64, t1: f64, n: usize) -> Result<Self, SolverError> {
        let output_times = match n {
            0 => Vec::new(),
            1 => vec![t0],
            _ => (0..n)
                .map(|i| {
                    // Pin the endpoint: accumulating the fraction can land
                    // one ulp past t1 and fail span validation.
                    if i == n - 1 {
                        t1
                    } else {
                        t0 + (t1 - t0) * (i as f64) / ((n - 1) as f64)
                    }
                })
                .collect(),
        };

        Self::new(t0, t1, output_times, DEFAULT_RTOL, DEFAULT_ATOL)
    }

    /// Replace the tolerances, re-validating
    pub fn with_tolerances(mut self, rtol: f64, atol: f64) -> Result<Self, SolverError> {
        self.rtol = rtol;
        self.atol = atol;
        self.validate()?;
        Ok(self)
    }

    /// Length of the time span
    pub fn span(&self) -> f64 {
        self.t1 - self.t0
    }

    /// Validate all request invariants
    ///
    /// Solvers call this at the top of `solve`, so a request mutated after
    /// construction is still checked before any work happens.
    pub fn validate(&self) -> Result<(), SolverError> {
        if !self.t0.is_finite() || !self.t1.is_finite() {
            return Err(SolverError::InvalidRequest(
                "time span bounds must be finite".to_string(),
            ));
        }

        if self.t0 >= self.t1 {
            return Err(SolverError::InvalidRequest(format!(
                "t0 must precede t1, got [{}, {}]",
                self.t0, self.t1
            )));
        }

        if !self.rtol.is_finite() || self.rtol <= 0.0 {
            return Err(SolverError::InvalidRequest(format!(
                "relative tolerance must be positive and finite, got {}",
                self.rtol
            )));
        }

        if !self.atol.is_finite() || self.atol < 0.0 {
            return Err(SolverError::InvalidRequest(format!(
                "absolute tolerance must be non-negative and finite, got {}",
                self.atol
            )));
        }

        for (i, &t) in self.output_times.iter().enumerate() {
            if !t.is_finite() {
                return Err(SolverError::InvalidRequest(format!(
                    "output time #{} is not finite",
                    i
                )));
            }

            if t < self.t0 || t > self.t1 {
                return Err(SolverError::InvalidRequest(format!(
                    "output time {} lies outside [{}, {}]",
                    t, self.t0, self.t1
                )));
            }

            if i > 0 && t <= self.output_times[i - 1] {
                return Err(SolverError::InvalidRequest(format!(
                    "output times must be strictly increasing, got {} after {}",
                    t,
                    self.output_times[i - 1]
                )));
            }
        }

        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_request() {
        let request = IntegrationRequest::uniform(0.0, 10.0, 5).unwrap();

        assert_eq!(request.output_times, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
        assert_eq!(request.rtol, DEFAULT_RTOL);
        assert_eq!(request.atol, DEFAULT_ATOL);
    }

    #[test]
    fn test_uniform_small_counts() {
        assert!(IntegrationRequest::uniform(0.0, 1.0, 0)
            .unwrap()
            .output_times
            .is_empty());
        assert_eq!(
            IntegrationRequest::uniform(0.0, 1.0, 1).unwrap().output_times,
            vec![0.0]
        );
        assert_eq!(
            IntegrationRequest::uniform(0.0, 1.0, 2).unwrap().output_times,
            vec![0.0, 1.0]
        );
    }

    #[test]
    fn test_with_tolerances() {
        let request = IntegrationRequest::uniform(0.0, 10.0, 3)
            .unwrap()
            .with_tolerances(1e-9, 1e-12)
            .unwrap();

        assert_eq!(request.rtol, 1e-9);
        assert_eq!(request.atol, 1e-12);
    }

    #[test]
    fn test_rejects_reversed_span() {
        let result = IntegrationRequest::new(10.0, 0.0, vec![], 1e-6, 1e-9);
        assert!(matches!(result, Err(SolverError::InvalidRequest(_))));
    }

    #[test]
    fn test_rejects_equal_span() {
        let result = IntegrationRequest::new(5.0, 5.0, vec![], 1e-6, 1e-9);
        assert!(matches!(result, Err(SolverError::InvalidRequest(_))));
    }

    #[test]
    fn test_rejects_non_finite_span() {
        let result = IntegrationRequest::new(0.0, f64::INFINITY, vec![], 1e-6, 1e-9);
        assert!(matches!(result, Err(SolverError::InvalidRequest(_))));
    }

    #[test]
    fn test_rejects_bad_tolerances() {
        assert!(IntegrationRequest::new(0.0, 1.0, vec![], 0.0, 1e-9).is_err());
        assert!(IntegrationRequest::new(0.0, 1.0, vec![], -1e-6, 1e-9).is_err());
        assert!(IntegrationRequest::new(0.0, 1.0, vec![], 1e-6, -1e-9).is_err());
        assert!(IntegrationRequest::new(0.0, 1.0, vec![], f64::NAN, 1e-9).is_err());

        // Zero absolute tolerance is allowed
        assert!(IntegrationRequest::new(0.0, 1.0, vec![], 1e-6, 0.0).is_ok());
    }

    #[test]
    fn test_rejects_out_of_span_output_time() {
        let result = IntegrationRequest::new(0.0, 10.0, vec![5.0, 11.0], 1e-6, 1e-9);
        assert!(matches!(result, Err(SolverError::InvalidRequest(_))));

        let result = IntegrationRequest::new(0.0, 10.0, vec![-1.0], 1e-6, 1e-9);
        assert!(matches!(result, Err(SolverError::InvalidRequest(_))));
    }

    #[test]
    fn test_rejects_unsorted_output_times() {
        let result = IntegrationRequest::new(0.0, 10.0, vec![5.0, 2.0], 1e-6, 1e-9);
        assert!(matches!(result, Err(SolverError::InvalidRequest(_))));

        // Duplicates are not strictly increasing either
        let result = IntegrationRequest::new(0.0, 10.0, vec![5.0, 5.0], 1e-6, 1e-9);
        assert!(matches!(result, Err(SolverError::InvalidRequest(_))));
    }

    #[test]
    fn test_endpoints_are_valid_output_times() {
        let request = IntegrationRequest::new(0.0, 10.0, vec![0.0, 10.0], 1e-6, 1e-9);
        assert!(request.is_ok());
    }
}
