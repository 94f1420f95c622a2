//! Numerical solver traits and result types
//!
//! # Design Philosophy
//!
//! The solver layer separates concerns into three pieces:
//! - `Scenario` - WHAT to solve (model + initial state)
//! - `IntegrationRequest` - WHERE to report it (span, output times, tolerances)
//! - `Solver` trait - HOW to solve (the numerical method)
//!
//! Every method returns the same `Trajectory` structure or a typed
//! `SolverError`; there is no partial-success mode. A failed call returns
//! nothing the caller could mistake for a valid trajectory.

use std::collections::HashMap;

use thiserror::Error;

use crate::physics::State;
use crate::solver::request::IntegrationRequest;
use crate::solver::scenario::Scenario;

// =================================================================================================
// Errors
// =================================================================================================

/// Errors reported by the solvers and the field sampler
///
/// Both variants are reported synchronously to the caller of the failing
/// operation. Step-size retries inside an adaptive solve are internal and
/// never surface as separate attempts.
#[derive(Debug, Clone, Error)]
pub enum SolverError {
    /// Malformed or out-of-range arguments: time ordering, non-positive
    /// tolerances, unsorted or out-of-span output times, degenerate grid
    /// bounds or resolution, non-finite initial state.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The adaptive controller drove the step size to its minimum without
    /// meeting the error tolerance within the bounded retry count, or the
    /// total step budget ran out before reaching the end of the span.
    #[error("step size underflow at t = {t}: h = {h:e} cannot satisfy the error tolerance")]
    StepSizeUnderflow {
        /// Time at which the controller gave up
        t: f64,
        /// Last attempted step size
        h: f64,
    },
}

// =================================================================================================
// Solver trait
// =================================================================================================

/// Trait for numerical time-integration methods
///
/// # Responsibility
/// Advance the scenario's state across the request's time span and report
/// the state at every requested output time.
///
/// # Contract
///
/// - Validates the scenario and request before doing any work
/// - Returns exactly one state per requested output time, in order
/// - Holds no reference to the returned trajectory after `solve` returns
/// - Deterministic for fixed inputs; no side effects beyond the return value
pub trait Solver {
    /// Integrate the scenario over the request's span
    fn solve(
        &self,
        scenario: &Scenario,
        request: &IntegrationRequest,
    ) -> Result<Trajectory, SolverError>;

    /// Name of the method (used for display and result metadata)
    fn name(&self) -> &str;
}

// =================================================================================================
// Trajectory
// =================================================================================================

/// Result of one integration run
///
/// `time_points` and `states` are parallel vectors with exactly one entry
/// per requested output time, in request order. `final_state` is the state
/// at the end of the span, which is also the last entry whenever the last
/// requested time equals `t1`.
///
/// The trajectory is owned by the caller once returned; the solver keeps
/// nothing.
#[derive(Debug, Clone)]
pub struct Trajectory {
    /// Output times, matching the request
    pub time_points: Vec<f64>,

    /// States at the output times
    pub states: Vec<State>,

    /// State at the end of the integration span
    pub final_state: State,

    /// Method-specific run information (solver name, step counts, tolerances)
    pub metadata: HashMap<String, String>,
}

impl Trajectory {
    /// Create a trajectory result
    ///
    /// # Panics
    ///
    /// Panics if `time_points` and `states` have different lengths; a solver
    /// producing mismatched vectors is a bug, not a runtime condition.
    pub fn new(time_points: Vec<f64>, states: Vec<State>, final_state: State) -> Self {
        assert_eq!(
            time_points.len(),
            states.len(),
            "time and state vectors must be parallel"
        );

        Self {
            time_points,
            states,
            final_state,
            metadata: HashMap::new(),
        }
    }

    /// Number of recorded samples
    pub fn len(&self) -> usize {
        self.time_points.len()
    }

    /// No samples were requested
    pub fn is_empty(&self) -> bool {
        self.time_points.is_empty()
    }

    /// Iterate over `(time, state)` samples
    pub fn iter(&self) -> impl Iterator<Item = (f64, &State)> {
        self.time_points.iter().copied().zip(self.states.iter())
    }

    /// Attach a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Smallest and largest state components over the recorded samples
    ///
    /// Returns `(lower_left, upper_right)` corners of the axis-aligned
    /// bounding box in phase space, or `None` for an empty trajectory.
    /// Used by callers to derive field-sampling bounds from an orbit.
    pub fn bounding_box(&self) -> Option<(State, State)> {
        let first = self.states.first()?;
        let mut lo = *first;
        let mut hi = *first;

        for state in &self.states {
            lo.prey = lo.prey.min(state.prey);
            lo.predator = lo.predator.min(state.predator);
            hi.prey = hi.prey.max(state.prey);
            hi.predator = hi.predator.max(state.predator);
        }

        Some((lo, hi))
    }
}

// =================================================================================================
// Tests
// =================================================================================================
