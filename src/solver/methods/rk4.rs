//! Runge-Kutta 4 (RK4) fixed-step solver
//!
//! # Mathematical Background
//!
//! The classical fourth-order Runge-Kutta method advances the state with a
//! weighted average of four slope estimates:
//!
//! ```text
//! k₁ = f(yₙ)
//! k₂ = f(yₙ + dt/2·k₁)
//! k₃ = f(yₙ + dt/2·k₂)
//! k₄ = f(yₙ + dt·k₃)
//!
//! yₙ₊₁ = yₙ + dt/6·(k₁ + 2k₂ + 2k₃ + k₄)
//! ```
//!
//! # Characteristics
//!
//! - **Order**: fourth-order accurate (error ~ O(dt⁴) per unit interval)
//! - **Cost**: 4 function evaluations per substep, fixed and predictable
//! - **Step size**: fixed; no error control
//!
//! # Output sampling
//!
//! The solver steps from each requested output time directly to the next,
//! splitting every interval into a fixed number of uniform substeps. Output
//! times are therefore hit exactly, with no interpolation. The request's
//! tolerances are ignored (and recorded as such in the result metadata);
//! accuracy is governed solely by the substep count.
//!
//! # When to Use
//!
//! - Benchmark baseline against the adaptive method
//! - Workloads that need a predictable evaluation count
//!
//! # When NOT to Use
//!
//! - When error control matters → use
//!   [`DormandPrince45`](crate::solver::DormandPrince45)

use crate::physics::State;
use crate::solver::request::IntegrationRequest;
use crate::solver::scenario::Scenario;
use crate::solver::traits::{Solver, SolverError, Trajectory};

// =================================================================================================
// RK4 Solver
// =================================================================================================

/// Classical fourth-order Runge-Kutta solver with fixed substeps
///
/// # Example
///
/// ```rust
/// use lotka_rs::models::LotkaVolterra;
/// use lotka_rs::physics::State;
/// use lotka_rs::solver::{IntegrationRequest, RK4Solver, Scenario, Solver};
///
/// # fn main() -> Result<(), lotka_rs::solver::SolverError> {
/// let model = LotkaVolterra::with_default_rates(State::new(1000.0, 560.0));
/// let scenario = Scenario::from_model(Box::new(model));
/// let request = IntegrationRequest::uniform(0.0, 10.0, 101)?;
///
/// let trajectory = RK4Solver::new().solve(&scenario, &request)?;
/// assert_eq!(trajectory.len(), 101);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RK4Solver {
    substeps: usize,
}

impl RK4Solver {
    /// Create a solver with the default substep count (16 per interval)
    pub fn new() -> Self {
        Self { substeps: 16 }
    }

    /// Override the number of uniform substeps per output interval
    ///
    /// # Panics
    ///
    /// Panics if `substeps` is zero.
    pub fn with_substeps(mut self, substeps: usize) -> Self {
        assert!(substeps >= 1, "need at least one substep per interval");
        self.substeps = substeps;
        self
    }

    /// Advance one interval `[t_start, t_end]` with uniform RK4 substeps
    fn advance(&self, scenario: &Scenario, mut y: State, t_start: f64, t_end: f64) -> State {
        let dt = (t_end - t_start) / (self.substeps as f64);

        for _step in 0..self.substeps {
            let k1 = scenario.model.compute_dynamics(&y);
            let k2 = scenario.model.compute_dynamics(&(y + k1 * (dt / 2.0)));
            let k3 = scenario.model.compute_dynamics(&(y + k2 * (dt / 2.0)));
            let k4 = scenario.model.compute_dynamics(&(y + k3 * dt));

            // Simpson weights: endpoints 1/6, midpoints 1/3
            y = y + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0);
        }

        y
    }
}

impl Default for RK4Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for RK4Solver {
    fn solve(
        &self,
        scenario: &Scenario,
        request: &IntegrationRequest,
    ) -> Result<Trajectory, SolverError> {
        // ====== Step 1: Validation ======

        request.validate()?;
        scenario.validate()?;

        // ====== Step 2: Setup ======

        let outputs = &request.output_times;
        let mut time_points = Vec::with_capacity(outputs.len());
        let mut states = Vec::with_capacity(outputs.len());

        let mut t = request.t0;
        let mut y = scenario.initial;
        let mut intervals: usize = 0;

        // ====== Step 3: Time Integration ======

        for &t_out in outputs {
            if t_out > t {
                y = self.advance(scenario, y, t, t_out);
                t = t_out;
                intervals += 1;
            }

            // An output at t0 (or any repeat of the current node) is the
            // current state verbatim.
            time_points.push(t_out);
            states.push(y);
        }

        // Finish the span so final_state is the state at t1 even when the
        // last output time falls short of it.
        if t < request.t1 {
            y = self.advance(scenario, y, t, request.t1);
            intervals += 1;
        }

        // ====== Step 4: Build Result ======

        let total_steps = intervals * self.substeps;
        let mut result = Trajectory::new(time_points, states, y);

        result.add_metadata("solver", self.name());
        result.add_metadata("substeps per interval", &self.substeps.to_string());
        result.add_metadata("total steps", &total_steps.to_string());
        result.add_metadata("function evaluations", &(4 * total_steps).to_string());
        result.add_metadata("tolerances", "ignored (fixed-step method)");

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "Runge-Kutta 4 (fixed step)"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
