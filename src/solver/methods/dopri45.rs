//! Dormand-Prince 4(5) adaptive solver
//!
//! # Mathematical Background
//!
//! The Dormand-Prince method is an embedded Runge-Kutta pair: from one set
//! of seven stage evaluations it forms a fifth-order solution estimate and
//! an embedded fourth-order estimate. Their difference is a free estimate of
//! the local truncation error, which drives the step-size controller:
//!
//! ```text
//! err   = rms_i( (y5_i − y4_i) / (atol + rtol·max(|y_i|, |y5_i|)) )
//! h_new = h · clamp(0.9 · err^(−1/5), 0.2, 5.0)
//! ```
//!
//! A trial step is accepted when `err <= 1`; otherwise the state is kept and
//! the shrunken step is retried. The pair is FSAL (first-same-as-last): the
//! seventh stage of an accepted step is the first stage of the next one, so
//! each accepted step costs six fresh function evaluations.
//!
//! # Dense Output
//!
//! Requested output times rarely coincide with the steps the controller
//! chooses. Whenever an accepted step spans one or more requested times, the
//! state there is produced by cubic Hermite interpolation from the two
//! endpoint states and their derivatives (both already available thanks to
//! FSAL) — the stepper is never re-run for an output time.
//!
//! # Characteristics
//!
//! - **Order**: 5th-order accurate propagation, 4th-order error estimate
//! - **Step control**: proportional, safety 0.9, factors clamped to [0.2, 5]
//! - **Cost**: 6 function evaluations per trial step (+1 at startup)
//! - **Failure**: `StepSizeUnderflow` when the tolerance is unreachable at
//!   the minimum step or the step budget runs out
//!
//! # When to Use
//!
//! - The production choice for this crate's non-stiff population dynamics
//! - Whenever error control matters more than a predictable evaluation count
//!
//! # When NOT to Use
//!
//! - Stiff problems (no implicit methods here; out of scope)
//! - Fixed evaluation budgets → use [`RK4Solver`](crate::solver::RK4Solver)

use crate::physics::State;
use crate::solver::request::IntegrationRequest;
use crate::solver::scenario::Scenario;
use crate::solver::traits::{Solver, SolverError, Trajectory};

// =================================================================================================
// Butcher tableau (Dormand-Prince 5(4), FSAL)
// =================================================================================================

const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

// 5th-order weights (advance the solution)
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// Embedded 4th-order weights
const BE1: f64 = 5179.0 / 57600.0;
const BE3: f64 = 7571.0 / 16695.0;
const BE4: f64 = 393.0 / 640.0;
const BE5: f64 = -92097.0 / 339200.0;
const BE6: f64 = 187.0 / 2100.0;
const BE7: f64 = 1.0 / 40.0;

// Error coefficients: y5 − y4
const E1: f64 = B1 - BE1;
const E3: f64 = B3 - BE3;
const E4: f64 = B4 - BE4;
const E5: f64 = B5 - BE5;
const E6: f64 = B6 - BE6;
const E7: f64 = -BE7;

// =================================================================================================
// Step-control constants
// =================================================================================================

/// Safety factor applied to the optimal step prediction
const SAFETY: f64 = 0.9;

/// Shrink floor for a single retry
const MIN_FACTOR: f64 = 0.2;

/// Growth ceiling after an accepted step
const MAX_FACTOR: f64 = 5.0;

/// Minimum step size, as a fraction of the span
const MIN_STEP_FRACTION: f64 = 1e-14;

/// First trial step, as a fraction of the span
const INITIAL_STEP_FRACTION: f64 = 1e-3;

/// Relative closeness to `t1` at which the span counts as covered
const END_TOLERANCE_FRACTION: f64 = 1e-12;

// =================================================================================================
// DormandPrince45 Solver
// =================================================================================================

/// Adaptive Dormand-Prince 4(5) solver
///
/// Stateless between calls; the same instance can solve any number of
/// scenarios, also concurrently. All tuning lives in the request's
/// tolerances plus the step budget configured here.
///
/// # Example
///
/// ```rust
/// use lotka_rs::models::LotkaVolterra;
/// use lotka_rs::physics::State;
/// use lotka_rs::solver::{DormandPrince45, IntegrationRequest, Scenario, Solver};
///
/// # fn main() -> Result<(), lotka_rs::solver::SolverError> {
/// let model = LotkaVolterra::with_default_rates(State::new(1000.0, 560.0));
/// let scenario = Scenario::from_model(Box::new(model));
/// let request = IntegrationRequest::uniform(0.0, 10.0, 5)?.with_tolerances(1e-6, 1e-9)?;
///
/// let trajectory = DormandPrince45::new().solve(&scenario, &request)?;
/// assert_eq!(trajectory.len(), 5);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DormandPrince45 {
    max_steps: usize,
    max_rejections: usize,
}

impl DormandPrince45 {
    /// Create a solver with the default step budget
    pub fn new() -> Self {
        Self {
            max_steps: 100_000,
            max_rejections: 32,
        }
    }

    /// Override the total trial-step budget
    ///
    /// Mostly useful in tests; the default is generous enough for any sane
    /// tolerance on this crate's models.
    pub fn with_step_budget(mut self, max_steps: usize) -> Self {
        assert!(max_steps > 0, "step budget must be at least 1");
        self.max_steps = max_steps;
        self
    }
}

impl Default for DormandPrince45 {
    fn default() -> Self {
        Self::new()
    }
}

/// Cubic Hermite interpolation inside an accepted step
///
/// `y0`/`f0` are the state and derivative at the step start, `y1`/`f1` at
/// the step end, `h` the step length. `t` must satisfy `t0 <= t <= t0 + h`.
fn hermite(t0: f64, y0: State, f0: State, h: f64, y1: State, f1: State, t: f64) -> State {
    let theta = (t - t0) / h;
    let theta2 = theta * theta;
    let theta3 = theta2 * theta;

    let h00 = 2.0 * theta3 - 3.0 * theta2 + 1.0;
    let h10 = theta3 - 2.0 * theta2 + theta;
    let h01 = -2.0 * theta3 + 3.0 * theta2;
    let h11 = theta3 - theta2;

    y0 * h00 + f0 * (h10 * h) + y1 * h01 + f1 * (h11 * h)
}

impl Solver for DormandPrince45 {
    fn solve(
        &self,
        scenario: &Scenario,
        request: &IntegrationRequest,
    ) -> Result<Trajectory, SolverError> {
        // ====== Step 1: Validation ======

        request.validate()?;
        scenario.validate()?;

        // ====== Step 2: Setup ======

        let span = request.span();
        let h_min = MIN_STEP_FRACTION * span;
        let end_tolerance = END_TOLERANCE_FRACTION * span;

        let mut t = request.t0;
        let mut y = scenario.initial;
        let mut h = (INITIAL_STEP_FRACTION * span).max(h_min);

        let outputs = &request.output_times;
        let mut time_points = Vec::with_capacity(outputs.len());
        let mut states = Vec::with_capacity(outputs.len());
        let mut next_output = 0;

        // Output times equal to t0 yield the initial state verbatim.
        while next_output < outputs.len() && outputs[next_output] <= t {
            time_points.push(outputs[next_output]);
            states.push(y);
            next_output += 1;
        }

        let mut k1 = scenario.model.compute_dynamics(&y);

        let mut accepted: usize = 0;
        let mut rejected: usize = 0;
        let mut rejections_in_row: usize = 0;
        let mut evaluations: usize = 1;

        // ====== Step 3: Adaptive time integration ======

        for _trial in 0..self.max_steps {
            if request.t1 - t <= end_tolerance {
                break;
            }

            // Never step past t1.
            h = h.min(request.t1 - t);

            // ====== Stages 2..6 ======

            let k2 = scenario
                .model
                .compute_dynamics(&(y + k1 * (A21 * h)));
            let k3 = scenario
                .model
                .compute_dynamics(&(y + (k1 * A31 + k2 * A32) * h));
            let k4 = scenario
                .model
                .compute_dynamics(&(y + (k1 * A41 + k2 * A42 + k3 * A43) * h));
            let k5 = scenario
                .model
                .compute_dynamics(&(y + (k1 * A51 + k2 * A52 + k3 * A53 + k4 * A54) * h));
            let k6 = scenario.model.compute_dynamics(
                &(y + (k1 * A61 + k2 * A62 + k3 * A63 + k4 * A64 + k5 * A65) * h),
            );

            // 5th-order estimate advances the solution (local extrapolation)
            let y_new = y + (k1 * B1 + k3 * B3 + k4 * B4 + k5 * B5 + k6 * B6) * h;

            // Stage 7 (FSAL): derivative at the step end
            let k7 = scenario.model.compute_dynamics(&y_new);

            evaluations += 6;

            // ====== Error norm ======

            // Component-wise error scaled by atol + rtol·max(|y|, |y_new|),
            // combined as an RMS over the two populations.
            let e = (k1 * E1 + k3 * E3 + k4 * E4 + k5 * E5 + k6 * E6 + k7 * E7) * h;

            let scale_prey = request.atol + request.rtol * y.prey.abs().max(y_new.prey.abs());
            let scale_predator =
                request.atol + request.rtol * y.predator.abs().max(y_new.predator.abs());

            let ratio_prey = e.prey / scale_prey;
            let ratio_predator = e.predator / scale_predator;
            let err_norm =
                ((ratio_prey * ratio_prey + ratio_predator * ratio_predator) / 2.0).sqrt();

            // ====== Accept / reject ======

            // A NaN norm fails this comparison, so a model blowing up is
            // rejected like any over-tolerance step and lands in the
            // underflow path below.
            if err_norm <= 1.0 {
                let t_new = t + h;

                // Emit every requested time this step spans via the Hermite
                // interpolant; an output landing on the endpoint gets the
                // endpoint state exactly.
                while next_output < outputs.len() && outputs[next_output] <= t_new {
                    let t_req = outputs[next_output];
                    let state = if t_req >= t_new {
                        y_new
                    } else {
                        hermite(t, y, k1, h, y_new, k7, t_req)
                    };
                    time_points.push(t_req);
                    states.push(state);
                    next_output += 1;
                }

                t = t_new;
                y = y_new;
                k1 = k7; // FSAL
                accepted += 1;
                rejections_in_row = 0;
            } else {
                rejected += 1;
                rejections_in_row += 1;

                if rejections_in_row > self.max_rejections || h <= h_min {
                    return Err(SolverError::StepSizeUnderflow { t, h });
                }
            }

            // ====== Step-size controller ======

            let factor = if err_norm == 0.0 {
                MAX_FACTOR
            } else if err_norm.is_finite() {
                (SAFETY * err_norm.powf(-0.2)).clamp(MIN_FACTOR, MAX_FACTOR)
            } else {
                MIN_FACTOR
            };

            h = (h * factor).max(h_min);
        }

        if request.t1 - t > end_tolerance {
            return Err(SolverError::StepSizeUnderflow { t, h });
        }

        // Flush output times that coincide with t1 up to roundoff.
        while next_output < outputs.len() {
            time_points.push(outputs[next_output]);
            states.push(y);
            next_output += 1;
        }

        // ====== Step 4: Build Result ======

        let mut result = Trajectory::new(time_points, states, y);

        result.add_metadata("solver", self.name());
        result.add_metadata("accepted steps", &accepted.to_string());
        result.add_metadata("rejected steps", &rejected.to_string());
        result.add_metadata("function evaluations", &evaluations.to_string());
        result.add_metadata("rtol", &request.rtol.to_string());
        result.add_metadata("atol", &request.atol.to_string());

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "Dormand-Prince 4(5)"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
