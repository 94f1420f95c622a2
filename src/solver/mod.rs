//! Numerical solvers
//!
//! This module provides traits and implementations for numerical solvers.
//! A numerical solver applies a time-integration method to the equations
//! provided by a population model within a specific scenario.
//!
//! # Core Concepts
//!
//! The solver architecture separates concerns into three layers:
//!
//! 1. **Scenario** (`Scenario`) - WHAT to solve
//!    - Population model (equations)
//!    - Initial state
//!
//! 2. **Request** (`IntegrationRequest`) - WHERE to report it
//!    - Time span `[t0, t1]`
//!    - Requested output times
//!    - Error tolerances (adaptive methods)
//!
//! 3. **Solver** (`Solver` trait) - HOW to solve
//!    - Applies the numerical scheme
//!    - Returns a `Trajectory` or a typed `SolverError`
//!
//! This separation allows the same scenario to be solved by different
//! methods and the same method to be reused across scenarios, which is how
//! the benchmarks compare the fixed-step and adaptive integrators.
//!
//! # Workflow
//!
//! ```text
//! ┌──────────────────┐   ┌─────────────────────┐
//! │ PopulationModel  │   │ IntegrationRequest  │
//! │ + initial state  │   │ span, times, tols   │
//! └────────┬─────────┘   └─────────┬───────────┘
//!          │ Scenario              │
//!          └──────────┬────────────┘
//!                     │
//!            ┌────────▼────────┐
//!            │     Solver      │  RK4 / Dormand-Prince
//!            └────────┬────────┘
//!                     │
//!            ┌────────▼────────┐
//!            │   Trajectory    │  samples + final state + metadata
//!            └─────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use lotka_rs::models::LotkaVolterra;
//! use lotka_rs::physics::State;
//! use lotka_rs::solver::{DormandPrince45, IntegrationRequest, Scenario, Solver};
//!
//! # fn main() -> Result<(), lotka_rs::solver::SolverError> {
//! let model = LotkaVolterra::with_default_rates(State::new(1000.0, 560.0));
//! let scenario = Scenario::from_model(Box::new(model));
//!
//! let request = IntegrationRequest::uniform(0.0, 10.0, 100)?;
//! let trajectory = DormandPrince45::new().solve(&scenario, &request)?;
//!
//! assert_eq!(trajectory.len(), 100);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All failure modes are synchronous and typed ([`SolverError`]):
//! - `InvalidRequest` for malformed arguments
//! - `StepSizeUnderflow` when the adaptive controller cannot satisfy the
//!   tolerance at the minimum step
//!
//! There is no partial-success mode: a failing solve returns no trajectory.

pub mod methods;
pub mod request;
pub mod scenario;
pub mod traits;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{Solver, SolverError, Trajectory};

pub use request::{IntegrationRequest, DEFAULT_ATOL, DEFAULT_RTOL};
pub use scenario::Scenario;

pub use methods::{DormandPrince45, RK4Solver};
