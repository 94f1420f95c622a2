//! Numerical methods for solving the population equations
//!
//! This module contains concrete implementations of the
//! [`Solver`](crate::solver::Solver) trait.
//!
//! # Available Methods
//!
//! - **[`DormandPrince45`]**: embedded Runge-Kutta 4(5) pair with adaptive
//!   step-size control and dense output at requested times
//!   - Order: 5th-order propagation, 4th-order error estimate
//!   - Cost: 6 function evaluations per trial step (FSAL)
//!   - Use: **production integration** with error control
//!
//! - **[`RK4Solver`]**: classical fourth-order Runge-Kutta, fixed step
//!   - Order: fourth-order O(dt⁴)
//!   - Cost: 4 function evaluations per substep, fully predictable
//!   - Use: baselines and fixed evaluation budgets
//!
//! Implicit and stiff-specific methods are out of scope for this crate; the
//! Lotka-Volterra system is non-stiff at physically meaningful parameters.
//!
//! # Design Philosophy
//!
//! Each solver is:
//! - **Self-contained**: no shared mutable state
//! - **Stateless**: one instance can run any number of scenarios
//! - **Deterministic**: fixed inputs give bitwise-identical trajectories

pub mod dopri45;
mod rk4;

// Re-exports for convenience
pub use dopri45::DormandPrince45;
pub use rk4::RK4Solver;
