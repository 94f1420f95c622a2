//! Population model trait
//!
//! This module defines the core API for population models:
//! - `PopulationModel`: trait for all two-species models
//! - `State`: the `(prey, predator)` pair it operates on (re-exported here
//!   for convenience)

pub use super::state::State;

// =================================================================================================
// Population Model Trait
// =================================================================================================

/// Trait for population models
///
/// # Responsibility
/// Computes the governing equations of a two-species system at a given
/// state. Does NOT solve them (that's the Solver's job), and does NOT
/// sample them on a grid (that's the field sampler's job).
///
/// The model provides the "physics" (equations); the solver and the
/// sampler provide the "numerics". Both consumers receive the same model
/// object, so the rate constants are declared exactly once.
///
/// # Purity
///
/// `compute_dynamics` must be a pure function of its input state: no
/// interior mutability, no side effects. The solvers evaluate it at trial
/// states that are never part of the returned trajectory, and the field
/// sampler may evaluate it from several threads at once (`Send + Sync`).
pub trait PopulationModel: Send + Sync {
    /// Computes the derivative pair `(d prey/dt, d predator/dt)` at a state
    ///
    /// Total over all finite inputs; extreme states may overflow to
    /// non-finite values, which is the caller's responsibility (choose sane
    /// initial conditions and parameters).
    fn compute_dynamics(&self, state: &State) -> State;

    /// Creates the default initial state for this model
    ///
    /// A `Scenario` built with [`Scenario::from_model`](crate::solver::Scenario::from_model)
    /// starts the integration here; callers can override it with an explicit
    /// initial state.
    fn setup_initial_state(&self) -> State;

    /// Name of the model (used for display and result metadata)
    fn name(&self) -> &str;

    /// Description of the model (optional)
    fn description(&self) -> Option<&str> {
        None
    }
}

// =================================================================================================
// Tests
// =================================================================================================
