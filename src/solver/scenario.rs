//! Simulation scenario definition
//!
//! A scenario combines a population model with the initial state to
//! integrate from.

use crate::physics::{PopulationModel, State};
use crate::solver::traits::SolverError;

/// Simulation scenario
///
/// Defines a specific case to simulate:
/// - Population model (equations)
/// - Initial state (where the orbit starts)
///
/// # Design
///
/// The same scenario can be solved with different numerical methods.
/// This is the "WHAT to solve" (not "HOW to solve").
///
/// # Examples
///
/// ```rust
/// use lotka_rs::models::LotkaVolterra;
/// use lotka_rs::physics::State;
/// use lotka_rs::solver::Scenario;
///
/// let model = LotkaVolterra::with_default_rates(State::new(1000.0, 560.0));
///
/// // Start from the model's own initial state...
/// let scenario = Scenario::from_model(Box::new(model.clone()));
///
/// // ...or override it for another member of the orbit family
/// let scenario = Scenario::new(Box::new(model), State::new(500.0, 360.0));
/// assert_eq!(scenario.initial.prey, 500.0);
/// ```
pub struct Scenario {
    /// Population model (equations)
    pub model: Box<dyn PopulationModel>,

    /// State the integration starts from
    pub initial: State,
}

impl Scenario {
    /// Create a scenario with an explicit initial state
    pub fn new(model: Box<dyn PopulationModel>, initial: State) -> Self {
        Self { model, initial }
    }

    /// Create a scenario starting from the model's default initial state
    pub fn from_model(model: Box<dyn PopulationModel>) -> Self {
        let initial = model.setup_initial_state();
        Self { model, initial }
    }

    /// Verify scenario contents
    pub fn validate(&self) -> Result<(), SolverError> {
        if !self.initial.is_finite() {
            return Err(SolverError::InvalidRequest(format!(
                "initial state must be finite, got {}",
                self.initial
            )));
        }

        Ok(())
    }

    /// Get model name
    pub fn get_model_name(&self) -> &str {
        self.model.name()
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("model", &self.get_model_name())
            .field("initial", &self.initial)
            .finish()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
