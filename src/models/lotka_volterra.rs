//! Classic two-species Lotka-Volterra model
//!
//! # Mathematical Background
//!
//! The Lotka-Volterra equations couple a prey population x and a predator
//! population y through four positive rate constants:
//!
//! ```text
//! dx/dt =  a·x − b·x·y
//! dy/dt = −c·y + d·x·y
//! ```
//!
//! - `a`: prey growth rate (exponential growth absent predation)
//! - `b`: predation rate coefficient
//! - `c`: predator death rate (exponential decay absent prey)
//! - `d`: predator growth-from-predation coefficient
//!
//! The system has an interior equilibrium at `(c/d, a/b)` where both
//! derivatives vanish; orbits started elsewhere are closed curves around it.
//!
//! # Example
//!
//! ```rust
//! use lotka_rs::models::{LotkaVolterra, RateParameters};
//! use lotka_rs::physics::{PopulationModel, State};
//!
//! let params = RateParameters::new(2.0, 0.01, 1.0, 0.01);
//! let model = LotkaVolterra::new(params, State::new(1000.0, 560.0));
//!
//! // The derivative vanishes at the interior equilibrium
//! let rates = model.compute_dynamics(&params.equilibrium());
//! assert_eq!(rates, State::zeros());
//! ```

use crate::physics::{PopulationModel, State};

// =================================================================================================
// Rate Parameters
// =================================================================================================

/// The four positive rate constants of the Lotka-Volterra system
///
/// Immutable for the duration of one integration run. Constructed once and
/// shared by every consumer (integrator, field sampler, export metadata), so
/// the constants cannot drift apart between the trajectory and its overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateParameters {
    /// Prey growth rate a
    pub prey_growth: f64,
    /// Predation rate coefficient b
    pub predation: f64,
    /// Predator death rate c
    pub predator_death: f64,
    /// Predator growth-from-predation coefficient d
    pub conversion: f64,
}

impl RateParameters {
    /// Create parameters from `(a, b, c, d)`
    ///
    /// # Panics
    ///
    /// Panics if any rate is not strictly positive and finite. A zero or
    /// negative rate changes the character of the system (uncoupled decay or
    /// growth), which is outside this model's contract.
    pub fn new(prey_growth: f64, predation: f64, predator_death: f64, conversion: f64) -> Self {
        for (name, value) in [
            ("prey growth rate a", prey_growth),
            ("predation coefficient b", predation),
            ("predator death rate c", predator_death),
            ("conversion coefficient d", conversion),
        ] {
            assert!(
                value.is_finite() && value > 0.0,
                "{} must be positive and finite, got {}",
                name,
                value
            );
        }

        Self {
            prey_growth,
            predation,
            predator_death,
            conversion,
        }
    }

    /// The interior equilibrium `(c/d, a/b)`
    ///
    /// Both derivatives are exactly zero here; an integration started at this
    /// state stays there, and the field sampler flags it as degenerate.
    pub fn equilibrium(&self) -> State {
        State::new(
            self.predator_death / self.conversion,
            self.prey_growth / self.predation,
        )
    }
}

impl Default for RateParameters {
    /// The textbook rate constants `(2, 0.01, 1, 0.01)`
    fn default() -> Self {
        Self::new(2.0, 0.01, 1.0, 0.01)
    }
}

// =================================================================================================
// Lotka-Volterra model
// =================================================================================================

/// Lotka-Volterra predator-prey model
///
/// Pairs the rate constants with a default initial state so a whole scenario
/// can be described by one value. The dynamics are pure and stateless; the
/// same instance may be shared across threads and across consumers.
#[derive(Debug, Clone)]
pub struct LotkaVolterra {
    params: RateParameters,
    initial: State,
}

impl LotkaVolterra {
    /// Create a model from rate parameters and an initial population pair
    pub fn new(params: RateParameters, initial: State) -> Self {
        Self { params, initial }
    }

    /// Model with the default study constants and a given initial state
    pub fn with_default_rates(initial: State) -> Self {
        Self::new(RateParameters::default(), initial)
    }

    /// The rate constants
    pub fn params(&self) -> &RateParameters {
        &self.params
    }

    /// The interior equilibrium of this parameterization
    pub fn equilibrium(&self) -> State {
        self.params.equilibrium()
    }
}

impl PopulationModel for LotkaVolterra {
    fn compute_dynamics(&self, state: &State) -> State {
        let x = state.prey;
        let y = state.predator;

        State::new(
            self.params.prey_growth * x - self.params.predation * x * y,
            -self.params.predator_death * y + self.params.conversion * x * y,
        )
    }

    fn setup_initial_state(&self) -> State {
        self.initial
    }

    fn name(&self) -> &str {
        "Lotka-Volterra"
    }

    fn description(&self) -> Option<&str> {
        Some("Two-species predator-prey system with closed orbits around (c/d, a/b)")
    }
}

// =================================================================================================
// Tests
// =================================================================================================
