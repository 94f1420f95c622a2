//! Mock population models for testing
//!
//! These models have known analytical solutions, making them
//! ideal for validating numerical solver accuracy.

use lotka_rs::physics::{PopulationModel, State};

// =================================================================================================
// Exponential Decay: dy/dt = -k·y
// =================================================================================================

/// Exponential decay on both components: dy/dt = -k·y
///
/// Analytical solution: y(t) = y₀ · exp(-k·t)
///
/// Useful for testing solver accuracy since we know the exact solution.
pub struct ExponentialDecay {
    pub decay_rate: f64, // k in dy/dt = -k·y
    pub initial: State,
}

impl ExponentialDecay {
    pub fn new(decay_rate: f64) -> Self {
        Self {
            decay_rate,
            initial: State::new(1.0, 1.0),
        }
    }

    /// Compute analytical solution at time t
    pub fn analytical_solution(&self, t: f64) -> State {
        self.initial * (-self.decay_rate * t).exp()
    }
}

impl PopulationModel for ExponentialDecay {
    fn compute_dynamics(&self, state: &State) -> State {
        *state * (-self.decay_rate)
    }

    fn setup_initial_state(&self) -> State {
        self.initial
    }

    fn name(&self) -> &str {
        "Exponential Decay"
    }
}

// =================================================================================================
// Constant Growth: dy/dt = c
// =================================================================================================

/// Constant growth model: dy/dt = c
///
/// Analytical solution: y(t) = y₀ + c·t
///
/// Every Runge-Kutta method is exact for this problem up to roundoff.
pub struct ConstantGrowth {
    pub growth_rate: f64,
}

impl ConstantGrowth {
    pub fn new(growth_rate: f64) -> Self {
        Self { growth_rate }
    }

    /// Compute analytical solution at time t
    pub fn analytical_solution(&self, t: f64) -> State {
        State::new(self.growth_rate * t, self.growth_rate * t)
    }
}

impl PopulationModel for ConstantGrowth {
    fn compute_dynamics(&self, _state: &State) -> State {
        State::new(self.growth_rate, self.growth_rate)
    }

    fn setup_initial_state(&self) -> State {
        State::zeros()
    }

    fn name(&self) -> &str {
        "Constant Growth"
    }
}

// =================================================================================================
// Circular Orbit: dx/dt = -ω·y, dy/dt = ω·x
// =================================================================================================

/// Rotation at angular frequency ω starting from (1, 0)
///
/// Analytical solution: (cos(ωt), sin(ωt)) — closed circular orbits, the
/// simplest stand-in for the closed Lotka-Volterra cycles.
pub struct CircularOrbit {
    pub omega: f64,
}

impl CircularOrbit {
    pub fn new(omega: f64) -> Self {
        Self { omega }
    }

    /// Compute analytical solution at time t
    pub fn analytical_solution(&self, t: f64) -> State {
        State::new((self.omega * t).cos(), (self.omega * t).sin())
    }
}

impl PopulationModel for CircularOrbit {
    fn compute_dynamics(&self, state: &State) -> State {
        State::new(-self.omega * state.predator, self.omega * state.prey)
    }

    fn setup_initial_state(&self) -> State {
        State::new(1.0, 0.0)
    }

    fn name(&self) -> &str {
        "Circular Orbit"
    }
}
