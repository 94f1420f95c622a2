//! Helper functions for integration tests

use lotka_rs::physics::{PopulationModel, State};
use lotka_rs::solver::Scenario;

/// Assert that two states are close (within tolerance) component-wise
pub fn assert_states_close(state1: &State, state2: &State, tolerance: f64, message: &str) {
    let diff = state1.abs_diff(state2);

    assert!(
        diff.prey < tolerance,
        "{}: prey differs by {} (tolerance {})",
        message,
        diff.prey,
        tolerance
    );
    assert!(
        diff.predator < tolerance,
        "{}: predator differs by {} (tolerance {})",
        message,
        diff.predator,
        tolerance
    );
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

/// Create a scenario starting from the model's own initial state
pub fn create_simple_scenario(model: Box<dyn PopulationModel>) -> Scenario {
    Scenario::from_model(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_error() {
        assert!((relative_error(1.0, 1.0) - 0.0).abs() < 1e-10);
        assert!((relative_error(1.1, 1.0) - 0.1).abs() < 1e-10);
        assert!((relative_error(0.9, 1.0) - 0.1).abs() < 1e-10);
    }
}
