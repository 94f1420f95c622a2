//! Convergence tests for numerical solvers
//!
//! These tests verify that the fixed-step method exhibits its theoretical
//! convergence rate and that the adaptive method's cost scales with the
//! requested accuracy.

use lotka_rs::solver::{DormandPrince45, IntegrationRequest, RK4Solver, Scenario, Solver};

mod common;
use common::{CircularOrbit, ExponentialDecay};

#[test]
fn test_rk4_fourth_order_convergence() {
    // RK4 should have fourth-order convergence: error ~ O(dt⁴)
    // When dt → dt/2, error should → error/16

    let decay_rate = 0.3;
    let total_time = 10.0;
    let model = ExponentialDecay::new(decay_rate);
    let exact = model.analytical_solution(total_time);

    let substeps_list = vec![5, 10, 20, 40];
    let mut errors = Vec::new();

    for &substeps in &substeps_list {
        let scenario = Scenario::from_model(Box::new(ExponentialDecay::new(decay_rate)));
        let request = IntegrationRequest::uniform(0.0, total_time, 11).unwrap();

        let solver = RK4Solver::new().with_substeps(substeps);
        let result = solver.solve(&scenario, &request).unwrap();

        errors.push((result.final_state.prey - exact.prey).abs());
    }

    // Check convergence ratios
    for i in 0..errors.len() - 1 {
        let ratio = errors[i] / errors[i + 1];
        println!("RK4 convergence ratio {}->{}: {}", i, i + 1, ratio);

        // Should be close to 16 for fourth-order
        assert!(
            ratio > 12.0 && ratio < 20.0,
            "Convergence ratio {} not fourth-order",
            ratio
        );
    }
}

#[test]
fn test_adaptive_effort_scales_with_tolerance() {
    // Tightening the tolerance must increase the number of accepted steps:
    // the controller is actually responding to the requested accuracy.

    let mut accepted_counts = Vec::new();

    for (rtol, atol) in [(1e-3, 1e-6), (1e-6, 1e-9), (1e-9, 1e-12)] {
        let scenario = Scenario::from_model(Box::new(CircularOrbit::new(1.0)));
        let request = IntegrationRequest::uniform(0.0, 20.0, 2)
            .unwrap()
            .with_tolerances(rtol, atol)
            .unwrap();

        let result = DormandPrince45::new().solve(&scenario, &request).unwrap();
        let accepted: usize = result.metadata["accepted steps"].parse().unwrap();
        accepted_counts.push(accepted);
    }

    println!("accepted steps per tolerance: {:?}", accepted_counts);

    for window in accepted_counts.windows(2) {
        assert!(
            window[1] > window[0],
            "tighter tolerance did not increase step count: {:?}",
            accepted_counts
        );
    }
}

#[test]
fn test_adaptive_accuracy_follows_tolerance_on_oscillatory_problem() {
    // On a closed orbit the global error after many revolutions tracks the
    // requested tolerance within a couple orders of magnitude.

    let omega = 1.0;
    let revolutions = 3.0;
    let t1 = revolutions * 2.0 * std::f64::consts::PI;

    let model = CircularOrbit::new(omega);
    let exact = model.analytical_solution(t1);

    for (rtol, atol, bound) in [(1e-6, 1e-9, 1e-4), (1e-9, 1e-12, 1e-7)] {
        let scenario = Scenario::from_model(Box::new(CircularOrbit::new(omega)));
        let request = IntegrationRequest::uniform(0.0, t1, 2)
            .unwrap()
            .with_tolerances(rtol, atol)
            .unwrap();

        let result = DormandPrince45::new().solve(&scenario, &request).unwrap();
        let error = (result.final_state - exact).max_abs();

        assert!(
            error < bound,
            "error {} exceeds {} at rtol {}",
            error,
            bound,
            rtol
        );
    }
}
