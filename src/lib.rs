//! lotka-rs: Predator-Prey Simulation Framework
//!
//! A framework for simulating the time evolution of a two-species
//! (predator/prey) Lotka-Volterra system and visualizing the resulting
//! trajectory in phase space, together with a normalized direction field.
//!
//! # Architecture
//!
//! lotka-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - Population models define equations (what to solve)
//!    - Numerical solvers provide methods (how to solve)
//!
//! 2. **One model, every consumer**
//!    - The same `PopulationModel` object feeds both the time integrator
//!      and the direction-field sampler, so the rate constants exist in
//!      exactly one place.
//!
//! # Quick Start
//!
//! ```rust
//! use lotka_rs::models::{LotkaVolterra, RateParameters};
//! use lotka_rs::physics::State;
//! use lotka_rs::solver::{DormandPrince45, IntegrationRequest, Scenario, Solver};
//! use lotka_rs::field::{sample_field, FieldRegion};
//!
//! # fn main() -> Result<(), lotka_rs::solver::SolverError> {
//! // 1. One model carries the physics for every downstream consumer
//! let params = RateParameters::new(2.0, 0.01, 1.0, 0.01);
//! let model = LotkaVolterra::new(params, State::new(1000.0, 560.0));
//!
//! // 2. Integrate the trajectory at 100 evenly spaced output times
//! let scenario = Scenario::from_model(Box::new(model.clone()));
//! let request = IntegrationRequest::uniform(0.0, 10.0, 100)?;
//! let trajectory = DormandPrince45::new().solve(&scenario, &request)?;
//!
//! // 3. Sample the direction field over a region around the orbit
//! let region = FieldRegion::new(0.0, 2000.0, 0.0, 800.0, 50, 50);
//! let field = sample_field(&model, &region)?;
//!
//! println!("{} samples, {} states", field.len(), trajectory.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: Population state and model trait (equations)
//! - [`models`]: Concrete models (Lotka-Volterra)
//! - [`solver`]: Numerical solvers (adaptive and fixed-step methods)
//! - [`field`]: Direction-field sampling for phase-portrait overlays
//! - [`output`]: Result visualization and export

pub mod physics;

pub mod models;
pub mod solver;

pub mod field;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //!
    //! use lotka_rs::prelude::*;
    //! ```
    pub use crate::physics::{PopulationModel, State};
    pub use crate::models::{LotkaVolterra, RateParameters};
    pub use crate::solver::{Solver,
                            SolverError,
                            IntegrationRequest,
                            Scenario,
                            Trajectory,
                            DormandPrince45,
                            RK4Solver};
    pub use crate::field::{sample_field, DirectionField, FieldRegion, FieldSample};
}
