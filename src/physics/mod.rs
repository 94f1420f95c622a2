//! Population models
//!
//! This module provides the trait and state type for population models.
//! A population model encapsulates the governing equations of a
//! two-species predator/prey system.
//!
//! # Core Concepts
//!
//! - **Population Model**: Computes the governing equations at a given state
//! - **State**: The ordered `(prey, predator)` pair every component exchanges
//!
//! # Architecture
//!
//! Population models are **separate from numerical solvers**:
//! - The model provides the **equations** (physics)
//! - The solver provides the **method** to solve them (numerics)
//!
//! This separation allows:
//! - Same model with different solvers (fixed-step RK4, adaptive RK45)
//! - Same model feeding both time integration and field sampling
//!
//! # Implementing a New Population Model
//!
//! ```rust
//! use lotka_rs::physics::{PopulationModel, State};
//!
//! /// dx/dt = -x, dy/dt = -y
//! struct Fadeout;
//!
//! impl PopulationModel for Fadeout {
//!     fn compute_dynamics(&self, state: &State) -> State {
//!         State::new(-state.prey, -state.predator)
//!     }
//!
//!     fn setup_initial_state(&self) -> State {
//!         State::new(1.0, 1.0)
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Fadeout"
//!     }
//! }
//! ```
//!
//! # Available Models
//!
//! See [`crate::models`] for the concrete models shipped with the crate,
//! currently the classic Lotka-Volterra system.

pub mod state;
pub mod traits;

pub use state::State;
pub use traits::PopulationModel;
