//! Concrete population models
//!
//! Implementations of the [`PopulationModel`](crate::physics::PopulationModel)
//! trait. Each model owns its rate constants and a default initial state, so
//! one value describes a complete simulation case.
//!
//! # Available Models
//!
//! - [`LotkaVolterra`]: the classic two-species predator-prey system
//!
//! Models with time-varying coefficients or more species are out of scope
//! for this crate.

pub mod lotka_volterra;

pub use lotka_volterra::{LotkaVolterra, RateParameters};
