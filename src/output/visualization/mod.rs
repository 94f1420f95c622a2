//! Visualization of simulation results
//!
//! Plotting functions for the two chart types a simulation run produces:
//!
//! - **Time series**: prey and predator populations against time
//! - **Phase portrait**: the orbit in phase space, with a start marker and
//!   an optional normalized direction-field overlay, for one orbit or a
//!   whole family
//!
//! All functions write PNG or SVG depending on the output path's extension
//! and accept an optional [`PlotConfig`] for customization.

pub mod config;
pub mod phase;
pub mod time_series;

pub use config::{PlotConfig, NO_TITLE};

pub use phase::{plot_orbit_family, plot_phase_portrait};
pub use time_series::plot_time_series;
