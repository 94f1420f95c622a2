//! Output module for simulation results
//!
//! This module provides tools to output simulation results in two forms:
//! - **Visualization**: PNG/SVG plots using plotters
//! - **Export**: delimited text for external analysis
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── visualization/      ← Plots and graphics
//! │   ├── config.rs
//! │   ├── time_series.rs
//! │   └── phase.rs
//! └── export/             ← Data export
//!     └── csv.rs
//! ```
//!
//! # Quick Start
//!
//! ## Visualization
//!
//! ```rust,ignore
//! use lotka_rs::output::visualization::plot_phase_portrait;
//!
//! plot_phase_portrait(&trajectory, Some(&field), "orbit.png", None)?;
//! ```
//!
//! ## CSV Export
//!
//! ```rust,ignore
//! use lotka_rs::output::export::export_trajectory_csv;
//!
//! export_trajectory_csv(&trajectory, "orbit.csv", None)?;
//! ```
//!
//! # Design Philosophy
//!
//! The output layer consumes only the core result types (`Trajectory`,
//! `DirectionField`); the numerical engine never learns about file formats
//! or chart backends.

pub mod export;
pub mod visualization;

// Re-export commonly used items for convenience
pub use visualization::{
    plot_orbit_family,
    plot_phase_portrait,
    plot_time_series,
    PlotConfig,
};

pub use export::{
    export_field_csv,
    export_trajectory_csv,
    CsvConfig,
    CsvMetadata,
};
