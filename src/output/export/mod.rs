//! Data export for simulation results
//!
//! Writes trajectories and direction fields as delimited text for external
//! analysis tools. See [`csv`] for formats and configuration.

pub mod csv;

pub use csv::{export_field_csv, export_trajectory_csv, CsvConfig, CsvMetadata};
