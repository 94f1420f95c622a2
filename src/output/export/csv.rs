//! CSV export for simulation results
//!
//! This module writes trajectories and direction fields as delimited text,
//! compatible with Excel, Python pandas, MATLAB, and most data analysis
//! tools, one `t, prey, predator` file per orbit.
//!
//! # Quick Examples
//!
//! ## Minimal Export
//!
//! ```rust,ignore
//! use lotka_rs::output::export::export_trajectory_csv;
//!
//! export_trajectory_csv(&trajectory, "orbit.csv", None)?;
//! ```
//!
//! **Output** (`orbit.csv`):
//! ```csv
//! Time,Prey,Predator
//! 0.000000,1000.000000,560.000000
//! 2.500000,39.132565,152.723874
//! ...
//! ```
//!
//! ## With Metadata
//!
//! ```rust,ignore
//! use lotka_rs::output::export::{export_trajectory_csv, CsvConfig, CsvMetadata};
//!
//! let metadata = CsvMetadata {
//!     model_name: Some("Lotka-Volterra".to_string()),
//!     solver_name: Some("Dormand-Prince 4(5)".to_string()),
//!     time_span: Some((0.0, 10.0)),
//!     tolerances: Some((1e-6, 1e-9)),
//!     ..Default::default()
//! };
//!
//! let config = CsvConfig::default().with_metadata(metadata);
//! export_trajectory_csv(&trajectory, "orbit.csv", Some(&config))?;
//! ```
//!
//! **Output** (`orbit.csv`):
//! ```csv
//! # Predator-Prey Simulation Data
//! # Model: Lotka-Volterra
//! # Solver: Dormand-Prince 4(5)
//! # Time Span: [0, 10]
//! # Tolerances: rtol=0.000001 atol=0.000000001
//! #
//! Time,Prey,Predator
//! ...
//! ```

use std::error::Error;
use std::fs::File;
use std::io::Write;

use crate::field::DirectionField;
use crate::solver::Trajectory;

// =================================================================================================
// Configuration Structures
// =================================================================================================

/// Configuration for CSV export
///
/// # Fields
///
/// - `delimiter`: column separator (default: ',')
/// - `decimal_separator`: decimal point character (default: '.')
/// - `precision`: number of decimal places (default: 6)
/// - `include_metadata`: add header comments with run info
/// - `metadata`: run metadata to include
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column separator
    pub delimiter: char,

    /// Decimal point character
    pub decimal_separator: char,

    /// Number of decimal places for values
    pub precision: usize,

    /// Add header comments with run information
    pub include_metadata: bool,

    /// Run metadata to include when `include_metadata` is set
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// European format: ';' columns, ',' decimals
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Self::default()
        }
    }

    /// More decimal places for reference data (12 digits)
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Self::default()
        }
    }

    /// Builder: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder: attach metadata and enable the metadata header
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }

    /// Format one value with the configured precision and decimal separator
    fn format_value(&self, value: f64) -> String {
        let formatted = format!("{:.*}", self.precision, value);
        if self.decimal_separator == '.' {
            formatted
        } else {
            formatted.replace('.', &self.decimal_separator.to_string())
        }
    }
}

/// Run metadata written as `#` header comments
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    /// Model name (e.g. "Lotka-Volterra")
    pub model_name: Option<String>,

    /// Solver name (e.g. "Dormand-Prince 4(5)")
    pub solver_name: Option<String>,

    /// Integration span `[t0, t1]`
    pub time_span: Option<(f64, f64)>,

    /// Tolerances `(rtol, atol)`
    pub tolerances: Option<(f64, f64)>,

    /// Additional key/value pairs
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Build metadata from a finished trajectory's own run information
    pub fn from_trajectory(trajectory: &Trajectory, model_name: &str) -> Self {
        Self {
            model_name: Some(model_name.to_string()),
            solver_name: trajectory.metadata.get("solver").cloned(),
            time_span: None,
            tolerances: None,
            custom: Vec::new(),
        }
    }

    /// Add a custom key/value entry
    pub fn add_custom(&mut self, key: String, value: String) {
        self.custom.push((key, value));
    }

    fn write_header(&self, file: &mut File, title: &str) -> Result<(), Box<dyn Error>> {
        writeln!(file, "# {}", title)?;

        if let Some(ref model) = self.model_name {
            writeln!(file, "# Model: {}", model)?;
        }
        if let Some(ref solver) = self.solver_name {
            writeln!(file, "# Solver: {}", solver)?;
        }
        if let Some((t0, t1)) = self.time_span {
            writeln!(file, "# Time Span: [{}, {}]", t0, t1)?;
        }
        if let Some((rtol, atol)) = self.tolerances {
            writeln!(file, "# Tolerances: rtol={} atol={}", rtol, atol)?;
        }
        for (key, value) in &self.custom {
            writeln!(file, "# {}: {}", key, value)?;
        }
        writeln!(file, "#")?;

        Ok(())
    }
}

// =================================================================================================
// Export Functions
// =================================================================================================

/// Export a trajectory as delimited text
///
/// One row per recorded sample: `Time, Prey, Predator`.
///
/// # Errors
///
/// Fails on an empty trajectory, on non-finite values, or on I/O problems.
///
/// # Example
///
/// ```rust,ignore
/// export_trajectory_csv(&trajectory, "1000_560.csv", None)?;
/// ```
pub fn export_trajectory_csv(
    trajectory: &Trajectory,
    output_path: &str,
    config: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = CsvConfig::default();
    let config = config.unwrap_or(&default_config);

    if trajectory.is_empty() {
        return Err("Cannot export empty trajectory".into());
    }

    for (t, state) in trajectory.iter() {
        if !t.is_finite() || !state.is_finite() {
            return Err(format!("Non-finite value at t = {}", t).into());
        }
    }

    let mut file = File::create(output_path)?;

    if config.include_metadata {
        if let Some(ref metadata) = config.metadata {
            metadata.write_header(&mut file, "Predator-Prey Simulation Data")?;
        }
    }

    writeln!(
        file,
        "Time{}Prey{}Predator",
        config.delimiter, config.delimiter
    )?;

    for (t, state) in trajectory.iter() {
        writeln!(
            file,
            "{}{}{}{}{}",
            config.format_value(t),
            config.delimiter,
            config.format_value(state.prey),
            config.delimiter,
            config.format_value(state.predator)
        )?;
    }

    Ok(())
}

/// Export a direction field as delimited text
///
/// One row per grid sample in row-major order:
/// `X, Y, U, V, Degenerate` where `(U, V)` is the unit direction (exactly
/// zero for degenerate samples).
///
/// # Example
///
/// ```rust,ignore
/// export_field_csv(&field, "field.csv", None)?;
/// ```
pub fn export_field_csv(
    field: &DirectionField,
    output_path: &str,
    config: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = CsvConfig::default();
    let config = config.unwrap_or(&default_config);

    if field.is_empty() {
        return Err("Cannot export empty field".into());
    }

    let mut file = File::create(output_path)?;

    if config.include_metadata {
        if let Some(ref metadata) = config.metadata {
            metadata.write_header(&mut file, "Direction Field Data")?;
        }
    }

    let d = config.delimiter;
    writeln!(file, "X{}Y{}U{}V{}Degenerate", d, d, d, d)?;

    for sample in field.iter() {
        writeln!(
            file,
            "{}{}{}{}{}{}{}{}{}",
            config.format_value(sample.x),
            d,
            config.format_value(sample.y),
            d,
            config.format_value(sample.direction.x),
            d,
            config.format_value(sample.direction.y),
            d,
            sample.degenerate as u8
        )?;
    }

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
