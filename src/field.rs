//! Direction-field sampling
//!
//! This module produces the normalized direction field drawn under phase
//! portraits: a regular grid over a rectangle in phase space where every
//! point carries a unit-length vector showing the instantaneous flow
//! direction of the population system.
//!
//! # Core Concepts
//!
//! - **FieldRegion**: the rectangle and grid resolution to sample
//! - **FieldSample**: one grid point with its unit direction
//! - **DirectionField**: the immutable row-major grid of samples
//!
//! The sampler consumes the same [`PopulationModel`] object as the time
//! integrator, so the arrows and the orbit always reflect the same rate
//! constants.
//!
//! # Degenerate points
//!
//! At an equilibrium the raw derivative vanishes and `(u, v)/‖(u, v)‖` is
//! undefined. Rather than leaving that to incidental floating-point
//! behavior, samples whose raw norm is at or below [`DEGENERACY_EPSILON`]
//! carry an exact zero vector and a `degenerate` flag. They are valid
//! output, not errors.
//!
//! # Parallel sampling
//!
//! Sampling is a single pure pass over independent grid points. With the
//! `parallel` feature enabled, grids larger than [`parallel_threshold()`]
//! points are sampled with Rayon; smaller grids stay sequential because the
//! thread-pool dispatch would outweigh the per-point work.
//!
//! # Example
//!
//! ```rust
//! use lotka_rs::field::{sample_field, FieldRegion};
//! use lotka_rs::models::LotkaVolterra;
//! use lotka_rs::physics::State;
//!
//! # fn main() -> Result<(), lotka_rs::solver::SolverError> {
//! let model = LotkaVolterra::with_default_rates(State::new(1000.0, 560.0));
//! let region = FieldRegion::new(0.0, 2000.0, 0.0, 800.0, 50, 50);
//!
//! let field = sample_field(&model, &region)?;
//! assert_eq!(field.len(), 2500);
//! # Ok(())
//! # }
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use nalgebra::Vector2;
use ndarray::Array2;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::physics::{PopulationModel, State};
use crate::solver::{SolverError, Trajectory};

/// Raw derivative norms at or below this value are treated as vanishing
///
/// The threshold is absolute: the governing equations of this crate produce
/// derivative magnitudes of order 1 or more anywhere away from an
/// equilibrium, so anything at the 1e-12 scale is numerically
/// indistinguishable from a fixed point.
pub const DEGENERACY_EPSILON: f64 = 1e-12;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Stored in an AtomicUsize so benchmarks and tests can change it at runtime
// without a mutex on every sample_field call. Relaxed ordering is enough:
// the value is a performance hint, not a synchronization point.

/// Default number of grid points above which `sample_field` switches to
/// parallel iteration (when compiled with the `parallel` feature).
const DEFAULT_PARALLEL_THRESHOLD: usize = 999;

static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// # Example
///
/// ```rust
/// use lotka_rs::field::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`; that would force parallel dispatch for
/// every single-point grid.
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// RAII guard that saves the current threshold on construction and restores
/// it on drop.
///
/// Only compiled in test builds. Prevents one test from leaking a modified
/// threshold into the next.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
}

#[cfg(test)]
impl ThresholdGuard {
    pub(crate) fn save(new_value: usize) -> Self {
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Field Region
// =================================================================================================

/// Rectangle and grid resolution for field sampling
///
/// The grid includes both endpoints of each axis with uniform spacing:
/// `nx` columns across `[x_min, x_max]` and `ny` rows across
/// `[y_min, y_max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRegion {
    /// Lower prey bound
    pub x_min: f64,
    /// Upper prey bound
    pub x_max: f64,
    /// Lower predator bound
    pub y_min: f64,
    /// Upper predator bound
    pub y_max: f64,
    /// Number of columns (prey axis), at least 2
    pub nx: usize,
    /// Number of rows (predator axis), at least 2
    pub ny: usize,
}

impl FieldRegion {
    /// Create a region; invariants are checked by `sample_field`
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64, nx: usize, ny: usize) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            nx,
            ny,
        }
    }

    /// Region enclosing a trajectory's bounding box with a relative margin
    ///
    /// This is how the batch driver derives overlay bounds from an orbit.
    /// `margin` is a fraction of each axis extent (0.05 = 5% padding on both
    /// sides). A degenerate extent (an orbit pinned at an equilibrium) is
    /// padded by one population unit instead so the region stays valid.
    ///
    /// Returns `None` for an empty trajectory.
    pub fn enclosing(trajectory: &Trajectory, margin: f64, nx: usize, ny: usize) -> Option<Self> {
        let (lo, hi) = trajectory.bounding_box()?;

        let pad = |extent: f64| {
            if extent > 0.0 {
                extent * margin
            } else {
                1.0
            }
        };

        let pad_x = pad(hi.prey - lo.prey);
        let pad_y = pad(hi.predator - lo.predator);

        Some(Self::new(
            lo.prey - pad_x,
            hi.prey + pad_x,
            lo.predator - pad_y,
            hi.predator + pad_y,
            nx,
            ny,
        ))
    }

    /// Grid spacing `(dx, dy)`
    pub fn spacing(&self) -> (f64, f64) {
        (
            (self.x_max - self.x_min) / ((self.nx - 1) as f64),
            (self.y_max - self.y_min) / ((self.ny - 1) as f64),
        )
    }

    /// Coordinates of the grid point at column `ix`, row `iy`
    pub fn point(&self, ix: usize, iy: usize) -> (f64, f64) {
        let (dx, dy) = self.spacing();
        (
            self.x_min + dx * (ix as f64),
            self.y_min + dy * (iy as f64),
        )
    }

    /// Validate bounds and resolution
    pub fn validate(&self) -> Result<(), SolverError> {
        for (name, value) in [
            ("x_min", self.x_min),
            ("x_max", self.x_max),
            ("y_min", self.y_min),
            ("y_max", self.y_max),
        ] {
            if !value.is_finite() {
                return Err(SolverError::InvalidRequest(format!(
                    "field bound {} must be finite, got {}",
                    name, value
                )));
            }
        }

        if self.x_min >= self.x_max {
            return Err(SolverError::InvalidRequest(format!(
                "x_min must be below x_max, got [{}, {}]",
                self.x_min, self.x_max
            )));
        }

        if self.y_min >= self.y_max {
            return Err(SolverError::InvalidRequest(format!(
                "y_min must be below y_max, got [{}, {}]",
                self.y_min, self.y_max
            )));
        }

        if self.nx < 2 || self.ny < 2 {
            return Err(SolverError::InvalidRequest(format!(
                "grid needs at least 2 points per axis, got {}x{}",
                self.nx, self.ny
            )));
        }

        Ok(())
    }
}

// =================================================================================================
// Field Sample and Direction Field
// =================================================================================================

/// One grid point of a direction field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSample {
    /// Prey coordinate of the sample point
    pub x: f64,
    /// Predator coordinate of the sample point
    pub y: f64,
    /// Unit flow direction, or exactly zero when degenerate
    pub direction: Vector2<f64>,
    /// The raw derivative vanished here (equilibrium point)
    pub degenerate: bool,
}

/// Normalized direction field over a rectangular region
///
/// Samples are stored row-major with shape `(ny, nx)`: index `[[iy, ix]]`
/// is the point at column `ix` of row `iy`, matching
/// [`FieldRegion::point`]. Purely derived data, immutable once produced.
#[derive(Debug, Clone)]
pub struct DirectionField {
    region: FieldRegion,
    samples: Array2<FieldSample>,
}

impl DirectionField {
    /// The region this field was sampled over
    pub fn region(&self) -> &FieldRegion {
        &self.region
    }

    /// Total number of samples (`nx · ny`)
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True for a zero-sample field (cannot happen for validated regions)
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at column `ix`, row `iy`
    pub fn get(&self, ix: usize, iy: usize) -> Option<&FieldSample> {
        self.samples.get((iy, ix))
    }

    /// Iterate over all samples in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &FieldSample> {
        self.samples.iter()
    }

    /// Number of degenerate (equilibrium) samples
    pub fn degenerate_count(&self) -> usize {
        self.samples.iter().filter(|s| s.degenerate).count()
    }
}

// =================================================================================================
// Sampling
// =================================================================================================

fn compute_sample(model: &dyn PopulationModel, region: &FieldRegion, index: usize) -> FieldSample {
    let ix = index % region.nx;
    let iy = index / region.nx;
    let (x, y) = region.point(ix, iy);

    let rates = model.compute_dynamics(&State::new(x, y));
    let raw = Vector2::new(rates.prey, rates.predator);
    let norm = raw.norm();

    if norm > DEGENERACY_EPSILON {
        FieldSample {
            x,
            y,
            direction: raw / norm,
            degenerate: false,
        }
    } else {
        FieldSample {
            x,
            y,
            direction: Vector2::zeros(),
            degenerate: true,
        }
    }
}

/// Sample the model's normalized direction field over a region
///
/// Evaluates the governing equations at every point of the inclusive
/// `nx × ny` grid and normalizes each derivative to unit length; points
/// where the derivative vanishes are flagged degenerate instead of divided
/// by near-zero. A single pass with no iteration — the computation cannot
/// diverge.
///
/// # Errors
///
/// `InvalidRequest` when the region bounds are inverted, non-finite, or the
/// resolution is below 2 points per axis.
pub fn sample_field(
    model: &dyn PopulationModel,
    region: &FieldRegion,
) -> Result<DirectionField, SolverError> {
    region.validate()?;

    let total = region.nx * region.ny;

    #[cfg(feature = "parallel")]
    let samples: Vec<FieldSample> = if total > parallel_threshold() {
        (0..total)
            .into_par_iter()
            .map(|index| compute_sample(model, region, index))
            .collect()
    } else {
        (0..total)
            .map(|index| compute_sample(model, region, index))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let samples: Vec<FieldSample> = (0..total)
        .map(|index| compute_sample(model, region, index))
        .collect();

    let samples = Array2::from_shape_vec((region.ny, region.nx), samples)
        .expect("sample count matches grid shape");

    Ok(DirectionField {
        region: *region,
        samples,
    })
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LotkaVolterra;

    fn standard_model() -> LotkaVolterra {
        LotkaVolterra::with_default_rates(State::new(1000.0, 560.0))
    }

    // ====== Threshold tests ======

    #[test]
    fn test_default_threshold_value() {
        assert_eq!(DEFAULT_PARALLEL_THRESHOLD, 999);
    }

    #[test]
    fn test_get_and_set_threshold() {
        let _guard = ThresholdGuard::save(500);
        assert_eq!(parallel_threshold(), 500);
    }

    #[test]
    #[should_panic(expected = "parallel threshold must be at least 1")]
    fn test_zero_threshold_panics() {
        set_parallel_threshold(0);
    }

    // ====== Region tests ======

    #[test]
    fn test_region_spacing_and_points() {
        let region = FieldRegion::new(0.0, 10.0, 0.0, 4.0, 11, 5);
        let (dx, dy) = region.spacing();

        assert_eq!(dx, 1.0);
        assert_eq!(dy, 1.0);
        assert_eq!(region.point(0, 0), (0.0, 0.0));
        assert_eq!(region.point(10, 4), (10.0, 4.0));
        assert_eq!(region.point(3, 2), (3.0, 2.0));
    }

    #[test]
    fn test_region_validation() {
        assert!(FieldRegion::new(0.0, 1.0, 0.0, 1.0, 2, 2).validate().is_ok());

        let inverted_x = FieldRegion::new(1.0, 0.0, 0.0, 1.0, 5, 5);
        assert!(matches!(
            inverted_x.validate(),
            Err(SolverError::InvalidRequest(_))
        ));

        let flat_y = FieldRegion::new(0.0, 1.0, 2.0, 2.0, 5, 5);
        assert!(flat_y.validate().is_err());

        let coarse = FieldRegion::new(0.0, 1.0, 0.0, 1.0, 1, 5);
        assert!(coarse.validate().is_err());

        let non_finite = FieldRegion::new(0.0, f64::NAN, 0.0, 1.0, 5, 5);
        assert!(non_finite.validate().is_err());
    }

    #[test]
    fn test_enclosing_region() {
        use crate::solver::Trajectory;

        let trajectory = Trajectory::new(
            vec![0.0, 1.0],
            vec![State::new(100.0, 300.0), State::new(200.0, 500.0)],
            State::new(200.0, 500.0),
        );

        let region = FieldRegion::enclosing(&trajectory, 0.1, 30, 40).unwrap();

        assert_eq!(region.nx, 30);
        assert_eq!(region.ny, 40);
        assert!((region.x_min - 90.0).abs() < 1e-9);
        assert!((region.x_max - 210.0).abs() < 1e-9);
        assert!((region.y_min - 280.0).abs() < 1e-9);
        assert!((region.y_max - 520.0).abs() < 1e-9);
    }

    #[test]
    fn test_enclosing_pinned_orbit_stays_valid() {
        use crate::solver::Trajectory;

        // A trajectory pinned at the equilibrium has zero extent
        let state = State::new(100.0, 200.0);
        let trajectory = Trajectory::new(vec![0.0, 1.0], vec![state, state], state);

        let region = FieldRegion::enclosing(&trajectory, 0.05, 10, 10).unwrap();
        assert!(region.validate().is_ok());
    }

    // ====== Sampling tests ======

    #[test]
    fn test_grid_shape_and_coordinates() {
        let model = standard_model();
        let region = FieldRegion::new(0.0, 300.0, 0.0, 400.0, 4, 5);

        let field = sample_field(&model, &region).unwrap();

        assert_eq!(field.len(), 20);

        let corner = field.get(0, 0).unwrap();
        assert_eq!((corner.x, corner.y), (0.0, 0.0));

        let opposite = field.get(3, 4).unwrap();
        assert_eq!((opposite.x, opposite.y), (300.0, 400.0));

        assert!(field.get(4, 0).is_none());
    }

    #[test]
    fn test_non_degenerate_samples_have_unit_norm() {
        let model = standard_model();
        let region = FieldRegion::new(1.0, 2000.0, 1.0, 800.0, 25, 25);

        let field = sample_field(&model, &region).unwrap();

        for sample in field.iter() {
            if !sample.degenerate {
                assert!(
                    (sample.direction.norm() - 1.0).abs() < 1e-12,
                    "non-unit direction at ({}, {})",
                    sample.x,
                    sample.y
                );
            }
        }
    }

    #[test]
    fn test_equilibrium_is_degenerate() {
        let model = standard_model();
        // Grid crafted so (100, 200) and the origin are exact grid points
        let region = FieldRegion::new(0.0, 200.0, 0.0, 400.0, 3, 3);

        let field = sample_field(&model, &region).unwrap();

        let equilibrium = field.get(1, 1).unwrap();
        assert_eq!((equilibrium.x, equilibrium.y), (100.0, 200.0));
        assert!(equilibrium.degenerate);
        assert_eq!(equilibrium.direction, Vector2::zeros());

        // The origin is the trivial equilibrium
        let origin = field.get(0, 0).unwrap();
        assert!(origin.degenerate);

        assert_eq!(field.degenerate_count(), 2);
    }

    #[test]
    fn test_invalid_region_rejected() {
        let model = standard_model();
        let region = FieldRegion::new(5.0, 5.0, 0.0, 1.0, 10, 10);

        let result = sample_field(&model, &region);
        assert!(matches!(result, Err(SolverError::InvalidRequest(_))));
    }

    #[test]
    fn test_sampling_is_deterministic_across_thresholds() {
        // Force both the sequential and (with the feature) parallel paths
        // over the same grid and compare.
        let model = standard_model();
        let region = FieldRegion::new(0.0, 500.0, 0.0, 500.0, 40, 40);

        let sequential = {
            let _guard = ThresholdGuard::save(1_000_000);
            sample_field(&model, &region).unwrap()
        };
        let maybe_parallel = {
            let _guard = ThresholdGuard::save(1);
            sample_field(&model, &region).unwrap()
        };

        for (a, b) in sequential.iter().zip(maybe_parallel.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_directions_match_equations() {
        let model = standard_model();
        let region = FieldRegion::new(0.0, 1000.0, 0.0, 560.0, 3, 3);

        let field = sample_field(&model, &region).unwrap();

        // At (1000, 560): raw derivative is (-3600, 5040); norm scales away
        let sample = field.get(2, 2).unwrap();
        let expected = Vector2::new(-3600.0, 5040.0).normalize();

        assert!((sample.direction - expected).norm() < 1e-12);
    }
}
