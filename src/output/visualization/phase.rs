//! Phase-portrait plotting
//!
//! Draws an orbit in phase space (predator population against prey
//! population) with a marker at the initial state, optionally over a
//! normalized direction field, and a family variant overlaying several
//! orbits on shared axes.
//!
//! The direction field is rendered as short segments, one per grid cell,
//! each aligned with the unit flow direction and scaled to the cell so the
//! overlay stays readable at any grid resolution. Degenerate samples
//! (equilibria) are skipped.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lotka_rs::output::visualization::plot_phase_portrait;
//! use lotka_rs::field::{sample_field, FieldRegion};
//!
//! let trajectory = solver.solve(&scenario, &request)?;
//! let region = FieldRegion::enclosing(&trajectory, 0.05, 50, 50).unwrap();
//! let field = sample_field(&model, &region)?;
//!
//! plot_phase_portrait(&trajectory, Some(&field), "orbit.png", None)?;
//! ```

use plotters::prelude::*;
use std::error::Error;

use super::config::{PlotConfig, NO_TITLE};
use crate::field::DirectionField;
use crate::solver::Trajectory;

/// Field segment length as a fraction of the grid cell
const ARROW_CELL_FRACTION: f64 = 0.45;

// =================================================================================================
// Core Plotting Functions
// =================================================================================================

/// Plot one orbit in phase space, optionally over a direction field
///
/// # Arguments
///
/// * `trajectory` - Orbit to draw; the first sample gets the start marker
/// * `field` - Optional direction field drawn under the orbit
/// * `output_path` - Path to save the plot (PNG or SVG, by extension)
/// * `config` - Optional plot configuration
///
/// The axis bounds come from the field region when a field is given
/// (so the overlay covers the whole chart), and from the trajectory's
/// bounding box otherwise.
pub fn plot_phase_portrait(
    trajectory: &Trajectory,
    field: Option<&DirectionField>,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = PlotConfig::phase_portrait(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let orbits = [("", trajectory)];
    render_phase_chart(&orbits, field, output_path, config, false)
}

/// Plot a family of orbits on shared axes
///
/// Draws the combined all-orbits chart: every
/// orbit in its own color with a legend entry and a start marker, over an
/// optional shared direction field.
///
/// # Arguments
///
/// * `orbits` - `(label, trajectory)` pairs
/// * `field` - Optional direction field drawn under the orbits
/// * `output_path` - Path to save the plot
/// * `config` - Optional plot configuration
///
/// # Example
///
/// ```rust,ignore
/// let orbits = vec![("1000 560", &first), ("500 360", &second)];
/// plot_orbit_family(&orbits, Some(&field), "all_orbits.png", None)?;
/// ```
pub fn plot_orbit_family(
    orbits: &[(&str, &Trajectory)],
    field: Option<&DirectionField>,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if orbits.is_empty() {
        return Err("No orbits provided".into());
    }

    let default_config = PlotConfig::phase_portrait(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    render_phase_chart(orbits, field, output_path, config, true)
}

/// Shared rendering path: backend dispatch, bounds, orbits, field overlay
fn render_phase_chart(
    orbits: &[(&str, &Trajectory)],
    field: Option<&DirectionField>,
    output_path: &str,
    config: &PlotConfig,
    with_legend: bool,
) -> Result<(), Box<dyn Error>> {
    let bounds = chart_bounds(orbits, field)?;

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            render_phase_impl(backend, orbits, field, config, bounds, with_legend)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            render_phase_impl(backend, orbits, field, config, bounds, with_legend)
        }
    }
}

/// Axis bounds: the field region when present, else the orbits' bounding box
fn chart_bounds(
    orbits: &[(&str, &Trajectory)],
    field: Option<&DirectionField>,
) -> Result<(f64, f64, f64, f64), Box<dyn Error>> {
    if let Some(field) = field {
        let region = field.region();
        return Ok((region.x_min, region.x_max, region.y_min, region.y_max));
    }

    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for (_, trajectory) in orbits {
        if let Some((lo, hi)) = trajectory.bounding_box() {
            x_min = x_min.min(lo.prey);
            x_max = x_max.max(hi.prey);
            y_min = y_min.min(lo.predator);
            y_max = y_max.max(hi.predator);
        }
    }

    if !(x_min < x_max) || !(y_min < y_max) {
        return Err("Orbits span no area in phase space".into());
    }

    Ok((x_min, x_max, y_min, y_max))
}

/// Implementation with a concrete backend
fn render_phase_impl<DB: DrawingBackend>(
    backend: DB,
    orbits: &[(&str, &Trajectory)],
    field: Option<&DirectionField>,
    config: &PlotConfig,
    bounds: (f64, f64, f64, f64),
    with_legend: bool,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let (x_min, x_max, y_min, y_max) = bounds;

    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format!("{:.0}", y))
            .draw()?;
    }

    // Field first so the orbits draw over it
    if let Some(field) = field {
        let (cell_x, cell_y) = field.region().spacing();

        chart.draw_series(field.iter().filter(|s| !s.degenerate).map(|sample| {
            // Unit directions are scaled per axis so arrows stay inside
            // their cell even on strongly anisotropic axes.
            let tip_x = sample.x + sample.direction.x * cell_x * ARROW_CELL_FRACTION;
            let tip_y = sample.y + sample.direction.y * cell_y * ARROW_CELL_FRACTION;

            PathElement::new(vec![(sample.x, sample.y), (tip_x, tip_y)], &config.field_color)
        }))?;
    }

    for (index, (label, trajectory)) in orbits.iter().enumerate() {
        let color = if with_legend {
            config.get_orbit_color(index)
        } else {
            config.orbit_color
        };

        let series = chart.draw_series(LineSeries::new(
            trajectory.iter().map(|(_, s)| (s.prey, s.predator)),
            ShapeStyle::from(&color).stroke_width(config.line_width),
        ))?;

        if with_legend {
            series
                .label(*label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
        }

        // Start marker, as in the original orbit charts
        if let Some(start) = trajectory.states.first() {
            chart.draw_series(std::iter::once(Circle::new(
                (start.prey, start.predator),
                4,
                config.marker_color.filled(),
            )))?;
        }
    }

    if with_legend {
        chart
            .configure_series_labels()
            .background_style(&config.background.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    root.present()?;

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{sample_field, FieldRegion};
    use crate::models::LotkaVolterra;
    use crate::physics::State;
    use crate::solver::{IntegrationRequest, RK4Solver, Scenario, Solver};

    fn orbit(prey: f64, predator: f64) -> Trajectory {
        let model = LotkaVolterra::with_default_rates(State::new(prey, predator));
        let scenario = Scenario::from_model(Box::new(model));
        let request = IntegrationRequest::uniform(0.0, 2.0, 80).unwrap();

        RK4Solver::new().solve(&scenario, &request).unwrap()
    }

    #[test]
    fn test_plot_phase_portrait_plain() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("png");

        plot_phase_portrait(&orbit(1000.0, 560.0), None, path.to_str().unwrap(), None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_phase_portrait_with_field() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("png");

        let trajectory = orbit(1000.0, 560.0);
        let model = LotkaVolterra::with_default_rates(State::new(1000.0, 560.0));
        let region = FieldRegion::enclosing(&trajectory, 0.05, 20, 20).unwrap();
        let field = sample_field(&model, &region).unwrap();

        plot_phase_portrait(&trajectory, Some(&field), path.to_str().unwrap(), None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_orbit_family() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("png");

        let first = orbit(1000.0, 560.0);
        let second = orbit(500.0, 360.0);
        let orbits = vec![("1000 560", &first), ("500 360", &second)];

        plot_orbit_family(&orbits, None, path.to_str().unwrap(), None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_orbit_family_svg_with_field() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("svg");

        let first = orbit(1000.0, 560.0);
        let second = orbit(700.0, 440.0);
        let orbits = vec![("a", &first), ("b", &second)];

        let model = LotkaVolterra::with_default_rates(State::new(1000.0, 560.0));
        let region = FieldRegion::new(0.0, 2000.0, 0.0, 900.0, 15, 15);
        let field = sample_field(&model, &region).unwrap();

        plot_orbit_family(&orbits, Some(&field), path.to_str().unwrap(), None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_empty_family_fails() {
        let result = plot_orbit_family(&[], None, "unused.png", None);
        assert!(result.is_err());
    }

    #[test]
    fn test_degenerate_orbit_without_field_fails() {
        // A single stationary point spans no area and there is no field to
        // borrow bounds from.
        let state = State::new(100.0, 200.0);
        let trajectory = Trajectory::new(vec![0.0], vec![state], state);

        let result = plot_phase_portrait(&trajectory, None, "unused.png", None);
        assert!(result.is_err());
    }
}
