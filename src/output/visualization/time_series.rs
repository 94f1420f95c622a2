//! Population-vs-time plotting
//!
//! Draws both population curves of a trajectory against time on shared
//! axes.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lotka_rs::output::visualization::plot_time_series;
//!
//! let trajectory = solver.solve(&scenario, &request)?;
//! plot_time_series(&trajectory, "populations.png", None)?;
//! ```

use plotters::prelude::*;
use std::error::Error;

use super::config::{PlotConfig, NO_TITLE};
use crate::solver::Trajectory;

// =================================================================================================
// Core Plotting Function
// =================================================================================================

/// Plot prey and predator populations against time
///
/// # Arguments
///
/// * `trajectory` - Trajectory with at least one sample
/// * `output_path` - Path to save the plot (PNG or SVG, by extension)
/// * `config` - Optional plot configuration
///
/// # Example
///
/// ```rust,ignore
/// plot_time_series(&trajectory, "orbit_time.png", None)?;
/// ```
pub fn plot_time_series(
    trajectory: &Trajectory,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if trajectory.is_empty() {
        return Err("Empty trajectory".into());
    }

    // Create default config if needed (avoid temporary value)
    let default_config = PlotConfig::time_series(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    // Determine backend and plot
    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_time_series_impl(backend, trajectory, config)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_time_series_impl(backend, trajectory, config)
        }
    }
}

/// Implementation with a concrete backend
fn plot_time_series_impl<DB: DrawingBackend>(
    backend: DB,
    trajectory: &Trajectory,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let t_min = *trajectory.time_points.first().ok_or("Empty trajectory")?;
    let t_max = *trajectory.time_points.last().ok_or("Empty trajectory")?;

    let population_max = trajectory
        .states
        .iter()
        .map(|s| s.prey.max(s.predator))
        .fold(f64::NEG_INFINITY, f64::max)
        .max(1e-10);
    let population_min = trajectory
        .states
        .iter()
        .map(|s| s.prey.min(s.predator))
        .fold(f64::INFINITY, f64::min)
        .min(0.0);

    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(t_min..t_max, population_min..(population_max * 1.1))?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.2}", x))
            .y_label_formatter(&|y| format!("{:.0}", y))
            .draw()?;
    }

    chart
        .draw_series(LineSeries::new(
            trajectory.iter().map(|(t, s)| (t, s.prey)),
            ShapeStyle::from(&config.prey_color).stroke_width(config.line_width),
        ))?
        .label("Prey")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &config.prey_color));

    chart
        .draw_series(LineSeries::new(
            trajectory.iter().map(|(t, s)| (t, s.predator)),
            ShapeStyle::from(&config.predator_color).stroke_width(config.line_width),
        ))?
        .label("Predator")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &config.predator_color));

    chart
        .configure_series_labels()
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
