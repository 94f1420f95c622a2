//! Batch orbit driver
//!
//! Integrates a family of predator-prey orbits with the standard rate
//! constants, exports each trajectory as delimited text, and renders the
//! charts: a time-series plot and a phase portrait with a
//! direction-field overlay per orbit, plus one combined chart of the whole
//! family.
//!
//! ```bash
//! cargo run --bin batch_orbits
//! ```
//!
//! Results land in `output/`.

use std::error::Error;
use std::path::Path;

use lotka_rs::field::{sample_field, FieldRegion};
use lotka_rs::models::LotkaVolterra;
use lotka_rs::output::export::{export_trajectory_csv, CsvConfig, CsvMetadata};
use lotka_rs::output::visualization::{plot_orbit_family, plot_phase_portrait, plot_time_series, PlotConfig};
use lotka_rs::physics::State;
use lotka_rs::solver::{DormandPrince45, IntegrationRequest, Scenario, Solver, Trajectory};

/// Initial population pairs of the orbit family
const INITIAL_CONDITIONS: [(f64, f64); 10] = [
    (500.0, 360.0),
    (400.0, 320.0),
    (300.0, 280.0),
    (200.0, 240.0),
    (100.0, 200.0),
    (600.0, 400.0),
    (700.0, 440.0),
    (800.0, 480.0),
    (900.0, 520.0),
    (1000.0, 560.0),
];

const T0: f64 = 0.0;
const T1: f64 = 10.0;
const OUTPUT_POINTS: usize = 1000;
const FIELD_RESOLUTION: usize = 50;
const FIELD_MARGIN: f64 = 0.05;

fn run_orbit(
    output_dir: &Path,
    prey0: f64,
    predator0: f64,
) -> Result<(String, Trajectory), Box<dyn Error>> {
    let model = LotkaVolterra::with_default_rates(State::new(prey0, predator0));
    let scenario = Scenario::from_model(Box::new(model.clone()));
    let request = IntegrationRequest::uniform(T0, T1, OUTPUT_POINTS)?;

    let solver = DormandPrince45::new();
    let trajectory = solver.solve(&scenario, &request)?;

    let stem = format!("{}_{}", prey0 as i64, predator0 as i64);
    let label = format!("{} {}", prey0 as i64, predator0 as i64);

    // Delimited export, one file per orbit
    let mut metadata = CsvMetadata::from_trajectory(&trajectory, scenario.get_model_name());
    metadata.time_span = Some((request.t0, request.t1));
    metadata.tolerances = Some((request.rtol, request.atol));
    let csv_config = CsvConfig::default().with_metadata(metadata);
    let csv_path = output_dir.join(format!("{}.csv", stem));
    export_trajectory_csv(&trajectory, csv_path.to_str().unwrap(), Some(&csv_config))?;

    // Time-domain chart
    let time_config = PlotConfig::time_series(None::<&str>);
    let time_path = output_dir.join(format!("{}_time.png", stem));
    plot_time_series(&trajectory, time_path.to_str().unwrap(), Some(&time_config))?;

    // Phase portrait with the direction field over this orbit's bounds
    let region = FieldRegion::enclosing(&trajectory, FIELD_MARGIN, FIELD_RESOLUTION, FIELD_RESOLUTION)
        .expect("trajectory is never empty here");
    let field = sample_field(&model, &region)?;

    let orbit_config = PlotConfig::phase_portrait(format!("Orbit from ({}, {})", prey0, predator0));
    let orbit_path = output_dir.join(format!("{}_orbit_vector.png", stem));
    plot_phase_portrait(
        &trajectory,
        Some(&field),
        orbit_path.to_str().unwrap(),
        Some(&orbit_config),
    )?;

    println!("Done: {}", stem);

    Ok((label, trajectory))
}

fn main() -> Result<(), Box<dyn Error>> {
    let output_dir = Path::new("output");
    std::fs::create_dir_all(output_dir)?;

    let mut orbits = Vec::with_capacity(INITIAL_CONDITIONS.len());
    for (prey0, predator0) in INITIAL_CONDITIONS {
        orbits.push(run_orbit(output_dir, prey0, predator0)?);
    }

    // Combined chart: every orbit over one shared direction field
    let labeled: Vec<(&str, &Trajectory)> = orbits
        .iter()
        .map(|(label, trajectory)| (label.as_str(), trajectory))
        .collect();

    let mut x_max = f64::NEG_INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for (_, trajectory) in &labeled {
        if let Some((_, hi)) = trajectory.bounding_box() {
            x_max = x_max.max(hi.prey);
            y_max = y_max.max(hi.predator);
        }
    }

    let family_model = LotkaVolterra::with_default_rates(State::new(0.0, 0.0));
    let family_region = FieldRegion::new(
        0.0,
        x_max * (1.0 + FIELD_MARGIN),
        0.0,
        y_max * (1.0 + FIELD_MARGIN),
        FIELD_RESOLUTION,
        FIELD_RESOLUTION,
    );
    let family_field = sample_field(&family_model, &family_region)?;

    let family_path = output_dir.join("all_orbits.png");
    plot_orbit_family(
        &labeled,
        Some(&family_field),
        family_path.to_str().unwrap(),
        None,
    )?;

    println!("Done: all_orbits");

    Ok(())
}
