//! FlightPlot - Main Entry Point
//!
//! Loads a simulation result and a plot configuration, builds the chart model
//! and prints it, optionally for a single stage and with a crosshair query.

use anyhow::{Context, Result};
use clap::Parser;
use flightplot::{
    plot::{ChartModel, EventAnnotations},
    PlotConfiguration, SimulationData, SimulationPlot,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "flightplot")]
#[command(about = "Chart model builder for rocket flight simulations")]
#[command(version)]
struct Args {
    /// Simulation result (JSON)
    simulation: PathBuf,

    /// Plot configuration (TOML or JSON), defaults to the first recorded data types vs. time
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stage to show, -1 for all stages
    #[arg(short, long, default_value_t = -1, allow_hyphen_values = true)]
    stage: i32,

    /// Print the crosshair summary at this domain value
    #[arg(long, allow_hyphen_values = true)]
    crosshair: Option<f64>,

    /// Value axis of the crosshair query (0 = left, 1 = right)
    #[arg(long, default_value_t = 0)]
    axis: u8,

    /// Draw sample point markers
    #[arg(long)]
    show_points: bool,

    /// Write the effective plot configuration to this file
    #[arg(long)]
    save_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,flightplot=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let simulation = SimulationData::load(&args.simulation)
        .with_context(|| format!("Failed to load simulation {:?}", args.simulation))?;
    tracing::info!(
        "Loaded simulation '{}' with {} branches",
        simulation.name,
        simulation.branch_count()
    );

    let config = match &args.config {
        Some(path) => PlotConfiguration::load(path)
            .with_context(|| format!("Failed to load plot configuration {:?}", path))?,
        None => {
            let config = PlotConfiguration::default_for(&simulation);
            tracing::info!("No configuration given, using '{}'", config.name);
            config
        }
    };

    if let Some(path) = &args.save_config {
        config
            .save(path)
            .with_context(|| format!("Failed to save plot configuration {:?}", path))?;
        tracing::info!("Saved plot configuration to {:?}", path);
    }

    let mut plot = SimulationPlot::new(Arc::new(simulation), config)?;
    plot.set_stage(args.stage);
    plot.set_show_points(args.show_points);

    print_plot(&plot);

    if let Some(domain_value) = args.crosshair {
        match plot.crosshair_text(domain_value, args.axis) {
            Some(text) => println!("\n{}", text),
            None => println!("\nNo samples past {} on axis {}", domain_value, args.axis),
        }
    }

    Ok(())
}

fn print_plot(plot: &SimulationPlot) {
    let model = plot.model();

    println!("{}", model.title);
    println!("{}", model.subtitle);
    if plot.has_stage_selector() {
        let labels = plot.stage_labels();
        let selected = plot.stage().map_or(0, |stage| stage + 1);
        println!("Stage: {} (of {})", labels[selected], labels.join(", "));
    }

    println!("\nDomain: {}", model.domain_label);
    print_axes(&model);

    println!("\nSeries:");
    for (series, visible) in model.series.iter().zip(plot.visibility()) {
        let marker = if visible { '*' } else { ' ' };
        println!("  {} {} ({} points)", marker, series.label, series.len());
    }

    println!("\nLegend:");
    for entry in &model.legend {
        println!("  {} [axis {}]", entry.label, entry.axis);
    }

    let events = plot.visible_events();
    println!("\nEvents:");
    for group in &events.groups {
        println!("  {:>10.3} s  {}", group.time, group.label);
    }

    match &events.annotations {
        EventAnnotations::Markers(markers) => {
            println!("\nMarkers:");
            for marker in markers {
                println!("  {:>10.3}  {}", marker.value, marker.label);
            }
        }
        EventAnnotations::Images(images) => {
            println!("\nAnnotations:");
            for image in images {
                println!(
                    "  ({:.3}, {:.3})  {} [{}]",
                    image.x, image.y, image.tooltip, image.icon
                );
            }
        }
    }
}

fn print_axes(model: &ChartModel) {
    for axis in &model.axes {
        let side = if axis.index == 0 { "Left" } else { "Right" };
        println!(
            "{} axis: {}  [{}, {}]",
            side, axis.label, axis.value_range.min, axis.value_range.max
        );
    }
}
