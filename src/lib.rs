//! # FlightPlot: Rocket Flight Simulation Plots
//!
//! Turns the output of a rocket flight simulation (one time-indexed data
//! branch per stage, each with its own flight events) into a renderable
//! chart model: unit-converted series on up to two value axes, flight events
//! collapsed into readable markers or trace annotations, a legend with one
//! entry per data type and a crosshair summary for any cursor position.
//!
//! ## Architecture
//!
//! - **Types**: simulation data, data types, units and flight events
//! - **Config**: serde-backed plot configuration, validated against a simulation
//! - **Plot**: the chart model engine (series, axes, events, legend, crosshair)
//! - **Frontend**: egui_plot rendering of a built model
//!
//! ## Example
//!
//! ```ignore
//! use flightplot::{PlotConfiguration, SimulationData, SimulationPlot};
//! use std::sync::Arc;
//!
//! fn main() -> flightplot::Result<()> {
//!     let simulation = Arc::new(SimulationData::load("flight.json")?);
//!     let config = PlotConfiguration::load("vertical_motion.toml")?;
//!
//!     let mut plot = SimulationPlot::new(simulation, config)?;
//!     plot.set_stage(1);
//!
//!     let model = plot.model();
//!     println!("{} series on {} axes", model.series.len(), model.axes.len());
//!     if let Some(text) = plot.crosshair_text(12.5, 0) {
//!         println!("{}", text);
//!     }
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod frontend;
pub mod plot;
pub mod types;

// Re-export commonly used types
pub use config::{PlotConfiguration, ResolvedConfiguration};
pub use error::{PlotError, Result, ResultExt};
pub use plot::{ChartModel, SimulationPlot};
pub use types::{DataType, EventType, FlightDataBranch, SimulationData, Unit, UnitGroup};
