//! Frontend module for egui UI
//!
//! Renders simulation plots with egui_plot. The plot model is built by
//! [`crate::plot`]; this module only converts it into plot items.
//!
//! # Main Types
//!
//! - [`SecondaryAxisScale`] - Right-axis value mapping
//!
//! # Submodules
//!
//! - `plot` - Plot rendering with egui_plot

pub mod plot;

pub use plot::{render_chart, show_chart, SecondaryAxisScale};
