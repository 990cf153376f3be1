//! Chart model assembly for simulation plots.
//!
//! A plot is built from one [`SimulationData`] and one [`PlotConfiguration`]
//! into an immutable [`ChartModel`]; the rendering backend only ever reads
//! the model. Interactive state (selected stage, point markers) lives next to
//! the model in [`SimulationPlot`] and never mutates it.
//!
//! # Architecture
//!
//! ```text
//! branches ──► series ──► axis      (bounds, labels)
//!                    └──► legend    (one entry per data type)
//! events ────► events ──► annotations (markers or icons)
//! ```
//!
//! # Design
//!
//! - **Explicit series keys**: every series carries its `(type, branch)` key,
//!   the type-major order of the series list is kept for consumers that index.
//! - **Atomic rebuilds**: a rebuild swaps the model's `Arc` as a whole.
//! - **Per-stage event views**: events are collapsed once for every stage at
//!   build time, stage selection only picks a view.

pub mod annotations;
pub mod axis;
pub mod crosshair;
pub mod events;
pub mod legend;
pub mod series;
pub mod visibility;

pub use annotations::{DomainMarker, EventAnnotations, ImageAnnotation, MARKER_ALPHA};
pub use axis::{AxisRange, ValueAxis};
pub use events::{CollapseAnchor, DisplayEventGroup, EventDisplayInfo, EVENT_COLLAPSE_TOLERANCE};
pub use legend::{LegendEntry, PointShape, VisualStyle, PLOT_STROKE_WIDTH};
pub use series::{RenderedSeries, SeriesKey};

use crate::config::{PlotConfiguration, ResolvedConfiguration};
use crate::error::{Result, ResultExt};
use crate::types::SimulationData;
use std::sync::Arc;

/// Label of the stage selector entry showing every branch
pub const ALL_STAGES_LABEL: &str = "All";

/// Event groups and their annotations for one stage selection
#[derive(Debug, Clone, PartialEq)]
pub struct EventView {
    pub groups: Vec<DisplayEventGroup>,
    pub annotations: EventAnnotations,
}

/// Everything the rendering backend needs to draw a plot
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    /// Plot title (simulation name)
    pub title: String,
    /// Plot subtitle (configuration name)
    pub subtitle: String,
    /// Domain axis label
    pub domain_label: String,
    /// Number of branches in the simulation
    pub branch_count: usize,
    /// Series in type-major, branch-minor order
    pub series: Vec<RenderedSeries>,
    /// Non-empty value axes, left axis first
    pub axes: Vec<ValueAxis>,
    pub legend: Vec<LegendEntry>,
    /// Active events of all branches, sorted by time
    pub events: Vec<EventDisplayInfo>,
    /// Events of every stage
    all_events: EventView,
    /// Events of each single stage, by branch index
    stage_events: Vec<EventView>,
}

impl ChartModel {
    /// Build the model of a resolved configuration
    pub fn build(simulation: &SimulationData, config: &ResolvedConfiguration) -> Self {
        let series = series::build_series(simulation, config);
        let axes = axis::assign_axes(&series, config);
        let legend = legend::build_legend(&series);
        let events = events::collect_events(simulation, |t| config.is_event_active(t));

        let event_view = |stage: Option<usize>| {
            let groups = events::aggregate_events(
                &events,
                stage,
                config.events.tolerance,
                config.events.anchor,
            );
            let annotations = annotations::place_annotations(&groups, simulation, config);
            EventView {
                groups,
                annotations,
            }
        };
        let all_events = event_view(None);
        let stage_events = (0..simulation.branch_count())
            .map(|stage| event_view(Some(stage)))
            .collect();

        let model = Self {
            title: simulation.name.clone(),
            subtitle: config.name.clone(),
            domain_label: config.domain_label(),
            branch_count: simulation.branch_count(),
            series,
            axes,
            legend,
            events,
            all_events,
            stage_events,
        };

        tracing::debug!(
            "Built plot '{}': {} series, {} axes, {} events in {} groups",
            model.subtitle,
            model.series.len(),
            model.axes.len(),
            model.events.len(),
            model.event_view(None).groups.len()
        );

        model
    }

    /// Event groups and annotations of a stage selection
    ///
    /// A stage past the last branch falls back to every stage.
    pub fn event_view(&self, stage: Option<usize>) -> &EventView {
        stage
            .and_then(|stage| self.stage_events.get(stage))
            .unwrap_or(&self.all_events)
    }

    /// Visual style of the series at `index`
    pub fn series_style(&self, index: usize) -> Option<VisualStyle> {
        self.series.get(index).map(|s| legend::series_style(s.key))
    }

    /// Find the series of a data type (by selection index) in a branch
    pub fn find_series(&self, key: SeriesKey) -> Option<&RenderedSeries> {
        self.series.iter().find(|s| s.key == key)
    }

    /// Value axis by index, if it holds any data
    pub fn axis(&self, index: u8) -> Option<&ValueAxis> {
        self.axes.iter().find(|a| a.index == index)
    }

    /// Bounds of the domain coordinates over every axis
    pub fn domain_range(&self) -> Option<AxisRange> {
        AxisRange::from_values(
            self.axes
                .iter()
                .flat_map(|a| [a.domain_range.min, a.domain_range.max]),
        )
    }

    /// Returns true if a zero line falls within the bounds of value axis `index`
    pub fn shows_value_zero(&self, index: u8) -> bool {
        self.axis(index)
            .is_some_and(|a| a.value_range.min <= 0.0 && a.value_range.max >= 0.0)
    }

    /// Value axis whose series the crosshair reports: the first non-empty axis
    pub fn crosshair_axis(&self) -> Option<u8> {
        self.axes.first().map(|a| a.index)
    }

    /// Returns true if a zero line falls within the domain bounds
    pub fn shows_domain_zero(&self) -> bool {
        self.axes
            .iter()
            .any(|a| a.domain_range.min <= 0.0 && a.domain_range.max >= 0.0)
    }
}

/// A simulation plot with its interactive state
pub struct SimulationPlot {
    simulation: Arc<SimulationData>,
    config: PlotConfiguration,
    model: Arc<ChartModel>,
    stage: Option<usize>,
    show_points: bool,
}

impl SimulationPlot {
    /// Build a plot, failing on an invalid configuration
    pub fn new(simulation: Arc<SimulationData>, config: PlotConfiguration) -> Result<Self> {
        let model = Self::build_model(&simulation, &config)?;
        Ok(Self {
            simulation,
            config,
            model,
            stage: None,
            show_points: false,
        })
    }

    fn build_model(simulation: &SimulationData, config: &PlotConfiguration) -> Result<Arc<ChartModel>> {
        let resolved = config
            .resolve(simulation)
            .with_context(|| format!("Invalid plot configuration '{}'", config.name))?;
        Ok(Arc::new(ChartModel::build(simulation, &resolved)))
    }

    /// Current chart model
    pub fn model(&self) -> Arc<ChartModel> {
        Arc::clone(&self.model)
    }

    pub fn simulation(&self) -> &SimulationData {
        &self.simulation
    }

    pub fn configuration(&self) -> &PlotConfiguration {
        &self.config
    }

    /// Rebuild the model from the current simulation and configuration
    pub fn rebuild(&mut self) -> Result<()> {
        self.model = Self::build_model(&self.simulation, &self.config)?;
        Ok(())
    }

    /// Replace the configuration and rebuild
    ///
    /// On error the previous configuration and model are kept.
    pub fn set_configuration(&mut self, config: PlotConfiguration) -> Result<()> {
        self.model = Self::build_model(&self.simulation, &config)?;
        self.config = config;
        Ok(())
    }

    /// Select the stage to show (`-1` = all)
    pub fn set_stage(&mut self, stage: i32) {
        let stage = visibility::stage_filter(stage);
        self.stage = match stage {
            Some(index) if index >= self.simulation.branch_count() => {
                tracing::warn!("Stage {} does not exist, showing all stages", index);
                None
            }
            other => other,
        };
    }

    /// Selected stage, `None` when every stage is shown
    pub fn stage(&self) -> Option<usize> {
        self.stage
    }

    pub fn set_show_points(&mut self, show_points: bool) {
        self.show_points = show_points;
    }

    pub fn show_points(&self) -> bool {
        self.show_points
    }

    /// Visibility flag of every series
    pub fn visibility(&self) -> Vec<bool> {
        visibility::series_visibility(&self.model.series, self.stage)
    }

    /// Event groups and annotations of the selected stage
    pub fn visible_events(&self) -> &EventView {
        self.model.event_view(self.stage)
    }

    /// Entries of the stage selector: "All" followed by every branch name
    pub fn stage_labels(&self) -> Vec<String> {
        std::iter::once(ALL_STAGES_LABEL.to_string())
            .chain(self.simulation.branches().iter().map(|b| b.name().to_string()))
            .collect()
    }

    /// Returns true if there is more than one stage to choose from
    pub fn has_stage_selector(&self) -> bool {
        self.simulation.branch_count() > 1
    }

    /// Crosshair summary of the series on `axis` at a domain position
    pub fn crosshair_text(&self, domain_value: f64, axis: u8) -> Option<String> {
        crosshair::crosshair_text(
            domain_value,
            self.model.series.iter().filter(|s| s.axis == axis),
            &self.model.domain_label,
        )
    }
}

// ==================== Tests ====================
