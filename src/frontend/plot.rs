//! Plot rendering module using egui_plot
//!
//! Draws a built [`ChartModel`] into an egui_plot [`Plot`]. Rendering never
//! touches the model: visibility, point markers and the crosshair come from
//! the [`SimulationPlot`] interactive state.
//!
//! egui_plot has a single value coordinate system, so right-axis series are
//! mapped linearly onto the left axis' range and the right axis' tick labels
//! are mapped back.
//!
//! # Main Types
//!
//! - [`SecondaryAxisScale`] - Mapping between right-axis values and plot space
//! - [`show_chart`] - Full plot widget with axes, legend and crosshair
//! - [`render_chart`] - Plot items only, for use inside an existing plot

use crate::config::{LEFT_AXIS, RIGHT_AXIS};
use crate::plot::{AxisRange, ChartModel, PointShape, SeriesKey, SimulationPlot};
use egui::{Color32, Id, Ui};
use egui_plot::{
    AxisHints, HLine, Legend, Line, MarkerShape, Plot, PlotBounds, PlotPoints, PlotUi, Points,
    VLine,
};

/// Radius of sample point markers
pub const POINT_RADIUS: f32 = 2.5;

/// Radius of event annotation markers
pub const ANNOTATION_RADIUS: f32 = 6.0;

const ZERO_LINE_COLOR: Color32 = Color32::from_rgba_premultiplied(96, 96, 96, 128);

/// Convert an RGBA array into an egui color
pub fn to_color32(color: [u8; 4]) -> Color32 {
    Color32::from_rgba_unmultiplied(color[0], color[1], color[2], color[3])
}

/// egui_plot marker for a point shape
pub fn marker_shape(shape: PointShape) -> MarkerShape {
    match shape {
        PointShape::Square => MarkerShape::Square,
        PointShape::Circle => MarkerShape::Circle,
        PointShape::TriangleUp => MarkerShape::Up,
        PointShape::Diamond => MarkerShape::Diamond,
        PointShape::Plus => MarkerShape::Plus,
        PointShape::TriangleDown => MarkerShape::Down,
        PointShape::Cross => MarkerShape::Cross,
        PointShape::TriangleRight => MarkerShape::Right,
        PointShape::Asterisk => MarkerShape::Asterisk,
        PointShape::TriangleLeft => MarkerShape::Left,
    }
}

/// Linear mapping of right-axis values onto the left axis' range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondaryAxisScale {
    scale: f64,
    offset: f64,
}

impl SecondaryAxisScale {
    /// Identity mapping
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset: 0.0,
    };

    /// Map `right` onto `left`, identity if either range is degenerate
    pub fn fit(left: AxisRange, right: AxisRange) -> Self {
        if left.span() <= 0.0 || right.span() <= 0.0 {
            return Self {
                scale: 1.0,
                offset: left.min - right.min,
            };
        }
        let scale = left.span() / right.span();
        Self {
            scale,
            offset: left.min - right.min * scale,
        }
    }

    /// Scale for the axes of a model
    pub fn for_model(model: &ChartModel) -> Self {
        match (model.axis(LEFT_AXIS), model.axis(RIGHT_AXIS)) {
            (Some(left), Some(right)) => Self::fit(left.value_range, right.value_range),
            _ => Self::IDENTITY,
        }
    }

    /// Right-axis value to plot coordinate
    pub fn apply(&self, value: f64) -> f64 {
        value * self.scale + self.offset
    }

    /// Plot coordinate to right-axis value
    pub fn invert(&self, value: f64) -> f64 {
        (value - self.offset) / self.scale
    }
}

/// Draw every visible series, event marker and annotation of a plot
pub fn render_chart(plot_ui: &mut PlotUi<'_>, plot: &SimulationPlot) {
    let model = plot.model();
    let visibility = plot.visibility();
    let secondary = SecondaryAxisScale::for_model(&model);

    if model.shows_value_zero(LEFT_AXIS) {
        plot_ui.hline(HLine::new("", 0.0).color(ZERO_LINE_COLOR).width(1.0));
    }
    if model.shows_value_zero(RIGHT_AXIS) {
        let zero = secondary.apply(0.0);
        plot_ui.hline(HLine::new("", zero).color(ZERO_LINE_COLOR).width(1.0));
    }
    if model.shows_domain_zero() {
        plot_ui.vline(VLine::new("", 0.0).color(ZERO_LINE_COLOR).width(1.0));
    }

    for (index, (series, &visible)) in model.series.iter().zip(&visibility).enumerate() {
        let Some(style) = model
            .series_style(index)
            .filter(|_| visible && !series.is_empty())
        else {
            continue;
        };

        let points: Vec<[f64; 2]> = if series.axis == RIGHT_AXIS {
            series
                .points
                .iter()
                .map(|p| [p[0], secondary.apply(p[1])])
                .collect()
        } else {
            series.points.clone()
        };

        // All branches of a data type share the primary series' legend entry
        let name = model
            .find_series(SeriesKey::new(series.key.type_index, 0))
            .map_or(series.label.as_str(), |primary| primary.label.as_str());
        let color = to_color32(style.color);

        if plot.show_points() {
            let markers = Points::new(name, PlotPoints::from(points.clone()))
                .color(color)
                .radius(POINT_RADIUS)
                .shape(marker_shape(style.shape));
            plot_ui.points(markers);
        }

        let line = Line::new(name, PlotPoints::from(points))
            .color(color)
            .width(style.stroke_width);
        plot_ui.line(line);
    }

    let events = plot.visible_events();
    for marker in events.annotations.markers() {
        let color = to_color32(marker.color).gamma_multiply(marker.alpha);
        let vline = VLine::new(&marker.label, marker.value)
            .color(color)
            .width(1.5)
            .style(egui_plot::LineStyle::dashed_loose());
        plot_ui.vline(vline);
    }

    for image in events.annotations.images() {
        let style = crate::plot::legend::series_style(SeriesKey::new(image.type_index, 0));
        let annotation = Points::new(&image.tooltip, PlotPoints::from(vec![[image.x, image.y]]))
            .color(to_color32(style.color))
            .radius(ANNOTATION_RADIUS)
            .shape(MarkerShape::Diamond)
            .filled(true);
        plot_ui.points(annotation);
    }
}

/// Show a plot with its axes and legend
///
/// Panning or zooming past the domain and left-axis bounds is rejected.
/// Returns the crosshair text under the pointer, for the left-axis series or
/// the right-axis ones when the left axis is empty.
pub fn show_chart(ui: &mut Ui, plot: &SimulationPlot) -> Option<String> {
    let model = plot.model();
    let secondary = SecondaryAxisScale::for_model(&model);

    let left_label = model
        .axis(LEFT_AXIS)
        .map(|a| a.label.clone())
        .unwrap_or_default();
    let mut y_axes = vec![AxisHints::new_y()
        .label(left_label)
        .placement(egui_plot::HPlacement::Left)];
    if let Some(right) = model.axis(RIGHT_AXIS) {
        y_axes.push(
            AxisHints::new_y()
                .label(right.label.clone())
                .placement(egui_plot::HPlacement::Right)
                .formatter(move |mark, _| format!("{:.1}", secondary.invert(mark.value))),
        );
    }

    let preset = preset_bounds(&model, secondary);
    let bounds_id = Id::new(("simulation_plot_bounds", &model.title, &model.subtitle));
    let previous: Option<[AxisRange; 2]> = ui.data_mut(|data| data.get_temp(bounds_id));

    let response = Plot::new(("simulation_plot", &model.title, &model.subtitle))
        .legend(Legend::default())
        .x_axis_label(model.domain_label.clone())
        .custom_y_axes(y_axes)
        .show(ui, |plot_ui| {
            if let Some(preset) = preset {
                let bounds = plot_ui.plot_bounds();
                let requested = [
                    AxisRange::new(bounds.min()[0], bounds.max()[0]),
                    AxisRange::new(bounds.min()[1], bounds.max()[1]),
                ];
                let current = previous.unwrap_or(preset);
                let x = preset[0].clamp_request(current[0], requested[0]);
                let y = preset[1].clamp_request(current[1], requested[1]);
                if [x, y] != requested {
                    plot_ui.set_plot_bounds(PlotBounds::from_min_max([x.min, y.min], [x.max, y.max]));
                }
            }

            render_chart(plot_ui, plot);
            plot_ui.pointer_coordinate().map(|pointer| pointer.x)
        });

    let bounds = response.transform.bounds();
    let shown = [
        AxisRange::new(bounds.min()[0], bounds.max()[0]),
        AxisRange::new(bounds.min()[1], bounds.max()[1]),
    ];
    ui.data_mut(|data| data.insert_temp(bounds_id, shown));

    let axis = model.crosshair_axis()?;
    response
        .inner
        .and_then(|domain_value| plot.crosshair_text(domain_value, axis))
}

/// Outer bounds of the plot area: domain range and left (or mapped right) value range
fn preset_bounds(model: &ChartModel, secondary: SecondaryAxisScale) -> Option<[AxisRange; 2]> {
    let domain = model.domain_range()?;
    let value = match (model.axis(LEFT_AXIS), model.axis(RIGHT_AXIS)) {
        (Some(left), _) => left.value_range,
        (None, Some(right)) => AxisRange::new(
            secondary.apply(right.value_range.min),
            secondary.apply(right.value_range.max),
        ),
        (None, None) => return None,
    };
    Some([domain, value])
}
