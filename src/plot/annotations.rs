//! Event annotation placement
//!
//! On time-domain plots every display group becomes a vertical marker at
//! its time. On any other domain the event time has no direct X position,
//! so the primary branch's domain and value samples are interpolated
//! against time to find an (x, y) point on each left-axis trace, where an
//! icon annotation is placed.
//!
//! Right-axis traces never receive icon annotations. Events outside the
//! primary branch's sampled time range are skipped.

use crate::analysis::LinearInterpolator;
use crate::config::{ResolvedConfiguration, LEFT_AXIS};
use crate::plot::events::DisplayEventGroup;
use crate::types::{SimulationData, UnitConverter};

/// Opacity of vertical event markers
pub const MARKER_ALPHA: f32 = 0.7;

/// Vertical line on the domain axis (time-domain plots)
#[derive(Debug, Clone, PartialEq)]
pub struct DomainMarker {
    /// Position on the domain axis in display units
    pub value: f64,
    pub label: String,
    /// Line and label color (RGBA)
    pub color: [u8; 4],
    pub alpha: f32,
    /// Branch of the originating group
    pub stage: usize,
}

/// Icon placed on a trace (non-time-domain plots)
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAnnotation {
    /// Domain coordinate in display units
    pub x: f64,
    /// Value coordinate in display units
    pub y: f64,
    /// Icon identifier
    pub icon: &'static str,
    /// Event label shown on hover
    pub tooltip: String,
    /// Index of the annotated data type
    pub type_index: usize,
    /// Branch of the originating group
    pub stage: usize,
}

/// Event annotations for one plot
#[derive(Debug, Clone, PartialEq)]
pub enum EventAnnotations {
    /// Vertical markers, used when the domain is time
    Markers(Vec<DomainMarker>),
    /// Icons on the left-axis traces, used for any other domain
    Images(Vec<ImageAnnotation>),
}

impl EventAnnotations {
    /// Number of annotations
    pub fn len(&self) -> usize {
        match self {
            EventAnnotations::Markers(markers) => markers.len(),
            EventAnnotations::Images(images) => images.len(),
        }
    }

    /// Check if there are no annotations
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Vertical markers, if this is a time-domain plot
    pub fn markers(&self) -> &[DomainMarker] {
        match self {
            EventAnnotations::Markers(markers) => markers,
            EventAnnotations::Images(_) => &[],
        }
    }

    /// Image annotations, if this is not a time-domain plot
    pub fn images(&self) -> &[ImageAnnotation] {
        match self {
            EventAnnotations::Markers(_) => &[],
            EventAnnotations::Images(images) => images,
        }
    }
}

/// Turn display groups into markers or image annotations
pub fn place_annotations(
    groups: &[DisplayEventGroup],
    simulation: &SimulationData,
    config: &ResolvedConfiguration,
) -> EventAnnotations {
    if config.is_time_domain() {
        EventAnnotations::Markers(place_markers(groups, config))
    } else {
        EventAnnotations::Images(place_images(groups, simulation, config))
    }
}

fn place_markers(groups: &[DisplayEventGroup], config: &ResolvedConfiguration) -> Vec<DomainMarker> {
    groups
        .iter()
        .map(|group| DomainMarker {
            value: config.domain_unit.to_unit(group.time),
            label: group.label.clone(),
            color: group.color(),
            alpha: MARKER_ALPHA,
            stage: group.stage,
        })
        .collect()
}

fn place_images(
    groups: &[DisplayEventGroup],
    simulation: &SimulationData,
    config: &ResolvedConfiguration,
) -> Vec<ImageAnnotation> {
    let primary = simulation.primary();
    let (Some(time), Some(domain)) = (primary.time(), primary.get(&config.domain_type)) else {
        tracing::debug!("Primary branch lacks time or domain samples, no event annotations");
        return Vec::new();
    };

    let domain_interpolator = LinearInterpolator::new(time, domain);
    let value_interpolators: Vec<(usize, LinearInterpolator)> = config
        .types
        .iter()
        .enumerate()
        .filter(|(_, selection)| selection.axis == LEFT_AXIS)
        .filter_map(|(index, selection)| {
            let values = primary.get(&selection.data_type)?;
            Some((index, LinearInterpolator::new(time, values)))
        })
        .collect();

    let mut images = Vec::new();
    for group in groups {
        let Some(icon) = group.icon() else {
            continue;
        };
        let Some(x) = domain_interpolator.evaluate(group.time) else {
            tracing::trace!("Event '{}' at {} outside sampled range", group.label, group.time);
            continue;
        };
        let x = config.domain_unit.to_unit(x);

        for (type_index, interpolator) in &value_interpolators {
            let Some(y) = interpolator.evaluate(group.time) else {
                continue;
            };
            images.push(ImageAnnotation {
                x,
                y: config.types[*type_index].unit.to_unit(y),
                icon,
                tooltip: group.label.clone(),
                type_index: *type_index,
                stage: group.stage,
            });
        }
    }

    images
}
