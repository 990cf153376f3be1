//! Series building
//!
//! Turns one (data type, branch) pair into an ordered, unit-converted point
//! sequence. The primary branch is copied verbatim. A secondary branch is
//! prefixed with the primary branch's samples recorded strictly before the
//! secondary branch's first time sample, so every stage's trace visually
//! splits off from the primary trace at its separation time.
//!
//! No interpolation happens here: when a stage starts between two primary
//! samples the trace shows a small jump at the stitch point.

use crate::config::ResolvedConfiguration;
use crate::types::{DataType, FlightDataBranch, SimulationData, UnitConverter};

/// Composite key identifying a rendered series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesKey {
    /// Index of the data type in the configuration's selection order
    pub type_index: usize,
    /// Branch (stage) index
    pub branch: usize,
}

impl SeriesKey {
    pub fn new(type_index: usize, branch: usize) -> Self {
        Self { type_index, branch }
    }

    /// Returns true for the series of the primary branch
    pub fn is_primary(&self) -> bool {
        self.branch == 0
    }
}

/// A unit-converted point sequence ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSeries {
    pub key: SeriesKey,
    /// Plotted data type
    pub data_type: DataType,
    /// Value axis (0 = left, 1 = right)
    pub axis: u8,
    /// Display label (`"<branch>: <type> (<unit>)"` for secondary branches)
    pub label: String,
    /// Points as `[domain, value]` in display units
    pub points: Vec<[f64; 2]>,
}

impl RenderedSeries {
    /// Check if the series has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// Build every series of a plot, ordered by data type then branch
///
/// The result always holds `type_count * branch_count` series.
pub fn build_series(
    simulation: &SimulationData,
    config: &ResolvedConfiguration,
) -> Vec<RenderedSeries> {
    let branch_count = simulation.branch_count();
    let mut series = Vec::with_capacity(config.type_count() * branch_count);

    for (type_index, selection) in config.types.iter().enumerate() {
        let type_label = selection.data_type.label(&selection.unit);

        for branch in 0..branch_count {
            let points = build_branch_points(
                simulation,
                branch,
                &config.domain_type,
                &config.domain_unit,
                &selection.data_type,
                &selection.unit,
            );

            let label = if branch == 0 {
                type_label.clone()
            } else {
                format!("{}: {}", simulation.branches()[branch].name(), type_label)
            };

            tracing::trace!("Built series '{}' with {} points", label, points.len());

            series.push(RenderedSeries {
                key: SeriesKey::new(type_index, branch),
                data_type: selection.data_type.clone(),
                axis: selection.axis,
                label,
                points,
            });
        }
    }

    series
}

/// Build the point sequence of one data type in one branch
///
/// Returns an empty sequence for an unknown branch index or when the branch
/// does not record the domain or value type.
pub fn build_branch_points(
    simulation: &SimulationData,
    branch_index: usize,
    domain_type: &DataType,
    domain_unit: &dyn UnitConverter,
    value_type: &DataType,
    value_unit: &dyn UnitConverter,
) -> Vec<[f64; 2]> {
    let Some(branch) = simulation.branch(branch_index) else {
        return Vec::new();
    };
    let (Some(domain), Some(values)) = (branch.get(domain_type), branch.get(value_type)) else {
        return Vec::new();
    };

    let mut points = Vec::with_capacity(values.len());

    if branch_index > 0 {
        if let Some(first_time) = branch.first_time() {
            stitch_primary(
                simulation.primary(),
                first_time,
                domain_type,
                domain_unit,
                value_type,
                value_unit,
                &mut points,
            );
        }
    }

    if domain.len() != values.len() {
        tracing::warn!(
            "Branch '{}' has {} '{}' samples but {} '{}' samples, truncating",
            branch.name(),
            domain.len(),
            domain_type.key,
            values.len(),
            value_type.key
        );
    }

    points.extend(convert_pairs(domain, values, domain_unit, value_unit));
    points
}

/// Append the primary branch's samples recorded before `first_time`
fn stitch_primary(
    primary: &FlightDataBranch,
    first_time: f64,
    domain_type: &DataType,
    domain_unit: &dyn UnitConverter,
    value_type: &DataType,
    value_unit: &dyn UnitConverter,
    points: &mut Vec<[f64; 2]>,
) {
    let (Some(time), Some(domain), Some(values)) = (
        primary.time(),
        primary.get(domain_type),
        primary.get(value_type),
    ) else {
        return;
    };

    let stitched = time.iter().take_while(|&&t| t < first_time).count();
    let stitched = stitched.min(domain.len()).min(values.len());

    points.extend(convert_pairs(
        &domain[..stitched],
        &values[..stitched],
        domain_unit,
        value_unit,
    ));
}

fn convert_pairs<'a>(
    domain: &'a [f64],
    values: &'a [f64],
    domain_unit: &'a dyn UnitConverter,
    value_unit: &'a dyn UnitConverter,
) -> impl Iterator<Item = [f64; 2]> + 'a {
    domain
        .iter()
        .zip(values)
        .map(move |(&x, &y)| [domain_unit.to_unit(x), value_unit.to_unit(y)])
}
