//! Axis assignment and bounds
//!
//! Series are partitioned into at most two value axes. Each non-empty axis
//! gets the tightest value and domain bounds containing its data; these
//! bounds are fixed for the lifetime of the plot and interactive panning is
//! never allowed past them.

use crate::config::{ResolvedConfiguration, AXIS_COUNT};
use crate::plot::series::RenderedSeries;

/// A closed numeric interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Tightest range containing every finite value, `None` if there are none
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |range: Option<AxisRange>, v| match range {
                Some(r) => Some(AxisRange::new(r.min.min(v), r.max.max(v))),
                None => Some(AxisRange::new(v, v)),
            })
    }

    /// Width of the range
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Returns true if `other` lies entirely within this range
    pub fn contains_range(&self, other: &AxisRange) -> bool {
        other.min >= self.min && other.max <= self.max
    }

    /// Resolve a pan/zoom request against these preset bounds
    ///
    /// A request reaching past either bound is rejected and `current`
    /// is kept.
    pub fn clamp_request(&self, current: AxisRange, requested: AxisRange) -> AxisRange {
        if self.contains_range(&requested) {
            requested
        } else {
            current
        }
    }
}

/// One value axis with its series and preset bounds
#[derive(Debug, Clone, PartialEq)]
pub struct ValueAxis {
    /// Axis index (0 = left, 1 = right)
    pub index: u8,
    /// Data type names joined by "; " in selection order
    pub label: String,
    /// Bounds of the values plotted against this axis
    pub value_range: AxisRange,
    /// Bounds of the domain coordinates of this axis' series
    pub domain_range: AxisRange,
    /// Indices into the plot's series list
    pub series: Vec<usize>,
}

/// Assign series to value axes and compute their bounds
///
/// Axes without any finite data point are omitted.
pub fn assign_axes(series: &[RenderedSeries], config: &ResolvedConfiguration) -> Vec<ValueAxis> {
    (0..AXIS_COUNT as u8)
        .filter_map(|index| build_axis(index, series, config))
        .collect()
}

fn build_axis(
    index: u8,
    series: &[RenderedSeries],
    config: &ResolvedConfiguration,
) -> Option<ValueAxis> {
    let members: Vec<usize> = series
        .iter()
        .enumerate()
        .filter(|(_, s)| s.axis == index)
        .map(|(i, _)| i)
        .collect();

    let value_range = AxisRange::from_values(
        members
            .iter()
            .flat_map(|&i| series[i].points.iter().map(|p| p[1])),
    );
    let domain_range = AxisRange::from_values(
        members
            .iter()
            .flat_map(|&i| series[i].points.iter().map(|p| p[0])),
    );

    let (Some(value_range), Some(domain_range)) = (value_range, domain_range) else {
        if !members.is_empty() {
            tracing::debug!("Axis {} has no data, omitting", index);
        }
        return None;
    };

    let label = config
        .types
        .iter()
        .filter(|t| t.axis == index)
        .map(|t| t.data_type.name.as_str())
        .collect::<Vec<_>>()
        .join("; ");

    Some(ValueAxis {
        index,
        label,
        value_range,
        domain_range,
        series: members,
    })
}
