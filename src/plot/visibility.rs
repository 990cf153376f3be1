//! Branch visibility
//!
//! A stage selection shows either every branch or only the series of a
//! single branch. Events follow the same selection, see
//! [`ChartModel::event_view`](crate::plot::ChartModel::event_view).

use crate::plot::series::RenderedSeries;

/// Convert a selector value (`-1` = all) into an optional branch index
pub fn stage_filter(stage: i32) -> Option<usize> {
    usize::try_from(stage).ok()
}

/// Visibility flag of every series for the selected stage
pub fn series_visibility(series: &[RenderedSeries], stage: Option<usize>) -> Vec<bool> {
    series
        .iter()
        .map(|s| stage.map_or(true, |stage| s.key.branch == stage))
        .collect()
}
