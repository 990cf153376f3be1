//! Series styling and legend entries
//!
//! Style resolution is a pure function of a series' key: the color and
//! stroke follow the data type, the point shape follows the branch. All
//! branches of one data type therefore share a color and differ by point
//! shape, and the legend carries a single entry per data type, styled after
//! its primary branch series.

use crate::plot::series::{RenderedSeries, SeriesKey};
use serde::{Deserialize, Serialize};

/// Line width of every series
pub const PLOT_STROKE_WIDTH: f32 = 1.5;

/// Series colors, indexed by data type
pub const SERIES_PALETTE: &[[u8; 4]] = &[
    [255, 85, 85, 255],
    [85, 85, 255, 255],
    [0, 170, 0, 255],
    [210, 160, 0, 255],
    [255, 85, 255, 255],
    [0, 170, 170, 255],
    [255, 150, 150, 255],
    [128, 128, 128, 255],
    [192, 0, 0, 255],
    [0, 0, 192, 255],
    [0, 128, 0, 255],
    [128, 128, 0, 255],
    [192, 0, 192, 255],
    [0, 128, 128, 255],
];

/// Point marker shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointShape {
    Square,
    Circle,
    TriangleUp,
    Diamond,
    Plus,
    TriangleDown,
    Cross,
    TriangleRight,
    Asterisk,
    TriangleLeft,
}

/// Point shapes, indexed by branch
pub const SHAPE_SEQUENCE: &[PointShape] = &[
    PointShape::Square,
    PointShape::Circle,
    PointShape::TriangleUp,
    PointShape::Diamond,
    PointShape::Plus,
    PointShape::TriangleDown,
    PointShape::Cross,
    PointShape::TriangleRight,
    PointShape::Asterisk,
    PointShape::TriangleLeft,
];

/// Visual identity of a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualStyle {
    /// Line color (RGBA)
    pub color: [u8; 4],
    pub stroke_width: f32,
    pub shape: PointShape,
}

/// Resolve the style of a series from its key
pub fn series_style(key: SeriesKey) -> VisualStyle {
    VisualStyle {
        color: SERIES_PALETTE[key.type_index % SERIES_PALETTE.len()],
        stroke_width: PLOT_STROKE_WIDTH,
        shape: SHAPE_SEQUENCE[key.branch % SHAPE_SEQUENCE.len()],
    }
}

/// One legend line
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub style: VisualStyle,
    /// Value axis of the data type
    pub axis: u8,
    /// Index of the data type in selection order
    pub type_index: usize,
}

/// Build one legend entry per data type, left axis first
pub fn build_legend(series: &[RenderedSeries]) -> Vec<LegendEntry> {
    let mut entries: Vec<LegendEntry> = series
        .iter()
        .filter(|s| s.key.is_primary())
        .map(|s| LegendEntry {
            label: s.label.clone(),
            style: series_style(s.key),
            axis: s.axis,
            type_index: s.key.type_index,
        })
        .collect();

    entries.sort_by_key(|e| (e.axis, e.type_index));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, UnitGroup};

    fn series(type_index: usize, branch: usize, axis: u8, label: &str) -> RenderedSeries {
        RenderedSeries {
            key: SeriesKey::new(type_index, branch),
            data_type: DataType::new(label, label, UnitGroup::None),
            axis,
            label: label.to_string(),
            points: vec![],
        }
    }

    #[test]
    fn test_style_shared_per_type() {
        let primary = series_style(SeriesKey::new(1, 0));
        let stage = series_style(SeriesKey::new(1, 2));
        assert_eq!(primary.color, stage.color);
        assert_eq!(primary.stroke_width, PLOT_STROKE_WIDTH);
        assert_ne!(primary.shape, stage.shape);
        assert_eq!(stage.shape, PointShape::TriangleUp);
    }

    #[test]
    fn test_style_wraps_around() {
        let first = series_style(SeriesKey::new(0, 0));
        let wrapped = series_style(SeriesKey::new(SERIES_PALETTE.len(), SHAPE_SEQUENCE.len()));
        assert_eq!(first, wrapped);
    }

    #[test]
    fn test_one_entry_per_type() {
        let list = vec![
            series(0, 0, 1, "Velocity"),
            series(0, 1, 1, "Booster: Velocity"),
            series(0, 2, 1, "Payload: Velocity"),
            series(1, 0, 0, "Altitude"),
            series(1, 1, 0, "Booster: Altitude"),
            series(1, 2, 0, "Payload: Altitude"),
        ];

        let legend = build_legend(&list);
        assert_eq!(legend.len(), 2);
        // Left axis entries come first
        assert_eq!(legend[0].label, "Altitude");
        assert_eq!(legend[0].axis, 0);
        assert_eq!(legend[1].label, "Velocity");
        assert_eq!(legend[1].style, series_style(SeriesKey::new(0, 0)));
    }
}
