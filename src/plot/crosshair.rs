//! Crosshair summary text
//!
//! For a cursor position on the domain axis, every series reports the value
//! of its first sample whose domain coordinate lies strictly past the
//! cursor. Series that end before the cursor are left out of the summary.

use crate::plot::series::RenderedSeries;

/// Separator placed before every series entry
const ENTRY_SEPARATOR: &str = "  ";

/// Index of the first point whose domain coordinate exceeds `query`
pub fn find_sample(points: &[[f64; 2]], query: f64) -> Option<usize> {
    points.iter().position(|p| p[0] > query)
}

/// Compose the crosshair line for `query`
///
/// Returns `None` when no series has a sample past the query or the query
/// is not a finite number.
pub fn crosshair_text<'a>(
    query: f64,
    series: impl IntoIterator<Item = &'a RenderedSeries>,
    domain_label: &str,
) -> Option<String> {
    if !query.is_finite() {
        return None;
    }

    let entries: Vec<String> = series
        .into_iter()
        .filter_map(|s| {
            let index = find_sample(&s.points, query)?;
            Some(format!("{}: {:.1}", s.label, s.points[index][1]))
        })
        .collect();

    if entries.is_empty() {
        return None;
    }

    let mut text = format!("{}: {:.1}", domain_label, query);
    for entry in entries {
        text.push_str(ENTRY_SEPARATOR);
        text.push_str(&entry);
    }
    Some(text)
}
