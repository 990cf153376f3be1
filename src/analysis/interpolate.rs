//! Linear interpolation over sampled data
//!
//! [`LinearInterpolator`] is built once per (branch, data type) pair and
//! evaluated at arbitrary query points. Queries outside the sampled range
//! return `None`; there is no clamping or extrapolation, so callers decide
//! how to treat missing values.

/// Immutable piecewise-linear interpolator
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolator {
    /// Sample points sorted by x, unique x values
    points: Vec<(f64, f64)>,
}

impl LinearInterpolator {
    /// Build an interpolator from paired x/y samples
    ///
    /// Pairs containing NaN are dropped. When several samples share an x
    /// value, the last one wins. Extra samples of the longer slice are
    /// ignored.
    pub fn new(x: &[f64], y: &[f64]) -> Self {
        let mut points: Vec<(f64, f64)> = x
            .iter()
            .zip(y)
            .filter(|(x, y)| !x.is_nan() && !y.is_nan())
            .map(|(&x, &y)| (x, y))
            .collect();

        // Stable sort keeps recording order among equal x values
        points.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut deduped: Vec<(f64, f64)> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.0 == point.0 => *last = point,
                _ => deduped.push(point),
            }
        }

        Self { points: deduped }
    }

    /// Number of distinct sample points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the interpolator has no samples
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The sampled x range, if any
    pub fn range(&self) -> Option<(f64, f64)> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => Some((first.0, last.0)),
            _ => None,
        }
    }

    /// Evaluate at `x`; `None` outside the sampled range
    pub fn evaluate(&self, x: f64) -> Option<f64> {
        let (min, max) = self.range()?;
        if x.is_nan() || x < min || x > max {
            return None;
        }

        // First sample with x >= query
        let upper = self.points.partition_point(|p| p.0 < x);
        let (x1, y1) = self.points[upper];
        if x1 == x || upper == 0 {
            return Some(y1);
        }

        let (x0, y0) = self.points[upper - 1];
        let fraction = (x - x0) / (x1 - x0);
        Some(y0 + (y1 - y0) * fraction)
    }
}
