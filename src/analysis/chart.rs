use super::NumericalSummary;
use crate::error::PlotError;
use crate::math::sorted_finite;

/// One bar of a histogram, covering `[start, end)` (the last bar also includes `end`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Buckets values into `n_bins` equal-width bins spanning their range.
///
/// When every value is identical the range is widened to `value ± 0.5`.
///
/// # Parameters
///
/// - `column` - Name used in error messages
/// - `values` - Observations; non-finite values are ignored
/// - `n_bins` - Number of bins, at least 1
///
/// # Returns
///
/// - `Ok(Vec<HistogramBin>)` - `n_bins` contiguous bins whose counts sum to the number of finite values
/// - `Err(PlotError::InvalidData)` - If there is no finite value or `n_bins` is 0
///
/// # Examples
/// ```rust
/// use diabetes_insight::analysis::histogram_bins;
///
/// let bins = histogram_bins("age", &[0.0, 1.0, 2.0, 10.0], 2).unwrap();
/// assert_eq!(bins.len(), 2);
/// assert_eq!(bins[0].count, 3);
/// assert_eq!(bins[1].count, 1);
/// ```
pub fn histogram_bins(
    column: &str,
    values: &[f64],
    n_bins: usize,
) -> Result<Vec<HistogramBin>, PlotError> {
    if n_bins == 0 {
        return Err(PlotError::InvalidData {
            column: column.to_string(),
            reason: "a histogram needs at least one bin".to_string(),
        });
    }
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return Err(PlotError::InvalidData {
            column: column.to_string(),
            reason: "no finite values".to_string(),
        });
    }

    let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / n_bins as f64;

    let mut counts = vec![0usize; n_bins];
    for v in finite {
        let idx = (((v - lo) / width).floor() as usize).min(n_bins - 1);
        counts[idx] += 1;
    }

    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: lo + width * i as f64,
            end: if i + 1 == n_bins {
                hi
            } else {
                lo + width * (i + 1) as f64
            },
            count,
        })
        .collect())
}

/// Geometry of a Tukey box plot
///
/// # Fields
///
/// - `q1` / `median` / `q3` - Box edges and centre line
/// - `lower_whisker` - Smallest value not below `q1 - 1.5 * iqr`
/// - `upper_whisker` - Largest value not above `q3 + 1.5 * iqr`
/// - `fliers` - Distinct values beyond the whiskers, ascending
#[derive(Debug, Clone, PartialEq)]
pub struct BoxPlotStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub fliers: Vec<f64>,
}

/// Whisker reach as a multiple of the interquartile range
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

impl BoxPlotStats {
    /// Derives the box plot from a column summary and the raw observations
    ///
    /// # Parameters
    ///
    /// - `summary` - Quartiles of the column
    /// - `values` - The observations the summary was computed from
    pub fn new(summary: &NumericalSummary, values: &[f64]) -> Self {
        let sorted = sorted_finite(values);
        let low_fence = summary.q1 - WHISKER_IQR_FACTOR * summary.iqr;
        let high_fence = summary.q3 + WHISKER_IQR_FACTOR * summary.iqr;

        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .unwrap_or(summary.q1);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .unwrap_or(summary.q3);

        let mut fliers: Vec<f64> = sorted
            .into_iter()
            .filter(|&v| v < lower_whisker || v > upper_whisker)
            .collect();
        fliers.dedup();

        BoxPlotStats {
            q1: summary.q1,
            median: summary.median,
            q3: summary.q3,
            lower_whisker,
            upper_whisker,
            fliers,
        }
    }

    /// Smallest and largest value drawn, fliers included
    pub fn extent(&self) -> (f64, f64) {
        let lo = self
            .fliers
            .first()
            .copied()
            .map_or(self.lower_whisker, |f| f.min(self.lower_whisker));
        let hi = self
            .fliers
            .last()
            .copied()
            .map_or(self.upper_whisker, |f| f.max(self.upper_whisker));
        (lo, hi)
    }
}

/// Maps `t` in \[0, 1\] onto a yellow-green-blue sequential palette.
///
/// # Returns
///
/// - `(u8, u8, u8)` - RGB triple, pale yellow at 0 and dark blue at 1
pub fn ylgnbu(t: f64) -> (u8, u8, u8) {
    const STOPS: [(f64, [f64; 3]); 3] = [
        (0.0, [255.0, 255.0, 217.0]),
        (0.5, [65.0, 182.0, 196.0]),
        (1.0, [8.0, 29.0, 88.0]),
    ];
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let (lo, hi) = if t <= STOPS[1].0 {
        (STOPS[0], STOPS[1])
    } else {
        (STOPS[1], STOPS[2])
    };
    let local = (t - lo.0) / (hi.0 - lo.0);
    let channel = |i: usize| (lo.1[i] + (hi.1[i] - lo.1[i]) * local).round() as u8;
    (channel(0), channel(1), channel(2))
}

/// One square of the confusion matrix heat map, in plot units
///
/// The grid spans `[0, 2] x [0, 2]`. Predicted classes run left to right and actual
/// classes top to bottom, so actual negative fills the upper row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapCell {
    pub actual: usize,
    pub predicted: usize,
    pub count: usize,
    /// Lower-left corner; the cell covers `[x, x + 1] x [y, y + 1]`
    pub x: f64,
    pub y: f64,
}

impl HeatmapCell {
    /// Centre of the cell, where its count is written
    pub fn center(&self) -> (f64, f64) {
        (self.x + 0.5, self.y + 0.5)
    }
}

/// Lays the four counts of `grid` (`[[tn, fp], [fn, tp]]`) out as heat map cells
pub fn confusion_heatmap_cells(grid: [[usize; 2]; 2]) -> [HeatmapCell; 4] {
    let cell = |actual: usize, predicted: usize| HeatmapCell {
        actual,
        predicted,
        count: grid[actual][predicted],
        x: predicted as f64,
        y: (1 - actual) as f64,
    };
    [cell(0, 0), cell(0, 1), cell(1, 0), cell(1, 1)]
}
