use std::collections::BTreeMap;

use super::error::ViewError;
use super::model::{Categorized, PathRecord};

// ---------------------------------------------------------------------------
// Category counts
// ---------------------------------------------------------------------------

/// Number of records per distinct value of `field`. Counts sum to the input length.
pub fn count_by_category<'a, R, I>(records: I, field: R::CategoryField) -> BTreeMap<String, usize>
where
    R: Categorized + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut counts = BTreeMap::new();
    for r in records {
        *counts.entry(r.category(field).to_string()).or_insert(0) += 1;
    }
    counts
}

/// `counts` ordered by descending count, ties broken by label.
pub fn ranked(counts: &BTreeMap<String, usize>) -> Vec<(&str, usize)> {
    let mut entries: Vec<(&str, usize)> = counts.iter().map(|(k, &v)| (k.as_str(), v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
}

/// One category's wedge of a pie, as an angle range in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice<'a> {
    pub label: &'a str,
    pub count: usize,
    /// Fraction of the total, in `(0, 1]`.
    pub share: f64,
    pub start: f64,
    pub end: f64,
}

/// Wedges over the full circle in [`ranked`] order, each sized by its count.
///
/// Zero counts get no wedge. The last wedge ends exactly at `2π`.
pub fn pie_slices(counts: &BTreeMap<String, usize>) -> Vec<PieSlice<'_>> {
    let total: usize = counts.values().sum();
    if total == 0 {
        return Vec::new();
    }
    let full = std::f64::consts::TAU;
    let mut seen = 0usize;
    ranked(counts)
        .into_iter()
        .filter(|&(_, count)| count > 0)
        .map(|(label, count)| {
            let start = full * seen as f64 / total as f64;
            seen += count;
            PieSlice {
                label,
                count,
                share: count as f64 / total as f64,
                start,
                end: full * seen as f64 / total as f64,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// One equal-width histogram bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBucket {
    pub low: f64,
    pub high: f64,
    pub count: usize,
    /// Bounds formatted to two decimals, e.g. `9.80-11.42`.
    pub label: String,
}

impl HistogramBucket {
    fn new(low: f64, high: f64, count: usize) -> Self {
        Self {
            low,
            high,
            count,
            label: format!("{low:.2}-{high:.2}"),
        }
    }

    pub fn midpoint(&self) -> f64 {
        self.low / 2.0 + self.high / 2.0
    }
}

/// Partition `[min, max]` of `values` into `bucket_count` equal-width buckets.
///
/// Buckets are half-open except the last, which also holds the maximum.
/// When every value is equal there is no width to divide, so the result is a
/// single bucket at that point. Widths are taken from `max / n - min / n` so a
/// range wider than `f64::MAX` still splits into finite buckets.
pub fn histogram(values: &[f64], bucket_count: usize) -> Result<Vec<HistogramBucket>, ViewError> {
    if bucket_count == 0 {
        return Err(ViewError::ZeroBuckets);
    }
    if values.is_empty() {
        return Err(ViewError::EmptyInput { what: "value" });
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let n = bucket_count as f64;
    let width = max / n - min / n;
    if !(max > min && width.is_finite() && width > 0.0) {
        return Ok(vec![HistogramBucket::new(min, max, values.len())]);
    }

    let offset = min / width;
    let mut counts = vec![0usize; bucket_count];
    for &v in values {
        let idx = ((v / width - offset) as usize).min(bucket_count - 1);
        counts[idx] += 1;
    }

    let edge = |i: usize| match i {
        0 => min,
        i if i == bucket_count => max,
        i => min / n * (bucket_count - i) as f64 + max / n * i as f64,
    };
    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBucket::new(edge(i), edge(i + 1), count))
        .collect())
}

// ---------------------------------------------------------------------------
// Knowledge paths
// ---------------------------------------------------------------------------

/// The path at 0-based `index`.
pub fn select_path(paths: &[PathRecord], index: usize) -> Result<&PathRecord, ViewError> {
    paths.get(index).ok_or(ViewError::IndexOutOfRange {
        index,
        len: paths.len(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStatistics {
    pub average_confidence: f64,
    pub average_path_length: f64,
    pub count: usize,
}

/// Mean confidence and mean length over `paths`. An empty input has no mean and is an error.
pub fn path_statistics(paths: &[PathRecord]) -> Result<PathStatistics, ViewError> {
    if paths.is_empty() {
        return Err(ViewError::EmptyInput { what: "path" });
    }
    let n = paths.len() as f64;
    let confidence: f64 = paths.iter().map(|p| p.confidence).sum();
    let length: usize = paths.iter().map(|p| p.path_length).sum();
    Ok(PathStatistics {
        average_confidence: confidence / n,
        average_path_length: length as f64 / n,
        count: paths.len(),
    })
}
