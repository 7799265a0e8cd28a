use crate::sample_set::SampleSet;

pub const BMI_BIN_WIDTH: f64 = 2.0;
pub const BIOMARKER_BINS: usize = 15;
pub const MAX_ALIGNED_BINS: usize = 100;

/// Bins are half-open except the last, which also takes its upper edge.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Histogram {
    edges: Vec<f64>,
    counts: Vec<usize>,
}

impl Histogram {
    pub fn from_edges(values: &[f64], edges: Vec<f64>) -> Self {
        if edges.len() < 2 {
            return Self::default();
        }

        let mut counts = vec![0; edges.len() - 1];
        for &value in values.iter().filter(|v| v.is_finite()) {
            if let Some(bin) = bin_index(&edges, value) {
                counts[bin] += 1;
            }
        }

        Self { edges, counts }
    }

    pub fn uniform(values: &[f64], bins: usize) -> Self {
        let Some((min, max)) = finite_bounds(values) else {
            return Self::default();
        };
        if bins == 0 {
            return Self::default();
        }

        let (low, high) = if min < max {
            (min, max)
        } else {
            (min - 0.5, max + 0.5)
        };

        let step = (high - low) / bins as f64;
        let mut edges: Vec<f64> = (0..bins).map(|i| low + step * i as f64).collect();
        edges.push(high);

        Self::from_edges(values, edges)
    }

    /// Bins of `width` starting at `floor(min)` and reaching at least `max`.
    /// The width is widened by a whole multiple when more than
    /// `MAX_ALIGNED_BINS` bins would be needed.
    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    pub fn aligned(values: &[f64], width: f64) -> Self {
        let Some((min, max)) = finite_bounds(values) else {
            return Self::default();
        };
        if !(width.is_finite() && width > 0.0) {
            return Self::default();
        }

        let low = min.floor();
        let span = max - low;
        let mut width = width;
        if span / width > MAX_ALIGNED_BINS as f64 {
            width *= (span / (width * MAX_ALIGNED_BINS as f64)).ceil();
        }
        let bins = ((span / width).ceil() as usize).clamp(1, MAX_ALIGNED_BINS);

        let mut edges: Vec<f64> = (0..=bins).map(|i| low + width * i as f64).collect();
        if let Some(last) = edges.last_mut() {
            *last = last.max(max);
        }

        Self::from_edges(values, edges)
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn range(&self) -> Option<(f64, f64)> {
        Some((*self.edges.first()?, *self.edges.last()?))
    }

    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(edge, &count)| (edge[0], edge[1], count))
    }
}

pub fn bmi_histogram(set: &SampleSet) -> Histogram {
    Histogram::aligned(&set.bmi().to_vec(), BMI_BIN_WIDTH)
}

pub fn biomarker_histogram(set: &SampleSet) -> Histogram {
    Histogram::uniform(&set.biomarkers().to_vec(), BIOMARKER_BINS)
}

fn finite_bounds(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |bounds, v| match bounds {
            None => Some((v, v)),
            Some((min, max)) => Some((f64::min(min, v), f64::max(max, v))),
        })
}

fn bin_index(edges: &[f64], value: f64) -> Option<usize> {
    let last = edges.len() - 1;
    let at_or_below = edges.partition_point(|&edge| edge <= value);

    if at_or_below == 0 {
        None
    } else if at_or_below <= last {
        Some(at_or_below - 1)
    } else if value <= edges[last] {
        Some(last - 1)
    } else {
        None
    }
}
