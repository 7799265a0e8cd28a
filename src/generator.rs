use std::ops::RangeInclusive;

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use tracing::{debug, warn};

use crate::error::SynthError;
use crate::parameters::{validate_noise_scale, validate_sample_count, validate_threshold};
use crate::sample_set::{Diagnosis, SampleSet};

pub const HEIGHT_MEAN: f64 = 165.0;
pub const HEIGHT_STD_DEV: f64 = 15.0;
pub const WEIGHT_MEAN: f64 = 62.0;
pub const WEIGHT_STD_DEV: f64 = 10.0;

pub const PLAUSIBLE_HEIGHT: RangeInclusive<f64> = 165.0..=225.0;
pub const PLAUSIBLE_WEIGHT: RangeInclusive<f64> = 65.0..=100.0;
pub const PLAUSIBLE_BMI: RangeInclusive<f64> = 14.0..=60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassificationCounts {
    pub healthy: usize,
    pub diabetic: usize,
}

impl ClassificationCounts {
    pub fn total(&self) -> usize {
        self.healthy + self.diabetic
    }
}

/// Height and weight are sampled independently of each other.
#[derive(Debug, Clone)]
pub struct SampleGenerator<R = StdRng> {
    rng: R,
}

impl SampleGenerator<StdRng> {
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SampleGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn generate(&mut self, sample_count: usize) -> Result<SampleSet, SynthError> {
        let sample_count = validate_sample_count(sample_count)?;

        let height = Normal::new(HEIGHT_MEAN, HEIGHT_STD_DEV)?;
        let weight = Normal::new(WEIGHT_MEAN, WEIGHT_STD_DEV)?;

        let heights: Array1<f64> = (0..sample_count)
            .map(|_| height.sample(&mut self.rng).round_ties_even())
            .collect();
        let weights: Array1<f64> = (0..sample_count)
            .map(|_| weight.sample(&mut self.rng))
            .collect();

        debug!(sample_count, "generated heights and weights");

        Ok(SampleSet::from_columns(heights.view(), weights.view()))
    }

    /// Noise is redrawn on every call. On error the set is left untouched.
    pub fn recompute(
        &mut self,
        set: &mut SampleSet,
        noise_scale: f64,
        threshold: f64,
    ) -> Result<(), SynthError> {
        let noise_scale = validate_noise_scale(noise_scale)?;
        let threshold = validate_threshold(threshold)?;
        let noise = Normal::new(0.0, noise_scale)?;

        let biomarkers = set.bmi().mapv(|bmi| bmi + noise.sample(&mut self.rng));
        set.set_observations(&biomarkers, threshold);

        debug!(
            rows = set.len(),
            noise_scale, threshold, "recomputed biomarker and labels"
        );

        Ok(())
    }
}

pub fn is_plausible(height: f64, weight: f64, bmi: f64) -> bool {
    PLAUSIBLE_HEIGHT.contains(&height)
        && PLAUSIBLE_WEIGHT.contains(&weight)
        && PLAUSIBLE_BMI.contains(&bmi)
}

/// Biomarker and label of the result are stale until the next recompute.
pub fn filter_plausible(set: &SampleSet) -> SampleSet {
    let bmi = set.bmi();
    let kept: Vec<usize> = set
        .heights()
        .iter()
        .zip(set.weights())
        .zip(&bmi)
        .enumerate()
        .filter_map(|(index, ((&height, &weight), &bmi))| {
            is_plausible(height, weight, bmi).then_some(index)
        })
        .collect();

    if kept.is_empty() && !set.is_empty() {
        warn!(rows = set.len(), "no sample passed the plausibility filter");
    }
    debug!(before = set.len(), after = kept.len(), "filtered samples");

    set.select(&kept)
}

pub fn classification_counts(set: &SampleSet) -> ClassificationCounts {
    set.diagnoses()
        .fold(ClassificationCounts::default(), |mut counts, diagnosis| {
            match diagnosis {
                Diagnosis::Healthy => counts.healthy += 1,
                Diagnosis::Diabetic => counts.diabetic += 1,
            }
            counts
        })
}
