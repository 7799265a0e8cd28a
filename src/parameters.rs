use std::ops::RangeInclusive;

use crate::error::SynthError;

pub const SAMPLE_COUNT_RANGE: RangeInclusive<usize> = 1..=500;

pub const DEFAULT_SAMPLE_COUNT: usize = 100;
pub const DEFAULT_NOISE_SCALE: f64 = 0.1;
pub const DEFAULT_THRESHOLD: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    sample_count: usize,
    noise_scale: f64,
    threshold: f64,
}

impl Parameters {
    pub fn new(sample_count: usize, noise_scale: f64, threshold: f64) -> Result<Self, SynthError> {
        Ok(Self {
            sample_count: validate_sample_count(sample_count)?,
            noise_scale: validate_noise_scale(noise_scale)?,
            threshold: validate_threshold(threshold)?,
        })
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn noise_scale(&self) -> f64 {
        self.noise_scale
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn with_sample_count(mut self, sample_count: usize) -> Result<Self, SynthError> {
        self.sample_count = validate_sample_count(sample_count)?;
        Ok(self)
    }

    pub fn with_noise_scale(mut self, noise_scale: f64) -> Result<Self, SynthError> {
        self.noise_scale = validate_noise_scale(noise_scale)?;
        Ok(self)
    }

    pub fn with_threshold(mut self, threshold: f64) -> Result<Self, SynthError> {
        self.threshold = validate_threshold(threshold)?;
        Ok(self)
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            noise_scale: DEFAULT_NOISE_SCALE,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

pub fn validate_sample_count(sample_count: usize) -> Result<usize, SynthError> {
    if !SAMPLE_COUNT_RANGE.contains(&sample_count) {
        return Err(SynthError::invalid(
            "sample_count",
            sample_count,
            "must be within 1..=500",
        ));
    }

    Ok(sample_count)
}

pub fn validate_noise_scale(noise_scale: f64) -> Result<f64, SynthError> {
    if !noise_scale.is_finite() {
        return Err(SynthError::invalid("noise_scale", noise_scale, "must be finite"));
    }
    if noise_scale < 0.0 {
        return Err(SynthError::invalid(
            "noise_scale",
            noise_scale,
            "must not be negative",
        ));
    }

    Ok(noise_scale)
}

pub fn validate_threshold(threshold: f64) -> Result<f64, SynthError> {
    if !threshold.is_finite() {
        return Err(SynthError::invalid("threshold", threshold, "must be finite"));
    }

    Ok(threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_sliders() {
        let parameters = Parameters::default();

        assert_eq!(parameters.sample_count(), 100);
        assert!((parameters.noise_scale() - 0.1).abs() < 1e-12);
        assert!((parameters.threshold() - 25.0).abs() < 1e-12);
    }

    #[test]
    fn sample_count_outside_range_is_rejected() {
        assert!(Parameters::new(0, 0.1, 25.0).is_err());
        assert!(Parameters::new(501, 0.1, 25.0).is_err());
        assert!(Parameters::new(500, 0.1, 25.0).is_ok());
        assert!(Parameters::new(1, 0.1, 25.0).is_ok());
    }

    #[test]
    fn negative_or_non_finite_noise_is_rejected() {
        for noise_scale in [-1.0, -f64::EPSILON, f64::NAN, f64::INFINITY] {
            let error = Parameters::default()
                .with_noise_scale(noise_scale)
                .unwrap_err();
            assert!(error.is_invalid_parameter(), "{noise_scale}");
        }

        assert!(Parameters::default().with_noise_scale(0.0).is_ok());
    }

    #[test]
    fn threshold_must_be_finite() {
        assert!(Parameters::default().with_threshold(f64::NAN).is_err());
        assert!(Parameters::default()
            .with_threshold(f64::NEG_INFINITY)
            .is_err());
        assert!(Parameters::default().with_threshold(-3.5).is_ok());
    }

    #[test]
    fn failed_setter_leaves_original_untouched() {
        let parameters = Parameters::default();
        let _ = parameters.with_sample_count(0);

        assert_eq!(parameters, Parameters::default());
    }
}
