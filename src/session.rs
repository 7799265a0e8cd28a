use rand::rngs::StdRng;
use rand::Rng;
use tracing::info;

use crate::error::SynthError;
use crate::generator::{
    classification_counts, filter_plausible, ClassificationCounts, SampleGenerator,
};
use crate::parameters::Parameters;
use crate::sample_set::SampleSet;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    /// Stored only; the set keeps its size until the next `Regenerate`.
    SetSampleCount(usize),
    SetNoiseScale(f64),
    SetThreshold(f64),
    Regenerate,
    Filter,
}

#[derive(Debug)]
pub struct Session<R = StdRng> {
    generator: SampleGenerator<R>,
    parameters: Parameters,
    samples: SampleSet,
}

impl Session<StdRng> {
    pub fn new(parameters: Parameters) -> Result<Self, SynthError> {
        Self::with_generator(SampleGenerator::from_entropy(), parameters)
    }

    pub fn seeded(parameters: Parameters, seed: u64) -> Result<Self, SynthError> {
        Self::with_generator(SampleGenerator::seeded(seed), parameters)
    }
}

impl<R: Rng> Session<R> {
    pub fn with_generator(
        mut generator: SampleGenerator<R>,
        parameters: Parameters,
    ) -> Result<Self, SynthError> {
        let mut samples = generator.generate(parameters.sample_count())?;
        generator.recompute(
            &mut samples,
            parameters.noise_scale(),
            parameters.threshold(),
        )?;

        info!(rows = samples.len(), "session started");

        Ok(Self {
            generator,
            parameters,
            samples,
        })
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn samples(&self) -> &SampleSet {
        &self.samples
    }

    pub fn counts(&self) -> ClassificationCounts {
        classification_counts(&self.samples)
    }

    /// A rejected event leaves parameters and samples as they were.
    pub fn apply(&mut self, event: SessionEvent) -> Result<&SampleSet, SynthError> {
        match event {
            SessionEvent::SetSampleCount(sample_count) => {
                self.parameters = self.parameters.with_sample_count(sample_count)?;
            }
            SessionEvent::SetNoiseScale(noise_scale) => {
                self.parameters = self.parameters.with_noise_scale(noise_scale)?;
            }
            SessionEvent::SetThreshold(threshold) => {
                self.parameters = self.parameters.with_threshold(threshold)?;
            }
            SessionEvent::Regenerate => {
                self.samples = self.generator.generate(self.parameters.sample_count())?;
                info!(rows = self.samples.len(), "regenerated samples");
            }
            SessionEvent::Filter => {
                let before = self.samples.len();
                self.samples = filter_plausible(&self.samples);
                info!(before, after = self.samples.len(), "filtered samples");
            }
        }

        self.render_pass()
    }

    pub fn render_pass(&mut self) -> Result<&SampleSet, SynthError> {
        self.generator.recompute(
            &mut self.samples,
            self.parameters.noise_scale(),
            self.parameters.threshold(),
        )?;

        Ok(&self.samples)
    }

    pub fn regenerate(&mut self) -> Result<&SampleSet, SynthError> {
        self.apply(SessionEvent::Regenerate)
    }

    pub fn filter(&mut self) -> Result<&SampleSet, SynthError> {
        self.apply(SessionEvent::Filter)
    }

    pub fn set_sample_count(&mut self, sample_count: usize) -> Result<&SampleSet, SynthError> {
        self.apply(SessionEvent::SetSampleCount(sample_count))
    }

    pub fn set_noise_scale(&mut self, noise_scale: f64) -> Result<&SampleSet, SynthError> {
        self.apply(SessionEvent::SetNoiseScale(noise_scale))
    }

    pub fn set_threshold(&mut self, threshold: f64) -> Result<&SampleSet, SynthError> {
        self.apply(SessionEvent::SetThreshold(threshold))
    }
}
