use bmi_synth::generator::{classification_counts, filter_plausible, SampleGenerator};
use bmi_synth::histogram::{biomarker_histogram, bmi_histogram, BIOMARKER_BINS};
use bmi_synth::sample_set::body_mass_index;
use bmi_synth::{SampleSet, SynthError};

const TOLERANCE: f64 = 1e-9;

#[test]
fn generate_returns_m_heights_and_weights() -> Result<(), SynthError> {
    let mut generator = SampleGenerator::seeded(2024);

    for m in [1, 50, 100, 333, 500] {
        let set = generator.generate(m)?;
        assert_eq!(set.heights().len(), m);
        assert_eq!(set.weights().len(), m);
        assert_eq!(set.biomarkers().len(), m);
        assert_eq!(set.labels().len(), m);
    }
    Ok(())
}

#[test]
fn seeded_heights_stay_in_a_plausible_statistical_range() -> Result<(), SynthError> {
    let set = SampleGenerator::seeded(100).generate(100)?;

    assert_eq!(set.len(), 100);
    // Five standard deviations around the mean.
    assert!(set.heights().iter().all(|&h| (90.0..=240.0).contains(&h)));
    Ok(())
}

#[test]
fn labels_match_biomarker_against_threshold() -> Result<(), SynthError> {
    let mut generator = SampleGenerator::seeded(8);
    let mut set = generator.generate(400)?;

    for (sigma, tau) in [(0.01, 18.0), (0.5, 22.0), (1.0, 25.0), (3.0, 30.0)] {
        generator.recompute(&mut set, sigma, tau)?;

        let labels = set.labels();
        for (&biomarker, &label) in set.biomarkers().iter().zip(labels.iter()) {
            assert_eq!(label == 1, biomarker >= tau);
        }
    }
    Ok(())
}

#[test]
fn threshold_equality_is_labelled_diabetic() -> Result<(), SynthError> {
    // 100 / 2^2 and 25 / 1^2 are both exactly 25.
    let mut set = SampleSet::from_measurements(&[200.0, 100.0, 180.0], &[100.0, 25.0, 60.0])?;

    SampleGenerator::seeded(1).recompute(&mut set, 0.0, 25.0)?;

    assert_eq!(set.labels().to_vec(), vec![1, 1, 0]);
    Ok(())
}

#[test]
fn bmi_is_recomputable_from_height_and_weight() -> Result<(), SynthError> {
    let mut generator = SampleGenerator::seeded(31);
    let mut set = generator.generate(200)?;
    generator.recompute(&mut set, 0.0, 25.0)?;

    for sample in set.samples() {
        let expected = sample.weight / (sample.height / 100.0).powi(2);
        assert!((sample.bmi - expected).abs() < TOLERANCE);
        assert!((sample.biomarker - expected).abs() < TOLERANCE);
        assert!((body_mass_index(sample.height, sample.weight) - expected).abs() < TOLERANCE);
    }
    Ok(())
}

#[test]
fn negative_sigma_is_invalid() -> Result<(), SynthError> {
    let mut generator = SampleGenerator::seeded(3);
    let mut set = generator.generate(10)?;

    let result = generator.recompute(&mut set, -1.0, 25.0);

    assert!(matches!(result, Err(SynthError::InvalidParameter { .. })));
    Ok(())
}

#[test]
fn filter_never_grows_and_is_idempotent() -> Result<(), SynthError> {
    let mut generator = SampleGenerator::seeded(77);

    for _ in 0..5 {
        let mut set = generator.generate(500)?;
        generator.recompute(&mut set, 0.2, 25.0)?;

        let once = filter_plausible(&set);
        let twice = filter_plausible(&once);

        assert!(once.len() <= set.len());
        assert_eq!(once.heights(), twice.heights());
        assert_eq!(once.weights(), twice.weights());
        assert_eq!(once.len(), twice.len());
    }
    Ok(())
}

#[test]
fn counts_add_up_to_the_set_length() -> Result<(), SynthError> {
    let mut generator = SampleGenerator::seeded(12);
    let mut set = generator.generate(250)?;

    for tau in [10.0, 20.0, 25.0, 40.0] {
        generator.recompute(&mut set, 0.4, tau)?;
        let counts = classification_counts(&set);
        assert_eq!(counts.healthy + counts.diabetic, set.len());
    }
    Ok(())
}

#[test]
fn implausible_bmi_everywhere_filters_to_an_empty_set() -> Result<(), SynthError> {
    // BMI of roughly 6.9, 92.6 and 11.0.
    let set = SampleSet::from_measurements(&[170.0, 180.0, 210.0], &[20.0, 300.0, 48.5])?;

    let mut filtered = filter_plausible(&set);
    assert!(filtered.is_empty());

    SampleGenerator::seeded(5).recompute(&mut filtered, 0.1, 25.0)?;
    assert!(filtered.biomarkers().is_empty());
    assert!(filtered.labels().is_empty());
    assert_eq!(classification_counts(&filtered).healthy, 0);
    assert!(bmi_histogram(&filtered).is_empty());
    assert!(biomarker_histogram(&filtered).is_empty());
    Ok(())
}

#[test]
fn histograms_account_for_every_sample() -> Result<(), SynthError> {
    let mut generator = SampleGenerator::seeded(40);
    let mut set = generator.generate(300)?;
    generator.recompute(&mut set, 0.5, 25.0)?;

    let bmi = bmi_histogram(&set);
    assert_eq!(bmi.total(), set.len());
    for (left, right, _) in bmi.bins() {
        assert_eq!(left.fract(), 0.0);
        assert!((right - left - 2.0).abs() < TOLERANCE);
    }

    let biomarker = biomarker_histogram(&set);
    assert_eq!(biomarker.counts().len(), BIOMARKER_BINS);
    assert_eq!(biomarker.total(), set.len());
    Ok(())
}
