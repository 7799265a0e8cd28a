pub use error::SynthError;
pub use generator::{classification_counts, filter_plausible, ClassificationCounts, SampleGenerator};
pub use parameters::Parameters;
pub use sample_set::{Diagnosis, Sample, SampleSet, Stage};
pub use session::{Session, SessionEvent};

pub mod error;
pub mod generator;
pub mod histogram;
pub mod parameters;
pub mod plot;
pub mod sample_set;
pub mod session;
pub mod summary;
pub mod table;
