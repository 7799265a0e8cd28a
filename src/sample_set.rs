use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::error::SynthError;

pub const HEIGHT_ROW: usize = 0;
pub const WEIGHT_ROW: usize = 1;
pub const BIOMARKER_ROW: usize = 2;
pub const LABEL_ROW: usize = 3;
pub const ROWS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Diagnosis {
    Healthy,
    Diabetic,
}

impl Diagnosis {
    /// Threshold rule: a biomarker equal to the threshold already counts as diabetic.
    pub fn classify(biomarker: f64, threshold: f64) -> Self {
        if biomarker >= threshold {
            Diagnosis::Diabetic
        } else {
            Diagnosis::Healthy
        }
    }

    pub fn label(self) -> u8 {
        match self {
            Diagnosis::Healthy => 0,
            Diagnosis::Diabetic => 1,
        }
    }

    fn from_cell(value: f64) -> Self {
        if value >= 0.5 {
            Diagnosis::Diabetic
        } else {
            Diagnosis::Healthy
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Generated,
    Computed,
    /// Rows were dropped; biomarker and label are carried over but stale.
    Filtered,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    pub biomarker: f64,
    pub diagnosis: Diagnosis,
}

pub fn body_mass_index(height_cm: f64, weight_kg: f64) -> f64 {
    weight_kg / (height_cm / 100.0).powi(2)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    data: Array2<f64>,
    stage: Stage,
}

impl SampleSet {
    pub fn empty() -> Self {
        Self {
            data: Array2::zeros((ROWS, 0)),
            stage: Stage::Generated,
        }
    }

    pub fn from_measurements(heights: &[f64], weights: &[f64]) -> Result<Self, SynthError> {
        if heights.len() != weights.len() {
            return Err(SynthError::invalid(
                "weights",
                weights.len(),
                "length must match heights",
            ));
        }
        if let Some(&height) = heights.iter().find(|h| !(h.is_finite() && **h > 0.0)) {
            return Err(SynthError::invalid(
                "height",
                height,
                "must be finite and positive",
            ));
        }
        if let Some(&weight) = weights.iter().find(|w| !w.is_finite()) {
            return Err(SynthError::invalid("weight", weight, "must be finite"));
        }

        Ok(Self::from_columns(
            ArrayView1::from(heights),
            ArrayView1::from(weights),
        ))
    }

    pub(crate) fn from_columns(heights: ArrayView1<f64>, weights: ArrayView1<f64>) -> Self {
        let mut data = Array2::zeros((ROWS, heights.len()));
        data.row_mut(HEIGHT_ROW).assign(&heights);
        data.row_mut(WEIGHT_ROW).assign(&weights);

        Self {
            data,
            stage: Stage::Generated,
        }
    }

    pub fn len(&self) -> usize {
        self.data.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_computed(&self) -> bool {
        self.stage == Stage::Computed
    }

    pub fn matrix(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    pub fn heights(&self) -> ArrayView1<'_, f64> {
        self.data.row(HEIGHT_ROW)
    }

    pub fn weights(&self) -> ArrayView1<'_, f64> {
        self.data.row(WEIGHT_ROW)
    }

    pub fn biomarkers(&self) -> ArrayView1<'_, f64> {
        self.data.row(BIOMARKER_ROW)
    }

    pub fn labels(&self) -> Array1<u8> {
        self.data
            .row(LABEL_ROW)
            .mapv(|cell| Diagnosis::from_cell(cell).label())
    }

    pub fn diagnoses(&self) -> impl Iterator<Item = Diagnosis> + '_ {
        self.data.row(LABEL_ROW).into_iter().map(|&cell| Diagnosis::from_cell(cell))
    }

    pub fn bmi(&self) -> Array1<f64> {
        self.heights()
            .iter()
            .zip(self.weights())
            .map(|(&height, &weight)| body_mass_index(height, weight))
            .collect()
    }

    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.data.columns().into_iter().map(|column| Sample {
            height: column[HEIGHT_ROW],
            weight: column[WEIGHT_ROW],
            bmi: body_mass_index(column[HEIGHT_ROW], column[WEIGHT_ROW]),
            biomarker: column[BIOMARKER_ROW],
            diagnosis: Diagnosis::from_cell(column[LABEL_ROW]),
        })
    }

    pub(crate) fn set_observations(&mut self, biomarkers: &Array1<f64>, threshold: f64) {
        debug_assert_eq!(biomarkers.len(), self.len());

        self.data.row_mut(BIOMARKER_ROW).assign(biomarkers);

        let labels =
            biomarkers.mapv(|value| f64::from(Diagnosis::classify(value, threshold).label()));
        self.data.row_mut(LABEL_ROW).assign(&labels);

        self.stage = Stage::Computed;
    }

    pub(crate) fn select(&self, columns: &[usize]) -> Self {
        Self {
            data: self.data.select(Axis(1), columns),
            stage: Stage::Filtered,
        }
    }
}

impl Default for SampleSet {
    fn default() -> Self {
        Self::empty()
    }
}
