use nalgebra::{DMatrix, Matrix3};
use ndarray::ArrayView1;

use crate::sample_set::SampleSet;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl ColumnSummary {
    fn of(column: ArrayView1<f64>) -> Option<Self> {
        Some(Self {
            mean: column.mean()?,
            // sample standard deviation
            std_dev: column.std(1.0),
            min: column.iter().copied().reduce(f64::min)?,
            max: column.iter().copied().reduce(f64::max)?,
        })
    }
}

/// Correlation entries involving a constant column are NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub rows: usize,
    pub height: ColumnSummary,
    pub weight: ColumnSummary,
    pub bmi: ColumnSummary,
    pub biomarker: ColumnSummary,
    /// Order: height, weight, bmi.
    pub correlation: Matrix3<f64>,
}

impl Summary {
    pub fn height_weight_correlation(&self) -> f64 {
        self.correlation[(0, 1)]
    }
}

pub fn summarize(set: &SampleSet) -> Option<Summary> {
    let rows = set.len();
    if rows < 2 {
        return None;
    }

    let bmi = set.bmi();

    Some(Summary {
        rows,
        height: ColumnSummary::of(set.heights())?,
        weight: ColumnSummary::of(set.weights())?,
        bmi: ColumnSummary::of(bmi.view())?,
        biomarker: ColumnSummary::of(set.biomarkers())?,
        correlation: correlation_matrix(&[set.heights(), set.weights(), bmi.view()]),
    })
}

fn correlation_matrix(columns: &[ArrayView1<f64>; 3]) -> Matrix3<f64> {
    let rows = columns[0].len();
    let means: Vec<f64> = columns
        .iter()
        .map(|column| column.mean().unwrap_or(0.0))
        .collect();

    // X (centered)
    let centered = DMatrix::from_fn(rows, 3, |i, j| columns[j][i] - means[j]);

    // X^T * X / (n - 1)
    let covariance = centered.transpose() * &centered / (rows - 1) as f64;

    Matrix3::from_fn(|i, j| {
        covariance[(i, j)] / (covariance[(i, i)] * covariance[(j, j)]).sqrt()
    })
}
