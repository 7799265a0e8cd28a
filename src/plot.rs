use std::ops::Range;
use std::path::{Path, PathBuf};

use ndarray::ArrayView1;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use crate::error::SynthError;
use crate::histogram::{biomarker_histogram, bmi_histogram, Histogram};
use crate::sample_set::{Diagnosis, SampleSet};

pub const PLOT_SIZE: (u32, u32) = (800, 600);

const FONT: &str = "sans-serif";
const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const SALMON: RGBColor = RGBColor(250, 128, 114);

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotFiles {
    pub bmi_histogram: PathBuf,
    pub biomarker_histogram: PathBuf,
    pub scatter: PathBuf,
}

pub fn render_all(set: &SampleSet, threshold: f64, dir: &Path) -> Result<PlotFiles, SynthError> {
    std::fs::create_dir_all(dir)?;

    let files = PlotFiles {
        bmi_histogram: dir.join("bmi_histogram.svg"),
        biomarker_histogram: dir.join("biomarker_histogram.svg"),
        scatter: dir.join("height_weight_scatter.svg"),
    };

    draw_bmi_histogram(set, &files.bmi_histogram)?;
    draw_biomarker_histogram(set, threshold, &files.biomarker_histogram)?;
    draw_scatter(set, &files.scatter)?;

    debug!(dir = %dir.display(), rows = set.len(), "rendered plots");
    Ok(files)
}

pub fn draw_bmi_histogram(set: &SampleSet, path: &Path) -> Result<(), SynthError> {
    let root = SVGBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    draw_histogram(
        &root,
        &bmi_histogram(set),
        "BMI histogram",
        "Body mass index",
        SKY_BLUE,
        None,
    )?;

    root.present()?;
    Ok(())
}

pub fn draw_biomarker_histogram(
    set: &SampleSet,
    threshold: f64,
    path: &Path,
) -> Result<(), SynthError> {
    let root = SVGBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    draw_histogram(
        &root,
        &biomarker_histogram(set),
        "Noisy biomarker histogram",
        "Biomarker",
        SALMON,
        Some(threshold),
    )?;

    root.present()?;
    Ok(())
}

pub fn draw_scatter(set: &SampleSet, path: &Path) -> Result<(), SynthError> {
    const CAPTION: &str = "Height vs weight by label";

    let root = SVGBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (Some(x_range), Some(y_range)) = (padded_range(set.heights()), padded_range(set.weights()))
    else {
        draw_no_data(&root, CAPTION)?;
        root.present()?;
        return Ok(());
    };

    let (healthy, diabetic) = split_by_diagnosis(set);

    let mut chart = ChartBuilder::on(&root)
        .caption(CAPTION, (FONT, 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Height (cm)")
        .y_desc("Weight (kg)")
        .draw()?;

    for (points, color, name) in [(healthy, BLUE, "Healthy"), (diabetic, RED, "Diabetic")] {
        chart
            .draw_series(
                points
                    .into_iter()
                    .map(|point| Circle::new(point, 4, color.mix(0.6).filled())),
            )?
            .label(name)
            .legend(move |(x, y)| Circle::new((x, y), 4, color.mix(0.6).filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

pub fn split_by_diagnosis(set: &SampleSet) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let mut healthy = Vec::new();
    let mut diabetic = Vec::new();

    for sample in set.samples() {
        let point = (sample.height, sample.weight);
        match sample.diagnosis {
            Diagnosis::Healthy => healthy.push(point),
            Diagnosis::Diabetic => diabetic.push(point),
        }
    }

    (healthy, diabetic)
}

fn draw_histogram(
    root: &Area<'_>,
    histogram: &Histogram,
    caption: &str,
    x_desc: &str,
    fill: RGBColor,
    marker: Option<f64>,
) -> Result<(), SynthError> {
    let Some((mut low, mut high)) = histogram.range() else {
        return draw_no_data(root, caption);
    };
    if let Some(threshold) = marker {
        low = low.min(threshold);
        high = high.max(threshold);
    }
    let y_top = (histogram.max_count() + 1) as f64;

    let mut chart = ChartBuilder::on(root)
        .caption(caption, (FONT, 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(low..high, 0.0..y_top)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc("Frequency")
        .draw()?;

    chart.draw_series(histogram.bins().map(|(left, right, count)| {
        Rectangle::new([(left, 0.0), (right, count as f64)], fill.filled())
    }))?;
    chart.draw_series(histogram.bins().map(|(left, right, count)| {
        Rectangle::new([(left, 0.0), (right, count as f64)], BLACK.stroke_width(1))
    }))?;

    if let Some(threshold) = marker {
        const DASHES: usize = 20;
        let dash = y_top / (2 * DASHES) as f64;

        chart
            .draw_series((0..DASHES).map(|k| {
                let start = 2.0 * dash * k as f64;
                PathElement::new(
                    vec![(threshold, start), (threshold, start + dash)],
                    RED.stroke_width(2),
                )
            }))?
            .label(format!("threshold τ = {threshold}"))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    Ok(())
}

fn draw_no_data(root: &Area<'_>, caption: &str) -> Result<(), SynthError> {
    let (width, height) = root.dim_in_pixel();
    let center = (
        i32::try_from(width / 2).unwrap_or(0),
        i32::try_from(height / 2).unwrap_or(0),
    );
    let style = TextStyle::from((FONT, 24).into_font()).pos(Pos::new(HPos::Center, VPos::Center));

    root.draw(&Text::new(format!("{caption}: no data"), center, style))?;
    Ok(())
}

fn padded_range(values: ArrayView1<f64>) -> Option<Range<f64>> {
    let min = values.iter().copied().reduce(f64::min)?;
    let max = values.iter().copied().reduce(f64::max)?;
    let pad = ((max - min) * 0.05).max(1.0);

    Some(min - pad..max + pad)
}
