use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::WriterBuilder;

use crate::error::SynthError;
use crate::sample_set::SampleSet;

pub const HEADERS: [&str; 5] = ["height_cm", "weight_kg", "bmi", "biomarker", "label"];

pub fn write_table<W: Write>(set: &SampleSet, writer: W) -> Result<(), SynthError> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);

    writer.write_record(HEADERS)?;
    for sample in set.samples() {
        writer.write_record([
            sample.height.to_string(),
            sample.weight.to_string(),
            sample.bmi.to_string(),
            sample.biomarker.to_string(),
            sample.diagnosis.label().to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_table_file(set: &SampleSet, path: impl AsRef<Path>) -> Result<(), SynthError> {
    let file = File::create(path)?;
    write_table(set, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::SampleGenerator;
    use csv::ReaderBuilder;

    #[test]
    fn one_row_per_sample() -> Result<(), anyhow::Error> {
        let mut generator = SampleGenerator::seeded(9);
        let mut set = generator.generate(60)?;
        generator.recompute(&mut set, 0.1, 25.0)?;

        let mut buffer = Vec::new();
        write_table(&set, &mut buffer)?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(buffer.as_slice());
        assert_eq!(reader.headers()?.iter().collect::<Vec<_>>(), HEADERS);

        let labels = set.labels();
        let mut rows = 0;
        for (record, &label) in reader.records().zip(labels.iter()) {
            let record = record?;
            assert_eq!(record.len(), HEADERS.len());
            assert_eq!(record.get(4), Some(label.to_string().as_str()));
            rows += 1;
        }
        assert_eq!(rows, 60);
        Ok(())
    }

    #[test]
    fn empty_set_writes_only_the_header() -> Result<(), anyhow::Error> {
        let mut buffer = Vec::new();
        write_table(&SampleSet::empty(), &mut buffer)?;

        assert_eq!(String::from_utf8(buffer)?, "height_cm,weight_kg,bmi,biomarker,label\n");
        Ok(())
    }

    #[test]
    fn writes_to_a_file() -> Result<(), anyhow::Error> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("samples.csv");
        let set = SampleSet::from_measurements(&[180.0], &[81.0])?;

        write_table_file(&set, &path)?;

        let contents = std::fs::read_to_string(&path)?;
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.lines().nth(1).is_some_and(|line| line.starts_with("180,81,")));
        Ok(())
    }
}
