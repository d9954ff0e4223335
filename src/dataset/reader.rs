//! Readers turning comma-separated text into data sets.
//!
//! Two layouts are supported:
//! - a single file where each line holds the features followed by one label field;
//! - a pair of files, one holding the feature rows and one holding the label rows, merged by
//!   position.
//!
//! Every malformed line is reported with its path and line number. Nothing is skipped.

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    dataset::{DataSet, Instance, Label},
    error::{DataLoadError, Result},
};

/// A parsed line and the line number it came from.
struct Row {
    line: u64,
    values: Vec<f64>,
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| {
        DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

fn read_rows<R: io::Read>(source: R, path: &Path) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| DataLoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record.position().map_or(0, csv::Position::line);
        let values = record
            .iter()
            .enumerate()
            .map(|(column, field)| {
                field
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .ok_or_else(|| DataLoadError::Parse {
                        path: path.to_path_buf(),
                        line,
                        message: format!("invalid number {field:?} in column {}", column + 1),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(Row { line, values });
    }
    if rows.is_empty() {
        return Err(DataLoadError::Empty {
            path: path.to_path_buf(),
        }
        .into());
    }
    Ok(rows)
}

/// Check that every row has `width` fields.
fn check_width(rows: &[Row], width: usize, path: &Path) -> Result<()> {
    match rows.iter().find(|row| row.values.len() != width) {
        Some(row) => Err(DataLoadError::Parse {
            path: path.to_path_buf(),
            line: row.line,
            message: format!("expected {width} fields, found {}", row.values.len()),
        }
        .into()),
        None => Ok(()),
    }
}

/// Read a data set where each line holds `feature_count` features followed by a single label.
pub fn read_delimited(path: impl AsRef<Path>, feature_count: usize) -> Result<DataSet> {
    let path = path.as_ref();
    read_delimited_from(open(path)?, path, feature_count)
}

/// Same as [`read_delimited`] but reads from any source. `path` is only used in error messages.
pub fn read_delimited_from<R: io::Read>(
    source: R,
    path: impl AsRef<Path>,
    feature_count: usize,
) -> Result<DataSet> {
    let path = path.as_ref();
    let rows = read_rows(source, path)?;
    check_width(&rows, feature_count + 1, path)?;
    debug!(path = %path.display(), rows = rows.len(), "read delimited data set");

    let instances = rows
        .into_iter()
        .map(|row| {
            let mut features = row.values;
            let label = features.split_off(feature_count);
            Instance::labeled(features, Label::from(label))
        })
        .collect();
    DataSet::new(instances)
}

/// Read feature rows and label rows from two files and merge them by position.
pub fn read_csv_pair(features: impl AsRef<Path>, labels: impl AsRef<Path>) -> Result<DataSet> {
    let (features, labels) = (features.as_ref(), labels.as_ref());
    read_csv_pair_from(
        (open(features)?, features.to_path_buf()),
        (open(labels)?, labels.to_path_buf()),
    )
}

/// Same as [`read_csv_pair`] but reads from any pair of sources, each given with the path used in
/// error messages.
pub fn read_csv_pair_from<F, L>(features: (F, PathBuf), labels: (L, PathBuf)) -> Result<DataSet>
where
    F: io::Read,
    L: io::Read,
{
    let (feature_source, feature_path) = features;
    let (label_source, label_path) = labels;

    let feature_rows = read_rows(feature_source, &feature_path)?;
    check_width(&feature_rows, feature_rows[0].values.len(), &feature_path)?;
    let label_rows = read_rows(label_source, &label_path)?;
    check_width(&label_rows, label_rows[0].values.len(), &label_path)?;
    debug!(
        features = %feature_path.display(),
        labels = %label_path.display(),
        rows = feature_rows.len(),
        "read paired data set"
    );

    let mut set = DataSet::new(
        feature_rows
            .into_iter()
            .map(|row| Instance::new(row.values))
            .collect(),
    )?;
    set.attach_labels(
        label_rows
            .into_iter()
            .map(|row| Label::from(row.values))
            .collect(),
    )?;
    Ok(set)
}
