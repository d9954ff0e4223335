//! Defines the errors raised while configuring, loading data for and running an experiment.

use std::{io, path::PathBuf};

use thiserror::Error;

/// A result whose error defaults to [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error type for all operations of the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A hyperparameter, topology or data set does not fit the requested operation.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// Two vectors that must have the same length do not.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// The required length.
        expected: usize,
        /// The length that was given.
        found: usize,
    },
    /// A data set could not be loaded.
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),
}

impl Error {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Fails with [`Error::DimensionMismatch`] unless both lengths are equal.
    pub(crate) fn check_dimension(expected: usize, found: usize) -> Result<()> {
        if expected == found {
            Ok(())
        } else {
            Err(Self::DimensionMismatch { expected, found })
        }
    }
}

/// Errors raised by the data set readers.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// The source could not be opened or read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// Path of the source.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The source is not well-formed CSV.
    #[error("malformed csv in {}: {source}", .path.display())]
    Csv {
        /// Path of the source.
        path: PathBuf,
        /// Underlying CSV failure.
        #[source]
        source: csv::Error,
    },
    /// A line was read but its content is not a valid record.
    #[error("{}:{line}: {message}", .path.display())]
    Parse {
        /// Path of the source.
        path: PathBuf,
        /// 1-based line number.
        line: u64,
        /// What is wrong with the line.
        message: String,
    },
    /// The source holds no records.
    #[error("{} holds no records", .path.display())]
    Empty {
        /// Path of the source.
        path: PathBuf,
    },
    /// Paired feature and label sources have a different number of rows.
    #[error("{features} feature rows but {labels} label rows")]
    LengthMismatch {
        /// Number of feature rows.
        features: usize,
        /// Number of label rows.
        labels: usize,
    },
    /// An instance is used for training or evaluation without a label.
    #[error("instance {index} has no label")]
    MissingLabel {
        /// Position of the instance in its data set.
        index: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_check() {
        assert!(Error::check_dimension(3, 3).is_ok());
        let err = Error::check_dimension(3, 4).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 3,
                found: 4
            }
        ));
        assert_eq!(err.to_string(), "dimension mismatch: expected 3, found 4");
    }

    #[test]
    fn parse_error_names_the_line() {
        let err = Error::from(DataLoadError::Parse {
            path: PathBuf::from("digits.txt"),
            line: 7,
            message: "expected 65 fields, found 3".to_string(),
        });
        assert_eq!(err.to_string(), "digits.txt:7: expected 65 fields, found 3");
    }
}
