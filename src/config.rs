//! Compiled-in experiment settings.
//!
//! The defaults reproduce the digits experiment: a 64-10-1 network, 100 iterations per
//! algorithm, and hill climbing, annealing and a genetic algorithm compared side by side.

use std::path::PathBuf;

use crate::{
    dataset::{reader, DataSet},
    error::{Error, Result},
    network::Topology,
    search::{AnnealingParameters, GeneticParameters},
};

/// Number of features of the digits data.
pub const DIGITS_FEATURES: usize = 64;

/// A prediction is correct when every output is closer than this to its label.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// A search strategy and its hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlgorithmConfig {
    /// Random hill climbing.
    HillClimbing,
    /// Simulated annealing.
    Annealing(AnnealingParameters),
    /// Genetic algorithm.
    Genetic(GeneticParameters),
}

impl AlgorithmConfig {
    /// The short name used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::HillClimbing => "RHC",
            Self::Annealing(_) => "SA",
            Self::Genetic(_) => "GA",
        }
    }

    /// Check the hyperparameters without building anything.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::HillClimbing => Ok(()),
            Self::Annealing(p) => p.validate(),
            Self::Genetic(p) => p.validate(),
        }
    }
}

/// Where a data set is read from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// One file, each line holding the features followed by the label.
    Delimited {
        /// Path of the file.
        path: PathBuf,
    },
    /// A file of feature rows and a file of label rows, merged by position.
    CsvPair {
        /// Path of the feature rows.
        features: PathBuf,
        /// Path of the label rows.
        labels: PathBuf,
    },
}

impl DataSource {
    /// Read the data set. `feature_count` is only used by [`DataSource::Delimited`], paired
    /// sources take the width of their feature rows.
    pub fn load(&self, feature_count: usize) -> Result<DataSet> {
        match self {
            Self::Delimited { path } => reader::read_delimited(path, feature_count),
            Self::CsvPair { features, labels } => reader::read_csv_pair(features, labels),
        }
    }
}

/// Everything an experiment needs besides its data.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentConfig {
    /// Shared by every algorithm.
    pub topology: Topology,
    /// Number of `train` calls allotted to each algorithm.
    pub training_iterations: usize,
    /// See [`DECISION_THRESHOLD`].
    pub decision_threshold: f64,
    /// Seed of the first algorithm. Each following algorithm uses the next seed.
    pub seed: u64,
    /// Algorithms to compare, in order.
    pub algorithms: Vec<AlgorithmConfig>,
    /// When set, labels below the cutoff become `0` and the others `1` at load time.
    pub label_cutoff: Option<f64>,
    /// Source of the training set.
    pub training_data: DataSource,
    /// Source of the held-out test set.
    pub test_data: DataSource,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            topology: Topology {
                input: DIGITS_FEATURES,
                hidden: 10,
                output: 1,
            },
            training_iterations: 100,
            decision_threshold: DECISION_THRESHOLD,
            seed: 0,
            algorithms: vec![
                AlgorithmConfig::HillClimbing,
                AlgorithmConfig::Annealing(AnnealingParameters {
                    initial_temperature: 1e11,
                    cooling_rate: 0.95,
                }),
                AlgorithmConfig::Genetic(GeneticParameters {
                    population_size: 200,
                    elite_survivors: 100,
                    mutation_offspring: 10,
                }),
            ],
            label_cutoff: None,
            training_data: DataSource::Delimited {
                path: PathBuf::from("data/optdigits.tra"),
            },
            test_data: DataSource::Delimited {
                path: PathBuf::from("data/optdigits.tes"),
            },
        }
    }
}

impl ExperimentConfig {
    /// Check every setting that does not depend on the data.
    pub fn validate(&self) -> Result<()> {
        let t = self.topology;
        Topology::new(t.input, t.hidden, t.output)?;
        if self.training_iterations == 0 {
            return Err(Error::configuration("at least one training iteration is needed"));
        }
        if !(self.decision_threshold.is_finite() && self.decision_threshold > 0.0) {
            return Err(Error::configuration(format!(
                "decision threshold must be finite and positive, got {}",
                self.decision_threshold
            )));
        }
        if self.algorithms.is_empty() {
            return Err(Error::configuration("no algorithm to compare"));
        }
        self.algorithms.iter().try_for_each(AlgorithmConfig::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ExperimentConfig::default();
        config.validate().unwrap();
        assert_eq!(config.topology.weight_count(), 661);
        let names: Vec<_> = config.algorithms.iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["RHC", "SA", "GA"]);
    }

    #[test]
    fn rejects_bad_settings() {
        let mut config = ExperimentConfig::default();
        config.training_iterations = 0;
        assert!(config.validate().is_err());

        let mut config = ExperimentConfig::default();
        config.topology.hidden = 0;
        assert!(config.validate().is_err());

        let mut config = ExperimentConfig::default();
        config.algorithms.push(AlgorithmConfig::Genetic(GeneticParameters {
            population_size: 0,
            elite_survivors: 0,
            mutation_offspring: 0,
        }));
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));
    }
}
