//! Training and evaluation of search algorithms under identical conditions.
//!
//! An [`ExperimentRun`] owns everything one algorithm touches: its problem (and through it its
//! network) and the algorithm itself. Runs share nothing mutable, so comparing algorithms is a
//! matter of building one run per algorithm and running them one after another.

use std::{
    rc::Rc,
    time::{Duration, Instant},
};

use tracing::{debug, info, warn};

use crate::{
    config::{AlgorithmConfig, ExperimentConfig},
    dataset::DataSet,
    error::{DataLoadError, Error, Result},
    measure::SumOfSquaresError,
    network::Network,
    problem::NetworkProblem,
    search::{
        Candidate, GeneticAlgorithm, RandomHillClimbing, SearchAlgorithm, SimulatedAnnealing,
    },
};

/// A search algorithm over the weights of a network.
pub type NetworkSearch = Box<dyn SearchAlgorithm<NetworkProblem>>;

/// Build the algorithm described by `config`, seeded from a random point of `problem`.
pub fn build_algorithm(
    config: &AlgorithmConfig,
    problem: &mut NetworkProblem,
    seed: u64,
) -> Result<NetworkSearch> {
    let algorithm: NetworkSearch = match *config {
        AlgorithmConfig::HillClimbing => Box::new(RandomHillClimbing::new(problem, seed)?),
        AlgorithmConfig::Annealing(p) => Box::new(SimulatedAnnealing::new(problem, p, seed)?),
        AlgorithmConfig::Genetic(p) => Box::new(GeneticAlgorithm::new(problem, p, seed)?),
    };
    Ok(algorithm)
}

/// Classification counts and duration of one scoring pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseScore {
    /// Instances whose every output is within the decision threshold of the label.
    pub correct: usize,
    /// All other instances.
    pub incorrect: usize,
    /// Wall-clock duration of the pass.
    pub elapsed: Duration,
}

impl PhaseScore {
    /// Number of scored instances.
    pub fn total(&self) -> usize {
        self.correct + self.incorrect
    }

    /// Share of correctly classified instances, in percent.
    pub fn percent_correct(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.correct as f64 / self.total() as f64 * 100.0
        }
    }
}

/// The outcome of training and scoring one algorithm.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Name of the algorithm.
    pub name: String,
    /// Wall-clock duration of the training iterations.
    pub training_time: Duration,
    /// Scores on the training set.
    pub train: PhaseScore,
    /// Scores on the test set, counted independently of the training set.
    pub test: PhaseScore,
    /// Total training error of the best candidate after each iteration.
    pub error_trace: Vec<f64>,
    /// Number of fitness evaluations, construction of the algorithm included.
    pub evaluations: usize,
    /// The best candidate found.
    pub optimal: Candidate,
}

/// One algorithm together with the problem it searches.
pub struct ExperimentRun {
    name: String,
    problem: NetworkProblem,
    algorithm: NetworkSearch,
    decision_threshold: f64,
}

impl ExperimentRun {
    /// Pair an algorithm with the problem it was built from.
    pub fn new(
        name: impl Into<String>,
        problem: NetworkProblem,
        algorithm: NetworkSearch,
        decision_threshold: f64,
    ) -> Self {
        Self {
            name: name.into(),
            problem,
            algorithm,
            decision_threshold,
        }
    }

    /// Build the algorithm described by `config` on `problem`.
    pub fn from_config(
        config: &AlgorithmConfig,
        mut problem: NetworkProblem,
        seed: u64,
        decision_threshold: f64,
    ) -> Result<Self> {
        let algorithm = build_algorithm(config, &mut problem, seed)?;
        Ok(Self::new(
            config.name(),
            problem,
            algorithm,
            decision_threshold,
        ))
    }

    /// Name of the algorithm.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The problem searched by the algorithm.
    pub fn problem(&self) -> &NetworkProblem {
        &self.problem
    }

    /// Call `train` exactly `iterations` times. Returns the time taken and the training error of
    /// the best candidate after each call.
    pub fn train(&mut self, iterations: usize) -> Result<(Duration, Vec<f64>)> {
        info!(algorithm = %self.name, iterations, "training");
        let mut trace = Vec::with_capacity(iterations);
        let start = Instant::now();
        for iteration in 0..iterations {
            let fitness = self.algorithm.train(&mut self.problem)?;
            debug!(algorithm = %self.name, iteration, error = -fitness);
            trace.push(-fitness);
        }
        Ok((start.elapsed(), trace))
    }

    /// Load the best weights found so far into the network.
    pub fn apply_optimal(&mut self) -> Result<()> {
        let weights = self.algorithm.optimal().weights();
        self.problem.network_mut().set_weights(weights)
    }

    /// Classify every instance of `set` with the current network weights.
    pub fn score(&mut self, set: &DataSet) -> Result<PhaseScore> {
        let network = self.problem.network_mut();
        let start = Instant::now();
        let mut score = PhaseScore::default();
        for (index, instance) in set.iter().enumerate() {
            let label = instance
                .label()
                .ok_or(DataLoadError::MissingLabel { index })?;
            let output = network.predict(instance.features().as_slice())?;
            if is_correct(label.as_slice(), output, self.decision_threshold)? {
                score.correct += 1;
            } else {
                score.incorrect += 1;
            }
        }
        score.elapsed = start.elapsed();
        Ok(score)
    }

    /// Train, apply the best weights, then score the training set and `test` in turn.
    pub fn run(&mut self, iterations: usize, test: &DataSet) -> Result<RunReport> {
        let (training_time, error_trace) = self.train(iterations)?;
        self.apply_optimal()?;

        let training_set = Rc::clone(self.problem.data_set());
        let train = self.score(&training_set)?;
        let test = self.score(test)?;
        info!(
            algorithm = %self.name,
            train_accuracy = train.percent_correct(),
            test_accuracy = test.percent_correct(),
            training_secs = training_time.as_secs_f64(),
            "finished"
        );

        Ok(RunReport {
            name: self.name.clone(),
            training_time,
            train,
            test,
            error_trace,
            evaluations: self.problem.evaluations(),
            optimal: self.algorithm.optimal().clone(),
        })
    }
}

fn is_correct(label: &[f64], output: &[f64], threshold: f64) -> Result<bool> {
    Error::check_dimension(output.len(), label.len())?;
    Ok(label
        .iter()
        .zip(output)
        .all(|(l, o)| (o - l).abs() < threshold))
}

/// Fail unless `set` is labeled and its instances fit the input and output layers.
fn check_shape(set: &DataSet, config: &ExperimentConfig, which: &str) -> Result<()> {
    let labels = set.ensure_labeled()?;
    let topology = config.topology;
    if set.feature_len() != topology.input || labels != topology.output {
        return Err(Error::configuration(format!(
            "{which} set has {} features and {labels} outputs, network expects {} and {}",
            set.feature_len(),
            topology.input,
            topology.output
        )));
    }
    Ok(())
}

/// A comparison of several algorithms on one train/test split.
#[derive(Debug)]
pub struct Experiment {
    config: ExperimentConfig,
    train: Rc<DataSet>,
    test: DataSet,
}

impl Experiment {
    /// Create an experiment from data that is already loaded.
    pub fn new(config: ExperimentConfig, mut train: DataSet, mut test: DataSet) -> Result<Self> {
        config.validate()?;
        if let Some(cutoff) = config.label_cutoff {
            train.binarize_labels(cutoff);
            test.binarize_labels(cutoff);
        }
        check_shape(&train, &config, "training")?;
        check_shape(&test, &config, "test")?;
        Ok(Self {
            config,
            train: Rc::new(train),
            test,
        })
    }

    /// Read the training and test sets named by `config` and create the experiment.
    pub fn load(config: ExperimentConfig) -> Result<Self> {
        let features = config.topology.input;
        let train = config.training_data.load(features)?;
        let test = config.test_data.load(features)?;
        info!(train = train.len(), test = test.len(), "loaded data sets");
        Self::new(config, train, test)
    }

    /// The settings of the experiment.
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Build the run of the `index`-th configured algorithm, on a fresh network.
    pub fn build_run(&self, index: usize) -> Result<ExperimentRun> {
        let algorithm = self.config.algorithms.get(index).ok_or_else(|| {
            Error::configuration(format!("no algorithm at position {index}"))
        })?;
        let network = Network::new(self.config.topology);
        let problem = NetworkProblem::new(Rc::clone(&self.train), network, SumOfSquaresError)?;
        ExperimentRun::from_config(
            algorithm,
            problem,
            self.config.seed.wrapping_add(index as u64),
            self.config.decision_threshold,
        )
    }

    /// Run every configured algorithm in order. A failure only aborts the run it happens in.
    pub fn run(&self) -> Vec<Result<RunReport>> {
        (0..self.config.algorithms.len())
            .map(|index| {
                let report = self.build_run(index).and_then(|mut run| {
                    run.run(self.config.training_iterations, &self.test)
                });
                if let Err(err) = &report {
                    warn!(
                        algorithm = self.config.algorithms[index].name(),
                        error = %err,
                        "run aborted"
                    );
                }
                report
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dataset::{Instance, Label},
        network::Topology,
        search::OptimizationProblem,
    };

    fn set(rows: &[([f64; 2], f64)]) -> DataSet {
        DataSet::new(
            rows.iter()
                .map(|(x, y)| Instance::labeled(x.to_vec(), Label::scalar(*y)))
                .collect(),
        )
        .unwrap()
    }

    fn run_on(train: DataSet) -> ExperimentRun {
        let network = Network::new(Topology::new(2, 2, 1).unwrap());
        let problem = NetworkProblem::new(Rc::new(train), network, SumOfSquaresError).unwrap();
        ExperimentRun::from_config(&AlgorithmConfig::HillClimbing, problem, 1, 0.5).unwrap()
    }

    #[test]
    fn threshold_is_strict() {
        assert!(is_correct(&[1.0], &[0.6], 0.5).unwrap());
        assert!(!is_correct(&[1.0], &[0.5], 0.5).unwrap());
        assert!(!is_correct(&[1.0, 0.0], &[0.9, 0.7], 0.5).unwrap());
        assert!(matches!(
            is_correct(&[1.0], &[0.9, 0.7], 0.5),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn percent_of_empty_score() {
        assert_eq!(PhaseScore::default().percent_correct(), 0.0);
        let score = PhaseScore {
            correct: 3,
            incorrect: 1,
            elapsed: Duration::ZERO,
        };
        assert_eq!(score.percent_correct(), 75.0);
    }

    #[test]
    fn phases_are_counted_independently() {
        let train = set(&[([0.0, 0.0], 0.0), ([0.0, 1.0], 1.0), ([1.0, 1.0], 0.0)]);
        let test = set(&[([1.0, 0.0], 1.0), ([0.5, 0.5], 0.0)]);
        let mut run = run_on(train);
        let report = run.run(5, &test).unwrap();
        assert_eq!(report.train.total(), 3);
        assert_eq!(report.test.total(), 2);
        assert_eq!(report.error_trace.len(), 5);
        assert_eq!(report.evaluations, 6);
        assert_eq!(report.optimal.weights().len(), run.problem().dimension());
    }

    #[test]
    fn scoring_uses_optimal_weights() {
        let train = set(&[([0.0, 0.0], 0.0), ([1.0, 1.0], 1.0)]);
        let mut run = run_on(train.clone());
        run.train(3).unwrap();
        run.apply_optimal().unwrap();
        assert_eq!(
            run.problem().network().weights(),
            run.algorithm.optimal().weights().clone()
        );
        assert_eq!(run.score(&train).unwrap().total(), 2);
    }

    #[test]
    fn unlabeled_test_instance() {
        let train = set(&[([0.0, 0.0], 0.0)]);
        let test = DataSet::new(vec![Instance::new(vec![0.0, 0.0])]).unwrap();
        let mut run = run_on(train);
        assert!(matches!(
            run.score(&test),
            Err(Error::DataLoad(DataLoadError::MissingLabel { index: 0 }))
        ));
    }

    #[test]
    fn mismatched_test_set_fails_at_construction() {
        let config = ExperimentConfig {
            topology: Topology::new(2, 2, 1).unwrap(),
            training_iterations: 3,
            algorithms: vec![AlgorithmConfig::HillClimbing],
            ..ExperimentConfig::default()
        };
        let train = set(&[([0.0, 0.0], 0.0), ([0.0, 1.0], 1.0)]);

        let wide = DataSet::new(vec![Instance::labeled(
            vec![0.0, 1.0, 2.0],
            Label::scalar(1.0),
        )])
        .unwrap();
        assert!(matches!(
            Experiment::new(config.clone(), train.clone(), wide),
            Err(Error::Configuration(_))
        ));

        let two_outputs = DataSet::new(vec![Instance::labeled(
            vec![0.0, 1.0],
            Label::from(vec![1.0, 0.0]),
        )])
        .unwrap();
        assert!(matches!(
            Experiment::new(config.clone(), train.clone(), two_outputs),
            Err(Error::Configuration(_))
        ));

        let test = set(&[([1.0, 0.0], 1.0)]);
        assert!(Experiment::new(config, train, test).is_ok());
    }
}
