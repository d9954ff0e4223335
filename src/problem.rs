//! The optimization problem bridging weight vectors and prediction error.

use std::rc::Rc;

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::{
    dataset::DataSet,
    error::{Error, Result},
    measure::{ErrorMeasure, SumOfSquaresError},
    network::{Network, WeightVector},
    search::OptimizationProblem,
};

/// Scores a weight vector by loading it into a network and summing the prediction error over a
/// training set. The fitness is the negated total error, so fitter means more accurate.
///
/// Evaluating is a two-step protocol (load the weights, then read the outputs) on the owned
/// network. A problem must not be shared between runs.
#[derive(Debug)]
pub struct NetworkProblem<M = SumOfSquaresError> {
    set: Rc<DataSet>,
    network: Network,
    measure: M,
    initializer: Uniform<f64>,
    evaluations: usize,
}

impl<M: ErrorMeasure> NetworkProblem<M> {
    /// Create a problem, checking that every instance of `set` is labeled and that its features
    /// and labels fit the network.
    pub fn new(set: Rc<DataSet>, network: Network, measure: M) -> Result<Self> {
        let topology = network.topology();
        let label_len = set.ensure_labeled()?;
        if set.feature_len() != topology.input {
            return Err(Error::configuration(format!(
                "{} features per instance but the network has {} inputs",
                set.feature_len(),
                topology.input
            )));
        }
        if label_len != topology.output {
            return Err(Error::configuration(format!(
                "labels of length {label_len} but the network has {} outputs",
                topology.output
            )));
        }
        Ok(Self {
            set,
            network,
            measure,
            initializer: Uniform::new(-1.0, 1.0),
            evaluations: 0,
        })
    }

    /// The training set.
    pub fn data_set(&self) -> &Rc<DataSet> {
        &self.set
    }

    /// The network weights are loaded into.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Mutable access to the network, e.g. to load the final weights before scoring.
    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    /// Number of calls to [`OptimizationProblem::evaluate`] so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Load `weights` and sum the error of the network over the training set.
    pub fn total_error(&mut self, weights: &WeightVector) -> Result<f64> {
        self.network.set_weights(weights)?;
        let mut error = 0.0;
        for instance in self.set.iter() {
            let output = self.network.predict(instance.features().as_slice())?;
            // Labels were checked in `new`.
            if let Some(label) = instance.label() {
                error += self.measure.value(label.as_slice(), output)?;
            }
        }
        Ok(error)
    }
}

impl<M: ErrorMeasure> OptimizationProblem for NetworkProblem<M> {
    fn dimension(&self) -> usize {
        self.network.topology().weight_count()
    }

    fn random_weights<R: Rng>(&self, rng: &mut R) -> WeightVector {
        (0..self.dimension())
            .map(|_| self.initializer.sample(rng))
            .collect::<Vec<_>>()
            .into()
    }

    fn evaluate(&mut self, weights: &WeightVector) -> Result<f64> {
        self.evaluations += 1;
        Ok(-self.total_error(weights)?)
    }
}
