//! A feed-forward network evaluated on plain values.
//!
//! The network holds its current weights and is reconfigured in place with
//! [`Network::set_weights`]. Nothing is trained here: the weights come from a search algorithm.

use rand::Rng;
use rand_distr::Distribution;

use crate::error::{Error, Result};

/// A flat list of every trainable parameter of a network, in the order used by
/// [`Network::set_weights`]: layer by layer, neuron by neuron, bias first and then the incoming
/// weights.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightVector(Vec<f64>);

vector_newtype!(WeightVector);

impl WeightVector {
    /// Mutably borrow the components.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.0
    }
}

/// A unary operation on values.
pub type Activation = fn(f64) -> f64;

/// The logistic function.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// The hyperbolic tangent.
pub fn tanh(x: f64) -> f64 {
    x.tanh()
}

/// The sizes of the input, hidden and output layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    /// Number of inputs.
    pub input: usize,
    /// Number of hidden neurons.
    pub hidden: usize,
    /// Number of outputs.
    pub output: usize,
}

impl Topology {
    /// Create a topology. Every layer must have at least one unit.
    pub fn new(input: usize, hidden: usize, output: usize) -> Result<Self> {
        if input == 0 || hidden == 0 || output == 0 {
            return Err(Error::configuration(format!(
                "every layer needs at least one unit, got ({input}, {hidden}, {output})"
            )));
        }
        Ok(Self {
            input,
            hidden,
            output,
        })
    }

    /// Number of trainable parameters, one bias per hidden and output neuron included.
    pub fn weight_count(&self) -> usize {
        (self.input + 1) * self.hidden + (self.hidden + 1) * self.output
    }
}

/// A neuron holding a set of weights and a bias.
#[derive(Debug, Clone)]
struct Neuron {
    bias: f64,
    weights: Vec<f64>,
}

impl Neuron {
    fn zeroed(input_size: usize) -> Self {
        Self {
            bias: 0.0,
            weights: vec![0.0; input_size],
        }
    }

    fn rand<R, D>(input_size: usize, rng: &mut R, distribution: D) -> Self
    where
        R: Rng,
        D: Distribution<f64> + Copy,
    {
        Self {
            bias: rng.sample(distribution),
            weights: (0..input_size).map(|_| rng.sample(distribution)).collect(),
        }
    }

    /// Applies the neuron to the given input.
    fn call(&self, input: &[f64], nonlinearity: Activation) -> f64 {
        nonlinearity(
            self.weights
                .iter()
                .zip(input)
                .fold(self.bias, |acc, (w, x)| acc + w * x),
        )
    }
}

/// A layer of neurons sharing one activation.
#[derive(Debug, Clone)]
struct Layer {
    neurons: Vec<Neuron>,
    nonlinearity: Activation,
}

impl Layer {
    fn call(&self, input: &[f64], output: &mut Vec<f64>) {
        output.clear();
        output.extend(self.neurons.iter().map(|n| n.call(input, self.nonlinearity)));
    }
}

/// A network with one hidden layer: `tanh` hidden units and logistic outputs.
#[derive(Debug, Clone)]
pub struct Network {
    topology: Topology,
    hidden_layer: Layer,
    output_layer: Layer,
    input: Vec<f64>,
    hidden: Vec<f64>,
    output: Vec<f64>,
}

impl Network {
    /// Create a network with all weights set to zero.
    pub fn new(topology: Topology) -> Self {
        Self::build(topology, Neuron::zeroed)
    }

    /// Create a network with weights drawn from `distribution`.
    pub fn random<R, D>(topology: Topology, rng: &mut R, distribution: D) -> Self
    where
        R: Rng,
        D: Distribution<f64> + Copy,
    {
        Self::build(topology, |n| Neuron::rand(n, &mut *rng, distribution))
    }

    fn build(topology: Topology, mut neuron: impl FnMut(usize) -> Neuron) -> Self {
        let hidden_layer = Layer {
            neurons: (0..topology.hidden)
                .map(|_| neuron(topology.input))
                .collect(),
            nonlinearity: tanh,
        };
        let output_layer = Layer {
            neurons: (0..topology.output)
                .map(|_| neuron(topology.hidden))
                .collect(),
            nonlinearity: sigmoid,
        };
        Self {
            topology,
            hidden_layer,
            output_layer,
            input: vec![0.0; topology.input],
            hidden: Vec::with_capacity(topology.hidden),
            output: vec![0.0; topology.output],
        }
    }

    /// The layer sizes of the network.
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Overwrite every parameter of the network.
    pub fn set_weights(&mut self, weights: &WeightVector) -> Result<()> {
        Error::check_dimension(self.topology.weight_count(), weights.len())?;
        let mut values = weights.as_slice().iter().copied();
        let neurons = self
            .hidden_layer
            .neurons
            .iter_mut()
            .chain(self.output_layer.neurons.iter_mut());
        for neuron in neurons {
            // The length check above guarantees enough values.
            neuron.bias = values.next().unwrap_or_default();
            neuron
                .weights
                .iter_mut()
                .zip(&mut values)
                .for_each(|(w, v)| *w = v);
        }
        Ok(())
    }

    /// Read back every parameter of the network.
    pub fn weights(&self) -> WeightVector {
        let mut weights = Vec::with_capacity(self.topology.weight_count());
        for neuron in self.hidden_layer.neurons.iter().chain(&self.output_layer.neurons) {
            weights.push(neuron.bias);
            weights.extend_from_slice(&neuron.weights);
        }
        WeightVector(weights)
    }

    /// Set the values fed to the input layer on the next [`Network::run`].
    pub fn set_input_values(&mut self, input: &[f64]) -> Result<()> {
        Error::check_dimension(self.topology.input, input.len())?;
        self.input.copy_from_slice(input);
        Ok(())
    }

    /// Propagate the current input through the network.
    pub fn run(&mut self) {
        self.hidden_layer.call(&self.input, &mut self.hidden);
        self.output_layer.call(&self.hidden, &mut self.output);
    }

    /// The outputs computed by the last [`Network::run`].
    pub fn output_values(&self) -> &[f64] {
        &self.output
    }

    /// Set the input, run the network and return its outputs.
    pub fn predict(&mut self, input: &[f64]) -> Result<&[f64]> {
        self.set_input_values(input)?;
        self.run();
        Ok(self.output_values())
    }
}
