use std::marker::PhantomData;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    error::{Error, Result},
    search::{neighbor, Candidate, OptimizationProblem, SearchAlgorithm},
};

/// The temperature schedule of a [`SimulatedAnnealing`] search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnealingParameters {
    /// Temperature of the first step. Must be finite and positive.
    pub initial_temperature: f64,
    /// Factor applied to the temperature after every step. Must be in `(0, 1]`.
    pub cooling_rate: f64,
}

impl AnnealingParameters {
    /// Check that the schedule is usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return Err(Error::configuration(format!(
                "initial temperature must be finite and positive, got {}",
                self.initial_temperature
            )));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate <= 1.0) {
            return Err(Error::configuration(format!(
                "cooling rate must be in (0, 1], got {}",
                self.cooling_rate
            )));
        }
        Ok(())
    }
}

/// Simulated annealing: accept worse neighbors with a probability `exp(Δ / T)` that shrinks as
/// the temperature cools.
///
/// The current point may get worse, so the best point seen is kept separately.
#[derive(Debug)]
pub struct SimulatedAnnealing<P> {
    current: Candidate,
    best: Candidate,
    temperature: f64,
    cooling_rate: f64,
    rng: StdRng,
    problem: PhantomData<fn(&mut P)>,
}

impl<P: OptimizationProblem> SimulatedAnnealing<P> {
    /// Start from a random point of `problem`.
    pub fn new(
        problem: &mut P,
        parameters: AnnealingParameters,
        seed: u64,
    ) -> Result<Self> {
        parameters.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let current = Candidate::random(problem, &mut rng)?;
        Ok(Self {
            best: current.clone(),
            current,
            temperature: parameters.initial_temperature,
            cooling_rate: parameters.cooling_rate,
            rng,
            problem: PhantomData,
        })
    }

    /// The temperature used by the next step.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}

impl<P: OptimizationProblem> SearchAlgorithm<P> for SimulatedAnnealing<P> {
    fn train(&mut self, problem: &mut P) -> Result<f64> {
        let next = neighbor(self.current.weights(), &mut self.rng);
        let next = Candidate::evaluate(problem, next)?;

        let delta = next.fitness() - self.current.fitness();
        if delta >= 0.0 || self.rng.gen::<f64>() < (delta / self.temperature).exp() {
            self.current = next;
            if self.current.fitness() > self.best.fitness() {
                self.best = self.current.clone();
            }
        }
        self.temperature *= self.cooling_rate;
        Ok(self.best.fitness())
    }

    fn optimal(&self) -> &Candidate {
        &self.best
    }
}
