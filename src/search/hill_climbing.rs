use std::marker::PhantomData;

use rand::{rngs::StdRng, SeedableRng};

use crate::{
    error::Result,
    search::{neighbor, Candidate, OptimizationProblem, SearchAlgorithm},
};

/// Random hill climbing: move to a random neighbor whenever it is at least as fit.
#[derive(Debug)]
pub struct RandomHillClimbing<P> {
    current: Candidate,
    rng: StdRng,
    problem: PhantomData<fn(&mut P)>,
}

impl<P: OptimizationProblem> RandomHillClimbing<P> {
    /// Start from a random point of `problem`.
    pub fn new(problem: &mut P, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let current = Candidate::random(problem, &mut rng)?;
        Ok(Self {
            current,
            rng,
            problem: PhantomData,
        })
    }
}

impl<P: OptimizationProblem> SearchAlgorithm<P> for RandomHillClimbing<P> {
    fn train(&mut self, problem: &mut P) -> Result<f64> {
        let next = neighbor(self.current.weights(), &mut self.rng);
        let next = Candidate::evaluate(problem, next)?;
        if next.fitness() >= self.current.fitness() {
            self.current = next;
        }
        Ok(self.current.fitness())
    }

    fn optimal(&self) -> &Candidate {
        &self.current
    }
}
