//! Search algorithms exploring the space of weight vectors.
//!
//! Every algorithm implements [`SearchAlgorithm`]: [`SearchAlgorithm::train`] advances the search
//! by one unit of work and [`SearchAlgorithm::optimal`] returns the best candidate seen so far.
//! The algorithms only talk to the problem through [`OptimizationProblem`], so the harness can
//! drive any of them without knowing which one it runs.

use rand::Rng;

use crate::{
    error::{Error, Result},
    network::WeightVector,
};

mod annealing;
mod genetic;
mod hill_climbing;

pub use annealing::{AnnealingParameters, SimulatedAnnealing};
pub use genetic::{GeneticAlgorithm, GeneticParameters};
pub use hill_climbing::RandomHillClimbing;

/// A search space of weight vectors with a fitness to maximize.
pub trait OptimizationProblem {
    /// Number of components of every point of the search space.
    fn dimension(&self) -> usize;

    /// Draw a starting point.
    fn random_weights<R: Rng>(&self, rng: &mut R) -> WeightVector;

    /// Score a point. Higher is better and the same point always gets the same score.
    fn evaluate(&mut self, weights: &WeightVector) -> Result<f64>;
}

/// A point of the search space together with its fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    weights: WeightVector,
    fitness: f64,
}

impl Candidate {
    /// Score `weights` against `problem`.
    pub fn evaluate<P>(problem: &mut P, weights: WeightVector) -> Result<Self>
    where
        P: OptimizationProblem,
    {
        Error::check_dimension(problem.dimension(), weights.len())?;
        let fitness = problem.evaluate(&weights)?;
        Ok(Self { weights, fitness })
    }

    /// Draw a random point from `problem` and score it.
    pub fn random<P, R>(problem: &mut P, rng: &mut R) -> Result<Self>
    where
        P: OptimizationProblem,
        R: Rng,
    {
        if problem.dimension() == 0 {
            return Err(Error::configuration("the search space has no dimension"));
        }
        let weights = problem.random_weights(rng);
        Self::evaluate(problem, weights)
    }

    /// The point.
    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    /// The score of the point.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Take ownership of the point.
    pub fn into_weights(self) -> WeightVector {
        self.weights
    }
}

/// A strategy searching for the fittest weight vector of a problem.
///
/// An algorithm is seeded with a scored starting point when it is constructed and has no
/// terminal state: the caller decides how many times to call [`SearchAlgorithm::train`].
pub trait SearchAlgorithm<P: OptimizationProblem> {
    /// Advance the search by one step and return the best fitness seen so far.
    fn train(&mut self, problem: &mut P) -> Result<f64>;

    /// The best candidate seen across every call to [`SearchAlgorithm::train`]. Its fitness never
    /// decreases.
    fn optimal(&self) -> &Candidate;
}

/// Shift one randomly chosen weight by a value drawn from `[-0.5, 0.5)`.
fn neighbor<R: Rng>(weights: &WeightVector, rng: &mut R) -> WeightVector {
    let mut next = weights.clone();
    let values = next.as_mut_slice();
    if !values.is_empty() {
        let i = rng.gen_range(0..values.len());
        values[i] += rng.gen::<f64>() - 0.5;
    }
    next
}


#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::{testing::Sphere, *};

    #[test]
    fn neighbor_changes_one_weight() {
        let mut rng = StdRng::seed_from_u64(3);
        let weights = WeightVector::from(vec![0.0; 8]);
        let next = neighbor(&weights, &mut rng);
        let changed: Vec<_> = next.as_slice().iter().filter(|w| **w != 0.0).collect();
        assert!(changed.len() <= 1);
        assert!(changed.iter().all(|w| (-0.5..0.5).contains(*w)));
    }

    #[test]
    fn candidate_rejects_wrong_dimension() {
        let mut sphere = Sphere::new(vec![0.0; 3]);
        let err = Candidate::evaluate(&mut sphere, WeightVector::from(vec![0.0; 4])).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 3,
                found: 4
            }
        ));
        assert_eq!(sphere.evaluations, 0);
    }

    #[test]
    fn candidate_rejects_empty_space() {
        let mut sphere = Sphere::new(Vec::new());
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            Candidate::random(&mut sphere, &mut rng),
            Err(Error::Configuration(_))
        ));
    }
}
