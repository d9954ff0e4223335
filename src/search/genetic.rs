use std::marker::PhantomData;

use rand::{distributions::WeightedIndex, rngs::StdRng, Rng, SeedableRng};
use rand_distr::Distribution;

use crate::{
    error::{Error, Result},
    network::WeightVector,
    search::{neighbor, Candidate, OptimizationProblem, SearchAlgorithm},
};

/// The shape of a [`GeneticAlgorithm`] population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneticParameters {
    /// Number of individuals alive in every generation.
    pub population_size: usize,
    /// Number of the fittest individuals copied unchanged into the next generation.
    pub elite_survivors: usize,
    /// Number of offspring created by mutating a parent instead of crossing two parents.
    pub mutation_offspring: usize,
}

impl GeneticParameters {
    /// Check that the population can be built and that every generation breeds at least one
    /// offspring.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(Error::configuration("population size must be positive"));
        }
        if self.elite_survivors >= self.population_size {
            return Err(Error::configuration(format!(
                "{} elite survivors leave no room for offspring in a population of {}",
                self.elite_survivors, self.population_size
            )));
        }
        if self.mutation_offspring > self.population_size {
            return Err(Error::configuration(format!(
                "{} mutation offspring exceed the population of {}",
                self.mutation_offspring, self.population_size
            )));
        }
        Ok(())
    }

    /// Number of new individuals, hence of evaluations, per generation.
    pub fn offspring(&self) -> usize {
        self.population_size - self.elite_survivors
    }
}

/// A generational genetic algorithm with elitism, roulette-wheel selection, uniform crossover
/// and single-weight mutation.
///
/// The population is kept sorted from the fittest individual down.
#[derive(Debug)]
pub struct GeneticAlgorithm<P> {
    population: Vec<Candidate>,
    best: Candidate,
    parameters: GeneticParameters,
    rng: StdRng,
    problem: PhantomData<fn(&mut P)>,
}

impl<P: OptimizationProblem> GeneticAlgorithm<P> {
    /// Build and score a random population of `problem`.
    pub fn new(problem: &mut P, parameters: GeneticParameters, seed: u64) -> Result<Self> {
        parameters.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let mut population = (0..parameters.population_size)
            .map(|_| Candidate::random(problem, &mut rng))
            .collect::<Result<Vec<_>>>()?;
        sort_fittest_first(&mut population);
        Ok(Self {
            best: population[0].clone(),
            population,
            parameters,
            rng,
            problem: PhantomData,
        })
    }

    /// The current generation, fittest first.
    pub fn population(&self) -> &[Candidate] {
        &self.population
    }

    /// Fitness-proportionate selection over the fitness shifted above zero.
    fn selection(&self) -> Result<WeightedIndex<f64>> {
        let worst = self.population[self.population.len() - 1].fitness();
        let spread = self.population[0].fitness() - worst;
        // Keeps every weight positive, so equal fitness selects uniformly.
        let floor = 1e-9 * (1.0 + spread);
        WeightedIndex::new(
            self.population
                .iter()
                .map(|c| c.fitness() - worst + floor),
        )
        .map_err(|err| Error::configuration(format!("cannot select parents: {err}")))
    }

    fn crossover(&mut self, a: &WeightVector, b: &WeightVector) -> WeightVector {
        a.as_slice()
            .iter()
            .zip(b.as_slice())
            .map(|(x, y)| if self.rng.gen_bool(0.5) { *x } else { *y })
            .collect::<Vec<_>>()
            .into()
    }
}

impl<P: OptimizationProblem> SearchAlgorithm<P> for GeneticAlgorithm<P> {
    fn train(&mut self, problem: &mut P) -> Result<f64> {
        let selection = self.selection()?;
        let offspring = self.parameters.offspring();
        let mutants = self.parameters.mutation_offspring.min(offspring);

        let mut next = Vec::with_capacity(self.parameters.population_size);
        next.extend_from_slice(&self.population[..self.parameters.elite_survivors]);
        for i in 0..offspring {
            let parent = selection.sample(&mut self.rng);
            let child = if i < mutants {
                neighbor(self.population[parent].weights(), &mut self.rng)
            } else {
                let other = selection.sample(&mut self.rng);
                let (a, b) = (
                    self.population[parent].weights().clone(),
                    self.population[other].weights().clone(),
                );
                self.crossover(&a, &b)
            };
            next.push(Candidate::evaluate(problem, child)?);
        }
        sort_fittest_first(&mut next);
        self.population = next;

        if self.population[0].fitness() > self.best.fitness() {
            self.best = self.population[0].clone();
        }
        Ok(self.best.fitness())
    }

    fn optimal(&self) -> &Candidate {
        &self.best
    }
}

fn sort_fittest_first(population: &mut [Candidate]) {
    population.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
}
