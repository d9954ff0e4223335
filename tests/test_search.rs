
use std::rc::Rc;

use assert::{assert_monotonic, synthetic_set};
use nnopt::{
    config::AlgorithmConfig,
    harness::build_algorithm,
    measure::SumOfSquaresError,
    network::{Network, Topology},
    problem::NetworkProblem,
    search::{AnnealingParameters, GeneticAlgorithm, GeneticParameters, OptimizationProblem},
    Error,
};
use proptest::prelude::*;

fn problem(seed: u64) -> NetworkProblem {
    let set = Rc::new(synthetic_set(30, 8, seed));
    let network = Network::new(Topology::new(8, 4, 1).unwrap());
    NetworkProblem::new(set, network, SumOfSquaresError).unwrap()
}

fn algorithms() -> Vec<AlgorithmConfig> {
    vec![
        AlgorithmConfig::HillClimbing,
        AlgorithmConfig::Annealing(AnnealingParameters {
            initial_temperature: 1e11,
            cooling_rate: 0.95,
        }),
        AlgorithmConfig::Genetic(GeneticParameters {
            population_size: 12,
            elite_survivors: 4,
            mutation_offspring: 3,
        }),
    ]
}

#[test]
fn test_optimal_never_gets_worse() {
    for config in algorithms() {
        let mut problem = problem(1);
        let mut algorithm = build_algorithm(&config, &mut problem, 7).unwrap();
        assert_monotonic(algorithm.as_mut(), &mut problem, 40);
    }
}

#[test]
fn test_evaluations_bounded_by_iterations() {
    for (config, (per_step, initial)) in algorithms().into_iter().zip([(1, 1), (1, 1), (8, 12)]) {
        let mut problem = problem(2);
        let mut algorithm = build_algorithm(&config, &mut problem, 3).unwrap();
        assert_eq!(problem.evaluations(), initial, "{}", config.name());
        for _ in 0..10 {
            algorithm.train(&mut problem).unwrap();
        }
        assert_eq!(
            problem.evaluations(),
            initial + 10 * per_step,
            "{}",
            config.name()
        );
    }
}

#[test]
fn test_optimal_weights_fit_the_network() {
    for config in algorithms() {
        let mut problem = problem(4);
        let mut algorithm = build_algorithm(&config, &mut problem, 5).unwrap();
        algorithm.train(&mut problem).unwrap();
        let optimal = algorithm.optimal();
        assert_eq!(optimal.weights().len(), problem.dimension());
        assert_eq!(
            problem.evaluate(optimal.weights()).unwrap(),
            optimal.fitness()
        );
    }
}

#[test]
fn test_genetic_algorithm_without_population() {
    let mut problem = problem(5);
    let parameters = GeneticParameters {
        population_size: 0,
        elite_survivors: 0,
        mutation_offspring: 0,
    };
    let err = GeneticAlgorithm::new(&mut problem, parameters, 0).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
    assert_eq!(problem.evaluations(), 0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn test_monotonic_for_any_seed(seed in any::<u64>(), which in 0usize..3) {
        let config = algorithms()[which];
        let mut problem = problem(seed);
        let mut algorithm = build_algorithm(&config, &mut problem, seed).unwrap();
        let mut last = algorithm.optimal().fitness();
        for _ in 0..15 {
            let best = algorithm.train(&mut problem).unwrap();
            prop_assert!(best >= last);
            last = best;
        }
    }
}
