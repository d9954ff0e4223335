use nnopt::{
    config::{AlgorithmConfig, ExperimentConfig},
    dataset::{DataSet, Instance, Label},
    harness::Experiment,
    network::Topology,
    report,
    search::{AnnealingParameters, GeneticParameters},
};
use tracing_subscriber::EnvFilter;

fn xor() -> nnopt::Result<DataSet> {
    let rows = [
        ([0.0, 0.0], 0.0),
        ([0.0, 1.0], 1.0),
        ([1.0, 0.0], 1.0),
        ([1.0, 1.0], 0.0),
    ];
    DataSet::new(
        rows.iter()
            .map(|(input, output)| Instance::labeled(input.to_vec(), Label::scalar(*output)))
            .collect(),
    )
}

fn main() -> nnopt::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let config = ExperimentConfig {
        topology: Topology::new(2, 3, 1)?,
        training_iterations: 2000,
        algorithms: vec![
            AlgorithmConfig::HillClimbing,
            AlgorithmConfig::Annealing(AnnealingParameters {
                initial_temperature: 10.0,
                cooling_rate: 0.995,
            }),
            AlgorithmConfig::Genetic(GeneticParameters {
                population_size: 50,
                elite_survivors: 10,
                mutation_offspring: 20,
            }),
        ],
        seed: 42,
        ..ExperimentConfig::default()
    };
    let experiment = Experiment::new(config, xor()?, xor()?)?;
    let reports = experiment.run().into_iter().collect::<nnopt::Result<Vec<_>>>()?;
    for r in &reports {
        println!(
            "{}: final error {:.4} after {} evaluations",
            r.name,
            r.error_trace.last().copied().unwrap_or_default(),
            r.evaluations
        );
    }
    println!("{}", report::render(&reports));
    Ok(())
}
