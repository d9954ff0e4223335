use std::process::ExitCode;

use nnopt::{
    config::ExperimentConfig,
    harness::{Experiment, RunReport},
    report,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let experiment = match Experiment::load(ExperimentConfig::default()) {
        Ok(experiment) => experiment,
        Err(err) => {
            error!(error = %err, "cannot load the digits data");
            return ExitCode::FAILURE;
        }
    };

    let mut reports: Vec<RunReport> = Vec::new();
    let mut failed = false;
    for (algorithm, outcome) in experiment
        .config()
        .algorithms
        .iter()
        .zip(experiment.run())
    {
        match outcome {
            Ok(report) => {
                print!("{}", report::render_error_trace(&report));
                reports.push(report);
            }
            Err(err) => {
                error!(algorithm = algorithm.name(), error = %err, "run failed");
                failed = true;
            }
        }
    }

    println!("{}", report::render(&reports));
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
