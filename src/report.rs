//! Plain-text rendering of run reports.

use std::fmt::{self, Write};

use crate::harness::{PhaseScore, RunReport};

/// Renders the training-set results of a run, training and testing times included.
pub struct TrainingSummary<'a>(pub &'a RunReport);

/// Renders the test-set results of a run.
pub struct TestSummary<'a>(pub &'a RunReport);

fn write_counts(f: &mut fmt::Formatter<'_>, name: &str, score: &PhaseScore) -> fmt::Result {
    writeln!(f, "Results for {name}:")?;
    writeln!(f, "Correctly classified {} instances.", score.correct)?;
    writeln!(f, "Incorrectly classified {} instances.", score.incorrect)?;
    writeln!(
        f,
        "Percent correctly classified: {:.3}%",
        score.percent_correct()
    )
}

impl fmt::Display for TrainingSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        write_counts(f, &report.name, &report.train)?;
        writeln!(
            f,
            "Training time: {:.3} seconds",
            report.training_time.as_secs_f64()
        )?;
        writeln!(
            f,
            "Testing time: {:.3} seconds",
            report.train.elapsed.as_secs_f64()
        )
    }
}

impl fmt::Display for TestSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        write_counts(f, &report.name, &report.test)?;
        writeln!(
            f,
            "Testing time: {:.3} seconds",
            report.test.elapsed.as_secs_f64()
        )
    }
}

/// Render every report: training-set results first, then a `Test results:` section.
pub fn render(reports: &[RunReport]) -> String {
    let mut out = String::new();
    for report in reports {
        // Writing to a String never fails.
        let _ = write!(out, "\n{}", TrainingSummary(report));
    }
    out.push_str("\nTest results:\n");
    for report in reports {
        let _ = write!(out, "\n{}", TestSummary(report));
    }
    out
}

/// Render the error trace of a run, one value per line, as logged after every iteration.
pub fn render_error_trace(report: &RunReport) -> String {
    let mut out = format!("\nError results for {}\n---------------------------\n", report.name);
    for error in &report.error_trace {
        let _ = writeln!(out, "{error:.3}");
    }
    out
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{network::WeightVector, search::Candidate};

    fn report() -> RunReport {
        let mut problem = crate::search::testing::Sphere::new(vec![0.0]);
        RunReport {
            name: "RHC".to_string(),
            training_time: Duration::from_millis(1500),
            train: PhaseScore {
                correct: 3,
                incorrect: 1,
                elapsed: Duration::from_millis(20),
            },
            test: PhaseScore {
                correct: 1,
                incorrect: 1,
                elapsed: Duration::from_millis(5),
            },
            error_trace: vec![2.0, 1.25],
            evaluations: 3,
            optimal: Candidate::evaluate(&mut problem, WeightVector::from(vec![0.0])).unwrap(),
        }
    }

    #[test]
    fn training_summary() {
        let text = TrainingSummary(&report()).to_string();
        assert_eq!(
            text,
            "Results for RHC:\n\
             Correctly classified 3 instances.\n\
             Incorrectly classified 1 instances.\n\
             Percent correctly classified: 75.000%\n\
             Training time: 1.500 seconds\n\
             Testing time: 0.020 seconds\n"
        );
    }

    #[test]
    fn test_section_uses_test_counts_only() {
        let text = render(&[report()]);
        let (_, test) = text.split_once("Test results:\n").unwrap();
        assert!(test.contains("Correctly classified 1 instances."));
        assert!(test.contains("Percent correctly classified: 50.000%"));
        assert!(test.contains("Testing time: 0.005 seconds"));
    }

    #[test]
    fn error_trace() {
        let text = render_error_trace(&report());
        assert!(text.ends_with("2.000\n1.250\n"));
    }
}
