use std::io::{Error, ErrorKind};

use crate::estimation::{ConfInterval, EstimateError, Estimator, IntervalEstimator};
use crate::output::ProgressSink;
use crate::replication::runner::ReplicationRunner;
use crate::replication::trace::{RunTrace, Snapshot};
use crate::rng::{SeedMode, UniformSource};

/// Final statistics of one simulation run.
#[derive(Debug, Clone)]
pub struct Report {
    pub reps: u64,
    pub mean: f64,
    pub interval: Option<ConfInterval>,
    pub required_reps: Option<u64>,
    pub epsilon: f64,
}

impl Report {
    /// Emits the plain-text result lines through the sink.
    pub fn write_summary(&self, sink: &mut dyn ProgressSink) {
        sink.summary(&format!("Average net gain: {:.3}", self.mean));
        if let Some(interval) = &self.interval {
            sink.summary(&format!("with {interval}"));
        }
        if let Some(required) = self.required_reps {
            sink.summary(&format!(
                "Est. # of repetitions for +/- {} accuracy: {}",
                self.epsilon, required
            ));
        }
    }
}

/// Sequential driver composing the runner, the estimator and a uniform
/// source into one simulation run.
///
/// Replications run strictly one after another: they share a single stream
/// whose state must advance deterministically between them, which is what
/// makes runs reproducible. The estimator is mutated only here; a parallel
/// variant would need per-worker sub-streams and a serializing aggregator.
pub struct Simulation {
    runner: ReplicationRunner,
    estimator: IntervalEstimator,
    source: Box<dyn UniformSource>,
    reps: u64,
    trial: bool,
    confint: bool,
    epsilon: f64,
    sample_frequency: u64,
    trace: RunTrace,
}

impl Simulation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        runner: ReplicationRunner,
        estimator: IntervalEstimator,
        source: Box<dyn UniformSource>,
        reps: u64,
        trial: bool,
        confint: bool,
        epsilon: f64,
        sample_frequency: u64,
    ) -> Result<Self, Error> {
        if reps == 0 {
            return Err(Error::new(ErrorKind::InvalidInput, "reps must be > 0"));
        }
        if sample_frequency == 0 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "sample_frequency must be > 0",
            ));
        }
        Ok(Self {
            runner,
            estimator,
            source,
            reps,
            trial,
            confint,
            epsilon,
            sample_frequency,
            trace: RunTrace::default(),
        })
    }

    /// Runs every replication, feeding payoffs to the estimator one at a
    /// time, and assembles the final [`Report`].
    ///
    /// Trial runs keep the source's default seeding so the projection is
    /// reproducible; production runs re-seed the runner's stream first so
    /// they are independent of any trial that came before.
    pub fn run(&mut self, sink: &mut dyn ProgressSink) -> Result<Report, EstimateError> {
        if !self.trial {
            self.source
                .init_generator(self.runner.stream(), SeedMode::NewSeed);
        }

        for rep in 0..self.reps {
            let payoff = self.runner.run_one(self.source.as_mut(), sink);
            self.estimator.add(payoff);
            sink.replication(rep + 1, payoff);

            if (rep + 1) % self.sample_frequency == 0 {
                self.trace.push(self.snapshot(rep + 1));
            }
        }

        let interval = if self.confint {
            Some(self.estimator.conf_interval()?)
        } else {
            None
        };
        let required_reps = if self.trial {
            Some(self.estimator.required_reps(self.epsilon, false)?)
        } else {
            None
        };

        Ok(Report {
            reps: self.reps,
            mean: self.estimator.mean(),
            interval,
            required_reps,
            epsilon: self.epsilon,
        })
    }

    pub fn trace(&self) -> &RunTrace {
        &self.trace
    }

    fn snapshot(&self, reps_completed: u64) -> Snapshot {
        let half_width = match self.estimator.conf_interval() {
            Ok(ci) => (ci.high - ci.low) / 2.0,
            Err(_) => f64::NAN,
        };
        Snapshot {
            reps_completed,
            mean: self.estimator.mean(),
            half_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::NullSink;
    use crate::rng::StreamRng;
    use crate::testing::stubs::ScriptedSource;

    const EPS: f64 = 1e-9;

    fn scripted_simulation(reps: u64, trial: bool, confint: bool) -> Simulation {
        // Two three-flip replications (HHH then TTT), then ten mixed
        // seven-flip ones, all with payoff 5.99 or 1.99.
        let mut values = vec![0.1, 0.1, 0.1, 0.9, 0.9, 0.9];
        for _ in 0..10 {
            values.extend_from_slice(&[0.1, 0.9, 0.1, 0.9, 0.1, 0.1, 0.1]);
        }
        Simulation::new(
            ReplicationRunner::new(1),
            IntervalEstimator::p95(),
            Box::new(ScriptedSource::new(values)),
            reps,
            trial,
            confint,
            0.005,
            1,
        )
        .unwrap()
    }

    #[test]
    fn rejects_zero_reps_and_zero_sample_frequency() {
        let bad_reps = Simulation::new(
            ReplicationRunner::new(1),
            IntervalEstimator::p95(),
            Box::new(StreamRng::new()),
            0,
            true,
            false,
            0.005,
            1,
        );
        assert!(bad_reps.is_err());

        let bad_freq = Simulation::new(
            ReplicationRunner::new(1),
            IntervalEstimator::p95(),
            Box::new(StreamRng::new()),
            10,
            true,
            false,
            0.005,
            0,
        );
        assert!(bad_freq.is_err());
    }

    #[test]
    fn mean_over_scripted_replications() {
        let mut sim = scripted_simulation(4, true, false);
        let report = sim.run(&mut NullSink).unwrap();
        // Payoffs 5.99, 5.99, 1.99, 1.99.
        assert!((report.mean - 3.99).abs() < EPS);
        assert_eq!(report.reps, 4);
        assert!(report.interval.is_none());
    }

    #[test]
    fn confint_request_on_single_rep_propagates_insufficient_data() {
        let mut sim = scripted_simulation(1, true, true);
        let err = sim.run(&mut NullSink).unwrap_err();
        assert_eq!(err, EstimateError::InsufficientData { observed: 1 });
    }

    #[test]
    fn trial_run_reports_required_reps() {
        let mut sim = scripted_simulation(4, true, false);
        let report = sim.run(&mut NullSink).unwrap();
        // Sample variance of {5.99, 5.99, 1.99, 1.99} is 16/3.
        let expected = ((16.0_f64 / 3.0) * 1.96 * 1.96 / (0.005 * 0.005)).floor() as u64;
        assert_eq!(report.required_reps, Some(expected));
    }

    #[test]
    fn production_run_skips_projection() {
        let mut sim = Simulation::new(
            ReplicationRunner::new(1),
            IntervalEstimator::p95(),
            Box::new(StreamRng::new()),
            20,
            false,
            false,
            0.005,
            5,
        )
        .unwrap();
        let report = sim.run(&mut NullSink).unwrap();
        assert!(report.required_reps.is_none());
        assert_eq!(sim.trace().len(), 4);
    }

    #[test]
    fn production_run_reseeds_away_from_trial_sequence() {
        let run = |trial: bool| {
            let mut sim = Simulation::new(
                ReplicationRunner::new(1),
                IntervalEstimator::p95(),
                Box::new(StreamRng::new()),
                50,
                trial,
                false,
                0.005,
                50,
            )
            .unwrap();
            sim.run(&mut NullSink).unwrap().mean
        };
        let trial_mean = run(true);
        let trial_mean_again = run(true);
        let production_mean = run(false);
        assert_eq!(trial_mean, trial_mean_again);
        assert_ne!(trial_mean, production_mean);
    }

    #[test]
    fn trace_snapshot_cadence_and_content() {
        let mut sim = scripted_simulation(4, true, false);
        sim.run(&mut NullSink).unwrap();

        assert_eq!(sim.trace().len(), 4);
        let first = sim.trace().latest().unwrap();
        assert_eq!(first.reps_completed, 4);
        assert!((first.mean - 3.99).abs() < EPS);
        assert!(first.half_width.is_finite());
    }

    #[test]
    fn first_snapshot_has_undefined_half_width() {
        let mut sim = scripted_simulation(1, false, false);
        sim.run(&mut NullSink).unwrap();
        assert!(sim.trace().latest().unwrap().half_width.is_nan());
    }

    #[test]
    fn report_summary_lines() {
        let mut sim = scripted_simulation(4, true, true);
        let report = sim.run(&mut NullSink).unwrap();

        struct Collect(Vec<String>);
        impl crate::output::ProgressSink for Collect {
            fn flip(&mut self, _heads: bool) {}
            fn replication(&mut self, _index: u64, _payoff: f64) {}
            fn summary(&mut self, line: &str) {
                self.0.push(line.to_string());
            }
        }

        let mut sink = Collect(Vec::new());
        report.write_summary(&mut sink);
        assert_eq!(sink.0[0], "Average net gain: 3.990");
        assert!(sink.0[1].starts_with("with 95% Confidence Interval [ "));
        assert!(sink.0[2].starts_with("Est. # of repetitions for +/- 0.005 accuracy: "));
    }
}
