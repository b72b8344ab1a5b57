use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use crate::estimation::IntervalEstimator;
use crate::output::{Verbosity, WriterSink};
use crate::replication::{ReplicationRunner, Simulation, TraceFormat};
use crate::rng::{StreamId, StreamRng, UniformSource};

/// Stream consumed by the wagering replications.
const WAGER_STREAM: StreamId = 1;

#[derive(Debug, Parser)]
#[command(
    name = "wagersim",
    about = "Replicated coin-flip wagering simulation with streaming statistics",
    version
)]
pub struct Cli {
    /// Number of replications to run.
    #[arg(short = 'n', long = "num")]
    pub num: u64,

    /// Trial run: keep the default seeding and project the number of
    /// replications required for the target accuracy.
    #[arg(short = 't', long = "trial")]
    pub trial: bool,

    /// Print the confidence interval of the point estimator.
    #[arg(short = 'i', long = "confint")]
    pub confint: bool,

    /// Verbosity: 0 summary, 1 per-replication payoffs, 2 per-flip outcomes.
    #[arg(
        short = 'd',
        long = "debug",
        default_value_t = 0,
        value_parser = clap::value_parser!(u8).range(0..=2)
    )]
    pub debug: u8,

    /// Target confidence-interval half-width for the trial projection.
    #[arg(long, default_value_t = 0.005)]
    pub epsilon: f64,

    /// Export the running-statistics trace; format follows the extension
    /// (csv, tsv or json; csv otherwise).
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}

pub fn run_from_env() -> Result<()> {
    run(Cli::parse())
}

pub fn run(cli: Cli) -> Result<()> {
    if !cli.epsilon.is_finite() || cli.epsilon <= 0.0 {
        bail!("epsilon must be a positive finite number, got {}", cli.epsilon);
    }

    let mut source = StreamRng::new();
    source.init_default();

    // Roughly one trace snapshot per percent of progress.
    let sample_frequency = (cli.num / 100).max(1);

    let mut simulation = Simulation::new(
        ReplicationRunner::new(WAGER_STREAM),
        IntervalEstimator::p95(),
        Box::new(source),
        cli.num,
        cli.trial,
        cli.confint,
        cli.epsilon,
        sample_frequency,
    )?;

    let mut sink = WriterSink::new(Verbosity::from(cli.debug), io::stdout().lock());
    let report = simulation
        .run(&mut sink)
        .context("too few replications for the requested statistics")?;
    report.write_summary(&mut sink);

    if let Some(path) = &cli.export {
        simulation
            .trace()
            .export(path, TraceFormat::from_path(path))
            .with_context(|| format!("failed to export trace to {}", path.display()))?;
    }
    Ok(())
}
