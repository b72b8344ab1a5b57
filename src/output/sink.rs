use std::io::Write;

/// How much per-run detail the sink lets through.
///
/// Levels nest: `Flips` implies `Replications` implies `Summary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Final summary lines only.
    Summary,
    /// Plus one line per replication payoff.
    Replications,
    /// Plus the individual heads/tails outcome of every flip.
    Flips,
}

impl From<u8> for Verbosity {
    fn from(level: u8) -> Self {
        match level {
            0 => Verbosity::Summary,
            1 => Verbosity::Replications,
            _ => Verbosity::Flips,
        }
    }
}

/// Destination for progress and result lines, injected into the driver.
///
/// Verbosity gating lives inside the sink, so the simulation code reports
/// everything unconditionally and stays free of output configuration.
pub trait ProgressSink {
    /// One coin flip inside the current replication.
    fn flip(&mut self, heads: bool);

    /// A finished replication and its payoff. `index` is 1-based.
    fn replication(&mut self, index: u64, payoff: f64);

    /// A final summary line.
    fn summary(&mut self, line: &str);
}

/// Sink that writes gated plain-text lines to any [`Write`].
pub struct WriterSink<W: Write> {
    verbosity: Verbosity,
    writer: W,
    open_flip_line: bool,
}

impl<W: Write> WriterSink<W> {
    pub fn new(verbosity: Verbosity, writer: W) -> Self {
        Self {
            verbosity,
            writer,
            open_flip_line: false,
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    fn end_flip_line(&mut self) {
        if self.open_flip_line {
            let _ = writeln!(self.writer);
            self.open_flip_line = false;
        }
    }
}

impl<W: Write> ProgressSink for WriterSink<W> {
    fn flip(&mut self, heads: bool) {
        if self.verbosity >= Verbosity::Flips {
            let _ = write!(self.writer, "{}", if heads { "H " } else { "T " });
            self.open_flip_line = true;
        }
    }

    fn replication(&mut self, index: u64, payoff: f64) {
        self.end_flip_line();
        if self.verbosity >= Verbosity::Replications {
            let _ = writeln!(self.writer, "Repetition {index} : {payoff:.2}\n");
        }
    }

    fn summary(&mut self, line: &str) {
        self.end_flip_line();
        let _ = writeln!(self.writer, "{line}");
    }
}

/// Sink that drops everything; for tests and headless callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn flip(&mut self, _heads: bool) {}
    fn replication(&mut self, _index: u64, _payoff: f64) {}
    fn summary(&mut self, _line: &str) {}
}
