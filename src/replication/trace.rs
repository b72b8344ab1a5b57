use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;

/// Running statistics captured after a fixed number of replications.
///
/// `half_width` is NaN until the estimator has seen enough observations
/// for the confidence interval to be defined.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub reps_completed: u64,
    pub mean: f64,
    pub half_width: f64,
}

pub enum TraceFormat {
    Csv,
    Tsv,
    Json,
}

impl TraceFormat {
    /// Picks a format from a path's extension; anything unrecognized
    /// falls back to CSV.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some("tsv") => TraceFormat::Tsv,
            Some("json") => TraceFormat::Json,
            _ => TraceFormat::Csv,
        }
    }
}

/// Periodic trace of the running estimate over a simulation run.
pub struct RunTrace {
    entries: Vec<Snapshot>,
}

impl RunTrace {
    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.push(snapshot)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<Snapshot> {
        self.entries.last().cloned()
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, fmt: TraceFormat) -> Result<(), Error> {
        match fmt {
            TraceFormat::Csv => self.export_with_delimiter(path, ','),
            TraceFormat::Tsv => self.export_with_delimiter(path, '\t'),
            TraceFormat::Json => self.export_json(path),
        }
    }

    fn export_with_delimiter<P: AsRef<Path>>(&self, path: P, delimiter: char) -> Result<(), Error> {
        let mut w = File::create(path)?;
        writeln!(w, "reps_completed{d}mean{d}half_width", d = delimiter)?;
        for s in &self.entries {
            writeln!(
                w,
                "{}{d}{:.6}{d}{:.6}",
                s.reps_completed,
                s.mean,
                s.half_width,
                d = delimiter
            )?;
        }
        Ok(())
    }

    fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut w = File::create(path)?;
        writeln!(w, "[")?;
        for (i, s) in self.entries.iter().enumerate() {
            // NaN has no JSON literal; an undefined half-width becomes null.
            let hw = if s.half_width.is_nan() {
                "null".to_string()
            } else {
                format!("{}", s.half_width)
            };
            writeln!(
                w,
                "  {{\"reps_completed\":{},\"mean\":{},\"half_width\":{}}}{}",
                s.reps_completed,
                s.mean,
                hw,
                if i + 1 == self.entries.len() { "" } else { "," }
            )?;
        }
        writeln!(w, "]")?;
        Ok(())
    }
}

impl Default for RunTrace {
    fn default() -> Self {
        Self { entries: vec![] }
    }
}
