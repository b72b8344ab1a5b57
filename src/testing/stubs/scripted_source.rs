use crate::rng::{SeedMode, StreamId, UniformSource};

/// Uniform source that replays a fixed sequence of draws.
///
/// Stream ids are ignored; every stream reads the same script. Seeding
/// calls rewind to the start, mirroring a deterministic re-seed. Panics
/// when the script runs out, so a test that under-provisions draws fails
/// loudly instead of looping.
pub struct ScriptedSource {
    values: Vec<f64>,
    idx: usize,
}

impl ScriptedSource {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, idx: 0 }
    }

    /// Number of draws consumed so far.
    pub fn draws(&self) -> usize {
        self.idx
    }
}

impl UniformSource for ScriptedSource {
    fn next_value(&mut self, _stream: StreamId) -> f64 {
        let v = self.values[self.idx];
        self.idx += 1;
        v
    }

    fn init_default(&mut self) {
        self.idx = 0;
    }

    fn init_generator(&mut self, _stream: StreamId, _mode: SeedMode) {
        self.idx = 0;
    }
}

/// Uniform source that returns the same value forever.
pub struct ConstSource {
    value: f64,
    draws: usize,
}

impl ConstSource {
    pub fn new(value: f64) -> Self {
        Self { value, draws: 0 }
    }

    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl UniformSource for ConstSource {
    fn next_value(&mut self, _stream: StreamId) -> f64 {
        self.draws += 1;
        self.value
    }

    fn init_default(&mut self) {
        self.draws = 0;
    }

    fn init_generator(&mut self, _stream: StreamId, _mode: SeedMode) {
        self.draws = 0;
    }
}
